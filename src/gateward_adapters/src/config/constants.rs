/// Header carrying the caller's user id for token auth.
pub const API_USER_HEADER: &str = "x-api-user";
/// Header carrying the caller's bearer token for token auth.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Query-parameter equivalents for contexts where header injection is
/// impractical (redirect callbacks, webhooks).
pub const API_USER_PARAM: &str = "_id";
pub const API_KEY_PARAM: &str = "apiToken";
/// Query parameter carrying the client's cached user version.
pub const CLIENT_VERSION_PARAM: &str = "_v";

pub const SESSION_COOKIE_NAME: &str = "session";

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
}
