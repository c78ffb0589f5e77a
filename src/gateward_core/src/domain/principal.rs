use super::user::User;

/// The authenticated identity attached to a request after a successful
/// resolver call.
///
/// `was_modified` is the staleness signal: `true` when the caller's cached
/// version of the user (supplied alongside the credentials) lags the
/// server's current version, or when no cached version was supplied at all.
#[derive(Debug, Clone)]
pub struct Principal {
    pub user: User,
    pub was_modified: bool,
}
