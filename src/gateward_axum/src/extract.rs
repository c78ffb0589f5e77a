use std::collections::HashMap;

use axum::http::HeaderMap;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::Cookie;

use gateward_adapters::config::{
    API_KEY_HEADER, API_KEY_PARAM, API_USER_HEADER, API_USER_PARAM, CLIENT_VERSION_PARAM,
    SESSION_COOKIE_NAME,
};
use gateward_application::TokenCredentials;
use gateward_core::SessionId;

/// Token credentials from the `x-api-user`/`x-api-key` headers, falling
/// back to the `_id`/`apiToken` query parameters (the URL variant used by
/// redirect callbacks and webhooks). The optional `_v` parameter carries
/// the client's cached user version.
pub fn token_credentials(
    headers: &HeaderMap,
    query: &HashMap<String, String>,
) -> TokenCredentials {
    let user_id = headers
        .get(API_USER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .or_else(|| query.get(API_USER_PARAM).cloned());

    let token = headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .or_else(|| query.get(API_KEY_PARAM).cloned());

    let client_version = query
        .get(CLIENT_VERSION_PARAM)
        .and_then(|v| v.parse().ok());

    TokenCredentials {
        user_id,
        token,
        client_version,
    }
}

pub fn session(jar: &CookieJar) -> Option<SessionId> {
    jar.get(SESSION_COOKIE_NAME)
        .map(|cookie| SessionId::from_raw(cookie.value()))
}

pub fn session_cookie(session: &SessionId) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, session.as_str().to_owned()))
        .path("/")
        .http_only(true)
        .build()
}

pub fn session_removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn headers_win_over_query_parameters() {
        let mut headers = HeaderMap::new();
        headers.insert(API_USER_HEADER, HeaderValue::from_static("header-uid"));
        headers.insert(API_KEY_HEADER, HeaderValue::from_static("header-token"));

        let mut query = HashMap::new();
        query.insert(API_USER_PARAM.to_owned(), "query-uid".to_owned());
        query.insert(API_KEY_PARAM.to_owned(), "query-token".to_owned());
        query.insert(CLIENT_VERSION_PARAM.to_owned(), "3".to_owned());

        let credentials = token_credentials(&headers, &query);
        assert_eq!(credentials.user_id.as_deref(), Some("header-uid"));
        assert_eq!(credentials.token.as_deref(), Some("header-token"));
        assert_eq!(credentials.client_version, Some(3));
    }

    #[test]
    fn query_parameters_back_the_url_variant() {
        let mut query = HashMap::new();
        query.insert(API_USER_PARAM.to_owned(), "uid".to_owned());
        query.insert(API_KEY_PARAM.to_owned(), "token".to_owned());

        let credentials = token_credentials(&HeaderMap::new(), &query);
        assert_eq!(credentials.user_id.as_deref(), Some("uid"));
        assert_eq!(credentials.token.as_deref(), Some("token"));
        assert_eq!(credentials.client_version, None);
    }

    #[test]
    fn malformed_client_version_is_ignored() {
        let mut query = HashMap::new();
        query.insert(CLIENT_VERSION_PARAM.to_owned(), "not-a-number".to_owned());

        let credentials = token_credentials(&HeaderMap::new(), &query);
        assert_eq!(credentials.client_version, None);
    }
}
