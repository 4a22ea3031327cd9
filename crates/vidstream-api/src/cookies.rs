//! Session cookie construction
//!
//! Login and refresh set two http-only cookies carrying the token pair;
//! logout clears them. The Secure flag comes from configuration so local
//! development without TLS stays possible.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use vidstream_common::CookieSettings;

/// Cookie name for the access token
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";

/// Cookie name for the refresh token
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// Build an http-only session cookie
fn session_cookie(name: &'static str, value: String, settings: &CookieSettings) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .secure(settings.secure)
        .same_site(SameSite::Strict)
        .build()
}

/// Build a removal cookie matching the session cookie attributes
fn removal_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, ""))
        .path("/")
        .build()
}

/// Set both session cookies on the jar
pub fn apply_session_cookies(
    jar: CookieJar,
    access_token: &str,
    refresh_token: &str,
    settings: &CookieSettings,
) -> CookieJar {
    jar.add(session_cookie(
        ACCESS_TOKEN_COOKIE,
        access_token.to_string(),
        settings,
    ))
    .add(session_cookie(
        REFRESH_TOKEN_COOKIE,
        refresh_token.to_string(),
        settings,
    ))
}

/// Clear both session cookies from the jar
pub fn clear_session_cookies(jar: CookieJar) -> CookieJar {
    jar.remove(removal_cookie(ACCESS_TOKEN_COOKIE))
        .remove(removal_cookie(REFRESH_TOKEN_COOKIE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> CookieSettings {
        CookieSettings { secure: true }
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie(ACCESS_TOKEN_COOKIE, "token".to_string(), &settings());

        assert_eq!(cookie.name(), "accessToken");
        assert_eq!(cookie.value(), "token");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[test]
    fn test_secure_flag_follows_settings() {
        let cookie = session_cookie(
            ACCESS_TOKEN_COOKIE,
            "token".to_string(),
            &CookieSettings { secure: false },
        );
        assert_eq!(cookie.secure(), Some(false));
    }

    #[test]
    fn test_apply_session_cookies_sets_both() {
        let jar = apply_session_cookies(CookieJar::new(), "access", "refresh", &settings());

        assert_eq!(jar.get(ACCESS_TOKEN_COOKIE).map(Cookie::value), Some("access"));
        assert_eq!(jar.get(REFRESH_TOKEN_COOKIE).map(Cookie::value), Some("refresh"));
    }

    #[test]
    fn test_clear_session_cookies_removes_both() {
        let jar = apply_session_cookies(CookieJar::new(), "access", "refresh", &settings());
        let jar = clear_session_cookies(jar);

        assert!(jar.get(ACCESS_TOKEN_COOKIE).is_none());
        assert!(jar.get(REFRESH_TOKEN_COOKIE).is_none());
    }
}
