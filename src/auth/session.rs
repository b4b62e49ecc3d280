// Session cookie handling

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "token";

/// Builds the `Set-Cookie` directives for the session token.
///
/// `secure` must be enabled whenever the service is reached over HTTPS.
#[derive(Debug, Clone, Copy)]
pub struct SessionCookie {
    secure: bool,
}

impl SessionCookie {
    pub fn new(secure: bool) -> Self {
        Self { secure }
    }

    /// Add the session cookie to the outgoing jar
    pub fn attach(&self, jar: CookieJar, token: String) -> CookieJar {
        jar.add(self.build(token))
    }

    /// Replace the session cookie with an expired, empty one
    pub fn revoke(&self, jar: CookieJar) -> CookieJar {
        let mut cookie = self.build(String::new());
        cookie.make_removal();
        jar.add(cookie)
    }

    /// Session token carried by an incoming request, if any
    pub fn token(jar: &CookieJar) -> Option<String> {
        jar.get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
    }

    fn build(&self, value: String) -> Cookie<'static> {
        // Cross-site cookies require SameSite=None, which browsers only accept with Secure
        let same_site = if self.secure {
            SameSite::None
        } else {
            SameSite::Lax
        };

        Cookie::build((SESSION_COOKIE, value))
            .http_only(true)
            .secure(self.secure)
            .same_site(same_site)
            .path("/")
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderMap, HeaderValue};

    #[test]
    fn test_attach_sets_http_only_cookie() {
        let jar = SessionCookie::new(false).attach(CookieJar::new(), "abc".to_string());
        let cookie = jar.get(SESSION_COOKIE).unwrap();

        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(false));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[test]
    fn test_secure_flag_is_configurable() {
        let jar = SessionCookie::new(true).attach(CookieJar::new(), "abc".to_string());
        let cookie = jar.get(SESSION_COOKIE).unwrap();

        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::None));
    }

    #[test]
    fn test_revoke_emits_removal_cookie() {
        let jar = SessionCookie::new(false).revoke(CookieJar::new());
        let cookie = jar.get(SESSION_COOKIE).unwrap();

        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age().map(|age| age.is_zero()), Some(true));
        assert_eq!(SessionCookie::token(&jar), None);
    }

    #[test]
    fn test_token_read_from_request_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark; token=xyz"));
        let jar = CookieJar::from_headers(&headers);

        assert_eq!(SessionCookie::token(&jar).as_deref(), Some("xyz"));
        assert_eq!(SessionCookie::token(&CookieJar::new()), None);
    }
}
