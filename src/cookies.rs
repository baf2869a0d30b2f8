use cookie::{Cookie, CookieJar};
use parking_lot::RwLock;
use std::sync::Arc;

pub const CSRF_COOKIE: &str = "csrftoken";

/// Read side of a cookie store, consulted by the client on every request.
pub trait CookieSource: Send + Sync {
    fn cookie(&self, name: &str) -> Option<String>;

    /// Value for a `Cookie` request header, if any cookies are held.
    fn cookie_header(&self) -> Option<String>;

    fn csrf_token(&self) -> Option<String> {
        self.cookie(CSRF_COOKIE)
    }
}

/// Thread-safe jar that can be updated while clients hold it.
#[derive(Clone, Default)]
pub struct SharedCookieJar {
    inner: Arc<RwLock<CookieJar>>,
}

impl SharedCookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a jar from a `Cookie` header such as `csrftoken=abc; sessionid=xyz`.
    /// Malformed pairs are skipped.
    pub fn from_header(header: &str) -> Self {
        let jar = Self::new();
        jar.absorb_header(header);
        jar
    }

    pub fn absorb_header(&self, header: &str) {
        let mut guard = self.inner.write();
        for cookie in Cookie::split_parse(header.to_string()).flatten() {
            guard.add_original(cookie.into_owned());
        }
    }

    /// Stores the cookie carried by a `Set-Cookie` header value.
    pub fn absorb_set_cookie(&self, header: &str) -> bool {
        match Cookie::parse(header.to_string()) {
            Ok(cookie) => {
                self.inner.write().add(cookie.into_owned());
                true
            }
            Err(_) => false,
        }
    }

    pub fn set(&self, name: impl Into<String>, value: impl Into<String>) {
        self.inner
            .write()
            .add(Cookie::new(name.into(), value.into()));
    }

    pub fn set_csrf_token(&self, token: impl Into<String>) {
        self.set(CSRF_COOKIE, token);
    }

    pub fn remove(&self, name: &str) {
        self.inner.write().remove(Cookie::from(name.to_string()));
    }

    pub fn len(&self) -> usize {
        self.inner.read().iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CookieSource for SharedCookieJar {
    fn cookie(&self, name: &str) -> Option<String> {
        self.inner
            .read()
            .get(name)
            .map(|cookie| cookie.value().to_string())
    }

    fn cookie_header(&self) -> Option<String> {
        let guard = self.inner.read();
        let mut pairs: Vec<String> = guard
            .iter()
            .map(|cookie| format!("{}={}", cookie.name(), cookie.value()))
            .collect();
        if pairs.is_empty() {
            return None;
        }
        pairs.sort();
        Some(pairs.join("; "))
    }
}

/// A source with no cookies at all; requests go out without CSRF header.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCookies;

impl CookieSource for NoCookies {
    fn cookie(&self, _name: &str) -> Option<String> {
        None
    }

    fn cookie_header(&self) -> Option<String> {
        None
    }
}
