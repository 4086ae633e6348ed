//! `Set-Cookie` directives: the session cookie we emit and filtering of the
//! ones a downstream hop sends back.

/// Prefix of every relay's session cookie name.
pub const SESSION_COOKIE_PREFIX: &str = "SESSION_ID_SERVICE_";

/// The session cookie owned by one relay instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    name: String,
    secure: bool,
}

impl SessionCookie {
    /// Session cookie for the service called `service_name`.
    pub fn for_service(service_name: &str, secure: bool) -> Self {
        Self {
            name: format!("{}{}", SESSION_COOKIE_PREFIX, service_name),
            secure,
        }
    }

    /// Cookie name, e.g. `SESSION_ID_SERVICE_A`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the `Secure` attribute is emitted.
    pub fn is_secure(&self) -> bool {
        self.secure
    }

    /// Build the `Set-Cookie` directive carrying `session_id`.
    pub fn set_cookie(&self, session_id: &str) -> String {
        let mut directive = format!("{}={}; Path=/; HttpOnly", self.name, session_id);
        if self.secure {
            directive.push_str("; Secure");
        }
        directive.push_str("; SameSite=Lax");
        directive
    }
}

/// Keep the directives whose text does not mention `excluded`.
///
/// Returns `None` when there was no list to filter. The match is a plain
/// substring search over the whole directive, not a cookie-name comparison.
pub fn filter_set_cookie(set_cookies: Option<&[String]>, excluded: &str) -> Option<Vec<String>> {
    set_cookies.map(|list| {
        list.iter()
            .filter(|directive| !directive.contains(excluded))
            .cloned()
            .collect()
    })
}

/// Name and value of a `Set-Cookie` directive, attributes ignored.
pub fn cookie_pair(directive: &str) -> Option<(&str, &str)> {
    let pair = directive.split(';').next()?.trim();
    let (name, value) = pair.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some((name, value.trim()))
    }
}
