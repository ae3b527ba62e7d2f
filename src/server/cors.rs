//! Cross-origin request policy

/// Methods advertised on preflight responses
pub const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";

/// Request headers advertised on preflight responses
pub const ALLOWED_HEADERS: &str = "Content-Type";

/// Set of origins allowed to call the API from a browser
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorsPolicy {
    allowed: Vec<String>,
}

impl CorsPolicy {
    /// Create a policy from a list of origins (`*` allows any)
    #[must_use]
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: origins.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether any origin is allowed at all
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        !self.allowed.is_empty()
    }

    /// Value for `Access-Control-Allow-Origin`, if the origin is allowed
    #[must_use]
    pub fn allow_origin(&self, origin: Option<&str>) -> Option<String> {
        let origin = origin?;
        if self.allowed.iter().any(|a| a == "*") {
            Some("*".to_string())
        } else if self.allowed.iter().any(|a| a == origin) {
            Some(origin.to_string())
        } else {
            None
        }
    }

    /// Response headers for a request from `origin`
    ///
    /// Empty when the origin is not allowed. Preflight responses also
    /// advertise the allowed methods and headers.
    #[must_use]
    pub fn headers(&self, origin: Option<&str>, preflight: bool) -> Vec<(&'static str, String)> {
        let Some(allow) = self.allow_origin(origin) else {
            return Vec::new();
        };

        let echoes_origin = allow != "*";
        let mut headers = vec![("Access-Control-Allow-Origin", allow)];
        if echoes_origin {
            headers.push(("Vary", "Origin".to_string()));
        }
        if preflight {
            headers.push(("Access-Control-Allow-Methods", ALLOWED_METHODS.to_string()));
            headers.push(("Access-Control-Allow-Headers", ALLOWED_HEADERS.to_string()));
        }
        headers
    }
}
