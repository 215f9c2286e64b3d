use std::collections::HashMap;

/// A request as seen by the router.
///
/// Built once from the request line of a connection. Headers and bodies are
/// never interpreted, so only the method, the decoded path and the query
/// arguments are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingRequest {
    /// The method token exactly as sent (e.g. "GET")
    pub method: String,
    /// Percent-decoded path without the query string (e.g. "/app/hello")
    pub path: String,
    /// Query arguments decoded from the raw query string
    pub query: HashMap<String, String>,
}

/// Builder for constructing IncomingRequest values.
pub struct RequestBuilder {
    method: String,
    path: Option<String>,
    query: HashMap<String, String>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: "GET".to_string(),
            path: None,
            query: HashMap::new(),
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> Result<IncomingRequest, &'static str> {
        Ok(IncomingRequest {
            method: self.method,
            path: self.path.ok_or("path missing")?,
            query: self.query,
        })
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl IncomingRequest {
    /// Retrieves a query argument by name.
    ///
    /// # Returns
    ///
    /// `Some(&str)` with the decoded value if present, `None` otherwise.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(|v| v.as_str())
    }
}
