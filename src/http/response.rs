use bytes::Bytes;

pub const TEXT_PLAIN: &str = "text/plain";
pub const APPLICATION_JSON: &str = "application/json";

/// HTTP status codes produced by the server.
///
/// - `Ok` (200): Request successful
/// - `BadRequest` (400): No parsable request line
/// - `NotFound` (404): Static resource absent
/// - `InternalServerError` (500): Handler or transport failure
/// - `BadGateway` (502): Upstream answered with a non-200 status
/// - `Other`: anything else, serialized with the reason "Unknown Status"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 500 Internal Server Error
    InternalServerError,
    /// 502 Bad Gateway
    BadGateway,
    Other(u16),
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use beacon::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::BadGateway.as_u16(), 502);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
            StatusCode::BadGateway => 502,
            StatusCode::Other(code) => *code,
        }
    }

    /// Returns the reason phrase written on the status line.
    ///
    /// # Example
    ///
    /// ```
    /// # use beacon::http::response::StatusCode;
    /// assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    /// assert_eq!(StatusCode::Other(418).reason_phrase(), "Unknown Status");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
            StatusCode::BadGateway => "Bad Gateway",
            StatusCode::Other(_) => "Unknown Status",
        }
    }
}

/// The result of routing one request.
///
/// Owned by the connection until it has been written, then dropped. The
/// body is always raw bytes; text is encoded before it gets here, so
/// `body.len()` is the value that goes out as `Content-Length`.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub content_type: String,
    pub body: Bytes,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .content_type("application/json")
///     .text("{}")
///     .build();
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    content_type: String,
    body: Bytes,
}

impl ResponseBuilder {
    /// Creates a new builder with an empty `text/plain` body.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            content_type: TEXT_PLAIN.to_string(),
            body: Bytes::new(),
        }
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Sets a text body, stored as its UTF-8 encoding.
    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.body = Bytes::from(body.into().into_bytes());
        self
    }

    /// Sets a binary body, stored untouched.
    pub fn bytes(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn build(self) -> Response {
        Response {
            status: self.status,
            content_type: self.content_type,
            body: self.body,
        }
    }
}

impl Response {
    /// Number of body bytes, as announced in `Content-Length`.
    pub fn content_length(&self) -> usize {
        self.body.len()
    }

    /// Creates a `text/plain` response.
    pub fn plain(status: StatusCode, body: impl Into<String>) -> Self {
        ResponseBuilder::new(status).text(body).build()
    }

    /// Creates a 200 `application/json` response from already-serialized JSON.
    pub fn json(body: impl Into<Bytes>) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .content_type(APPLICATION_JSON)
            .bytes(body)
            .build()
    }

    /// Creates the 400 answer for a connection without a parsable request line.
    pub fn bad_request() -> Self {
        Self::plain(StatusCode::BadRequest, "Bad Request")
    }

    /// Creates a 404 response naming the path that was asked for.
    pub fn not_found(path: &str) -> Self {
        Self::plain(StatusCode::NotFound, format!("File not found: {}", path))
    }

    /// Creates a 500 Internal Server Error response.
    pub fn internal_error() -> Self {
        Self::plain(StatusCode::InternalServerError, "Internal Server Error")
    }
}
