use tracing::warn;

use crate::http::request::IncomingRequest;
use crate::http::response::{Response, StatusCode};

pub const DEFAULT_NAME: &str = "User";

/// Answers `/app/hello` with `{"message": "Hola <name>"}`.
pub fn greet(request: &IncomingRequest) -> Response {
    let name = request.query_param("name").unwrap_or(DEFAULT_NAME);

    match greeting_body(name) {
        Ok(body) => Response::json(body),
        Err(e) => {
            warn!(error = %e, "Failed to build greeting");
            Response::plain(
                StatusCode::InternalServerError,
                "Error processing hello request",
            )
        }
    }
}

/// Builds the greeting document. `name` is escaped as a JSON string value.
pub fn greeting_body(name: &str) -> serde_json::Result<String> {
    let message = serde_json::to_string(&format!("Hola {}", name))?;
    Ok(format!("{{\"message\": {}}}", message))
}
