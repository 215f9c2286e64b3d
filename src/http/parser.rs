use crate::http::request::IncomingRequest;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing but whitespace on the line
    Empty,
    /// Fewer than two space-separated tokens
    MissingTarget,
    /// The target path could not be percent-decoded into UTF-8
    InvalidTarget,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "empty request line"),
            ParseError::MissingTarget => write!(f, "request line has no target"),
            ParseError::InvalidTarget => write!(f, "request target is not valid UTF-8"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parses `METHOD SP TARGET [SP VERSION]` into an [`IncomingRequest`].
///
/// Only the request line matters here; headers are never looked at.
pub fn parse_request_line(line: &str) -> Result<IncomingRequest, ParseError> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let mut parts = line.split(' ').filter(|p| !p.is_empty());

    let method = parts.next().ok_or(ParseError::Empty)?;
    let target = parts.next().ok_or(ParseError::MissingTarget)?;

    let (path, query) = split_target(target);

    let path = urlencoding::decode(path)
        .map_err(|_| ParseError::InvalidTarget)?
        .into_owned();

    Ok(IncomingRequest {
        method: method.to_string(),
        path,
        query: parse_query(query),
    })
}

/// Splits a request target into its raw path and raw query, dropping any fragment.
fn split_target(target: &str) -> (&str, &str) {
    let target = target.split_once('#').map_or(target, |(t, _)| t);
    target.split_once('?').unwrap_or((target, ""))
}

fn parse_query(raw: &str) -> HashMap<String, String> {
    url::form_urlencoded::parse(raw.as_bytes())
        .into_owned()
        .collect()
}
