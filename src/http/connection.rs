use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

use crate::http::parser::parse_request_line;
use crate::http::request::IncomingRequest;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::routing::Router;

/// Upper bound on request bytes read before routing.
const MAX_HEAD_BYTES: usize = 64 * 1024;

/// One accepted connection, serving exactly one request.
pub struct Connection<'r, S> {
    stream: BufReader<S>,
    router: &'r Router,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Option<IncomingRequest>), // None = no parsable request line
    Writing(ResponseWriter),
    Closed,
}

impl<'r, S> Connection<'r, S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, router: &'r Router) -> Self {
        Self {
            stream: BufReader::new(stream),
            router,
            state: ConnectionState::Reading,
        }
    }

    /// Reads, routes and answers one request, then shuts the stream down.
    ///
    /// The shutdown happens on every path, including write failures.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let result = self.drive().await;

        if let Err(e) = self.stream.get_mut().shutdown().await {
            debug!(error = %e, "Shutdown after response failed");
        }
        self.state = ConnectionState::Closed;

        result
    }

    async fn drive(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await {
                        Ok(request) => ConnectionState::Processing(request),
                        Err(e) => {
                            error!(error = %e, "Failed to read request");
                            ConnectionState::Writing(ResponseWriter::new(&Response::internal_error()))
                        }
                    };
                }

                ConnectionState::Processing(request) => {
                    let response = self.respond(request.as_ref()).await;
                    self.state = ConnectionState::Writing(ResponseWriter::new(&response));
                }

                ConnectionState::Writing(mut writer) => {
                    writer.write_to_stream(self.stream.get_mut()).await?;
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Reads lines until the stream ends or nothing more is buffered.
    ///
    /// The first non-empty line is the request line; the rest is drained
    /// without being interpreted.
    pub async fn read_request(&mut self) -> anyhow::Result<Option<IncomingRequest>> {
        let mut request = None;
        let mut seen_request_line = false;
        let mut consumed = 0;
        let mut line = Vec::new();

        while consumed < MAX_HEAD_BYTES {
            line.clear();
            let limit = (MAX_HEAD_BYTES - consumed) as u64;
            let n = (&mut self.stream).take(limit).read_until(b'\n', &mut line).await?;

            if n == 0 {
                // Client closed its side
                break;
            }
            consumed += n;

            let text = String::from_utf8_lossy(&line);
            if !seen_request_line && !text.trim().is_empty() {
                seen_request_line = true;
                match parse_request_line(&text) {
                    Ok(parsed) => request = Some(parsed),
                    Err(e) => debug!(error = %e, line = %text.trim_end(), "Malformed request line"),
                }
            }

            if self.stream.buffer().is_empty() {
                break;
            }
        }

        Ok(request)
    }

    async fn respond(&self, request: Option<&IncomingRequest>) -> Response {
        let Some(request) = request else {
            return Response::bad_request();
        };

        let response = match self.router.dispatch(request).await {
            Ok(response) => response,
            Err(e) => {
                error!(path = %request.path, error = %format!("{:#}", e), "Handler failed");
                Response::internal_error()
            }
        };

        info!(
            method = %request.method,
            path = %request.path,
            status = response.status.as_u16(),
            "Request served"
        );

        response
    }
}
