//! Stock quote proxy
//!
//! Relays `/stocks` requests to the configured quote API and passes its
//! body through untouched.

use crate::config::StocksConfig;
use crate::http::request::IncomingRequest;
use crate::http::response::{Response, StatusCode};
use anyhow::{Context, Result};
use url::Url;

/// Forwards quote lookups to the upstream API.
pub struct QuoteProxy {
    /// Shared client carrying the timeout and user agent
    client: reqwest::Client,

    /// Upstream endpoint, key and defaults
    config: StocksConfig,
}

impl QuoteProxy {
    /// Create a new proxy from the stocks configuration
    pub fn new(config: StocksConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to build upstream HTTP client")?;

        Ok(Self::with_client(client, config))
    }

    /// Create a proxy around an already configured client
    pub fn with_client(client: reqwest::Client, config: StocksConfig) -> Self {
        Self { client, config }
    }

    /// Build the upstream URL for `symbol`
    ///
    /// Note: public so the query layout can be checked in tests
    pub fn quote_url(&self, symbol: &str) -> Result<Url> {
        Url::parse_with_params(
            &self.config.base_url,
            &[
                ("function", self.config.function.as_str()),
                ("symbol", symbol),
                ("apikey", self.config.api_key.as_str()),
            ],
        )
        .context("Invalid upstream base URL")
    }

    /// Fetch a quote for the request's `symbol` argument
    ///
    /// This function:
    /// 1. Picks the symbol, or the configured default
    /// 2. Sends one GET upstream, bounded by the configured timeout
    /// 3. Relays a 200 body verbatim as JSON
    /// 4. Maps any other status to 502 and transport failures to 500
    pub async fn forward_request(&self, request: &IncomingRequest) -> Response {
        let symbol = request
            .query_param("symbol")
            .unwrap_or(self.config.default_symbol.as_str());

        let url = match self.quote_url(symbol) {
            Ok(url) => url,
            Err(e) => return self.handle_proxy_error(symbol, &e),
        };

        tracing::debug!(symbol = %symbol, "Forwarding quote request upstream");

        let upstream = match self.client.get(url).send().await {
            Ok(upstream) => upstream,
            // The request URL carries the API key, keep it out of messages.
            Err(e) => return self.handle_proxy_error(symbol, &anyhow::Error::from(e.without_url())),
        };

        let status = upstream.status();
        if status != reqwest::StatusCode::OK {
            tracing::warn!(
                symbol = %symbol,
                upstream_status = status.as_u16(),
                "Upstream refused quote request"
            );
            return Response::plain(
                StatusCode::BadGateway,
                format!("Error fetching stock data: {}", status.as_u16()),
            );
        }

        match upstream.bytes().await {
            Ok(body) => {
                tracing::info!(
                    symbol = %symbol,
                    bytes = body.len(),
                    "Quote relayed from upstream"
                );
                Response::json(body)
            }
            Err(e) => self.handle_proxy_error(symbol, &anyhow::Error::from(e.without_url())),
        }
    }

    /// Turn a transport failure into a 500 response describing it
    fn handle_proxy_error(&self, symbol: &str, error: &anyhow::Error) -> Response {
        tracing::warn!(symbol = %symbol, error = %format!("{:#}", error), "Quote request failed");

        Response::plain(
            StatusCode::InternalServerError,
            format!("Server error processing stock request: {:#}", error),
        )
    }
}
