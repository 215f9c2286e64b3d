use crate::config::Config;
use crate::handlers::{StaticFiles, greet};
use crate::http::mime::{GuessProbe, MimeClassifier, MimeTable};
use crate::http::request::IncomingRequest;
use crate::http::response::Response;
use crate::proxy::QuoteProxy;

/// The handler a path maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Greeting,
    Stocks,
    /// Static file lookup for the contained path
    Static(String),
}

/// Picks the route for `path`. First match wins:
///
/// 1. `/app/hello*` → greeting
/// 2. `/stocks*` → quote proxy
/// 3. `/static/*` → static file, with `/static` stripped
/// 4. `/` → `/index.html`
/// 5. anything else → static file at `/static` + path
pub fn match_route(path: &str) -> Route {
    if path.starts_with("/app/hello") {
        Route::Greeting
    } else if path.starts_with("/stocks") {
        Route::Stocks
    } else if path.starts_with("/static/") {
        Route::Static(path["/static".len()..].to_string())
    } else if path == "/" {
        Route::Static("/index.html".to_string())
    } else {
        Route::Static(format!("/static{}", path))
    }
}

pub struct Router {
    stocks: QuoteProxy,
    files: StaticFiles,
}

impl Router {
    pub fn new(stocks: QuoteProxy, files: StaticFiles) -> Self {
        Self { stocks, files }
    }

    /// Wires every handler from the loaded configuration.
    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        let mime = MimeClassifier::new(MimeTable::default(), Some(Box::new(GuessProbe)))
            .with_overrides(&cfg.mime.overrides);
        let files = StaticFiles::new(cfg.static_files.roots.clone(), mime);
        let stocks = QuoteProxy::new(cfg.stocks.clone())?;

        Ok(Self::new(stocks, files))
    }

    /// Produces the single response for `request`.
    pub async fn dispatch(&self, request: &IncomingRequest) -> anyhow::Result<Response> {
        match match_route(&request.path) {
            Route::Greeting => Ok(greet(request)),
            Route::Stocks => Ok(self.stocks.forward_request(request).await),
            Route::Static(path) => self.files.serve(&path).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_and_stocks_match_by_prefix() {
        assert_eq!(match_route("/app/hello"), Route::Greeting);
        assert_eq!(match_route("/app/helloworld"), Route::Greeting);
        assert_eq!(match_route("/stocks"), Route::Stocks);
        assert_eq!(match_route("/stocksfoo/bar"), Route::Stocks);
    }

    #[test]
    fn static_prefix_is_stripped() {
        assert_eq!(
            match_route("/static/css/site.css"),
            Route::Static("/css/site.css".to_string())
        );
        assert_eq!(match_route("/static/"), Route::Static("/".to_string()));
    }

    #[test]
    fn root_maps_to_index() {
        assert_eq!(match_route("/"), Route::Static("/index.html".to_string()));
    }

    #[test]
    fn unmatched_paths_fall_back_to_static_root() {
        assert_eq!(
            match_route("/favicon.ico"),
            Route::Static("/static/favicon.ico".to_string())
        );
        assert_eq!(
            match_route("/staticky"),
            Route::Static("/static/staticky".to_string())
        );
        assert_eq!(
            match_route("/static"),
            Route::Static("/static/static".to_string())
        );
    }
}
