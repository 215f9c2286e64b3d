//! Static file serving.
//!
//! A request path is first filtered as a string (`..` removed, repeated `/`
//! collapsed), then joined onto each configured root in order. A candidate
//! only counts when it is a regular file whose canonical path stays inside
//! the canonical root, so symlinks cannot lead outside the tree either.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tokio::fs;
use tracing::{debug, warn};

use crate::http::mime::MimeClassifier;
use crate::http::response::{Response, ResponseBuilder, StatusCode};

pub const INDEX_PATH: &str = "/index.html";

pub struct StaticFiles {
    roots: Vec<PathBuf>,
    mime: MimeClassifier,
}

/// Removes every `..`, collapses runs of `/`, and maps an empty or bare `/`
/// path to [`INDEX_PATH`].
pub fn sanitize_path(path: &str) -> String {
    let mut clean = path.replace("..", "");
    while clean.contains("//") {
        clean = clean.replace("//", "/");
    }

    if clean.is_empty() || clean == "/" {
        INDEX_PATH.to_string()
    } else {
        clean
    }
}

impl StaticFiles {
    pub fn new(roots: Vec<PathBuf>, mime: MimeClassifier) -> Self {
        Self { roots, mime }
    }

    /// Finds the first root holding `sanitized` as a regular file.
    pub async fn resolve(&self, sanitized: &str) -> Option<PathBuf> {
        let relative = sanitized.trim_start_matches('/');

        for root in &self.roots {
            let candidate = root.join(relative);

            match fs::metadata(&candidate).await {
                Ok(meta) if meta.is_file() => {}
                _ => continue,
            }

            if is_contained(root, &candidate).await {
                return Some(candidate);
            }

            warn!(
                root = %root.display(),
                path = %sanitized,
                "Rejected static path escaping its root"
            );
        }

        None
    }

    /// Serves `requested` from the first matching root.
    ///
    /// A missing file is a 404 response; a file that exists but cannot be
    /// read is an error.
    pub async fn serve(&self, requested: &str) -> anyhow::Result<Response> {
        let sanitized = sanitize_path(requested);

        let Some(file) = self.resolve(&sanitized).await else {
            debug!(path = %requested, "Static file not found");
            return Ok(Response::not_found(requested));
        };

        let body = fs::read(&file)
            .await
            .with_context(|| format!("failed to read {}", file.display()))?;

        Ok(ResponseBuilder::new(StatusCode::Ok)
            .content_type(self.mime.classify(&file))
            .bytes(body)
            .build())
    }
}

async fn is_contained(root: &Path, candidate: &Path) -> bool {
    let (Ok(root), Ok(candidate)) = (fs::canonicalize(root).await, fs::canonicalize(candidate).await)
    else {
        return false;
    };
    candidate.starts_with(&root) && candidate != root
}
