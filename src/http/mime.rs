//! Content-type detection for static files.
//!
//! A [`MimeClassifier`] checks configured overrides first, then asks an
//! optional [`ContentProbe`], then its built-in extension table, and finally
//! falls back to [`DEFAULT_MIME`].

use std::collections::HashMap;
use std::path::Path;

/// Answer for extensions nobody recognises, at every call site.
pub const DEFAULT_MIME: &str = "application/octet-stream";

const BUILTIN_TYPES: &[(&str, &str)] = &[
    ("html", "text/html"),
    ("htm", "text/html"),
    ("css", "text/css"),
    ("js", "application/javascript"),
    ("mjs", "application/javascript"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("jpe", "image/jpeg"),
    ("jfif", "image/jpeg"),
    ("jpg_large", "image/jpeg"),
    ("gif", "image/gif"),
    ("ico", "image/x-icon"),
    ("json", "application/json"),
    ("svg", "image/svg+xml"),
    ("txt", "text/plain"),
];

/// Something that can name a content type for a file without the table.
pub trait ContentProbe: Send + Sync {
    fn probe(&self, path: &Path) -> Option<String>;
}

/// Probe backed by the `mime_guess` database.
#[derive(Debug, Default, Clone, Copy)]
pub struct GuessProbe;

impl ContentProbe for GuessProbe {
    fn probe(&self, path: &Path) -> Option<String> {
        mime_guess::from_path(path)
            .first()
            .map(|m| m.essence_str().to_string())
    }
}

/// Immutable extension → content-type map. Keys are lowercase, without the dot.
#[derive(Debug, Clone)]
pub struct MimeTable {
    types: HashMap<String, String>,
}

impl MimeTable {
    pub fn get(&self, extension: &str) -> Option<&str> {
        self.types
            .get(&extension.to_ascii_lowercase())
            .map(|m| m.as_str())
    }
}

impl Default for MimeTable {
    fn default() -> Self {
        let types = BUILTIN_TYPES
            .iter()
            .map(|(ext, mime)| (ext.to_string(), mime.to_string()))
            .collect();
        Self { types }
    }
}

pub struct MimeClassifier {
    /// Operator-supplied types, keyed like the table
    overrides: HashMap<String, String>,
    table: MimeTable,
    probe: Option<Box<dyn ContentProbe>>,
}

impl MimeClassifier {
    pub fn new(table: MimeTable, probe: Option<Box<dyn ContentProbe>>) -> Self {
        Self {
            overrides: HashMap::new(),
            table,
            probe,
        }
    }

    /// Adds `overrides`, which outrank both the probe and the table.
    /// Keys may carry a leading dot and any case.
    pub fn with_overrides(mut self, overrides: &HashMap<String, String>) -> Self {
        for (ext, mime) in overrides {
            let ext = ext.trim_start_matches('.').to_ascii_lowercase();
            self.overrides.insert(ext, mime.clone());
        }
        self
    }

    /// Classifier using only the table, as when no probe is available.
    pub fn table_only(table: MimeTable) -> Self {
        Self::new(table, None)
    }

    pub fn classify(&self, path: &Path) -> String {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        if let Some(mime) = extension.as_ref().and_then(|ext| self.overrides.get(ext)) {
            return mime.clone();
        }

        if let Some(mime) = self.probe.as_ref().and_then(|p| p.probe(path)) {
            return mime;
        }

        extension
            .as_deref()
            .and_then(|ext| self.table.get(ext))
            .unwrap_or(DEFAULT_MIME)
            .to_string()
    }
}

impl Default for MimeClassifier {
    fn default() -> Self {
        Self::new(MimeTable::default(), Some(Box::new(GuessProbe)))
    }
}

impl std::fmt::Debug for MimeClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MimeClassifier")
            .field("overrides", &self.overrides)
            .field("table", &self.table)
            .field("probe", &self.probe.is_some())
            .finish()
    }
}
