//! Local content serving via custom protocol.
//!
//! The editor page is compiled into the binary and served under the
//! `jsedit://` scheme, so no files need to be staged on disk and no HTTP
//! server is needed. An optional directory can shadow bundled files.

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Custom protocol scheme.
pub const SCHEME: &str = "jsedit";

/// Page the editor WebView starts on.
pub fn start_url() -> &'static str {
    // WebView2 rewrites custom protocols: jsedit://localhost/… → http://jsedit.localhost/…
    if cfg!(windows) {
        "http://jsedit.localhost/index.html"
    } else {
        "jsedit://localhost/index.html"
    }
}

const BUNDLED: &[(&str, &str)] = &[
    ("index.html", include_str!("../assets/index.html")),
    ("jse-wrapper.js", include_str!("../assets/jse-wrapper.js")),
    ("style.css", include_str!("../assets/style.css")),
];

/// Resolves request paths to page assets.
///
/// Files under `base_dir` win over bundled assets with the same path.
pub struct ContentProvider {
    /// Optional directory shadowing the bundled assets.
    base_dir: Option<PathBuf>,
    /// Assets compiled into the binary, keyed by path.
    bundled: HashMap<String, (&'static str, Cow<'static, [u8]>)>, // path -> (mime, data)
}

impl ContentProvider {
    /// A provider serving only the bundled editor page.
    pub fn bundled() -> Self {
        let mut provider = Self {
            base_dir: None,
            bundled: HashMap::new(),
        };
        for (path, text) in BUNDLED {
            provider.add_asset(*path, Cow::Borrowed(text.as_bytes()));
        }
        provider
    }

    /// Serve files from `dir` in front of the bundled assets.
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Register an in-memory asset.
    pub fn add_asset(&mut self, path: impl Into<String>, data: impl Into<Cow<'static, [u8]>>) {
        let path = path.into();
        let mime = mime_from_extension(Path::new(&path));
        self.bundled.insert(path, (mime, data.into()));
    }

    /// Resolve a request path to content bytes and MIME type.
    pub fn resolve(&self, path: &str) -> Option<(&'static str, Cow<'_, [u8]>)> {
        let clean = path.trim_start_matches('/');
        let clean = if clean.is_empty() { "index.html" } else { clean };

        if let Some(found) = self.resolve_on_disk(clean) {
            return Some(found);
        }

        self.bundled
            .get(clean)
            .map(|(mime, data)| (*mime, Cow::Borrowed(&**data)))
    }

    fn resolve_on_disk(&self, clean: &str) -> Option<(&'static str, Cow<'_, [u8]>)> {
        let base_dir = self.base_dir.as_ref()?;
        let file_path = base_dir.join(clean);

        // Prevent directory traversal (including symlink bypass).
        let canonical_base = std::fs::canonicalize(base_dir).ok()?;
        let canonical_file = std::fs::canonicalize(&file_path).ok()?;
        if !canonical_file.starts_with(&canonical_base) {
            return None;
        }

        let data = std::fs::read(&canonical_file).ok()?;
        Some((mime_from_extension(&file_path), Cow::Owned(data)))
    }

    /// Strip the scheme and host from a custom-protocol request URI.
    pub fn request_path(uri: &str) -> &str {
        let rest = uri
            .strip_prefix("jsedit://localhost")
            .or_else(|| uri.strip_prefix("http://jsedit.localhost"))
            .or_else(|| uri.strip_prefix("jsedit://"))
            .unwrap_or("");
        // drop any query or fragment
        rest.split(['?', '#']).next().unwrap_or("")
    }

    /// The override directory, if any.
    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }
}

/// Guess MIME type from file extension.
fn mime_from_extension(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") | Some("htm") => "text/html",
        Some("css") => "text/css",
        Some("js") | Some("mjs") => "application/javascript",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("ico") => "image/x-icon",
        Some("woff2") => "font/woff2",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}
