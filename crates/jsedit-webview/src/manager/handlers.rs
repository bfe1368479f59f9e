use std::borrow::Cow;
use std::sync::Arc;

use tracing::{debug, warn};
use wry::http::Response;
use wry::WebViewBuilder;

use crate::content::{ContentProvider, SCHEME};
use crate::events::{PageLoadState, WebViewEvent};
use crate::ipc::is_channel_payload;

use super::EventSink;

// =============================================================================
// NAVIGATION ALLOWLIST
// =============================================================================

/// Allowed URL prefixes for webview navigation.
///
/// Only these origins are permitted. Everything else is blocked.
/// - `jsedit://`: custom protocol for the bundled editor page
/// - `about:blank`: default empty page
/// - jsDelivr: hosts the editor widget module
pub const ALLOWED_NAV_PREFIXES: &[&str] = &[
    "jsedit://",
    // On Windows, WebView2 rewrites custom protocols: jsedit://localhost/… → http://jsedit.localhost/…
    "http://jsedit.localhost",
    "about:blank",
    "https://cdn.jsdelivr.net/",
];

/// Check whether a URL is allowed by the navigation allowlist.
pub fn is_navigation_allowed(url: &str) -> bool {
    ALLOWED_NAV_PREFIXES
        .iter()
        .any(|prefix| url.starts_with(prefix))
}

// =============================================================================
// HANDLER ATTACHMENTS
// =============================================================================

pub(super) fn attach_ipc_handler(builder: WebViewBuilder<'_>, sink: EventSink) -> WebViewBuilder<'_> {
    builder.with_ipc_handler(move |request| {
        let payload = request.body();

        if !is_channel_payload(payload) {
            warn!(
                body_len = payload.len(),
                "IPC message rejected: not a channel payload"
            );
            return;
        }

        debug!(body_len = payload.len(), "channel activated");
        sink.push(WebViewEvent::ChannelActivated {
            payload: payload.clone(),
        });
    })
}

pub(super) fn attach_page_load_handler(
    builder: WebViewBuilder<'_>,
    sink: EventSink,
) -> WebViewBuilder<'_> {
    builder.with_on_page_load_handler(move |event, url| {
        let state = PageLoadState::from(event);
        debug!(?state, url = %url, "page load");
        sink.push(WebViewEvent::PageLoad { state, url });
    })
}

pub(super) fn attach_navigation_handler(
    builder: WebViewBuilder<'_>,
    sink: EventSink,
) -> WebViewBuilder<'_> {
    builder.with_navigation_handler(move |url| {
        if is_navigation_allowed(&url) {
            return true;
        }
        warn!(url = %url, "navigation blocked: URL not in allowlist");
        sink.push(WebViewEvent::NavigationBlocked { url });
        false
    })
}

pub(super) fn attach_custom_protocol(
    builder: WebViewBuilder<'_>,
    provider: Arc<ContentProvider>,
) -> WebViewBuilder<'_> {
    builder.with_custom_protocol(SCHEME.to_string(), move |_wv_id, request| {
        let uri = request.uri().to_string();
        let path = ContentProvider::request_path(&uri);

        match provider.resolve(path) {
            Some((mime, data)) => respond(200, mime, Cow::Owned(data.into_owned())),
            None => {
                warn!(path = %path, "custom protocol: asset not found");
                respond(404, "text/plain", Cow::Borrowed(&b"Not Found"[..]))
            }
        }
    })
}

fn respond(status: u16, mime: &str, body: Cow<'static, [u8]>) -> Response<Cow<'static, [u8]>> {
    Response::builder()
        .status(status)
        .header("Content-Type", mime)
        .header("Access-Control-Allow-Origin", "jsedit://localhost")
        .body(body)
        .unwrap_or_default()
}

// =============================================================================
// TESTS
// =============================================================================
