//! Browser utilities shared by the components.
//!
//! - **Navigation**: full page loads, so the backend can gate every route again.
//! - **User Feedback**: transient toasts and the error text of `ErrorBody` responses.
//! - **Downloads**: saving a fetched archive under the name sent by the server.

use common::responses::ErrorBody;
use gloo_net::http::Response;
use regex::Regex;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, HtmlElement, Url};

/// Used when the response carries no usable `Content-Disposition`.
pub const DEFAULT_ARCHIVE_NAME: &str = "nexcode_app.zip";

/// Loads `path` as a new document.
pub fn navigate(path: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(path);
    }
}

/// Displays a temporary notification at the bottom of the screen. The toast removes
/// itself after three seconds.
pub fn show_toast(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            if let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) {
                toast.set_text_content(Some(message));
                let html_toast: HtmlElement = toast.unchecked_into();
                let style = html_toast.style();
                style.set_property("position", "fixed").ok();
                style.set_property("bottom", "20px").ok();
                style.set_property("left", "50%").ok();
                style.set_property("transform", "translateX(-50%)").ok();
                style.set_property("background", "rgba(0, 0, 0, 0.8)").ok();
                style.set_property("color", "#fff").ok();
                style.set_property("padding", "10px 20px").ok();
                style.set_property("border-radius", "4px").ok();
                style.set_property("z-index", "10000").ok();

                if body.append_child(&html_toast).is_ok() {
                    wasm_bindgen_futures::spawn_local(async move {
                        gloo_timers::future::TimeoutFuture::new(3000).await;
                        if let Some(parent) = html_toast.parent_node() {
                            parent.remove_child(&html_toast).ok();
                        }
                    });
                }
            }
        }
    }
}

/// The `error` field of a failed API response, or `fallback` when the body is not an
/// `ErrorBody`.
pub async fn error_message(response: Response, fallback: &str) -> String {
    match response.json::<ErrorBody>().await {
        Ok(body) if !body.error.is_empty() => body.error,
        _ => fallback.to_string(),
    }
}

/// Extracts the quoted file name of an `attachment` disposition.
pub fn filename_from_disposition(header: Option<&str>) -> String {
    header
        .and_then(|value| {
            let re = Regex::new(r#"filename="([^"]+)""#).ok()?;
            re.captures(value)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
        })
        .unwrap_or_else(|| DEFAULT_ARCHIVE_NAME.to_string())
}

/// Hands `bytes` to the browser as a file download through a temporary object URL.
pub fn trigger_download(bytes: &[u8], filename: &str, mime: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document.body().ok_or_else(|| JsValue::from_str("no body"))?;

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    body.append_child(&anchor)?;
    anchor.click();
    anchor.remove();
    Url::revoke_object_url(&url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_is_read_from_the_disposition_header() {
        assert_eq!(
            filename_from_disposition(Some("attachment; filename=\"nexcode_app_42.zip\"")),
            "nexcode_app_42.zip"
        );
    }

    #[test]
    fn missing_or_unquoted_names_fall_back_to_the_default() {
        assert_eq!(filename_from_disposition(None), DEFAULT_ARCHIVE_NAME);
        assert_eq!(
            filename_from_disposition(Some("attachment")),
            DEFAULT_ARCHIVE_NAME
        );
    }
}
