//! Client-side file download
//!
//! Wraps an export in a `Blob`, points a hidden anchor at an object URL and
//! clicks it. No server round-trip.

use core::time::Duration;

use lottery_core::Export;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::utils::timeout_millis;

/// How long the object URL outlives the click
pub const REVOKE_DELAY: Duration = Duration::from_secs(1);

/// Trigger a browser download of `export`
pub fn trigger_download(export: &Export) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window available"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("No document available"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("Document has no body"))?;

    let parts = js_sys::Array::of1(&JsValue::from_str(&export.contents));
    let options = BlobPropertyBag::new();
    options.set_type(&export.mime);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let link: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    link.set_href(&url);
    link.set_download(&export.file_name);
    link.style().set_property("visibility", "hidden")?;

    body.append_child(&link)?;
    link.click();
    body.remove_child(&link)?;

    // The download starts asynchronously; revoking now can cancel it
    let revoke = Closure::once_into_js(move || {
        let _ = Url::revoke_object_url(&url);
    });
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        revoke.unchecked_ref(),
        timeout_millis(REVOKE_DELAY),
    )?;

    tracing::info!("Downloaded {}", export);
    Ok(())
}
