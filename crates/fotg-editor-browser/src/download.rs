//! File downloads and imports through the browser's file APIs.

use fotg_editor_core::EditorError;
use fotg_editor_core::fotg_renderer::Download;
use js_sys::Array;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, File, HtmlAnchorElement, Url};

use crate::dom::js_message;

/// File types offered by the import picker.
pub const IMPORT_ACCEPT: &str = ".md,.txt,text/markdown,text/plain";

/// Hand `download` to the browser as a file save.
pub fn offer_download(download: &Download) -> Result<(), JsValue> {
    let parts = Array::new();
    parts.push(&JsValue::from_str(&download.contents));

    let options = BlobPropertyBag::new();
    options.set_type(download.mime_type);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;

    let url = Url::create_object_url_with_blob(&blob)?;
    let anchor: HtmlAnchorElement = gloo_utils::document().create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(download.filename);
    anchor.click();
    Url::revoke_object_url(&url)?;

    tracing::debug!(
        filename = download.filename,
        bytes = download.contents.len(),
        "download offered"
    );
    Ok(())
}

/// Read a user-picked file as text.
pub async fn read_file_text(file: &File) -> Result<String, EditorError> {
    let text = JsFuture::from(file.text())
        .await
        .map_err(|e| EditorError::Import(js_message(&e)))?;
    text.as_string()
        .ok_or_else(|| EditorError::Import(format!("{} is not text", file.name())))
}
