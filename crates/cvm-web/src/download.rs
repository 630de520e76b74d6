//! Client-side file download.

use crate::dom::{document, JsResultExt};
use cvm_common::{Result, UiError};
use cvm_tables::CsvDownload;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Offer the export as a file download.
///
/// The anchor is never attached to the document.
pub fn download(export: &CsvDownload) -> Result<()> {
    let parts = js_sys::Array::of1(&JsValue::from_str(&export.body));
    let options = BlobPropertyBag::new();
    options.set_type(&export.mime);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options).dom_context("new Blob")?;
    let url = Url::create_object_url_with_blob(&blob).dom_context("createObjectURL")?;

    let anchor: HtmlAnchorElement = document()?
        .create_element("a")
        .dom_context("createElement")?
        .dyn_into()
        .map_err(|_| UiError::dom("anchor cast failed"))?;
    anchor.set_href(&url);
    anchor.set_download(&export.filename);
    anchor.click();

    Url::revoke_object_url(&url).dom_context("revokeObjectURL")?;
    Ok(())
}
