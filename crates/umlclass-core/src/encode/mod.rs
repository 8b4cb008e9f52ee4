//! Reference encoders: turn a diagram's identity into an HTML `src`/`href` value.
//!
//! Each strategy is a pure function of its inputs:
//! - [`local_reference`]: relative path from a page to an image file already on disk
//! - [`embedded_reference`]: `data:` URI carrying the rendered bytes
//! - [`remote_reference`]: PlantUML server URL that renders the diagram on demand

mod path;
pub mod plantuml;

use crate::{Error, ImageFormat, ImageReference, Result};
use base64::Engine as _;
use std::path::Path;

pub const DEFAULT_PLANTUML_SERVER: &str = "http://www.plantuml.com/plantuml";

/// Creates a reference to a local image file, relative to the directory of the page that embeds it.
///
/// Separators in the result are always `/`, regardless of platform.
pub fn local_reference(
    page_path: impl AsRef<Path>,
    image_path: impl AsRef<Path>,
) -> Result<ImageReference> {
    let rel = path::relative_from_page(page_path.as_ref(), image_path.as_ref())?;
    Ok(ImageReference::LocalRelativePath(rel))
}

/// Creates a `data:` URI that inlines the image bytes into the page.
pub fn embedded_reference(bytes: &[u8], format: ImageFormat) -> ImageReference {
    let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
    let mime = format.mime_type();
    let mut uri = String::with_capacity("data:;base64,".len() + mime.len() + payload.len());
    uri.push_str("data:");
    uri.push_str(mime);
    uri.push_str(";base64,");
    uri.push_str(&payload);
    ImageReference::EmbeddedDataUri(uri)
}

/// Creates a URL on the public PlantUML server that renders `source` as `format`.
pub fn remote_reference(source: &str, format: ImageFormat) -> Result<ImageReference> {
    PlantUmlServer::default().url_for(source, format)
}

/// A PlantUML server able to render encoded diagrams from `<base>/<format>/<encoded>` URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlantUmlServer {
    base_url: String,
}

impl Default for PlantUmlServer {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_PLANTUML_SERVER.to_string(),
        }
    }
}

impl PlantUmlServer {
    /// Uses a self-hosted server. A trailing `/` on `base_url` is ignored.
    ///
    /// The URL is validated when it comes from configuration (see
    /// [`DiagramOptions`](crate::DiagramOptions)); this constructor accepts it as given.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, source: &str, format: ImageFormat) -> Result<ImageReference> {
        if self.base_url.is_empty() {
            return Err(Error::Precondition {
                message: "PlantUML server URL is empty",
            });
        }
        let encoded = plantuml::encode(source)?;
        Ok(ImageReference::RemoteServiceUrl(format!(
            "{}/{}/{}",
            self.base_url,
            format.as_str(),
            encoded
        )))
    }
}
