use crate::encode::{self, PlantUmlServer};
use crate::{Error, ImageFormat, ImageLocation, ImageReference, RenderedImage, Result};
use std::path::Path;

/// The page that embeds a diagram and the image file the diagram was rendered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathPair<'a> {
    pub page: &'a Path,
    pub image: &'a Path,
}

impl<'a> PathPair<'a> {
    pub fn new<P, I>(page: &'a P, image: &'a I) -> Self
    where
        P: AsRef<Path> + ?Sized,
        I: AsRef<Path> + ?Sized,
    {
        Self {
            page: page.as_ref(),
            image: image.as_ref(),
        }
    }
}

/// Everything the host knows about one diagram. Which fields are needed depends on the
/// configured [`ImageLocation`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagramInputs<'a> {
    /// Page/image paths, needed for local images that are not inlined.
    pub paths: Option<PathPair<'a>>,
    /// Rendered bytes; when present for a local diagram they are inlined as a `data:` URI.
    pub rendered: Option<&'a RenderedImage>,
    /// PlantUML source, needed for remote images.
    pub source: Option<&'a str>,
}

impl<'a> DiagramInputs<'a> {
    pub fn with_paths(mut self, paths: PathPair<'a>) -> Self {
        self.paths = Some(paths);
        self
    }

    pub fn with_rendered(mut self, rendered: &'a RenderedImage) -> Self {
        self.rendered = Some(rendered);
        self
    }

    pub fn with_source(mut self, source: &'a str) -> Self {
        self.source = Some(source);
        self
    }
}

/// Picks the reference strategy for a diagram from the configured output location.
#[derive(Debug, Clone, Default)]
pub struct DiagramReferenceResolver {
    pub location: ImageLocation,
    pub format: ImageFormat,
    pub server: PlantUmlServer,
}

impl DiagramReferenceResolver {
    pub fn new(location: ImageLocation, format: ImageFormat) -> Self {
        Self {
            location,
            format,
            server: PlantUmlServer::default(),
        }
    }

    pub fn with_server(mut self, server: PlantUmlServer) -> Self {
        self.server = server;
        self
    }

    /// Resolves the reference for one diagram.
    ///
    /// - local, no rendered bytes: path from the page to the image file
    /// - local, rendered bytes: `data:` URI (the bytes' own format decides the MIME type)
    /// - remote: PlantUML server URL built from the source; rendered bytes are ignored
    pub fn resolve(&self, inputs: &DiagramInputs<'_>) -> Result<ImageReference> {
        match (self.location, inputs.rendered) {
            (ImageLocation::Local, None) => {
                let Some(paths) = inputs.paths else {
                    return Err(Error::Precondition {
                        message: "local diagram without rendered bytes needs a page/image path pair",
                    });
                };
                tracing::debug!(
                    page = %paths.page.display(),
                    image = %paths.image.display(),
                    "resolving local image reference"
                );
                encode::local_reference(paths.page, paths.image)
            }
            (ImageLocation::Local, Some(rendered)) => {
                tracing::debug!(
                    format = %rendered.format,
                    bytes = rendered.bytes.len(),
                    "resolving embedded image reference"
                );
                Ok(encode::embedded_reference(&rendered.bytes, rendered.format))
            }
            (ImageLocation::Remote, _) => {
                let Some(source) = inputs.source else {
                    return Err(Error::Precondition {
                        message: "remote diagram needs PlantUML source",
                    });
                };
                tracing::debug!(
                    format = %self.format,
                    server = self.server.base_url(),
                    "resolving remote image reference"
                );
                self.server.url_for(source, self.format)
            }
        }
    }
}
