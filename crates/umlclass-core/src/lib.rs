#![forbid(unsafe_code)]

//! Reference resolution for PlantUML class diagrams embedded in generated API documentation.
//!
//! A diagram image can live in one of three places, each with its own reference form:
//! - a file next to the page: a relative path (`../assets/Foo.svg`)
//! - inside the page: a `data:` URI with the base64-encoded bytes
//! - on a PlantUML server: a URL carrying the compressed diagram source
//!
//! [`DiagramReferenceResolver`] picks the strategy from the configured [`ImageLocation`]; the
//! individual encoders live in [`encode`]. Everything here is pure and synchronous; no files are
//! read or written and no network requests are made.

pub mod config;
pub mod encode;
pub mod error;
mod image;
mod reference;
pub mod resolve;

pub use config::{
    ClassDiagramPosition, ClassDiagramType, DiagramOptions, DiagramStyle, DocumentFormat,
    FontOptions, FontStyle, MemberVisibilityStyle,
};
pub use encode::{PlantUmlServer, embedded_reference, local_reference, remote_reference};
pub use error::{Error, Result};
pub use image::{ImageFormat, ImageLocation, RenderedImage};
pub use reference::ImageReference;
pub use resolve::{DiagramInputs, DiagramReferenceResolver, PathPair};

#[cfg(test)]
mod tests;
