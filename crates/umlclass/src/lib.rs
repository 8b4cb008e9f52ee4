#![forbid(unsafe_code)]

//! `umlclass` embeds PlantUML class hierarchy diagrams into generated API documentation pages.
//!
//! # Features
//!
//! - `render` (default): HTML section rendering (`umlclass::render`)

pub use umlclass_core::*;

#[cfg(feature = "render")]
pub mod render {
    use umlclass_core::{DiagramInputs, DiagramOptions, DiagramReferenceResolver, ImageReference};
    pub use umlclass_render::{PageSection, SectionPlacement, render_hierarchy_section};

    #[derive(Debug, thiserror::Error)]
    pub enum EmbedError {
        #[error(transparent)]
        Resolve(#[from] umlclass_core::Error),
    }

    pub type Result<T> = std::result::Result<T, EmbedError>;

    /// Bundles [`DiagramOptions`] with the resolve + render pipeline so hosts make one call per
    /// documented type.
    #[derive(Debug, Clone, Default)]
    pub struct HierarchyDiagramEmbedder {
        pub options: DiagramOptions,
    }

    impl HierarchyDiagramEmbedder {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_options(mut self, options: DiagramOptions) -> Self {
            self.options = options;
            self
        }

        pub fn resolver(&self) -> DiagramReferenceResolver {
            DiagramReferenceResolver::new(self.options.location, self.options.format)
                .with_server(self.options.server())
        }

        pub fn resolve(&self, inputs: &DiagramInputs<'_>) -> Result<ImageReference> {
            Ok(self.resolver().resolve(inputs)?)
        }

        /// Where the host should insert the rendered section.
        pub fn placement(&self) -> SectionPlacement {
            SectionPlacement::new(self.options.position)
        }

        /// Resolves the diagram reference and renders the section titled with the configured
        /// section title.
        ///
        /// Returns `Ok(None)` when class diagrams are disabled (`umlClassDiagramType: none`).
        pub fn render_section(
            &self,
            subject_name: &str,
            inputs: &DiagramInputs<'_>,
            legend_html: Option<&str>,
        ) -> Result<Option<String>> {
            if !self.options.diagrams_enabled() {
                tracing::debug!(subject = subject_name, "class diagrams disabled; skipping");
                return Ok(None);
            }
            let reference = self.resolve(inputs)?;
            Ok(Some(render_hierarchy_section(
                &self.options.section_title,
                &reference,
                subject_name,
                legend_html,
            )))
        }
    }
}
