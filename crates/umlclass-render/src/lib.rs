#![forbid(unsafe_code)]

//! HTML rendering for class hierarchy diagram sections.
//!
//! The markup uses the TypeDoc default theme's panel classes (`tsd-panel`,
//! `tsd-hierarchy-diagram`) plus `uml-class` on the image element, so existing stylesheets apply
//! without changes.

pub mod section;

pub use section::render_hierarchy_section;
pub use umlclass_core::ClassDiagramPosition;

/// Well-known sections of a documentation page that a diagram section is placed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSection {
    Hierarchy,
}

impl PageSection {
    /// The section heading as it appears on the page.
    pub fn heading(self) -> &'static str {
        match self {
            Self::Hierarchy => "Hierarchy",
        }
    }
}

/// Placement of a diagram section relative to an existing page section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionPlacement {
    pub anchor: PageSection,
    pub position: ClassDiagramPosition,
}

impl SectionPlacement {
    pub fn new(position: ClassDiagramPosition) -> Self {
        Self {
            anchor: PageSection::Hierarchy,
            position,
        }
    }

    /// Whether the diagram section is emitted before the anchor section.
    pub fn is_before_anchor(&self) -> bool {
        self.position == ClassDiagramPosition::Above
    }
}
