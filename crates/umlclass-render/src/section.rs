use std::fmt::Write as _;
use umlclass_core::ImageReference;

pub const SECTION_CLASS: &str = "tsd-panel tsd-hierarchy-diagram";
pub const IMAGE_CLASS: &str = "uml-class";

const EMBEDDED_TITLE: &str = "Right click and select 'View image' to enlarge";
const LINK_TITLE: &str = "Click to enlarge";

/// Renders the page section that shows a class hierarchy diagram.
///
/// Embedded (`data:`) images cannot be opened by following a link, so they are rendered as a bare
/// `<img>` with a hint to use the browser's context menu. Local and remote images are wrapped in
/// an anchor pointing at the image itself.
///
/// `title` is escaped as text, `subject_name` and the reference as attribute values, so pass them
/// unescaped: an already-escaped title such as `A &amp; B` comes out as `A &amp;amp; B`. The legend
/// is trusted markup and is appended verbatim after the image; when `None`, nothing is emitted for
/// it.
pub fn render_hierarchy_section(
    title: &str,
    reference: &ImageReference,
    subject_name: &str,
    legend_html: Option<&str>,
) -> String {
    let title = htmlize::escape_text(title);
    let src = htmlize::escape_attribute(reference.as_str());
    let alt = htmlize::escape_attribute(subject_name);

    let mut out = String::with_capacity(256 + src.len());
    let _ = writeln!(out, r#"<section class="{SECTION_CLASS}">"#);
    let _ = writeln!(out, "    <h3>{title}</h3>");

    match reference {
        ImageReference::EmbeddedDataUri(_) => {
            let _ = writeln!(out, r#"    <img class="{IMAGE_CLASS}" src="{src}""#);
            let _ = writeln!(out, r#"         alt="UML class diagram of {alt}""#);
            let _ = writeln!(out, r#"         title="{EMBEDDED_TITLE}" />"#);
        }
        ImageReference::LocalRelativePath(_) | ImageReference::RemoteServiceUrl(_) => {
            let _ = writeln!(
                out,
                r#"    <a class="{IMAGE_CLASS}" href="{src}" title="{LINK_TITLE}">"#
            );
            let _ = writeln!(out, r#"        <img src="{src}""#);
            let _ = writeln!(out, r#"             alt="UML class diagram of {alt}" />"#);
            out.push_str("    </a>\n");
        }
    }

    if let Some(legend) = legend_html {
        let _ = writeln!(out, "    {legend}");
    }

    out.push_str("</section>\n");
    out
}
