use crate::*;

const SOURCE: &str = "@startuml\nclass Base\nclass Derived\nBase <|-- Derived\n@enduml\n";

#[test]
fn local_without_bytes_uses_relative_path() {
    let resolver = DiagramReferenceResolver::new(ImageLocation::Local, ImageFormat::Svg);
    let inputs = DiagramInputs::default()
        .with_paths(PathPair::new("docs/classes/Foo.html", "docs/assets/Foo.svg"))
        .with_source(SOURCE);
    let r = resolver.resolve(&inputs).unwrap();
    assert_eq!(r, ImageReference::LocalRelativePath("../assets/Foo.svg".to_string()));
    assert!(r.is_clickable());
}

#[test]
fn local_with_bytes_embeds_using_the_bytes_format() {
    // The configured format is PNG, but the renderer produced SVG bytes.
    let resolver = DiagramReferenceResolver::new(ImageLocation::Local, ImageFormat::Png);
    let rendered = RenderedImage::new(b"<svg/>".to_vec(), ImageFormat::Svg);
    let inputs = DiagramInputs::default()
        .with_paths(PathPair::new("docs/classes/Foo.html", "docs/assets/Foo.svg"))
        .with_rendered(&rendered);
    let r = resolver.resolve(&inputs).unwrap();
    assert_eq!(
        r,
        ImageReference::EmbeddedDataUri("data:image/svg+xml;base64,PHN2Zy8+".to_string())
    );
    assert!(!r.is_clickable());
}

#[test]
fn remote_ignores_local_bytes_and_paths() {
    let resolver = DiagramReferenceResolver::new(ImageLocation::Remote, ImageFormat::Png);
    let rendered = RenderedImage::new(vec![1, 2, 3], ImageFormat::Png);
    let inputs = DiagramInputs::default()
        .with_paths(PathPair::new("docs/classes/Foo.html", "docs/assets/Foo.png"))
        .with_rendered(&rendered)
        .with_source(SOURCE);
    let r = resolver.resolve(&inputs).unwrap();
    assert_eq!(r, remote_reference(SOURCE, ImageFormat::Png).unwrap());
    assert_eq!(r.kind(), "remote");
}

#[test]
fn remote_uses_configured_server() {
    let resolver = DiagramReferenceResolver::new(ImageLocation::Remote, ImageFormat::Svg)
        .with_server(PlantUmlServer::new("https://plantuml.internal.test"));
    let r = resolver
        .resolve(&DiagramInputs::default().with_source("Bob -> Alice : hello"))
        .unwrap();
    assert_eq!(
        r.as_str(),
        "https://plantuml.internal.test/svg/SyfFKj2rKt3CoKnELR1Io4ZDoSa70000"
    );
}

#[test]
fn missing_inputs_are_precondition_errors() {
    let local = DiagramReferenceResolver::new(ImageLocation::Local, ImageFormat::Png);
    let err = local
        .resolve(&DiagramInputs::default().with_source(SOURCE))
        .unwrap_err();
    assert!(matches!(err, Error::Precondition { .. }), "{err}");

    let remote = DiagramReferenceResolver::new(ImageLocation::Remote, ImageFormat::Png);
    let err = remote
        .resolve(
            &DiagramInputs::default()
                .with_paths(PathPair::new("docs/Foo.html", "docs/Foo.png")),
        )
        .unwrap_err();
    assert!(matches!(err, Error::Precondition { .. }), "{err}");
}

#[test]
fn local_path_errors_propagate() {
    let resolver = DiagramReferenceResolver::default();
    let err = resolver
        .resolve(&DiagramInputs::default().with_paths(PathPair::new("", "docs/Foo.png")))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidPath { .. }), "{err}");
}
