use crate::*;
use base64::Engine as _;
use std::path::{Path, PathBuf};

#[test]
fn local_reference_is_relative_to_page_directory() {
    let r = local_reference("docs/classes/Foo.html", "docs/assets/Foo.svg").unwrap();
    assert_eq!(r, ImageReference::LocalRelativePath("../assets/Foo.svg".to_string()));

    let r = local_reference("a/b/page.html", "a/images/x.svg").unwrap();
    assert_eq!(r.as_str(), "../images/x.svg");
}

#[test]
fn local_reference_resolves_back_to_image_path() {
    let cases = [
        ("out/classes/Foo.html", "out/assets/Foo.png"),
        ("out/index.html", "out/assets/diagrams/Foo.png"),
        ("out/a/b/c/Deep.html", "out/Foo.png"),
        ("/srv/site/modules/m.html", "/srv/site/modules/m.svg"),
    ];
    for (page, image) in cases {
        let rel = local_reference(page, image).unwrap();
        let page_dir = Path::new(page).parent().unwrap();
        let mut resolved: Vec<&str> = page_dir.iter().map(|s| s.to_str().unwrap()).collect();
        for seg in rel.as_str().split('/') {
            if seg == ".." {
                resolved.pop();
            } else {
                resolved.push(seg);
            }
        }
        let resolved: PathBuf = resolved.iter().collect();
        assert_eq!(resolved, Path::new(image), "page={page} rel={rel}");
    }
}

#[test]
fn local_reference_rejects_empty_and_mismatched_paths() {
    let err = local_reference("", "docs/x.png").unwrap_err();
    assert!(matches!(err, Error::InvalidPath { .. }), "{err}");

    let err = local_reference("docs/page.html", "").unwrap_err();
    assert!(matches!(err, Error::InvalidPath { .. }), "{err}");

    let err = local_reference("/docs/page.html", "docs/x.png").unwrap_err();
    assert!(matches!(err, Error::InvalidPath { .. }), "{err}");
}

#[test]
fn embedded_reference_uses_exact_mime_prefixes() {
    let png = embedded_reference(&[0x89, 0x50, 0x4E, 0x47], ImageFormat::Png);
    assert_eq!(png.as_str(), "data:image/png;base64,iVBORw==");
    assert!(png.is_embedded());

    let svg = embedded_reference(b"<svg/>", ImageFormat::Svg);
    assert_eq!(svg.as_str(), "data:image/svg+xml;base64,PHN2Zy8+");

    let empty = embedded_reference(&[], ImageFormat::Svg);
    assert_eq!(empty.as_str(), "data:image/svg+xml;base64,");
}

#[test]
fn embedded_reference_payload_decodes_to_input_bytes() {
    let bytes: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
    for format in [ImageFormat::Png, ImageFormat::Svg] {
        let r = embedded_reference(&bytes, format);
        let (_, payload) = r.as_str().split_once(";base64,").unwrap();
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .unwrap();
        assert_eq!(decoded, bytes);
    }
}

#[test]
fn remote_reference_builds_plantuml_server_url() {
    let r = remote_reference("Bob -> Alice : hello", ImageFormat::Svg).unwrap();
    assert_eq!(
        r,
        ImageReference::RemoteServiceUrl(
            "http://www.plantuml.com/plantuml/svg/SyfFKj2rKt3CoKnELR1Io4ZDoSa70000".to_string()
        )
    );

    let png = remote_reference("Bob -> Alice : hello", ImageFormat::Png).unwrap();
    assert!(png.as_str().starts_with("http://www.plantuml.com/plantuml/png/"));
}

#[test]
fn remote_reference_is_deterministic() {
    let source = "@startuml\nclass Animal\nclass Dog\nAnimal <|-- Dog\n@enduml\n";
    let a = remote_reference(source, ImageFormat::Png).unwrap();
    let b = remote_reference(source, ImageFormat::Png).unwrap();
    assert_eq!(a, b);

    let encoded = a.as_str().rsplit('/').next().unwrap();
    assert_eq!(encode::plantuml::decode(encoded).unwrap(), source);
}

#[test]
fn custom_server_ignores_trailing_slash() {
    let server = PlantUmlServer::new("https://uml.example.test/plantuml/");
    assert_eq!(server.base_url(), "https://uml.example.test/plantuml");
    let r = server.url_for("Bob -> Alice : hello", ImageFormat::Png).unwrap();
    assert_eq!(
        r.as_str(),
        "https://uml.example.test/plantuml/png/SyfFKj2rKt3CoKnELR1Io4ZDoSa70000"
    );
}

#[test]
fn image_format_parsing_is_closed() {
    assert_eq!("png".parse::<ImageFormat>().unwrap(), ImageFormat::Png);
    assert_eq!(" SVG ".parse::<ImageFormat>().unwrap(), ImageFormat::Svg);
    let err = "jpg".parse::<ImageFormat>().unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat { ref value } if value == "jpg"));

    assert_eq!(
        ImageFormat::from_extension(Path::new("out/Foo.SVG")),
        Some(ImageFormat::Svg)
    );
    assert_eq!(ImageFormat::from_extension(Path::new("out/Foo.gif")), None);
}
