/// A resolved diagram image reference, ready to be used as an HTML `src`/`href` value.
///
/// The variant decides the markup shape: browsers refuse to navigate to `data:` URLs, so embedded
/// images are rendered without a link while the other two variants are wrapped in an anchor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ImageReference {
    /// `/`-separated path from the page's directory to an image file on disk.
    LocalRelativePath(String),
    /// `data:<mime>;base64,<payload>` URI carrying the image bytes.
    EmbeddedDataUri(String),
    /// PlantUML server URL that renders the diagram when dereferenced.
    RemoteServiceUrl(String),
}

impl ImageReference {
    pub fn as_str(&self) -> &str {
        match self {
            Self::LocalRelativePath(s) | Self::EmbeddedDataUri(s) | Self::RemoteServiceUrl(s) => s,
        }
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self, Self::EmbeddedDataUri(_))
    }

    /// Whether the image can be opened at full size by following a link to the reference.
    pub fn is_clickable(&self) -> bool {
        !self.is_embedded()
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::LocalRelativePath(_) => "local",
            Self::EmbeddedDataUri(_) => "embedded",
            Self::RemoteServiceUrl(_) => "remote",
        }
    }
}

impl AsRef<str> for ImageReference {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for ImageReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
