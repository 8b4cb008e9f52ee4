//! Diagram options, one typed field per documented option.
//!
//! Options are read from a JSON object (or a YAML document converted to one) keyed by the
//! option names (`umlClassDiagramFormat`, `umlClassDiagramLocation`, ...). Keys that are not
//! diagram options are ignored so the same document can carry unrelated host settings.

use crate::encode::{DEFAULT_PLANTUML_SERVER, PlantUmlServer};
use crate::{Error, ImageFormat, ImageLocation, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;

/// Syntax of an options document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// `.yaml` / `.yml` files are YAML; everything else is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Parses an options document into a JSON value without interpreting any option.
///
/// YAML is converted to the equivalent JSON value. An empty document yields an empty object.
pub fn parse_document(text: &str, format: DocumentFormat) -> Result<Value> {
    let value = match format {
        DocumentFormat::Json => {
            serde_json::from_str(text).map_err(|e| Error::InvalidConfig {
                message: e.to_string(),
            })?
        }
        DocumentFormat::Yaml => {
            let raw: serde_yaml::Value =
                serde_yaml::from_str(text).map_err(|e| Error::InvalidConfig {
                    message: e.to_string(),
                })?;
            serde_json::to_value(raw).map_err(|e| Error::InvalidConfig {
                message: e.to_string(),
            })?
        }
    };
    Ok(match value {
        Value::Null => Value::Object(Map::new()),
        other => other,
    })
}

/// Whether and how detailed class diagrams are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassDiagramType {
    None,
    Simple,
    #[default]
    Detailed,
}

/// Where the diagram section goes relative to the page's hierarchy section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassDiagramPosition {
    #[default]
    Above,
    Below,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberVisibilityStyle {
    Text,
    #[default]
    Icon,
}

/// Font styles understood by PlantUML skin parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    Normal,
    Plain,
    Italic,
    Bold,
}

/// An enumerated option value with a fixed set of accepted tokens.
trait OptionToken: Sized {
    const EXPECTED: &'static str;

    fn from_token(token: &str) -> Option<Self>;
}

impl OptionToken for ImageFormat {
    const EXPECTED: &'static str = "png|svg";

    fn from_token(token: &str) -> Option<Self> {
        token.parse().ok()
    }
}

impl OptionToken for ImageLocation {
    const EXPECTED: &'static str = "local|remote";

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "local" => Some(Self::Local),
            "remote" => Some(Self::Remote),
            _ => None,
        }
    }
}

impl OptionToken for ClassDiagramType {
    const EXPECTED: &'static str = "none|simple|detailed";

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "none" => Some(Self::None),
            "simple" => Some(Self::Simple),
            "detailed" => Some(Self::Detailed),
            _ => None,
        }
    }
}

impl OptionToken for ClassDiagramPosition {
    const EXPECTED: &'static str = "above|below";

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "above" => Some(Self::Above),
            "below" => Some(Self::Below),
            _ => None,
        }
    }
}

impl OptionToken for MemberVisibilityStyle {
    const EXPECTED: &'static str = "text|icon";

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "text" => Some(Self::Text),
            "icon" => Some(Self::Icon),
            _ => None,
        }
    }
}

impl OptionToken for FontStyle {
    const EXPECTED: &'static str = "normal|plain|italic|bold";

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "normal" => Some(Self::Normal),
            "plain" => Some(Self::Plain),
            "italic" => Some(Self::Italic),
            "bold" => Some(Self::Bold),
            _ => None,
        }
    }
}

/// Font settings for one text role in the diagram. Empty strings and `0` mean "PlantUML default".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FontOptions {
    pub name: String,
    pub size: u32,
    pub style: Option<FontStyle>,
    pub color: String,
}

/// Cosmetic settings handed through to the diagram source generator.
///
/// Colors are `transparent` or `#RGBHEX`; empty strings mean "PlantUML default".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramStyle {
    pub hide_circled_char: bool,
    pub hide_shadow: bool,
    pub box_background_color: String,
    pub box_border_color: String,
    pub box_border_radius: u32,
    /// Defaults to 2 because 0 hides borders.
    pub box_border_width: u32,
    pub arrow_color: String,
    pub class_font: FontOptions,
    pub class_attribute_font: FontOptions,
}

impl Default for DiagramStyle {
    fn default() -> Self {
        Self {
            hide_circled_char: false,
            hide_shadow: false,
            box_background_color: String::new(),
            box_border_color: String::new(),
            box_border_radius: 0,
            box_border_width: 2,
            arrow_color: String::new(),
            class_font: FontOptions::default(),
            class_attribute_font: FontOptions::default(),
        }
    }
}

pub const DEFAULT_SECTION_TITLE: &str = "Hierarchy-Diagram";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramOptions {
    /// `umlClassDiagramFormat`
    pub format: ImageFormat,
    /// `umlClassDiagramLocation`
    pub location: ImageLocation,
    /// `umlClassDiagramType`
    pub diagram_type: ClassDiagramType,
    /// `umlClassDiagramSectionTitle`
    pub section_title: String,
    /// `umlClassDiagramPosition`
    pub position: ClassDiagramPosition,
    /// `umlClassDiagramHideEmptyMembers`
    pub hide_empty_members: bool,
    /// `umlClassDiagramTopDownLayoutMaxSiblings`: above this many siblings the layout switches
    /// from top-down to left-right.
    pub top_down_layout_max_siblings: u32,
    /// `umlClassDiagramMemberVisibilityStyle`
    pub member_visibility_style: MemberVisibilityStyle,
    /// `umlClassDiagramServerUrl`
    pub server_url: String,
    pub style: DiagramStyle,
}

impl Default for DiagramOptions {
    fn default() -> Self {
        Self {
            format: ImageFormat::Png,
            location: ImageLocation::Local,
            diagram_type: ClassDiagramType::Detailed,
            section_title: DEFAULT_SECTION_TITLE.to_string(),
            position: ClassDiagramPosition::Above,
            hide_empty_members: true,
            top_down_layout_max_siblings: 6,
            member_visibility_style: MemberVisibilityStyle::Icon,
            server_url: DEFAULT_PLANTUML_SERVER.to_string(),
            style: DiagramStyle::default(),
        }
    }
}

impl DiagramOptions {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::from_value(&parse_document(text, DocumentFormat::Json)?)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Self::from_value(&parse_document(text, DocumentFormat::Yaml)?)
    }

    /// Reads options from a JSON object. Missing keys keep their defaults; an empty YAML document
    /// (`null`) is treated like an empty object.
    pub fn from_value(value: &Value) -> Result<Self> {
        let empty = Map::new();
        let map = match value {
            Value::Object(map) => map,
            Value::Null => &empty,
            _ => {
                return Err(Error::InvalidConfig {
                    message: "options document must be an object".to_string(),
                });
            }
        };

        let r = OptionReader { map };
        let d = Self::default();

        let server_url = r.string("umlClassDiagramServerUrl", &d.server_url)?;
        validate_server_url(&server_url)?;

        Ok(Self {
            format: r.token("umlClassDiagramFormat", d.format)?,
            location: r.token("umlClassDiagramLocation", d.location)?,
            diagram_type: r.token("umlClassDiagramType", d.diagram_type)?,
            section_title: r.string("umlClassDiagramSectionTitle", &d.section_title)?,
            position: r.token("umlClassDiagramPosition", d.position)?,
            hide_empty_members: r
                .boolean("umlClassDiagramHideEmptyMembers", d.hide_empty_members)?,
            top_down_layout_max_siblings: r.count(
                "umlClassDiagramTopDownLayoutMaxSiblings",
                d.top_down_layout_max_siblings,
            )?,
            member_visibility_style: r.token(
                "umlClassDiagramMemberVisibilityStyle",
                d.member_visibility_style,
            )?,
            server_url,
            style: DiagramStyle {
                hide_circled_char: r
                    .boolean("umlClassDiagramHideCircledChar", d.style.hide_circled_char)?,
                hide_shadow: r.boolean("umlClassDiagramHideShadow", d.style.hide_shadow)?,
                box_background_color: r.string(
                    "umlClassDiagramBoxBackgroundColor",
                    &d.style.box_background_color,
                )?,
                box_border_color: r
                    .string("umlClassDiagramBoxBorderColor", &d.style.box_border_color)?,
                box_border_radius: r
                    .count("umlClassDiagramBoxBorderRadius", d.style.box_border_radius)?,
                box_border_width: r
                    .count("umlClassDiagramBoxBorderWidth", d.style.box_border_width)?,
                arrow_color: r.string("umlClassDiagramArrowColor", &d.style.arrow_color)?,
                class_font: FontOptions {
                    name: r.string("umlClassDiagramClassFontName", "")?,
                    size: r.count("umlClassDiagramClassFontSize", 0)?,
                    style: r.optional_token("umlClassDiagramClassFontStyle")?,
                    color: r.string("umlClassDiagramClassFontColor", "")?,
                },
                class_attribute_font: FontOptions {
                    name: r.string("umlClassDiagramClassAttributeFontName", "")?,
                    size: r.count("umlClassDiagramClassAttributeFontSize", 0)?,
                    style: r.optional_token("umlClassDiagramClassAttributeFontStyle")?,
                    color: r.string("umlClassDiagramClassAttributeFontColor", "")?,
                },
            },
        })
    }

    pub fn server(&self) -> PlantUmlServer {
        PlantUmlServer::new(self.server_url.as_str())
    }

    /// Whether class diagrams should be generated at all.
    pub fn diagrams_enabled(&self) -> bool {
        self.diagram_type != ClassDiagramType::None
    }
}

fn validate_server_url(raw: &str) -> Result<()> {
    let ok = url::Url::parse(raw)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
        .unwrap_or(false);
    if ok {
        Ok(())
    } else {
        Err(Error::UnknownOptionValue {
            option: "umlClassDiagramServerUrl",
            value: raw.to_string(),
            expected: "an absolute http(s) URL",
        })
    }
}

struct OptionReader<'a> {
    map: &'a Map<String, Value>,
}

impl OptionReader<'_> {
    fn get(&self, key: &'static str) -> Option<&Value> {
        let value = self.map.get(key)?;
        tracing::debug!(option = key, %value, "applying diagram option");
        Some(value)
    }

    fn optional_token<T: OptionToken>(&self, key: &'static str) -> Result<Option<T>> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        let Some(raw) = value.as_str() else {
            return Err(Error::InvalidOptionType {
                option: key,
                expected: "a string",
            });
        };
        // An empty string keeps the option unset (the PlantUML default applies).
        let token = raw.trim().to_ascii_lowercase();
        if token.is_empty() {
            return Ok(None);
        }
        T::from_token(&token)
            .map(Some)
            .ok_or_else(|| Error::UnknownOptionValue {
                option: key,
                value: raw.to_string(),
                expected: T::EXPECTED,
            })
    }

    fn token<T: OptionToken>(&self, key: &'static str, default: T) -> Result<T> {
        let Some(value) = self.get(key) else {
            return Ok(default);
        };
        let Some(raw) = value.as_str() else {
            return Err(Error::InvalidOptionType {
                option: key,
                expected: "a string",
            });
        };
        T::from_token(&raw.trim().to_ascii_lowercase()).ok_or_else(|| Error::UnknownOptionValue {
            option: key,
            value: raw.to_string(),
            expected: T::EXPECTED,
        })
    }

    fn string(&self, key: &'static str, default: &str) -> Result<String> {
        match self.get(key) {
            None => Ok(default.to_string()),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(_) => Err(Error::InvalidOptionType {
                option: key,
                expected: "a string",
            }),
        }
    }

    fn boolean(&self, key: &'static str, default: bool) -> Result<bool> {
        match self.get(key) {
            None => Ok(default),
            Some(Value::Bool(b)) => Ok(*b),
            Some(_) => Err(Error::InvalidOptionType {
                option: key,
                expected: "a boolean",
            }),
        }
    }

    /// A non-negative integer option.
    fn count(&self, key: &'static str, default: u32) -> Result<u32> {
        let Some(value) = self.get(key) else {
            return Ok(default);
        };
        let Some(n) = value.as_i64() else {
            return Err(Error::InvalidOptionType {
                option: key,
                expected: "an integer",
            });
        };
        if n < 0 {
            return Err(Error::OptionOutOfRange {
                option: key,
                value: n,
                min: 0,
            });
        }
        u32::try_from(n).map_err(|_| Error::InvalidOptionType {
            option: key,
            expected: "an integer that fits in 32 bits",
        })
    }
}
