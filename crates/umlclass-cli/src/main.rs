use serde_json::{Map, Value};
use std::io::{Read, Write};
use std::path::Path;
use umlclass::render::{EmbedError, HierarchyDiagramEmbedder};
use umlclass::{
    DiagramInputs, DiagramOptions, DocumentFormat, ImageFormat, ImageLocation, PathPair,
    RenderedImage,
};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Diagram(umlclass::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Diagram(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<umlclass::Error> for CliError {
    fn from(value: umlclass::Error) -> Self {
        Self::Diagram(value)
    }
}

impl From<EmbedError> for CliError {
    fn from(value: EmbedError) -> Self {
        match value {
            EmbedError::Resolve(err) => Self::Diagram(err),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Section,
    Local,
    Embed,
    Remote,
    Decode,
    Config,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    config: Option<String>,
    format: Option<String>,
    server: Option<String>,
    title: Option<String>,
    name: Option<String>,
    legend: Option<String>,
    page: Option<String>,
    image: Option<String>,
    embed: Option<String>,
    out: Option<String>,
    pretty: bool,
}

fn usage() -> &'static str {
    "umlclass-cli\n\
\n\
USAGE:\n\
  umlclass-cli local --page <path> --image <path>\n\
  umlclass-cli embed [--format png|svg] [<image-path>|-]\n\
  umlclass-cli remote [--format png|svg] [--server <url>] [--config <file>] [<source-path>|-]\n\
  umlclass-cli decode [<encoded>|-]\n\
  umlclass-cli section --name <subject> [--config <file>] [--format png|svg] [--server <url>] [--title <text>] [--legend <file>] [--page <path> --image <path>] [--embed <image-path>] [--out <path>] [<source-path>|-]\n\
  umlclass-cli config [--config <file>] [--pretty]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - --config reads TypeDoc-style options (umlClassDiagram*) from a JSON or YAML (.yml/.yaml) file.\n\
  - embed infers the format from the file extension when --format is omitted.\n\
  - section follows umlClassDiagramLocation: local diagrams use --embed bytes when given,\n\
    otherwise the --page/--image pair; remote diagrams read PlantUML source from the input.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "section" => args.command = Command::Section,
            "local" => args.command = Command::Local,
            "embed" => args.command = Command::Embed,
            "remote" => args.command = Command::Remote,
            "decode" => args.command = Command::Decode,
            "config" => args.command = Command::Config,
            "--pretty" => args.pretty = true,
            "--config" => args.config = Some(flag_value(&mut it)?),
            "--format" => args.format = Some(flag_value(&mut it)?),
            "--server" => args.server = Some(flag_value(&mut it)?),
            "--title" => args.title = Some(flag_value(&mut it)?),
            "--name" => args.name = Some(flag_value(&mut it)?),
            "--legend" => args.legend = Some(flag_value(&mut it)?),
            "--page" => args.page = Some(flag_value(&mut it)?),
            "--image" => args.image = Some(flag_value(&mut it)?),
            "--embed" => args.embed = Some(flag_value(&mut it)?),
            "--out" => args.out = Some(flag_value(&mut it)?),
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn flag_value<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<String, CliError> {
    it.next().cloned().ok_or(CliError::Usage(usage()))
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn read_input_bytes(input: Option<&str>) -> Result<Vec<u8>, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read(path)?),
    }
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None | Some("-") => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

/// Loads the options document and applies command-line overrides on top of it, so flag values
/// go through the same validation as configured ones.
fn load_options(args: &Args) -> Result<DiagramOptions, CliError> {
    let mut doc = match args.config.as_deref() {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            umlclass::config::parse_document(&text, DocumentFormat::from_path(Path::new(path)))?
        }
        None => Value::Object(Map::new()),
    };

    if let Value::Object(map) = &mut doc {
        let overrides = [
            ("umlClassDiagramFormat", &args.format),
            ("umlClassDiagramServerUrl", &args.server),
            ("umlClassDiagramSectionTitle", &args.title),
        ];
        for (key, value) in overrides {
            if let Some(value) = value {
                map.insert(key.to_string(), Value::String(value.clone()));
            }
        }
    }

    Ok(DiagramOptions::from_value(&doc)?)
}

fn image_format_for(path: Option<&str>, explicit: Option<&str>) -> Result<ImageFormat, CliError> {
    if let Some(token) = explicit {
        return Ok(token.parse::<ImageFormat>()?);
    }
    path.filter(|p| *p != "-")
        .and_then(|p| ImageFormat::from_extension(Path::new(p)))
        .ok_or(CliError::Usage(
            "cannot infer the image format; pass --format png|svg",
        ))
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Local => {
            let (Some(page), Some(image)) = (args.page.as_deref(), args.image.as_deref()) else {
                return Err(CliError::Usage(usage()));
            };
            let reference = umlclass::local_reference(page, image)?;
            println!("{reference}");
            Ok(())
        }
        Command::Embed => {
            let input = args.input.as_deref().or(args.embed.as_deref());
            let format = image_format_for(input, args.format.as_deref())?;
            let bytes = read_input_bytes(input)?;
            println!("{}", umlclass::embedded_reference(&bytes, format));
            Ok(())
        }
        Command::Remote => {
            let options = load_options(&args)?;
            let source = read_input(args.input.as_deref())?;
            let reference = options.server().url_for(&source, options.format)?;
            println!("{reference}");
            Ok(())
        }
        Command::Decode => {
            let encoded = match args.input.as_deref() {
                None | Some("-") => read_input(None)?,
                Some(text) => text.to_string(),
            };
            let source = umlclass::encode::plantuml::decode(&encoded)?;
            write_text(&source, args.out.as_deref())
        }
        Command::Config => {
            let options = load_options(&args)?;
            let stdout = std::io::stdout().lock();
            if args.pretty {
                serde_json::to_writer_pretty(stdout, &options)?;
            } else {
                serde_json::to_writer(stdout, &options)?;
            }
            println!();
            Ok(())
        }
        Command::Section => {
            let Some(name) = args.name.as_deref() else {
                return Err(CliError::Usage(usage()));
            };
            let options = load_options(&args)?;

            let legend = args
                .legend
                .as_deref()
                .map(std::fs::read_to_string)
                .transpose()?;

            let rendered = match (options.location, args.embed.as_deref()) {
                (ImageLocation::Local, Some(path)) => {
                    let format = image_format_for(Some(path), args.format.as_deref())?;
                    Some(RenderedImage::new(std::fs::read(path)?, format))
                }
                _ => None,
            };
            let source = match options.location {
                ImageLocation::Remote => Some(read_input(args.input.as_deref())?),
                ImageLocation::Local => None,
            };

            let mut inputs = DiagramInputs::default();
            if let (Some(page), Some(image)) = (args.page.as_deref(), args.image.as_deref()) {
                inputs = inputs.with_paths(PathPair::new(page, image));
            }
            if let Some(rendered) = rendered.as_ref() {
                inputs = inputs.with_rendered(rendered);
            }
            if let Some(source) = source.as_deref() {
                inputs = inputs.with_source(source);
            }

            let embedder = HierarchyDiagramEmbedder::new().with_options(options);
            match embedder.render_section(name, &inputs, legend.as_deref())? {
                Some(html) => write_text(&html, args.out.as_deref()),
                None => Ok(()),
            }
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
