use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{DirectoryExportSink, ExportSink, GeneratorConfig, GeneratorService};
use ui::{App, UiApp, build_app_context};

const DEFAULT_LOG_FILTER: &str = "info,services=debug";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    EmptyValue { flag: &'static str },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::EmptyValue { flag } => write!(f, "{flag} must not be empty"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    let value = args.next().ok_or(ArgsError::MissingValue { flag })?;
    if value.trim().is_empty() {
        return Err(ArgsError::EmptyValue { flag });
    }
    Ok(value)
}

struct DesktopApp {
    generator: Arc<GeneratorService>,
    export_sink: Arc<DirectoryExportSink>,
}

impl UiApp for DesktopApp {
    fn generator(&self) -> Arc<GeneratorService> {
        Arc::clone(&self.generator)
    }

    fn export_sink(&self) -> Arc<dyn ExportSink> {
        self.export_sink.clone()
    }
}

#[derive(Debug, Default)]
struct Args {
    export_dir: Option<PathBuf>,
    model: Option<String>,
}

impl Args {
    /// Returns `None` when help was requested.
    fn parse(args: impl Iterator<Item = String>) -> Result<Option<Self>, ArgsError> {
        let mut args = args;
        let mut parsed = Self::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--export-dir" => {
                    parsed.export_dir = Some(require_value(&mut args, "--export-dir")?.into());
                }
                "--model" => {
                    parsed.model = Some(require_value(&mut args, "--model")?);
                }
                "--help" | "-h" => return Ok(None),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Some(parsed))
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--export-dir <dir>] [--model <name>]");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  FLASHGEN_AI_API_KEY       API key for the chat completions backend");
    eprintln!("  FLASHGEN_AI_BASE_URL      defaults to https://api.openai.com/v1");
    eprintln!("  FLASHGEN_AI_MODEL         defaults to gpt-4o-mini");
    eprintln!("  FLASHGEN_AI_TIMEOUT_SECS  request timeout, defaults to 60");
    eprintln!("  FLASHGEN_EXPORT_DIR       where exports are written, defaults to .");
    eprintln!("  FLASHGEN_TESSERACT        tesseract binary, defaults to tesseract");
    eprintln!("  FLASHGEN_OCR_LANG         tesseract language, defaults to eng");
    eprintln!("  RUST_LOG                  log filter, defaults to {DEFAULT_LOG_FILTER}");
}

fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| format!("failed to initialize tracing subscriber: {err}"))?;
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let Some(args) = Args::parse(std::env::args().skip(1)).inspect_err(|err| {
        eprintln!("{err}");
        print_usage();
    })?
    else {
        print_usage();
        return Ok(());
    };

    init_tracing()?;

    let mut config = GeneratorConfig::from_env();
    if let Some(model) = args.model {
        config = config.with_model(model);
    }
    let generator = Arc::new(GeneratorService::from_config(config));

    let export_sink = Arc::new(
        args.export_dir
            .map_or_else(DirectoryExportSink::from_env, DirectoryExportSink::new),
    );
    tracing::info!(dir = %export_sink.dir().display(), "exports will be written here");

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        generator,
        export_sink,
    });
    let context = build_app_context(&app);

    // tao can default to always-on-top in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Flashcard Generator")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
