//! fos-jumper - run the jumper over an HTML file
//!
//! Prints the enhanced document, or a JSON report with `--report`.
//! Logs go to stderr, filtered by `RUST_LOG` (default `info`).

mod report;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use fos_a11y::{JumperConfig, JumperMode, JumperOverrides};
use fos_engine::Page;
use fos_html::HtmlSerializer;
use serde_json::Value;
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::report::Report;

#[derive(Debug, Parser)]
#[command(name = "fos-jumper", version, about = "Make in-page jump targets focusable")]
struct Args {
    /// HTML file to process
    file: PathBuf,

    /// Configuration as a JSON object, or `@path` to read it from a file
    #[arg(long)]
    config: Option<String>,

    /// Navigate to this fragment after the page has loaded
    #[arg(long)]
    fragment: Option<String>,

    /// Override the configured mode
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Print a JSON report instead of the document
    #[arg(long, default_value_t = false)]
    report: bool,

    /// Record timing marks during initialization
    #[arg(long, default_value_t = false)]
    instrument: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum ModeArg {
    Static,
    Navigate,
}

impl From<ModeArg> for JumperMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Static => JumperMode::Static,
            ModeArg::Navigate => JumperMode::Navigate,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let output = run(&args)?;
    println!("{}", output);
    Ok(())
}

fn run(args: &Args) -> Result<String> {
    let config = effective_config(args)?;
    let url = file_url(&args.file)?;

    let file = File::open(&args.file)
        .with_context(|| format!("failed to open {}", args.file.display()))?;
    let mut page = Page::from_reader(url.as_str(), BufReader::new(file))
        .with_context(|| format!("failed to load {}", args.file.display()))?;

    page.install_jumper(config.clone());
    page.finish_parsing();
    if let Some(fragment) = &args.fragment {
        page.navigate_to_fragment(fragment);
    }

    if args.report {
        let report = Report::from_page(&page, &config);
        serde_json::to_string_pretty(&report).context("failed to serialize report")
    } else {
        Ok(HtmlSerializer::new().serialize_document(page.document().tree()))
    }
}

/// Defaults, then `--config`, then the individual flags
fn effective_config(args: &Args) -> Result<JumperConfig> {
    let mut config = match &args.config {
        Some(raw) => JumperConfig::from_json(&load_config(raw)?),
        None => JumperConfig::default(),
    };

    let mut overrides = JumperOverrides::new();
    if let Some(mode) = args.mode {
        overrides = overrides.mode(mode.into());
    }
    if args.instrument {
        overrides = overrides.enable_instrumentation(true);
    }
    config = config.with_overrides(&overrides);
    tracing::debug!("Effective config: {:?}", config);
    Ok(config)
}

/// Inline JSON, or `@path` naming a JSON file
fn load_config(raw: &str) -> Result<Value> {
    let text = match raw.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path))?,
        None => raw.to_string(),
    };
    serde_json::from_str(&text).context("config is not valid JSON")
}

fn file_url(path: &Path) -> Result<Url> {
    let absolute = path.canonicalize()
        .with_context(|| format!("failed to resolve {}", path.display()))?;
    Url::from_file_path(&absolute)
        .map_err(|()| anyhow!("cannot express {} as a file URL", absolute.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("fos-jumper-{}-{}", std::process::id(), name));
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn args(file: PathBuf) -> Args {
        Args { file, config: None, fragment: None, mode: None, report: false, instrument: false }
    }

    #[test]
    fn test_cli_parses() {
        let args = Args::try_parse_from([
            "fos-jumper", "page.html", "--mode", "navigate", "--fragment", "main", "--report",
        ]).unwrap();
        assert_eq!(args.mode, Some(ModeArg::Navigate));
        assert_eq!(args.fragment.as_deref(), Some("main"));
        assert!(args.report);
        assert!(!args.instrument);

        assert!(Args::try_parse_from(["fos-jumper", "page.html", "--mode", "lazy"]).is_err());
    }

    #[test]
    fn test_inline_and_file_config() {
        let inline = load_config(r#"{"bodyClass": "jump-ready"}"#).unwrap();
        assert_eq!(inline["bodyClass"], "jump-ready");

        let path = temp_file("config.json", r#"{"tabindex": 0}"#);
        let from_file = load_config(&format!("@{}", path.display())).unwrap();
        assert_eq!(from_file["tabindex"], 0);

        assert!(load_config("{not json").is_err());
        assert!(load_config("@/definitely/not/here.json").is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let mut a = args(PathBuf::from("page.html"));
        a.config = Some(r#"{"mode": "static", "bodyClass": "ready"}"#.into());
        a.mode = Some(ModeArg::Navigate);
        a.instrument = true;

        let config = effective_config(&a).unwrap();
        assert_eq!(config.mode, JumperMode::Navigate);
        assert_eq!(config.body_class, "ready");
        assert!(config.enable_instrumentation);
    }

    #[test]
    fn test_run_outputs_enhanced_document() {
        let path = temp_file("page.html", r#"<body><div id="main">Main</div><button id="go">Go</button></body>"#);
        let html = run(&args(path)).unwrap();
        assert!(html.contains(r#"class="has-jumper""#));
        assert!(html.contains(r#"<div id="main" tabindex="-1">"#));
        assert!(html.contains(r#"<button id="go">"#));
    }

    #[test]
    fn test_run_report() {
        let path = temp_file("report.html", r##"<body><a href="#main">Skip</a><div id="main">Main</div></body>"##);
        let mut a = args(path);
        a.report = true;
        a.fragment = Some("main".into());

        let report: Value = serde_json::from_str(&run(&a).unwrap()).unwrap();
        assert_eq!(report["active"], true);
        assert_eq!(report["tagged"], serde_json::json!(["main"]));
        assert_eq!(report["activeElement"], "main");
    }

    #[test]
    fn test_missing_file() {
        assert!(run(&args(PathBuf::from("/definitely/not/here.html"))).is_err());
    }
}
