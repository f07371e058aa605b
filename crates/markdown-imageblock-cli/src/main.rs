use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use markdown_imageblock_config::Config;
use markdown_imageblock_engine::{
    Diagnostic, ParseOptions, ParsedDoc, io, parse_document, parsing::snapshot::ImageSnap,
};
use xi_rope::Rope;

#[derive(Parser)]
#[command(
    name = "markdown-imageblock",
    version,
    about = "Find and check fenced image blocks in Markdown"
)]
struct Cli {
    /// Config file to use instead of ~/.config/markdown-imageblock/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base directory that block ids are computed relative to
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Log parser decisions at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored diagnostic output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse files and report malformed image blocks
    Check {
        /// Markdown files, or directories to scan for `.md` files
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// List the image blocks found in a file
    Blocks {
        file: PathBuf,

        /// Print JSON instead of one line per block
        #[arg(long)]
        json: bool,
    },
}

/// Effective settings after merging the config file with CLI flags.
struct Settings {
    root: Option<PathBuf>,
    options: ParseOptions,
    deny_warnings: bool,
}

impl Settings {
    fn resolve(cli: &Cli) -> Result<Self> {
        let config = match &cli.config {
            Some(path) => Config::load_from_path(path)?
                .with_context(|| format!("config file '{}' not found", path.display()))?,
            None => Config::load()?.unwrap_or_default(),
        };
        log::debug!("Effective config: {config:?}");

        Ok(Self {
            root: cli.root.clone().or(config.root),
            options: ParseOptions {
                report_unterminated: config.report_unterminated,
            },
            deny_warnings: config.deny_warnings,
        })
    }

    fn label(&self, path: &Path) -> String {
        io::document_label(path, self.root.as_deref())
    }
}

/// Diagnostic counts across every checked file.
#[derive(Debug, Default, PartialEq, Eq)]
struct Summary {
    files: usize,
    images: usize,
    errors: usize,
    warnings: usize,
}

impl Summary {
    fn record(&mut self, doc: &ParsedDoc, diagnostics: &[Diagnostic]) {
        self.files += 1;
        self.images += doc.images().count();
        for d in diagnostics {
            if d.is_error() {
                self.errors += 1;
            } else {
                self.warnings += 1;
            }
        }
    }

    fn failed(&self, deny_warnings: bool) -> bool {
        self.errors > 0 || (deny_warnings && self.warnings > 0)
    }
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(2);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let settings = Settings::resolve(&cli)?;
    let color = if cli.no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };

    match &cli.command {
        Command::Check { paths } => check(paths, &settings, color),
        Command::Blocks { file, json } => {
            blocks(file, *json, &settings)?;
            Ok(0)
        }
    }
}

fn check(paths: &[PathBuf], settings: &Settings, color: ColorChoice) -> Result<i32> {
    let targets = collect_markdown(paths)?;
    log::info!("Checking {} file(s)", targets.len());

    let writer = StandardStream::stderr(color);
    let config = term::Config::default();
    let mut files = SimpleFiles::new();
    let mut summary = Summary::default();

    for path in &targets {
        let source = io::read_path(path)?;
        let label = settings.label(path);
        let (doc, diagnostics) = parse_source(&source, &label, settings.options);
        summary.record(&doc, &diagnostics);

        let file_id = files.add(label, source);
        for d in &diagnostics {
            term::emit_to_write_style(
                &mut writer.lock(),
                &config,
                &files,
                &d.to_diagnostic(file_id),
            )?;
        }
    }

    println!(
        "checked {} file(s): {} image block(s), {} error(s), {} warning(s)",
        summary.files, summary.images, summary.errors, summary.warnings
    );

    Ok(if summary.failed(settings.deny_warnings) {
        1
    } else {
        0
    })
}

fn blocks(file: &Path, json: bool, settings: &Settings) -> Result<()> {
    let source = io::read_path(file)?;
    let label = settings.label(file);
    let (doc, diagnostics) = parse_source(&source, &label, settings.options);

    for d in &diagnostics {
        eprintln!("{label}: {d}");
    }

    let images: Vec<ImageSnap> = doc.images().map(ImageSnap::from).collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&images)?);
        return Ok(());
    }

    for image in &images {
        println!("{}", describe(image));
    }
    Ok(())
}

fn parse_source(source: &str, label: &str, options: ParseOptions) -> (ParsedDoc, Vec<Diagnostic>) {
    let rope = Rope::from(source);
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let doc = parse_document(&rope, label, options, &mut diagnostics);
    (doc, diagnostics)
}

fn describe(image: &ImageSnap) -> String {
    let mut line = format!(
        "{}  {}:{}  src={:?} alt={:?}",
        image.id, image.line, image.column, image.src, image.alt
    );
    if !image.closed {
        line.push_str("  (unclosed)");
    }
    line
}

/// Expands directories into their Markdown files; plain files pass through.
fn collect_markdown(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for path in paths {
        if path.is_dir() {
            out.extend(io::scan_markdown_files(path)?);
        } else {
            out.push(path.clone());
        }
    }
    Ok(out)
}
