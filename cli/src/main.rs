//! txtpdf CLI - study-notes source checking and inspection tool

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use txtpdf::figure::{default_cache_dir, find_subject_root, CacheStatus, FigureResolver};
use txtpdf::render::BlockStats;
use txtpdf::{parse_file_with_options, parse_files, JsonFormat, ParseOptions};

#[derive(Parser)]
#[command(name = "txtpdf")]
#[command(version)]
#[command(about = "Parse and inspect study-notes sources for PDF layout", long_about = None)]
struct Cli {
    /// Input source file (shows document information)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Dump the parsed block tree as JSON
    Parse {
        /// Input source file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Treat unknown header keys and callout kinds as errors
        #[arg(long)]
        strict: bool,
    },

    /// Dump the document as plain text
    Text {
        /// Input source file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Treat unknown header keys and callout kinds as errors
        #[arg(long)]
        strict: bool,
    },

    /// Parse many files and report which ones fail
    Check {
        /// Input source files
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Treat unknown header keys and callout kinds as errors
        #[arg(long)]
        strict: bool,
    },

    /// Print the table of contents
    Outline {
        /// Input source file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the outline as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve every figure and show its cache status
    Figures {
        /// Input source file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Subject root (discovered from the file location if not specified)
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,

        /// Page image cache directory
        #[arg(long, value_name = "DIR")]
        cache: Option<PathBuf>,
    },

    /// Show document information
    Info {
        /// Input source file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Parse {
            input,
            output,
            compact,
            strict,
        }) => cmd_parse(&input, output.as_deref(), compact, strict),
        Some(Commands::Text {
            input,
            output,
            strict,
        }) => cmd_text(&input, output.as_deref(), strict),
        Some(Commands::Check { inputs, strict }) => cmd_check(&inputs, strict),
        Some(Commands::Outline { input, json }) => cmd_outline(&input, json),
        Some(Commands::Figures { input, root, cache }) => {
            cmd_figures(&input, root.as_deref(), cache.as_deref())
        }
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            if let Some(input) = cli.input {
                cmd_info(&input)
            } else {
                println!("{}", "Usage: txtpdf <FILE>".yellow());
                println!("       txtpdf --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn parse_options(strict: bool) -> ParseOptions {
    if strict {
        ParseOptions::new().strict()
    } else {
        ParseOptions::new().lenient()
    }
}

/// Folder holding `input`; `.` for a bare file name.
fn document_dir(input: &Path) -> PathBuf {
    input
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Write `content` to `output`, or print it when no output is given.
fn emit(content: &str, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_parse(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    strict: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse_file_with_options(input, parse_options(strict))?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = txtpdf::render::to_json(&doc, format)?;
    emit(&json, output)
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    strict: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse_file_with_options(input, parse_options(strict))?;
    let text = txtpdf::render::to_text(&doc)?;
    emit(&text, output)
}

fn cmd_check(inputs: &[PathBuf], strict: bool) -> Result<(), Box<dyn std::error::Error>> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(format!("Parsing {} files...", inputs.len()));
    pb.enable_steady_tick(Duration::from_millis(100));

    let entries = parse_files(inputs, &parse_options(strict));
    pb.finish_and_clear();

    let mut ok = 0;
    for entry in &entries {
        match entry.result {
            Ok(ref doc) => {
                ok += 1;
                let stats = BlockStats::collect(&doc.blocks);
                println!(
                    "{} {} ({} blocks)",
                    "[OK]".green(),
                    entry.path.display(),
                    stats.total()
                );
            }
            Err(ref e) => println!("{} {}", "[ERROR]".red(), e),
        }
    }

    let total = format!("TOTAL: {}/{} OK", ok, entries.len());
    if ok == entries.len() {
        println!("\n{}", total.green().bold());
        Ok(())
    } else {
        println!("\n{}", total.yellow().bold());
        Err(format!("{} file(s) failed", entries.len() - ok).into())
    }
}

fn cmd_outline(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let doc = txtpdf::parse_file(input)?;
    let outline = doc.outline();

    if json {
        println!("{}", serde_json::to_string_pretty(&outline)?);
        return Ok(());
    }

    println!("{}", doc.config.toc_title.cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    if outline.is_empty() {
        println!("{}", "(no entries)".dimmed());
    }
    for (depth, item) in outline.flatten() {
        println!("{}{} {}", "  ".repeat(depth), item.title, format!("#{}", item.anchor).dimmed());
    }

    Ok(())
}

fn cmd_figures(
    input: &Path,
    root: Option<&Path>,
    cache: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = txtpdf::parse_file(input)?;
    let document_dir = document_dir(input);

    let root = match root {
        Some(dir) => dir.to_path_buf(),
        None => find_subject_root(&document_dir)?,
    };
    let cache_dir = cache
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_cache_dir(&document_dir, input));
    let resolver = FigureResolver::new(&document_dir, &root, cache_dir);

    let figures = doc.figures();
    if figures.is_empty() {
        println!("{}", "No figures.".dimmed());
        return Ok(());
    }

    let mut missing = 0;
    for fig in figures {
        let label = format!("{} p.{}", fig.file, fig.page);
        match resolver.resolve(fig) {
            Ok(resolved) => {
                let status = match resolved.status {
                    CacheStatus::Cached => "cached".green(),
                    CacheStatus::Missing => "not cached".yellow(),
                };
                println!(
                    "{} {} -> {} [{}]",
                    "[OK]".green(),
                    label,
                    resolved.source.display(),
                    status
                );
            }
            Err(e) => {
                missing += 1;
                println!("{} {}: {}", "[ERROR]".red(), label, e);
            }
        }
    }

    if missing > 0 {
        return Err(format!("{} figure source(s) not found", missing).into());
    }
    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = txtpdf::parse_file(input)?;
    let config = &doc.config;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let folder = document_dir(input);
    let folder = fs::canonicalize(&folder).unwrap_or(folder);

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Title".bold(), config.title_or(&stem));
    if let Some(ref subtitle) = config.subtitle {
        println!("{}: {}", "Subtitle".bold(), subtitle);
    }
    if let Some(ref author) = config.author {
        println!("{}: {}", "Author".bold(), author);
    }
    println!("{}: {}", "Output".bold(), config.output_file_name(&folder));
    println!(
        "{}: {}",
        "TOC".bold(),
        if config.include_toc { "Yes" } else { "No" }
    );
    if !doc.unknown_keys.is_empty() {
        println!(
            "{}: {}",
            "Ignored keys".bold(),
            doc.unknown_keys.join(", ").yellow()
        );
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let stats = BlockStats::collect(&doc.blocks);
    for (kind, count) in stats.iter() {
        println!("{}: {}", kind.bold(), count);
    }
    println!("{}: {}", "Outline entries".bold(), doc.outline().total_items());

    let words = doc.plain_text().split_whitespace().count();
    println!("{}: {}", "Words".bold(), words);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "txtpdf".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Study-notes markup parser");
    println!();
    println!("License: MIT");
}
