//! docoutline CLI - document outline extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use docoutline::render::{summary_to_json, to_json};
use docoutline::{DocumentSection, JsonFormat, Outline, OutlineOptions, Outliner, Role};

#[derive(Parser)]
#[command(name = "docoutline")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Build a hierarchical outline from a page layout dump", long_about = None)]
struct Cli {
    /// Input layout file (JSON)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the section tree
    Outline {
        /// Input layout file (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Also print every fragment with its role
        #[arg(short, long)]
        blocks: bool,

        #[command(flatten)]
        tuning: TuningArgs,
    },

    /// Print the table of contents
    Toc {
        /// Input layout file (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        tuning: TuningArgs,
    },

    /// Show role histogram and word counts
    Stats {
        /// Input layout file (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        tuning: TuningArgs,
    },

    /// Write the outline (or its summary) as JSON
    Json {
        /// Input layout file (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Write the summary (TOC, word counts, roles) instead of the tree
        #[arg(long)]
        summary: bool,

        #[command(flatten)]
        tuning: TuningArgs,
    },

    /// Show version information
    Version,
}

/// Classification thresholds.
#[derive(Args, Clone, Default)]
struct TuningArgs {
    /// Smallest font size (pt) that can be a heading
    #[arg(long, env = "DOCOUTLINE_MIN_HEADING_SIZE")]
    min_heading_size: Option<f32>,

    /// Fraction of page height treated as header/footer zone
    #[arg(long)]
    header_footer_band: Option<f32>,

    /// Largest size gap (pt) within one heading level
    #[arg(long)]
    heading_cluster_tolerance: Option<f32>,

    /// Bold lines shorter than this many words are headings
    #[arg(long)]
    bold_heading_word_limit: Option<usize>,

    /// Max line-width / page-width ratio for captions
    #[arg(long)]
    caption_width_ratio: Option<f32>,

    /// Read pages on a single thread
    #[arg(long)]
    sequential: bool,
}

impl TuningArgs {
    fn to_options(&self) -> OutlineOptions {
        let mut options = OutlineOptions::new();
        if let Some(size) = self.min_heading_size {
            options = options.with_min_heading_size(size);
        }
        if let Some(band) = self.header_footer_band {
            options = options.with_header_footer_band(band);
        }
        if let Some(tolerance) = self.heading_cluster_tolerance {
            options = options.with_heading_cluster_tolerance(tolerance);
        }
        if let Some(words) = self.bold_heading_word_limit {
            options = options.with_bold_heading_word_limit(words);
        }
        if let Some(ratio) = self.caption_width_ratio {
            options = options.with_caption_width_ratio(ratio);
        }
        if self.sequential {
            options = options.sequential();
        }
        options
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Outline {
            input,
            blocks,
            tuning,
        }) => cmd_outline(&input, blocks, &tuning),
        Some(Commands::Toc { input, tuning }) => cmd_toc(&input, &tuning),
        Some(Commands::Stats { input, tuning }) => cmd_stats(&input, &tuning),
        Some(Commands::Json {
            input,
            output,
            compact,
            summary,
            tuning,
        }) => cmd_json(&input, output.as_deref(), compact, summary, &tuning),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: print the outline if input is provided
            if let Some(input) = cli.input {
                cmd_outline(&input, false, &TuningArgs::default())
            } else {
                println!("{}", "Usage: docoutline <FILE>".yellow());
                println!("       docoutline --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load(input: &Path, tuning: &TuningArgs) -> Result<Outline, Box<dyn std::error::Error>> {
    let outline = Outliner::with_options(tuning.to_options()).extract_file(input)?;
    if outline.skipped_fragments > 0 {
        log::warn!(
            "{} line(s) could not be extracted and were skipped",
            outline.skipped_fragments
        );
    }
    Ok(outline)
}

fn cmd_outline(
    input: &Path,
    blocks: bool,
    tuning: &TuningArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let outline = load(input, tuning)?;

    if outline.is_empty() {
        println!("{}", "No text found.".yellow());
        return Ok(());
    }

    for section in &outline.sections {
        print_section(section, 0, blocks);
    }

    Ok(())
}

fn print_section(section: &DocumentSection, indent: usize, blocks: bool) {
    let pad = "  ".repeat(indent);
    let title = if section.is_untitled() {
        "(untitled)".dimmed().to_string()
    } else {
        section.title.bold().to_string()
    };
    let pages = match section.page_span() {
        Some((first, last)) if first == last => format!("p. {}", first),
        Some((first, last)) => format!("pp. {}-{}", first, last),
        None => "empty".to_string(),
    };
    println!("{}{} {}", pad, title, pages.dimmed());

    if blocks {
        for block in &section.blocks {
            println!(
                "{}  {} {}",
                pad,
                format!("[{}]", block.role()).cyan(),
                block.text()
            );
        }
    }

    for child in &section.subsections {
        print_section(child, indent + 1, blocks);
    }
}

fn cmd_toc(input: &Path, tuning: &TuningArgs) -> Result<(), Box<dyn std::error::Error>> {
    let summary = load(input, tuning)?.summary();

    if summary.toc.is_empty() {
        println!("{}", "No headings found.".yellow());
        return Ok(());
    }

    for entry in &summary.toc {
        let page = entry
            .first_page
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{}{} {}",
            "  ".repeat(entry.depth),
            entry.title,
            format!("({})", page).dimmed()
        );
    }

    Ok(())
}

fn cmd_stats(input: &Path, tuning: &TuningArgs) -> Result<(), Box<dyn std::error::Error>> {
    let outline = load(input, tuning)?;
    let summary = outline.summary();

    println!("{}", "Document Outline".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), outline.page_count);
    println!("{}: {}", "Sections".bold(), summary.sections.len());
    println!("{}: {}", "Words".bold(), summary.total_words);
    if let Some(avg) = outline.stats.as_ref().and_then(|s| s.avg_font_size()) {
        println!("{}: {:.1} pt", "Average font size".bold(), avg);
    }
    if outline.skipped_fragments > 0 {
        println!(
            "{}: {}",
            "Skipped lines".yellow().bold(),
            outline.skipped_fragments
        );
    }

    println!();
    println!("{}", "Roles".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for role in Role::ALL {
        println!("{:>12}: {}", role.as_str(), summary.role_count(role));
    }

    let empty = summary.empty_sections().count();
    if empty > 0 {
        println!();
        println!("{} {} empty section(s)", "Note:".yellow(), empty);
    }

    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    summary: bool,
    tuning: &TuningArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let outline = load(input, tuning)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = if summary {
        summary_to_json(&outline.summary(), format)?
    } else {
        to_json(&outline, format)?
    };

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docoutline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document outline extraction tool");
    println!();
    println!("License: MIT");
}
