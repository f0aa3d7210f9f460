use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sectioner_core::config_file::{self, BackendConfig, ConfigFile, SectionsConfig};
use sectioner_core::DEFAULT_SECTION_TITLE;
use sectioner_parsing::{ParsingConfigBuilder, SectionExtractor, UnreadablePagePolicy};

mod output;

use output::{ColorMode, OutputFormat};

/// Heuristic PDF sectioner - split documents into titled text sections
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split a PDF (or form-feed paginated .txt dump) into sections
    Extract {
        /// Path to the PDF or .txt file
        file_path: PathBuf,

        /// Output layout
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Write records to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Drop sections whose text has this many characters or fewer
        #[arg(long)]
        min_chars: Option<usize>,

        /// Emit records for detected titles even when they have no text
        #[arg(long)]
        keep_empty_titles: bool,

        /// Title used for content that precedes any heading on a page
        #[arg(long)]
        default_title: Option<String>,

        /// Fail instead of skipping pages the backend cannot read
        #[arg(long)]
        abort_on_unreadable: bool,

        /// Fraction of page height to drop from the top (PDF only)
        #[arg(long)]
        exclude_header: Option<f32>,

        /// Fraction of page height to drop from the bottom (PDF only)
        #[arg(long)]
        exclude_footer: Option<f32>,

        /// Replace typographic ligatures before classifying lines
        #[arg(long)]
        expand_ligatures: bool,

        /// Print a run summary to stderr
        #[arg(long)]
        summary: bool,

        /// Extra config file layered over the default cascade
        #[arg(long)]
        config: Option<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Check that a document can be opened for extraction
    Validate {
        /// Path to the PDF or .txt file
        file_path: PathBuf,

        /// Extra config file layered over the default cascade
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Write a starter config file with the built-in defaults
    InitConfig {
        /// Destination (default: the platform config directory)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Extract {
            file_path,
            format,
            output,
            min_chars,
            keep_empty_titles,
            default_title,
            abort_on_unreadable,
            exclude_header,
            exclude_footer,
            expand_ligatures,
            summary,
            config,
            no_color,
        } => {
            let file_config = resolve_config(config.as_deref())?;

            let mut builder = ParsingConfigBuilder::new();
            if let Some(n) = min_chars {
                builder = builder.min_text_chars(n);
            }
            if keep_empty_titles {
                builder = builder.keep_empty_titled_sections(true);
            }
            if let Some(ref title) = default_title {
                builder = builder.default_title(title);
            }
            if abort_on_unreadable {
                builder = builder.unreadable_pages(UnreadablePagePolicy::Abort);
            }
            if expand_ligatures {
                builder = builder.expand_ligatures(true);
            }
            if let Some(ref sections) = file_config.sections {
                builder = builder.apply_file(sections);
            }
            let parsing_config = builder
                .build()
                .context("invalid pattern in [sections] configuration")?;

            let mut backend_config = file_config.backend.unwrap_or_default();
            if exclude_header.is_some() {
                backend_config.header_exclusion = exclude_header;
            }
            if exclude_footer.is_some() {
                backend_config.footer_exclusion = exclude_footer;
            }

            let options = ExtractOptions {
                format,
                output,
                summary,
                color: ColorMode(!no_color && std::env::var_os("NO_COLOR").is_none()),
            };
            extract(
                &file_path,
                SectionExtractor::with_config(parsing_config),
                &backend_config,
                options,
            )
        }
        Command::Validate { file_path, config } => {
            let file_config = resolve_config(config.as_deref())?;
            validate(&file_path, &file_config.backend.unwrap_or_default())
        }
        Command::InitConfig { path, force } => init_config(path, force),
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default: warnings only).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Default cascade, then the explicit `--config` file on top.
fn resolve_config(explicit: Option<&Path>) -> anyhow::Result<ConfigFile> {
    let base = config_file::load_config();
    match explicit {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            let overlay = config_file::load_from_path(path)
                .with_context(|| format!("could not parse config file {}", path.display()))?;
            Ok(config_file::merge(base, overlay))
        }
        None => Ok(base),
    }
}

struct ExtractOptions {
    format: OutputFormat,
    output: Option<PathBuf>,
    summary: bool,
    color: ColorMode,
}

fn extract(
    file_path: &Path,
    extractor: SectionExtractor,
    backend_config: &BackendConfig,
    options: ExtractOptions,
) -> anyhow::Result<()> {
    if !file_path.exists() {
        anyhow::bail!("File not found: {}", file_path.display());
    }

    let result = sectioner_ingest::extract_sections(file_path, &extractor, backend_config)?;

    // Colors only make sense on a terminal, not in a file
    let record_color = ColorMode(options.color.enabled() && options.output.is_none());
    let mut writer: Box<dyn Write> = if let Some(ref output_path) = options.output {
        Box::new(std::fs::File::create(output_path).with_context(|| {
            format!("could not create output file {}", output_path.display())
        })?)
    } else {
        Box::new(std::io::stdout())
    };
    output::write_sections(&mut writer, &result.sections, options.format, record_color)?;
    writer.flush()?;

    if options.summary {
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| file_path.display().to_string());
        output::print_summary(
            &mut std::io::stderr(),
            &file_name,
            result.sections.len(),
            &result.stats,
            options.color,
        )?;
    }

    Ok(())
}

fn validate(file_path: &Path, backend_config: &BackendConfig) -> anyhow::Result<()> {
    if !file_path.exists() {
        anyhow::bail!("File not found: {}", file_path.display());
    }
    sectioner_ingest::validate(file_path, backend_config)?;
    println!("{}: ok", file_path.display());
    Ok(())
}

fn init_config(path: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let explicit = path.is_some();
    let target = match path {
        Some(p) => p,
        None => config_file::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?,
    };
    if target.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            target.display()
        );
    }

    let defaults = ParsingConfigBuilder::new()
        .build()
        .context("built-in patterns failed to compile")?;
    let starter = ConfigFile {
        sections: Some(SectionsConfig {
            default_title: Some(DEFAULT_SECTION_TITLE.to_string()),
            max_title_chars: Some(defaults.max_title_chars()),
            max_title_words: Some(defaults.max_title_words()),
            keep_empty_titled_sections: Some(defaults.keep_empty_titled_sections()),
            min_text_chars: None,
            extra_junk_keywords: Some(Vec::new()),
            extra_enumerator_patterns: Some(Vec::new()),
            abort_on_unreadable_page: Some(false),
        }),
        backend: Some(BackendConfig::default()),
    };
    let written = if explicit {
        config_file::save_to_path(&starter, &target).map(|()| target)
    } else {
        config_file::save_config(&starter)
    }
    .map_err(|e| anyhow::anyhow!(e))?;
    println!("Wrote {}", written.display());
    Ok(())
}
