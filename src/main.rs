use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use cv_sections::parser::sections::SectionSpan;
use cv_sections::{detect_language, CvRecord, Language, Models, Pipeline, Settings};

#[derive(Parser)]
#[command(name = "cvparse", about = "Split résumé text into sections and extract a CV record")]
struct Cli {
    /// Settings file (TOML). Defaults to ./cvparse.toml when present.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one text file and print the record as JSON
    Parse {
        file: PathBuf,
        #[arg(short, long, value_enum, default_value = "auto")]
        lang: LangArg,
        /// Single-line JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },
    /// Show the section spans found in a text file
    Sections {
        file: PathBuf,
        #[arg(short, long, value_enum, default_value = "auto")]
        lang: LangArg,
    },
    /// Parse many files in parallel, one JSON line per file
    Batch {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[arg(short, long, value_enum, default_value = "auto")]
        lang: LangArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LangArg {
    Auto,
    En,
    Hu,
}

impl LangArg {
    fn resolve(self, text: &str) -> Language {
        match self {
            LangArg::Auto => detect_language(text),
            LangArg::En => Language::English,
            LangArg::Hu => Language::Hungarian,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref()).context("loading settings")?;
    let models = Models::load(&settings.models).context("loading classifier models")?;

    match cli.command {
        Commands::Parse { file, lang, compact } => {
            let text = read_text(&file)?;
            let language = lang.resolve(&text);
            let record = Pipeline::for_language(&models, language, settings).parse(&text);
            let json = if compact {
                serde_json::to_string(&record)?
            } else {
                serde_json::to_string_pretty(&record)?
            };
            println!("{json}");
        }
        Commands::Sections { file, lang } => {
            let text = read_text(&file)?;
            let language = lang.resolve(&text);
            let spans = Pipeline::for_language(&models, language, settings).spans(&text);
            print_spans(&spans, language);
        }
        Commands::Batch { files, lang } => {
            let inputs = files
                .iter()
                .map(|f| read_text(f).map(|t| (f.clone(), t)))
                .collect::<anyhow::Result<Vec<_>>>()?;
            let records = parse_batch(&models, &settings, &inputs, lang);
            for ((file, _), record) in inputs.iter().zip(&records) {
                let line = serde_json::json!({ "file": file.display().to_string(), "record": record });
                println!("{line}");
            }
            info!(files = records.len(), elapsed = %format_duration(t0.elapsed()), "batch done");
        }
    }

    Ok(())
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn parse_batch(
    models: &Models,
    settings: &Settings,
    inputs: &[(PathBuf, String)],
    lang: LangArg,
) -> Vec<CvRecord> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let pb = ProgressBar::new(inputs.len() as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")
    {
        pb.set_style(style.progress_chars("#>-"));
    }

    let en = Pipeline::for_language(models, Language::English, settings.clone());
    let hu = Pipeline::for_language(models, Language::Hungarian, settings.clone());

    let records: Vec<CvRecord> = inputs
        .par_iter()
        .map(|(_, text)| {
            let pipeline = match lang.resolve(text) {
                Language::English => &en,
                Language::Hungarian => &hu,
            };
            let record = pipeline.parse(text);
            pb.inc(1);
            record
        })
        .collect();

    pb.finish_and_clear();
    records
}

fn print_spans(spans: &[SectionSpan], language: Language) {
    println!(
        "{:<10} | {:>9} | {:>5} | {:<50}",
        "Label", "Blocks", "Conf", "First line"
    );
    println!("{}", "-".repeat(82));
    for span in spans {
        let range = format!("{}-{}", span.start_index, span.end_index);
        let first = span.blocks.first().map(|b| b.block.first_line()).unwrap_or("");
        println!(
            "{:<10} | {:>9} | {:>5.2} | {:<50}",
            span.label.as_str(),
            range,
            span.mean_confidence(),
            truncate(first, 50)
        );
    }
    println!("\n{} spans | language: {}", spans.len(), language);
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
