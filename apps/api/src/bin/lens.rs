//! `lens` — compare a résumé PDF against a job description from the terminal.
//!
//! `lens compare` runs everything locally; `lens remote` goes through a running
//! Lens API.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use bytes::Bytes;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lens_api::client::{LensClient, DEFAULT_BASE_URL};
use lens_api::render::RenderedAnalysis;
use lens_api::workbench::Workbench;

#[derive(Parser)]
#[command(name = "lens", version, about = "Résumé / job description keyword matcher")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract and compare locally
    Compare(JobArgs),
    /// Upload to a Lens API and let it analyze
    Remote {
        /// Base URL of the Lens API
        #[arg(long, env = "LENS_API_URL", default_value = DEFAULT_BASE_URL)]
        server: String,

        #[command(flatten)]
        job: JobArgs,
    },
}

#[derive(Args)]
struct JobArgs {
    /// Résumé PDF
    #[arg(long)]
    resume: PathBuf,

    /// File containing the job description
    #[arg(long, conflicts_with = "job_text", required_unless_present = "job_text")]
    job: Option<PathBuf>,

    /// Job description given inline
    #[arg(long)]
    job_text: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

impl JobArgs {
    fn job_description(&self) -> Result<String> {
        match (&self.job, &self.job_text) {
            (Some(path), _) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read job description {}", path.display())),
            (None, Some(text)) => Ok(text.clone()),
            (None, None) => Ok(String::new()),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Compare(args) => {
            let job = args.job_description()?;
            let (file_name, bytes) = read_resume(&args.resume)?;

            let bench = Workbench::local();
            let summary = bench.load_resume(&file_name, None, bytes).await?;
            eprintln!(
                "✅ Loaded {} ({} page(s), {} keyword(s))",
                summary.file_name, summary.pages, summary.keywords
            );

            let comparison = bench.compare_local(&job).await?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&comparison.result)?);
            } else {
                print_analysis(&comparison.rendered);
            }
        }
        Command::Remote { server, job: args } => {
            let job = args.job_description()?;
            let (file_name, bytes) = read_resume(&args.resume)?;

            let client = LensClient::new(server);
            eprintln!("📤 Uploading {file_name} to {}", client.base_url());

            let bench = Workbench::remote(client);
            let upload = bench.upload_remote(&file_name, None, bytes).await?;
            eprintln!("✅ {}", upload.message);

            let analysis = bench.analyze_remote(&job).await?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&analysis.report)?);
            } else {
                print_analysis(&analysis.rendered);
            }
        }
    }
    Ok(())
}

fn read_resume(path: &Path) -> Result<(String, Bytes)> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "resume.pdf".to_string());
    Ok((file_name, Bytes::from(bytes)))
}

fn print_analysis(rendered: &RenderedAnalysis) {
    println!("Score: {}%", rendered.score);
    for section in rendered.sections() {
        println!();
        println!("{}:", section.kind.heading());
        println!("  {section}");
    }
}
