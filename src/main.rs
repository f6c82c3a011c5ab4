use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use newsquota_crawler::store::{CsvStore, Dataset};
use newsquota_crawler::{
    builtin_sources, validate_sources, Harvester, HttpFetcher, RawSource, ScrapeConfig, Source,
};

mod report;

const DEFAULT_LABELS: &str = "Politics,World,Sports,Economy";
const LOG_FILTER: &str = "newsquota=info,newsquota_crawler=info,newsquota_store=info";

/// Balanced Somali headline dataset builder
#[derive(Debug, Parser)]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub cmd: SubCommand,
}

#[derive(Debug, clap::Subcommand)]
pub enum SubCommand {
    Build(BuildArgs),
    Sources(SourcesArgs),
    #[command(hide = true)]
    Completion,
}

/// Crawl sources until every label reaches the target row count
#[derive(Debug, clap::Args)]
pub struct BuildArgs {
    /// Existing labeled CSV (needs `text` and `label` columns)
    #[arg(long = "in", value_name = "PATH")]
    pub input: PathBuf,
    /// Where checkpoints and the final dataset are written
    #[arg(long = "out", value_name = "PATH")]
    pub output: PathBuf,
    /// Override the per-label target row count
    #[arg(long)]
    pub target: Option<usize>,
    /// Comma separated labels to balance, in crawl order
    #[arg(long, default_value = DEFAULT_LABELS)]
    pub labels: String,
    /// Optional yaml scraping configuration file
    #[arg(env = "NEWSQUOTA_CONFIG", long)]
    pub config: Option<PathBuf>,
    /// Optional yaml source list replacing the built-in catalog
    #[arg(env = "NEWSQUOTA_SOURCES", long)]
    pub sources: Option<PathBuf>,
    /// Write the output without a UTF-8 byte order mark
    #[arg(long)]
    pub no_bom: bool,
    /// When quiet no logs are outputted
    #[arg(long, short)]
    pub quiet: bool,
}

/// List the validated source catalog
#[derive(Debug, clap::Args)]
pub struct SourcesArgs {
    /// Optional yaml source list replacing the built-in catalog
    #[arg(env = "NEWSQUOTA_SOURCES", long)]
    pub sources: Option<PathBuf>,
}

impl TryFrom<&BuildArgs> for ScrapeConfig {
    type Error = anyhow::Error;

    fn try_from(args: &BuildArgs) -> Result<Self, Self::Error> {
        let mut conf = if let Some(path) = &args.config {
            let file = fs_err::File::open(path)?;
            serde_yaml::from_reader(file)
                .with_context(|| format!("Invalid config file {}", path.display()))?
        } else {
            ScrapeConfig::default()
        };
        if let Some(target) = args.target {
            conf.target_per_label = target;
        }
        conf.validate()?;
        Ok(conf)
    }
}

/// Splits a comma separated label list, dropping blanks and repeats.
pub fn parse_labels(raw: &str) -> Vec<String> {
    let mut labels: Vec<String> = vec![];
    for label in raw.split(',').map(str::trim).filter(|l| !l.is_empty()) {
        if !labels.iter().any(|l| l == label) {
            labels.push(label.to_string());
        }
    }
    labels
}

fn load_sources(path: Option<&Path>) -> anyhow::Result<Vec<Source>> {
    let raw: Vec<RawSource> = match path {
        Some(path) => {
            let file = fs_err::File::open(path)?;
            serde_yaml::from_reader(file)
                .with_context(|| format!("Invalid sources file {}", path.display()))?
        }
        None => builtin_sources(),
    };
    let (sources, _rejected) = validate_sources(raw);
    if sources.is_empty() {
        anyhow::bail!("No valid sources configured");
    }
    Ok(sources)
}

pub async fn build(args: BuildArgs) -> anyhow::Result<()> {
    let config = ScrapeConfig::try_from(&args)?;
    let labels = parse_labels(&args.labels);
    if labels.is_empty() {
        anyhow::bail!("No labels given");
    }
    let sources = load_sources(args.sources.as_deref())?;

    let dataset = Dataset::from_csv(&args.input)
        .with_context(|| format!("Cannot load {}", args.input.display()))?;
    report::distribution("Current distribution", &dataset);

    let fetcher = HttpFetcher::new(&config)?;
    let store = CsvStore::new(&args.output).with_bom(!args.no_bom);
    let mut harvester = Harvester::new(config, sources, fetcher, dataset, store);
    report::need(&harvester.need(&labels));

    let run = tokio::select! {
        run = harvester.run(&labels) => run?,
        _ = tokio::signal::ctrl_c() => {
            log::warn!(
                "Interrupted, the last checkpoint in {} is a valid input for the next run",
                args.output.display()
            );
            anyhow::bail!("Interrupted");
        }
    };

    report::sources(&run);
    report::distribution("Final distribution", harvester.dataset());
    report::summary(&args.output, harvester.dataset(), &run);
    Ok(())
}

pub fn sources(args: SourcesArgs) -> anyhow::Result<()> {
    let sources = load_sources(args.sources.as_deref())?;
    report::catalog(&sources);
    Ok(())
}

fn init_logs() {
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", LOG_FILTER);
    }
    env_logger::init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.cmd {
        SubCommand::Build(args) => {
            if !args.quiet {
                init_logs();
            }
            build(args).await
        }
        SubCommand::Sources(args) => {
            init_logs();
            sources(args)
        }
        SubCommand::Completion => {
            generate(Shell::Bash, &mut Args::command(), "newsquota", &mut io::stdout());
            Ok(())
        }
    }
}
