use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tripsmith::{
    BudgetTier, ChatApiClient, CompanionType, PacePreference, PlannerPipeline, ProgressObserver,
    Stage, TripRequest, TripsmithConfig, report,
};

#[derive(Parser)]
#[command(
    name = "tripsmith",
    version,
    about = "Prompt-chained multi-day travel itinerary planning CLI"
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a complete trip plan and write it as markdown
    Plan {
        /// Destination, e.g. 北京 or 日本·关西地区
        #[arg(long)]
        destination: String,

        /// Trip length in days (defaults to the configured value)
        #[arg(long)]
        days: Option<u32>,

        /// Departure date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Who is travelling: solo, couple, with-parents, with-children, friends
        #[arg(long, default_value = "couple")]
        companions: CompanionType,

        /// Budget tier: shoestring, economy, comfort, luxury
        #[arg(long, default_value = "comfort")]
        budget: BudgetTier,

        /// Pace preference: relaxed, moderate, packed
        #[arg(long)]
        pace: Option<PacePreference>,

        /// Comma-separated interest tags
        #[arg(long, value_delimiter = ',', default_value = "历史人文")]
        interests: Vec<String>,

        /// Output file (defaults to <destination>_行程攻略.md)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Logs stage transitions and per-day progress
struct LoggingObserver;

impl ProgressObserver for LoggingObserver {
    fn stage_started(&mut self, stage: Stage) {
        info!("Stage started: {}", stage);
    }

    fn day_completed(&mut self, day: u32, total: u32) {
        info!("Day {}/{} written", day, total);
    }
}

fn init_tracing(verbose: bool, config: &TripsmithConfig) {
    let level = if verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tripsmith={level}")));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = TripsmithConfig::load()?;
    init_tracing(cli.verbose, &config);

    match cli.command {
        Command::Plan {
            destination,
            days,
            date,
            companions,
            budget,
            pace,
            interests,
            output,
        } => {
            let request = TripRequest {
                destination: destination.clone(),
                departure: date.unwrap_or_else(|| chrono::Local::now().date_naive()),
                days: days.unwrap_or(config.defaults.days),
                companions,
                budget,
                pace,
                interests,
            };

            let client = ChatApiClient::new(config.llm.clone())?;
            let pipeline = PlannerPipeline::new(client);

            let plan = pipeline.run(&request, &mut LoggingObserver).await?;

            let document = report::render_markdown(&plan);
            let points = report::map_points(&plan.days);
            let output = output.unwrap_or_else(|| PathBuf::from(format!("{destination}_行程攻略.md")));
            std::fs::write(&output, &document)
                .with_context(|| format!("Failed to write report to {}", output.display()))?;

            println!("旅行基调：{}", plan.summary);
            println!(
                "已生成 {} 天行程（{} 个地图坐标点），攻略已写入 {}",
                plan.days.len(),
                points.len(),
                output.display()
            );
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
