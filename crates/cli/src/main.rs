use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use floatchat_agents::{is_exit_command, ChatAgent};
use floatchat_core::{compare_regions, field_lookup, region_info, species_info, CoreError, RegionKey};
use floatchat_dataset::ArgoDataset;
use floatchat_observability::{init_tracing, AppMetrics};
use rand::rngs::StdRng;
use rand::SeedableRng;

const BOT_NAME: &str = "FloatChat ARGO Bot";

#[derive(Debug, Parser)]
#[command(name = "floatchat")]
#[command(about = "FloatChat ARGO ocean data assistant")]
struct Cli {
    /// Fixes reply phrasing and generated mock data.
    #[arg(long, global = true, env = "FLOATCHAT_SEED")]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive conversation.
    Chat,
    /// Answer a single question.
    Ask {
        #[arg(required = true, trailing_var_arg = true)]
        query: Vec<String>,
    },
    /// Reference data for one ocean.
    Region {
        key: String,
        #[arg(long)]
        field: Option<String>,
    },
    /// One field across all five oceans.
    Compare { field: String },
    /// Common species of one ocean.
    Species { key: String },
    /// Dump the synthetic ARGO dataset.
    MockData {
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
        #[arg(long)]
        summary: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
}

fn main() -> Result<()> {
    init_tracing("floatchat_cli");
    let cli = Cli::parse();

    match cli.command {
        Command::Chat => run_chat(build_agent(cli.seed))?,
        Command::Ask { query } => {
            let mut agent = build_agent(cli.seed);
            let reply = agent.reply(&query.join(" "));
            println!("{}", reply.text);
        }
        Command::Region { key, field } => match field {
            Some(field) => println!("{}", field_lookup(&key, &field)),
            None => println!("{}", region_info(&key)),
        },
        Command::Compare { field } => println!("{}", compare_regions(&field)),
        Command::Species { key } => match RegionKey::parse(&key) {
            Some(key) => println!("{}", species_info(key)),
            None => println!("{}", CoreError::UnknownRegion(key).apology()),
        },
        Command::MockData { format, summary } => {
            let dataset = match cli.seed {
                Some(seed) => ArgoDataset::generate_with(&mut StdRng::seed_from_u64(seed), Utc::now()),
                None => ArgoDataset::generate(),
            };
            write_dataset(&dataset, format, summary)?;
        }
    }

    Ok(())
}

fn build_agent(seed: Option<u64>) -> ChatAgent {
    let metrics = AppMetrics::shared();
    match seed {
        Some(seed) => ChatAgent::with_seed(seed, metrics),
        None => ChatAgent::new(metrics),
    }
}

fn write_dataset(dataset: &ArgoDataset, format: OutputFormat, summary: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if summary {
        serde_json::to_writer_pretty(&mut out, &dataset.mean_by_region())
            .context("failed writing dataset summary")?;
        writeln!(out)?;
        return Ok(());
    }

    match format {
        OutputFormat::Json => {
            dataset
                .write_json(&mut out)
                .context("failed writing dataset as json")?;
            writeln!(out)?;
        }
        OutputFormat::Csv => dataset
            .write_csv(&mut out)
            .context("failed writing dataset as csv")?,
    }
    Ok(())
}

fn run_chat(mut agent: ChatAgent) -> Result<()> {
    print_banner();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("\nYou: ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!("\n\n{BOT_NAME}: Session ended. Thank you for using FloatChat!");
            break;
        };
        let line = line.context("failed reading from stdin")?;
        let message = line.trim();

        if is_exit_command(message) {
            println!("\n{BOT_NAME}: Goodbye! Thank you for using FloatChat.");
            break;
        }
        if message.is_empty() {
            continue;
        }

        let reply = agent.reply(message);
        println!("\n{BOT_NAME}: {}", reply.text);
    }

    Ok(())
}

fn print_banner() {
    let rule = "=".repeat(60);
    println!("{rule}");
    println!("Welcome to FloatChat - ARGO Ocean Data Chatbot");
    println!("{rule}");
    println!("I can help you explore data about oceans including:");
    println!("- Temperature, salinity, oxygen levels, and pH");
    println!("- Depth and geographical information");
    println!("- Currents and water movement patterns");
    println!("- Fish species and marine life");
    println!("- Climate change, conservation and human impacts");
    println!("Type 'quit' or 'exit' to end the conversation");
    println!("{rule}");
}
