use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::info;
use reqwest::Client;
use serde_json::Value;

use loadtest::{LatencyWindow, Target};

/// Exercises a running prediction service.
#[derive(Parser)]
#[command(name = "loadtest")]
struct Cli {
    /// Base address of the service
    #[arg(long, default_value = "http://localhost:8080/")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send the example payload once and print the response
    Call {
        #[arg(long, default_value = "example.json")]
        example: PathBuf,
    },
    /// Hit the liveness route in a loop, printing the mean latency of each window
    LoopGet {
        /// Requests per printed line (50 for local services, 1 otherwise)
        #[arg(long)]
        every: Option<usize>,
        /// Stop after this many requests
        #[arg(long)]
        count: Option<usize>,
    },
    /// Send the example payload in a loop, printing each latency and response
    LoopPost {
        #[arg(long, default_value = "example.json")]
        example: PathBuf,
        /// Pause between requests, in milliseconds
        #[arg(long, default_value_t = 300)]
        pause_ms: u64,
        /// Stop after this many requests
        #[arg(long)]
        count: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let target = Target::new(&cli.url);
    let client = Client::new();
    info!("application address: {}", target.root());

    match cli.command {
        Commands::Call { example } => call(&client, &target, &example).await,
        Commands::LoopGet { every, count } => {
            let every = every.unwrap_or_else(|| target.default_window());
            loop_get(&client, &target, every, count).await
        }
        Commands::LoopPost {
            example,
            pause_ms,
            count,
        } => loop_post(&client, &target, &example, Duration::from_millis(pause_ms), count).await,
    }
}

fn read_example(path: &Path) -> anyhow::Result<Value> {
    let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let payload = serde_json::from_slice(&raw)
        .with_context(|| format!("{} is not valid json", path.display()))?;
    Ok(payload)
}

async fn call(client: &Client, target: &Target, example: &Path) -> anyhow::Result<()> {
    let payload = read_example(example)?;
    println!("{payload}");

    let res = client.post(target.predict()).json(&payload).send().await?;
    println!("{}", res.text().await?);

    Ok(())
}

async fn loop_get(
    client: &Client,
    target: &Target,
    every: usize,
    count: Option<usize>,
) -> anyhow::Result<()> {
    let mut window = LatencyWindow::new(every);
    let mut stdout = io::stdout();

    for i in 1.. {
        if count.is_some_and(|count| i > count) {
            break;
        }

        let start = Instant::now();
        let res = client.get(target.root()).send().await?;
        let elapsed = start.elapsed();
        let body = res.text().await?;

        if let Some(mean) = window.record(elapsed) {
            print!("{i} {mean:?} {body}\r");
            stdout.flush()?;
        }
    }

    println!();
    Ok(())
}

async fn loop_post(
    client: &Client,
    target: &Target,
    example: &Path,
    pause: Duration,
    count: Option<usize>,
) -> anyhow::Result<()> {
    let payload = read_example(example)?;
    println!("{payload}");

    for i in 1.. {
        if count.is_some_and(|count| i > count) {
            break;
        }

        let start = Instant::now();
        let res = client.post(target.predict()).json(&payload).send().await?;
        let elapsed = start.elapsed();
        let body = res.text().await?;

        tokio::time::sleep(pause).await;
        println!("{i} {elapsed:?} {body}");
    }

    Ok(())
}
