use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use screen_runtime::config::RuntimeConfig;
use screen_runtime::countdown::CountdownState;
use screen_runtime::logging::{init_stderr_tracing, init_tracing, LOG_ENV_VAR};
use screen_runtime::pagination::{InMemorySource, LoadOutcome, SkipReason};
use screen_runtime::session::ScreenSession;

/// Page through an in-memory feed using the screen runtime.
#[derive(Debug, Parser)]
#[command(name = "screen-runtime", version)]
struct Cli {
    /// Config file (defaults to the user config directory).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured page size.
    #[arg(short, long)]
    page_size: Option<usize>,

    /// Number of items in the demo feed.
    #[arg(long, default_value = "45")]
    items: usize,

    /// Run a countdown of this many seconds after loading.
    #[arg(long)]
    countdown: Option<u32>,
}

#[derive(Debug, Clone)]
enum FeedEffect {
    Toast(String),
    ReachedEnd { total: usize },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if !init_tracing(LOG_ENV_VAR, "info") {
        init_stderr_tracing("info");
    }
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => RuntimeConfig::load_from(path),
        None => RuntimeConfig::load(),
    }
    .context("loading configuration")?;
    if let Some(page_size) = cli.page_size {
        config.pagination.page_size = page_size;
    }

    let session = ScreenSession::new("demo-feed", config);
    let feed: Vec<String> = (1..=cli.items).map(|n| format!("item-{}", n)).collect();
    let engine = session.pagination::<String>(Arc::new(InMemorySource::new(feed)))?;

    let effects = session.effects::<FeedEffect>();
    let mut subscription = effects.subscribe();
    let printer = tokio::spawn(async move {
        while let Some(effect) = subscription.recv().await {
            match effect {
                FeedEffect::Toast(message) => println!("toast: {}", message),
                FeedEffect::ReachedEnd { total } => println!("end of feed ({} items)", total),
            }
        }
    });

    loop {
        match engine.load_next_page().await? {
            LoadOutcome::Loaded {
                page_index,
                count,
                reached_end,
            } => {
                effects
                    .emit(FeedEffect::Toast(format!(
                        "page {} loaded ({} items)",
                        page_index, count
                    )))
                    .await?;
                if reached_end {
                    break;
                }
            }
            LoadOutcome::Skipped(SkipReason::ReachedEnd) => break,
            LoadOutcome::Skipped(SkipReason::InFlight) | LoadOutcome::Discarded => {}
            LoadOutcome::Failed(err) => anyhow::bail!("page fetch failed: {}", err),
        }
    }

    let state = engine.current();
    effects
        .emit(FeedEffect::ReachedEnd {
            total: state.items.len(),
        })
        .await?;

    if let Some(seconds) = cli.countdown {
        let countdown = session.countdown();
        let mut observer = countdown.observe();
        let _ticker = countdown.start(seconds)?;
        while let Some(state) = observer.next().await {
            match state {
                CountdownState::Running { remaining, .. } => println!("{}...", remaining),
                CountdownState::Finished => break,
                CountdownState::Idle => {}
            }
        }
    }

    session.teardown();
    printer.await.context("effect printer")?;
    Ok(())
}
