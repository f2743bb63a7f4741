//! Pull-to-refresh demo
//!
//! Drives a simulated list page through scripted gestures and logs what the
//! container and its indicators do. Set `RUST_LOG=pullrefresh_layout=trace`
//! to follow every drag frame.

mod config;
mod page;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::DemoConfig;
use crate::page::DemoPage;

/// Scripted pull-to-refresh session on a simulated list
#[derive(Parser, Debug)]
#[command(name = "pullrefresh-demo")]
#[command(about = "Scripted pull-to-refresh session on a simulated list")]
#[command(version)]
struct Args {
    /// Configuration file (demo.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Gesture script to run
    #[arg(short, long, value_enum, default_value = "all")]
    scenario: Scenario,

    /// Frame interval in milliseconds
    #[arg(long, default_value = "16")]
    frame_ms: f32,

    /// Give up waiting for the page to go idle after this many frames
    #[arg(long, default_value = "2000")]
    max_frames: u32,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Scenario {
    /// Pull down past the trigger and wait for the refresh
    Refresh,
    /// Pull down short of the trigger
    Cancel,
    /// Scroll to the bottom, then pull up to load more
    LoadMore,
    /// Scroll to the bottom with scroll-load on
    ScrollLoad,
    All,
}

impl Scenario {
    const SCRIPTS: [Scenario; 4] = [
        Scenario::Refresh,
        Scenario::Cancel,
        Scenario::LoadMore,
        Scenario::ScrollLoad,
    ];
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match &args.config {
        Some(path) => {
            tracing::info!("Loading config: {}", path.display());
            DemoConfig::load(path)?
        }
        None => DemoConfig::default(),
    };

    if args.print_config {
        println!("{}", config.to_toml()?);
        return Ok(());
    }

    run(args.scenario, &config, &args)
}

fn run(scenario: Scenario, config: &DemoConfig, args: &Args) -> Result<()> {
    if scenario == Scenario::All {
        for script in Scenario::SCRIPTS {
            run(script, config, args)?;
        }
        return Ok(());
    }

    tracing::info!("=== {:?} ===", scenario);
    let dt = args.frame_ms;

    let mut config = config.clone();
    if scenario == Scenario::ScrollLoad {
        config.pull.scroll_load_enabled = true;
    }

    let mut page = DemoPage::new(&config)?;
    let viewport = config.page.viewport_height;
    let content = page.items() as f32 * config.page.item_height;
    let to_bottom = (content - viewport).max(0.0);

    match scenario {
        Scenario::Refresh => page.pull_down(200.0, dt),
        Scenario::Cancel => page.pull_down(60.0, dt),
        Scenario::LoadMore => {
            page.scroll_list(to_bottom, 40.0, dt);
            page.pull_up(200.0, dt);
        }
        Scenario::ScrollLoad => page.scroll_list(to_bottom, 40.0, dt),
        Scenario::All => {}
    }

    let layout = page.layout();
    tracing::info!(
        "released: scroll_y={:.1} header={:?} footer={:?}",
        layout.scroll_y(),
        layout.header_state(),
        layout.footer_state()
    );
    tracing::info!("header shows {:?}", page.header_view().label);
    tracing::info!("footer shows {:?}", page.footer_view().label);

    let frames = page.run_until_idle(dt, args.max_frames);
    let layout = page.layout();
    tracing::info!(
        "idle after {} frames: scroll_y={:.1} items={} list_offset={:.1}",
        frames,
        layout.scroll_y(),
        page.items(),
        page.list_offset()
    );
    tracing::info!(
        "header history {:?}",
        layout.state_history(pullrefresh_layout::Edge::Header)
    );
    tracing::info!(
        "footer history {:?}",
        layout.state_history(pullrefresh_layout::Edge::Footer)
    );
    if let Some(updated) = page.header_view().last_updated {
        tracing::info!("{}", updated);
    }

    Ok(())
}
