// On Windows do NOT show a console window when opening the app
#![cfg_attr(
    all(not(test), not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]

use std::sync::LazyLock;

use clap::Parser;
use tracing_subscriber::{fmt::format::FmtSpan, prelude::*};

mod navigation;
mod settings;
mod sleep_timer;
mod ui;

const VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

static RUNTIME: LazyLock<tokio::runtime::Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(1)
        .build()
        .unwrap()
});

fn main() -> anyhow::Result<()> {
    let args = ui::arguments::Args::parse();

    let env = tracing_subscriber::EnvFilter::builder().parse(
        ["VOICE_LOG", "RUST_LOG"] // prefer the app-specific variable
            .iter()
            .find_map(|key| std::env::var(key).ok())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "info,blade_graphics=warn,zbus=warn".to_owned()),
    )?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_thread_names(true)
                .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
                .with_timer(tracing_subscriber::fmt::time::uptime())
                .with_filter(env),
        )
        .init();

    tracing::info!("version {VERSION_STRING}");

    crate::ui::app::run(args)
}
