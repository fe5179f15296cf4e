// SPDX-License-Identifier: MPL-2.0
//! `indicator-demo`: runs a scripted indicator session and prints every
//! published stack change.

use indicator_stack::config::{self, Config};
use indicator_stack::{ActionKind, Activation, Icon, Indicator, Indicators, Snapshot, Style};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
indicator-demo

USAGE:
  indicator-demo [OPTIONS]

OPTIONS:
  --config PATH      Load settings from PATH instead of the default location
  --time-scale F     Multiply every delay by F (default 1.0)
  -h, --help         Print this help
";

struct Flags {
    config_path: Option<PathBuf>,
    time_scale: f64,
}

fn parse_flags() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }
    let flags = Flags {
        config_path: args.opt_value_from_str("--config")?,
        time_scale: args
            .opt_value_from_str("--time-scale")?
            .filter(|scale: &f64| scale.is_finite() && *scale > 0.0)
            .unwrap_or(1.0),
    };
    let remaining = args.finish();
    if !remaining.is_empty() {
        tracing::warn!(?remaining, "ignoring unexpected arguments");
    }
    Ok(Some(flags))
}

fn load_config(path: Option<&PathBuf>) -> Config {
    match path {
        Some(path) => config::load_from_path(path).unwrap_or_else(|err| {
            tracing::warn!(path = %path.display(), error = %err, "using default config");
            Config::default()
        }),
        None => {
            let (config, warning) = config::load();
            if let Some(key) = warning {
                tracing::warn!(key = %key, "using default config");
            }
            config
        }
    }
}

fn print_snapshot(snapshot: &Snapshot) {
    println!(
        "-- revision {} ({} visible)",
        snapshot.revision(),
        snapshot.len()
    );
    for entry in snapshot.iter() {
        println!(
            "   [{}] {:<10} scale={:.2} gen={} {}",
            entry.z_index,
            entry.id(),
            entry.scale,
            entry.generation,
            if entry.expanded { "expanded" } else { "" }
        );
    }
}

async fn run(flags: Flags) -> indicator_stack::error::Result<()> {
    let config = load_config(flags.config_path.as_ref());
    let indicators = Indicators::new(&config)?;
    let scaled = |secs: f64| Duration::from_secs_f64(secs * flags.time_scale);

    let mut changes = indicators.subscribe();
    let printer = tokio::spawn(async move {
        while changes.changed().await.is_ok() {
            let snapshot = changes.borrow_and_update().clone();
            print_snapshot(&snapshot);
        }
    });

    indicators.display(
        Indicator::new("sync", "Syncing")
            .with_icon(Icon::ProgressIndicator)
            .manual(),
    );
    indicators.display(
        Indicator::new("saved", "Saved")
            .with_icon(Icon::SystemImage("checkmark".into()))
            .dismiss_after(scaled(2.0)),
    );
    indicators.display(
        Indicator::new("error", "Upload failed")
            .with_subtitle("1 file")
            .with_expanded_text("The server closed the connection before the upload finished.")
            .with_style(Style::ERROR)
            .with_action(ActionKind::ToggleExpansion)
            .dismiss_after(scaled(3.0)),
    );

    tokio::time::sleep(scaled(1.0)).await;
    // Refreshing restarts the countdown.
    indicators.display(Indicator::new("saved", "Saved again").dismiss_after(scaled(2.0)));

    if let Some(Activation::Expanded) = indicators.activate("error") {
        if indicators.haptics_enabled() {
            println!("   (haptic tap)");
        }
    }
    tokio::time::sleep(scaled(4.0)).await;
    indicators.set_expanded("error", false);

    tokio::time::sleep(scaled(3.5)).await;
    indicators.dismiss("sync");

    indicators.display(
        Indicator::new("retry", "Retry")
            .with_action(ActionKind::Execute)
            .manual(),
    );
    if let Some(Activation::Execute(id)) = indicators.activate("retry") {
        println!("   executing action for {id}");
        indicators.dismiss_all();
    }

    drop(indicators);
    if let Err(err) = printer.await {
        tracing::warn!(error = %err, "printer task failed");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            return ExitCode::FAILURE;
        }
    };

    match run(flags).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
