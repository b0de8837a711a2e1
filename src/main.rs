use anyhow::Result;
use clap::Parser;
use remo::app::cli::Args;
use remo::app::config::AppConfig;
use remo::app::events::AppEvent;
use remo::app::state::{PlayerState, Store};
use remo::backend::{backend_for, Command};
use remo::dispatch::Dispatcher;
use remo::poller::Poller;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::info;

/// Logs go to a file so stdout stays clean for the status lines.
fn init_logging() -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let mut dir = dirs::cache_dir().unwrap_or_else(|| std::path::PathBuf::from("."));
    dir.push("remo");
    std::fs::create_dir_all(&dir)?;

    let appender = tracing_appender::rolling::never(dir, "remo.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("info".parse()?),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}

fn render_line(state: &PlayerState, demo: bool) -> String {
    let link = if !state.is_connected {
        "offline"
    } else if demo {
        "demo"
    } else {
        "connected"
    };
    let transport = if state.is_playing { "▶" } else { "⏸" };
    let volume = if state.is_muted {
        format!("muted ({}%)", state.volume)
    } else {
        format!("{}%", state.volume)
    };

    format!(
        "[{}] {} {} - {} | vol {}",
        link, transport, state.track_name, state.artist_name, volume
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    human_panic::setup_panic!();
    let args = Args::parse();

    if args.generate_config {
        print!("{}", toml::to_string_pretty(&AppConfig::default())?);
        return Ok(());
    }

    let _guard = init_logging()?;

    // CLI flags override persisted config
    let mut config = AppConfig::load();
    if let Some(url) = args.url {
        config.base_url = url;
    }
    if args.demo {
        config.demo = true;
    }
    if let Some(ms) = args.poll_interval_ms {
        config.poll_interval_ms = ms;
    }

    let store = Arc::new(Store::new());
    let backend = backend_for(&config);
    let dispatcher = Arc::new(Dispatcher::new(store.clone(), backend.clone()));

    let (tx, mut rx) = mpsc::channel(100);

    // 1. Stdin line task
    let tx_input = tx.clone();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if tx_input.send(AppEvent::Input(line)).await.is_err() {
                break;
            }
        }
    });

    // 2. Store watcher task: re-render on every merge
    let tx_state = tx.clone();
    let mut watcher = store.subscribe();
    tokio::spawn(async move {
        while watcher.changed().await.is_ok() {
            let snapshot = watcher.borrow_and_update().clone();
            if tx_state.send(AppEvent::StateUpdate(snapshot)).await.is_err() {
                break;
            }
        }
    });

    // 3. Background status poller (one per session, torn down on exit)
    let poller = Poller::spawn(
        store.clone(),
        backend.clone(),
        Duration::from_millis(config.poll_interval_ms),
    );

    info!(base_url = %config.base_url, demo = config.demo, "session started");
    if config.demo {
        println!("demo mode - no backend required");
    }
    println!("commands: play pause next prev vol+ vol- vol <0-100> mute sleep display-sleep quit");

    while let Some(event) = rx.recv().await {
        match event {
            AppEvent::Input(line) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }
                if matches!(line.as_str(), "quit" | "q" | "exit") {
                    break;
                }
                match line.parse::<Command>() {
                    Ok(command) => {
                        let dispatcher = dispatcher.clone();
                        let tx = tx.clone();
                        tokio::spawn(async move {
                            let outcome = dispatcher.dispatch(command).await;
                            let _ = tx.send(AppEvent::Dispatched(command, outcome)).await;
                        });
                    }
                    Err(e) => println!("? {e}"),
                }
            }
            AppEvent::StateUpdate(state) => {
                println!("{}", render_line(&state, config.demo));
            }
            AppEvent::Dispatched(command, outcome) => {
                if outcome.success {
                    info!(command = command.label(), "acknowledged");
                } else {
                    println!("! {}: {}", command.label(), outcome.message.unwrap_or_default());
                }
            }
        }
    }

    poller.shutdown();
    Ok(())
}
