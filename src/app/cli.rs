use clap::Parser;

/// Remo - a remote control for your media backend 🎛️
#[derive(Parser, Debug)]
#[command(name = "remo", version, about)]
pub struct Args {
    /// Control-plane base URL (overrides config)
    #[arg(long, short = 'u')]
    pub url: Option<String>,

    /// Run against the offline demo backend (no network required)
    #[arg(long, short = 'd')]
    pub demo: bool,

    /// Background status poll interval in milliseconds (overrides config)
    #[arg(long)]
    pub poll_interval_ms: Option<u64>,

    /// Generate default config.toml to stdout
    #[arg(long)]
    pub generate_config: bool,
}
