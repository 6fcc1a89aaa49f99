mod script;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use cola_core::{ColaPlugin, MessageSink, RecordingSink, Settings};

use crate::script::{run_script, ScriptEvent, Transcript};

#[derive(Parser)]
#[command(version, about = "Validate and exercise a cola exemption config offline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a config file, validate it, and report which handlers register.
    Check(CheckArgs),
    /// Replay a scripted event sequence and emit a JSON transcript.
    Replay(ReplayArgs),
}

#[derive(Args)]
struct CheckArgs {
    #[arg(long, default_value = "cola.example.toml")]
    config: PathBuf,
}

#[derive(Args)]
struct ReplayArgs {
    #[arg(long, default_value = "cola.example.toml")]
    config: PathBuf,
    #[arg(long)]
    script: PathBuf,
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::try_init().ok();
    let cli = Cli::parse();
    match cli.command {
        Commands::Check(args) => handle_check(args),
        Commands::Replay(args) => handle_replay(args),
    }
}

fn handle_check(args: CheckArgs) -> Result<()> {
    let settings = load_settings(&args.config)?;
    let plugin = ColaPlugin::enable(settings, Arc::new(RecordingSink::default()))?;

    let settings = plugin.settings();
    println!("config ok ({})", args.config.display());
    println!("  enabled:            {}", settings.enabled);
    println!("  message channel:    {}", settings.message_type);
    println!("  message duration:   {}s", settings.message_duration);
    println!("  damage filter:      {}", registered(plugin.is_active()));
    println!(
        "  usage notifier:     {}",
        registered(plugin.notifier_registered())
    );
    Ok(())
}

fn handle_replay(args: ReplayArgs) -> Result<()> {
    let settings = load_settings(&args.config)?;
    let sink = Arc::new(RecordingSink::default());
    let plugin = ColaPlugin::enable(settings, sink.clone() as Arc<dyn MessageSink>)?;

    let data = fs::read_to_string(&args.script)
        .with_context(|| format!("failed to read script {}", args.script.display()))?;
    let events: Vec<ScriptEvent> =
        serde_json::from_str(&data).context("script is not a JSON array of events")?;

    let transcript = Transcript {
        recorded_at: Utc::now().to_rfc3339(),
        entries: run_script(&plugin, events),
        deliveries: sink.take(),
    };

    let rendered = serde_json::to_string_pretty(&transcript)?;
    println!("{rendered}");
    if let Some(out) = args.out {
        fs::write(&out, &rendered)
            .with_context(|| format!("failed to write transcript to {}", out.display()))?;
        println!("transcript written to {}", out.display());
    }
    Ok(())
}

fn load_settings(path: &Path) -> Result<Settings> {
    Settings::load(path).with_context(|| format!("config {} failed to load", path.display()))
}

fn registered(flag: bool) -> &'static str {
    if flag {
        "registered"
    } else {
        "not registered"
    }
}
