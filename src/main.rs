mod ai;
mod app;
mod clipboard;
mod config;
mod constants;
mod input;
#[cfg(feature = "notifications")]
mod notification;
mod reply;
mod session;
mod ui;

use anyhow::{Context, Result};
use futures::StreamExt;
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::ai::{GeminiClient, StreamFragment, TextGenerator};
use crate::app::App;
use crate::clipboard::SystemClipboard;
use crate::config::Config;
use crate::reply::{ReplyForm, Tone};
use crate::session::MockIdentityProvider;

fn setup_logging() {
    use std::fs::OpenOptions;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,quickreply=debug"));

    // The TUI owns the terminal, so log to a file in the config directory
    let log_file = Config::config_dir()
        .ok()
        .filter(|dir| std::fs::create_dir_all(dir).is_ok())
        .map(|dir| dir.join("quickreply.log"))
        .and_then(|path| {
            OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&path)
                .ok()
        });

    if let Some(file) = log_file {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::sync::Mutex::new(file))
                    .with_ansi(false),
            )
            .init();
    } else {
        // Fallback to stderr if file logging fails
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Headless commands keep stdout for the reply and only surface warnings
fn setup_cli_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_usage() {
    eprintln!(
        r#"quickreply - Draft email replies with Gemini from your terminal

Usage: quickreply [command]

Commands:
    (none)                  Start the interactive composer
    draft [--tone <tone>]   Read an email from stdin and stream a reply to stdout
    tones                   List the available tones
    help                    Show this help message

Environment:
    API_KEY                 Gemini API key (may also be set in a .env file)

Configuration file: ~/.config/quickreply/config.toml
"#
    );
}

fn parse_tone_arg(args: &[String], default: Tone) -> Result<Tone> {
    let mut tone = default;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let value = if arg == "--tone" || arg == "-t" {
            iter.next().context("--tone requires a value")?.as_str()
        } else if let Some(value) = arg.strip_prefix("--tone=") {
            value
        } else {
            anyhow::bail!("Unexpected argument: {}", arg);
        };
        tone = value.parse()?;
    }
    Ok(tone)
}

fn build_client(config: &Config) -> Result<GeminiClient> {
    let api_key = config.api_key()?;
    GeminiClient::new(api_key, &config.ai)
}

async fn run_tui() -> Result<()> {
    setup_logging();

    let config = Config::load()?;
    config.ensure_dirs()?;

    crate::ui::theme::init_theme(config.ui.theme);

    let client = build_client(&config)?;
    tracing::info!("Starting quickreply with model {}", client.model());

    let identity = MockIdentityProvider::new(Duration::from_millis(
        config.session.sign_in_delay_ms,
    ));

    let mut app = App::new(
        config,
        Arc::new(client),
        Arc::new(identity),
        Box::new(SystemClipboard::new()),
    );
    app.run().await
}

async fn run_draft(args: &[String]) -> Result<()> {
    setup_cli_logging();

    let config = Config::load()?;
    let tone = parse_tone_arg(args, config.ui.default_tone)?;
    let client = build_client(&config)?;

    let mut email_text = String::new();
    tokio::io::stdin()
        .read_to_string(&mut email_text)
        .await
        .context("Failed to read email from stdin")?;

    let mut form = ReplyForm::new(tone);
    form.email_text = email_text;
    let pending = match form.begin_submit() {
        Ok(pending) => pending,
        Err(err) => {
            eprintln!("{}", err.user_message());
            std::process::exit(1);
        }
    };

    let mut stdout = tokio::io::stdout();
    let mut stream = client.generate_stream(&pending.prompt);
    let mut failed = false;
    while let Some(fragment) = stream.next().await {
        if let StreamFragment::Error(ref err) = fragment {
            tracing::warn!("Streaming reply failed: {}", err);
            failed = true;
        }
        stdout.write_all(fragment.into_text().as_bytes()).await?;
        stdout.flush().await?;
    }
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

fn print_tones() {
    for tone in Tone::ALL {
        println!("{}", tone.label());
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args: Vec<String> = env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("help") | Some("--help") | Some("-h") => {
            print_usage();
            Ok(())
        }
        Some("tones") => {
            print_tones();
            Ok(())
        }
        Some("draft") => run_draft(&args[2..]).await,
        Some(cmd) => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            std::process::exit(1);
        }
        None => run_tui().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_tone_arg() {
        assert_eq!(parse_tone_arg(&[], Tone::Friendly).unwrap(), Tone::Friendly);
        assert_eq!(
            parse_tone_arg(&args(&["--tone", "formal"]), Tone::Friendly).unwrap(),
            Tone::Formal
        );
        assert_eq!(
            parse_tone_arg(&args(&["--tone=Casual"]), Tone::Friendly).unwrap(),
            Tone::Casual
        );
        assert!(parse_tone_arg(&args(&["--tone"]), Tone::Friendly).is_err());
        assert!(parse_tone_arg(&args(&["--tone", "sarcastic"]), Tone::Friendly).is_err());
        assert!(parse_tone_arg(&args(&["extra"]), Tone::Friendly).is_err());
    }
}
