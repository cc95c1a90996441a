use std::fs::OpenOptions;
use std::io::{self, Write};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use interactive_readline::{Instance, Prompt, ReadlineError, TerminalConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "interactive-readline")]
#[command(about = "Read lines from the terminal and echo them back")]
struct Args {
    #[arg(long, default_value = ">>> ")]
    prompt: String,

    /// Prompt used with --alt, and for lines following an open `"""` paste
    #[arg(long, default_value = "... ")]
    alt_prompt: String,

    #[arg(long, default_value = "Send a message (Ctrl+D to quit)")]
    placeholder: String,

    #[arg(long, default_value = "")]
    alt_placeholder: String,

    /// Start with the alternate prompt
    #[arg(long)]
    alt: bool,

    /// Do not record submitted lines
    #[arg(long)]
    no_history: bool,

    /// Plain output for terminals without ANSI support
    #[arg(long)]
    no_ansi: bool,

    #[arg(long, default_value_t = 8)]
    tab_width: usize,
}

fn init_tracing() -> Result<()> {
    // stdout is the editing surface, so logs only go to a file when asked
    let Ok(log_path) = std::env::var("READLINE_LOG_FILE") else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {log_path}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_thread_ids(true)
        .init();
    Ok(())
}

/// Echo lines until end of input, tracking open `"""` blocks to pick the prompt
fn run(rl: &mut Instance) -> Result<()> {
    loop {
        match rl.readline() {
            Ok(line) => {
                let opens = line.starts_with("\"\"\"");
                let closes = line.ends_with("\"\"\"") && (!opens || line.len() > 3);
                if opens != closes {
                    rl.prompt_mut().use_alt = opens;
                }
                println!("{line}");
            }
            Err(ReadlineError::Interrupt) => {
                println!("^C");
                rl.prompt_mut().use_alt = false;
            }
            Err(ReadlineError::Eof) => {
                println!();
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing()?;

    let prompt = Prompt {
        prompt: args.prompt,
        alt_prompt: args.alt_prompt,
        placeholder: args.placeholder,
        alt_placeholder: args.alt_placeholder,
        use_alt: args.alt,
    };
    let config = TerminalConfig {
        ansi_enabled: !args.no_ansi,
        tab_width: args.tab_width,
        history_enabled: !args.no_history,
    };

    let mut rl = Instance::with_config(prompt, config).context("failed to start line editor")?;
    tracing::info!(?config, "session started");

    let mut stdout = io::stdout();
    execute!(stdout, EnableBracketedPaste)?;
    let result = run(&mut rl);
    execute!(stdout, DisableBracketedPaste)?;
    stdout.flush()?;

    result
}
