//! LiptonWeb Browser - text-mode shell
//!
//! Drives a [`ShellWindow`] from line commands on stdin and redraws the
//! window on stdout after every change. Pages are fetched by the
//! [`DocumentEngine`]; logs go to stderr.

mod command;
mod engine;
mod error;
mod render;

pub use command::{Command, HELP};
pub use engine::{DocumentEngine, DocumentView};
pub use error::{AppError, Result};
pub use render::frame;

use lipton_core::{Config, Flow, Intent, ShellWindow};
use tokio::io::{AsyncBufReadExt, BufReader};

pub fn run() -> anyhow::Result<()> {
    // Initialize logging
    lipton_core::init_logging();

    // Engine callbacks and input share one thread
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(event_loop())?;
    Ok(())
}

async fn event_loop() -> Result<()> {
    let config = Config::from_env();
    let engine = DocumentEngine::new()?;
    let mut shell = ShellWindow::new(config, Box::new(engine))?;

    tracing::info!("LiptonWeb Browser started");

    println!("{}", HELP);
    draw(&shell);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    shell.handle_intent(Intent::Quit);
                    break;
                };
                if handle_line(&mut shell, &line) == Flow::Quit {
                    break;
                }
            }
            Some(event) = shell.next_event() => shell.handle_event(event),
        }

        shell.drain_events();
        draw(&shell);
    }

    Ok(())
}

fn handle_line(shell: &mut ShellWindow, line: &str) -> Flow {
    let command = match Command::parse(line) {
        Ok(Some(command)) => command,
        Ok(None) => return Flow::Continue,
        Err(e) => {
            println!("{}", e);
            println!("{}", HELP);
            return Flow::Continue;
        }
    };

    match command {
        Command::Help => println!("{}", HELP),
        Command::Json => match shell.snapshot_json() {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::error!(error = %e, "Failed to serialize window state"),
        },
        command => match command.into_intent(shell.registry()) {
            Some(intent) => return shell.handle_intent(intent),
            None => println!("No such tab"),
        },
    }

    Flow::Continue
}

fn draw(shell: &ShellWindow) {
    println!("{}\n", frame(&shell.snapshot()));
}
