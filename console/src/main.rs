use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;
use minesweeper_core::{GameEngine, Notification};

mod command;
mod coords;
mod session;
mod view;

use command::{Command, HELP};
use session::Session;

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print every game notification as a JSON line on stderr
    #[arg(long)]
    events: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(level) = args.verbose.tracing_level() {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(io::stderr)
            .init();
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let mut session = Session::new(GameEngine::new(seed));
    if args.events {
        session
            .engine_mut()
            .subscribe_all(|notification: &Notification| {
                match serde_json::to_string(notification) {
                    Ok(line) => eprintln!("{line}"),
                    Err(err) => log::error!("Could not encode {:?}: {}", notification, err),
                }
            });
    }

    let size = session.engine().size();
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{HELP}\n")?;
    write!(stdout, "{}", session.render())?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        match Command::parse(&line, size) {
            Ok(None) => continue,
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => {
                let out = session.execute(command)?;
                writeln!(stdout, "{}", out.trim_end())?;
            }
            Err(err) => writeln!(stdout, "{err}")?,
        }
    }

    log::debug!("Session ended");
    Ok(())
}
