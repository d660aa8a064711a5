// SPDX-License-Identifier: MPL-2.0
//! Terminal front-end.
//!
//! Toasts are printed to standard output by a
//! [`ConsoleSink`](crate::infrastructure::ConsoleSink). Standard input accepts
//! one command per line to drive the client; replies go to standard error
//! so the toast stream stays clean.

use crate::client::NotifyClient;
use crate::error::Result;
use std::future::Future;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

const HELP: &str = "commands: start | stop | test | base <url> | state | events | quit";

/// A control command read from standard input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Test,
    /// Change the service origin.
    Base(String),
    State,
    Events,
    Help,
    Quit,
}

impl Command {
    /// Parses one input line. Blank lines and unknown commands yield `None`.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let (name, argument) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        match name.to_lowercase().as_str() {
            "start" => Some(Command::Start),
            "stop" => Some(Command::Stop),
            "test" => Some(Command::Test),
            "base" if !argument.is_empty() => Some(Command::Base(argument.to_string())),
            "state" | "status" => Some(Command::State),
            "events" => Some(Command::Events),
            "help" | "?" => Some(Command::Help),
            "quit" | "exit" => Some(Command::Quit),
            _ => None,
        }
    }
}

/// Runs until `quit` or Ctrl-C, then stops the client.
///
/// # Errors
///
/// Returns an error if standard input or the signal handler fails.
pub async fn run(client: NotifyClient, autostart: bool) -> Result<()> {
    drive(
        client,
        autostart,
        BufReader::new(tokio::io::stdin()),
        tokio::signal::ctrl_c(),
    )
    .await
}

async fn drive<R, S>(client: NotifyClient, autostart: bool, input: R, shutdown: S) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    S: Future<Output = std::io::Result<()>>,
{
    if autostart {
        client.start();
    } else {
        eprintln!("delivery not started; type `start` ({HELP})");
    }

    let mut lines = input.lines();
    let mut stdin_open = true;
    // Registered once so a signal between two iterations is not lost.
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            line = lines.next_line(), if stdin_open => match line? {
                Some(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    match Command::parse(&line) {
                        Some(Command::Quit) => break,
                        Some(command) => execute(&client, command).await,
                        None => eprintln!("unknown command `{}`; {HELP}", line.trim()),
                    }
                }
                // Keep delivering with stdin closed, e.g. when piped.
                None => stdin_open = false,
            },
            signal = &mut shutdown => {
                signal?;
                break;
            }
        }
    }

    client.stop();
    Ok(())
}

async fn execute(client: &NotifyClient, command: Command) {
    match command {
        Command::Start => client.start(),
        Command::Stop => client.stop(),
        Command::Test => eprintln!("{}", client.test().await.into_json()),
        Command::Base(url) => {
            client.set_base(&url);
            eprintln!("base: {}", client.base());
        }
        Command::State => match serde_json::to_string(&client.state()) {
            Ok(state) => eprintln!("{state}"),
            Err(err) => tracing::warn!(error = %err, "failed to serialize state"),
        },
        Command::Events => {
            for event in client.recent_events() {
                eprintln!("{event}");
            }
        }
        Command::Help => eprintln!("{HELP}"),
        Command::Quit => {}
    }
}
