//! Line-oriented commands read from stdin.

use std::str::FromStr;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Toggle play/pause
    TogglePlay,
    Next,
    Previous,
    Select(usize),
    /// Click on the waveform at a horizontal pointer position
    Click(f64),
    /// Press at the first position, move through the rest, then release
    Drag(Vec<f64>),
    Search(String),
    Status,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("`{command}` needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("Not a number: {0}")]
    InvalidNumber(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match name.to_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "play" | "pause" => Ok(Self::TogglePlay),
            "next" | "n" => Ok(Self::Next),
            "prev" | "previous" | "p" => Ok(Self::Previous),
            "select" => {
                let index = rest.parse().map_err(|_| {
                    if rest.is_empty() {
                        CommandError::MissingArgument {
                            command: "select",
                            expected: "a track index",
                        }
                    } else {
                        CommandError::InvalidNumber(rest.to_string())
                    }
                })?;
                Ok(Self::Select(index))
            }
            "click" => {
                let x = parse_positions(rest)?;
                match x.as_slice() {
                    [x] => Ok(Self::Click(*x)),
                    _ => Err(CommandError::MissingArgument {
                        command: "click",
                        expected: "one pointer position",
                    }),
                }
            }
            "drag" => {
                let positions = parse_positions(rest)?;
                if positions.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "drag",
                        expected: "at least one pointer position",
                    });
                }
                Ok(Self::Drag(positions))
            }
            "search" | "/" => Ok(Self::Search(rest.to_string())),
            "status" | "s" => Ok(Self::Status),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn parse_positions(args: &str) -> Result<Vec<f64>, CommandError> {
    args.split_whitespace()
        .map(|arg| match arg.parse::<f64>() {
            Ok(x) if x.is_finite() => Ok(x),
            _ => Err(CommandError::InvalidNumber(arg.to_string())),
        })
        .collect()
}

/// Forward parsed stdin lines to `tx` until stdin closes or shutdown starts
pub async fn read_commands(tx: mpsc::Sender<Command>, cancel_token: CancellationToken) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            () = cancel_token.cancelled() => break,
            line = lines.next_line() => {
                match line {
                    Ok(Some(line)) => match line.parse::<Command>() {
                        Ok(command) => {
                            if tx.send(command).await.is_err() {
                                break;
                            }
                        }
                        Err(CommandError::Empty) => {}
                        Err(e) => warn!("{}", e),
                    },
                    Ok(None) => {
                        info!("Stdin closed, no more commands");
                        break;
                    }
                    Err(e) => {
                        warn!("Failed to read stdin: {}", e);
                        break;
                    }
                }
            }
        }
    }
}
