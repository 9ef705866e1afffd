//! TCN <-> PGN converter
//!
//! Converts Chess.com TCN move lists to PGN movetext and back.
//! Logs go to stderr; stdout only carries the converted game.

mod config;
mod error;

use std::fs;
use std::io::{self, Read};

use anyhow::Context;
use serde::Serialize;
use tcn_core::{PgnWriter, Token};
use tracing::{debug, info};

use crate::config::{wrap_width, CliConfig, OutputFormat};
use crate::error::CliError;

const USAGE: &str = "\
Usage:
  tcn to-pgn <TCN>        convert a TCN move list to PGN movetext
  tcn to-tcn [FILE|-]     convert a PGN game (file or stdin) to TCN
  tcn decode <TCN>        list the decoded moves, one UCI move per line

Options:
  --json                  print a JSON record instead of plain text
  --columns <N>           wrap PGN movetext at N columns (0 = no wrap)
  -h, --help              show this message

Environment:
  TCN_PGN_COLUMNS         default for --columns (80)
  TCN_OUTPUT              text | json
  RUST_LOG                log filter, logs are written to stderr";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    ToPgn(String),
    ToTcn(Option<String>),
    Decode(String),
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Args {
    command: Command,
    json: bool,
    columns: Option<usize>,
}

/// Parse the arguments after the program name.
fn parse_args(args: &[String]) -> Result<Args, CliError> {
    let mut json = false;
    let mut columns = None;
    let mut positional = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => json = true,
            "-h" | "--help" => {
                return Ok(Args {
                    command: Command::Help,
                    json,
                    columns,
                })
            }
            "--columns" => {
                let value = iter
                    .next()
                    .ok_or_else(|| CliError::Usage("--columns needs a value".into()))?;
                columns = Some(parse_columns(value)?);
            }
            other if other.starts_with("--columns=") => {
                columns = Some(parse_columns(&other["--columns=".len()..])?);
            }
            // "-" is stdin, everything else starting with '-' is an unknown flag.
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(format!("unknown option '{other}'")))
            }
            _ => positional.push(arg.clone()),
        }
    }

    let mut positional = positional.into_iter();
    let command = match positional.next().as_deref() {
        None => return Err(CliError::Usage("missing command".into())),
        Some("to-pgn") => Command::ToPgn(required(positional.next(), "to-pgn")?),
        Some("decode") => Command::Decode(required(positional.next(), "decode")?),
        Some("to-tcn") => Command::ToTcn(positional.next().filter(|path| path != "-")),
        Some("help") => Command::Help,
        Some(other) => return Err(CliError::Usage(format!("unknown command '{other}'"))),
    };
    if let Some(extra) = positional.next() {
        return Err(CliError::Usage(format!("unexpected argument '{extra}'")));
    }

    Ok(Args {
        command,
        json,
        columns,
    })
}

fn required(value: Option<String>, command: &str) -> Result<String, CliError> {
    value.ok_or_else(|| CliError::Usage(format!("{command} needs a TCN string")))
}

fn parse_columns(value: &str) -> Result<usize, CliError> {
    value
        .trim()
        .parse()
        .map_err(|_| CliError::Usage(format!("invalid column count '{value}'")))
}

#[derive(Serialize)]
struct DecodedTcn<'a> {
    tcn: &'a str,
    tokens: Vec<Token>,
}

fn read_pgn(path: Option<&str>) -> anyhow::Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("Failed to read PGN file {path}"))
        }
        None => {
            let mut pgn = String::new();
            io::stdin()
                .read_to_string(&mut pgn)
                .map_err(CliError::from)
                .context("Failed to read PGN from stdin")?;
            Ok(pgn)
        }
    }
}

fn token_line(token: &Token) -> String {
    match token {
        Token::Move(mv) => mv.uci(),
        Token::Drop(drop) => format!("{}@{}", drop.piece().letter(), drop.to()),
    }
}

/// Produce the stdout text for one command.
fn run(command: &Command, output: OutputFormat, writer: &PgnWriter) -> anyhow::Result<String> {
    let rendered = match command {
        Command::Help => USAGE.to_string(),
        Command::ToPgn(tcn) => {
            let data = tcn_core::convert_tcn(tcn.trim(), writer)
                .map_err(CliError::from)
                .context("Failed to convert TCN to PGN")?;
            info!(plies = data.moves.len(), "Converted TCN to PGN");
            match output {
                OutputFormat::Text => data.movetext,
                OutputFormat::Json => serde_json::to_string_pretty(&data).map_err(CliError::from)?,
            }
        }
        Command::ToTcn(path) => {
            let pgn = read_pgn(path.as_deref())?;
            let data = tcn_core::convert_pgn(&pgn, writer)
                .map_err(CliError::from)
                .context("Failed to convert PGN to TCN")?;
            info!(plies = data.moves.len(), "Converted PGN to TCN");
            match output {
                OutputFormat::Text => data.tcn,
                OutputFormat::Json => serde_json::to_string_pretty(&data).map_err(CliError::from)?,
            }
        }
        Command::Decode(tcn) => {
            let tcn = tcn.trim();
            let tokens = tcn_core::decode_tokens(tcn)
                .map_err(CliError::from)
                .context("Failed to decode TCN")?;
            debug!(tokens = tokens.len(), "Decoded TCN");
            match output {
                OutputFormat::Text => tokens.iter().map(token_line).collect::<Vec<_>>().join("\n"),
                OutputFormat::Json => serde_json::to_string_pretty(&DecodedTcn { tcn, tokens })
                    .map_err(CliError::from)?,
            }
        }
    };
    Ok(rendered)
}

fn main() -> anyhow::Result<()> {
    // Load .env before the filter reads RUST_LOG
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let raw: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse_args(&raw) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}\n\n{USAGE}");
            std::process::exit(e.exit_code());
        }
    };

    let mut config = CliConfig::load()?;
    if let Some(columns) = args.columns {
        config.columns = wrap_width(columns);
    }
    if args.json {
        config.output = OutputFormat::Json;
    }
    debug!(?args, ?config, "Starting");

    let writer = PgnWriter::new(config.columns);
    let rendered = run(&args.command, config.output, &writer)?;
    println!("{rendered}");
    Ok(())
}
