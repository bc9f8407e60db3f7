use selkie::{Linter, beautify_source, detect_kind, format_source, suggest};
use serde::Serialize;
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    Detect,
    #[default]
    Lint,
    Format,
    Beautify,
    Suggest,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    cursor: Option<usize>,
}

fn usage() -> &'static str {
    "selkie-cli\n\
\n\
USAGE:\n\
  selkie-cli [lint] [--pretty] [<path>|-]\n\
  selkie-cli detect [<path>|-]\n\
  selkie-cli format [<path>|-]\n\
  selkie-cli beautify [<path>|-]\n\
  selkie-cli suggest [--pretty] [--cursor <offset>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - lint prints a JSON array of diagnostics (heuristic checks only).\n\
  - detect prints the diagram kind id.\n\
  - format re-indents; beautify re-indents and normalizes spacing.\n\
  - suggest prints a JSON array of completion items; --cursor defaults to\n\
    the end of the input.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "detect" => args.command = Command::Detect,
            "lint" => args.command = Command::Lint,
            "format" => args.command = Command::Format,
            "beautify" => args.command = Command::Beautify,
            "suggest" => args.command = Command::Suggest,
            "--pretty" => args.pretty = true,
            "--cursor" => {
                let Some(offset) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.cursor = Some(
                    offset
                        .parse::<usize>()
                        .map_err(|_| CliError::Usage(usage()))?,
                );
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;

    match args.command {
        Command::Detect => {
            println!("{}", detect_kind(&text));
            Ok(())
        }
        Command::Lint => {
            let linter = Linter::new();
            write_json(&linter.lint(&text), args.pretty)
        }
        Command::Format => {
            print!("{}", format_source(&text));
            Ok(())
        }
        Command::Beautify => {
            print!("{}", beautify_source(&text));
            Ok(())
        }
        Command::Suggest => {
            let cursor = args.cursor.unwrap_or(text.len());
            write_json(&suggest(&text, cursor), args.pretty)
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
