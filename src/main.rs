use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use datehint::{Context, resolve_instant, suggest_with, suggest_zones};
use std::io::{self, Read};

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let ctx = Context { now: config.reference, zone: config.zone };

    match config.mode {
        Mode::Suggest(input) => {
            for suggestion in suggest_with(&input, &ctx) {
                println!("{}", suggestion.label);
            }
        }
        Mode::Zones(query) => {
            for suggestion in suggest_zones(&query, &ctx) {
                println!("{}", suggestion.label);
            }
        }
        Mode::Resolve { time, date, dst } => {
            match resolve_instant(&time, date.as_deref(), config.zone_arg.as_deref(), dst, &ctx) {
                Ok(instant) => {
                    println!("{}", instant.format("%Y-%m-%d %H:%M:%S %Z"));
                    println!("{}", instant.with_timezone(&Utc).format("%Y-%m-%d %H:%M:%S UTC"));
                }
                Err(err) => {
                    eprintln!("error: {err}");
                    std::process::exit(1);
                }
            }
        }
    }
}

enum Mode {
    Suggest(String),
    Zones(String),
    Resolve { time: String, date: Option<String>, dst: Option<bool> },
}

struct CliConfig {
    mode: Mode,
    reference: DateTime<Utc>,
    zone: Tz,
    /// The raw --zone value, re-validated by `resolve_instant`.
    zone_arg: Option<String>,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut reference = Utc::now();
    let mut zone = chrono_tz::UTC;
    let mut zone_arg: Option<String> = None;
    let mut resolve: Option<String> = None;
    let mut date: Option<String> = None;
    let mut dst: Option<bool> = None;
    let mut zones_query: Option<String> = None;
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("datehint {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--reference" => {
                let value = args.next().ok_or_else(|| "error: --reference expects a value".to_string())?;
                reference = parse_reference(&value)?;
            }
            "--zone" => {
                let value = args.next().ok_or_else(|| "error: --zone expects a value".to_string())?;
                zone = value.parse::<Tz>().map_err(|_| format!("error: unknown time zone '{value}'"))?;
                zone_arg = Some(value);
            }
            "--resolve" => {
                let value = args.next().ok_or_else(|| "error: --resolve expects a time".to_string())?;
                resolve = Some(value);
            }
            "--date" => {
                let value = args.next().ok_or_else(|| "error: --date expects a value".to_string())?;
                date = Some(value);
            }
            "--dst" => {
                let value = args.next().ok_or_else(|| "error: --dst expects true or false".to_string())?;
                dst = Some(value.parse::<bool>().map_err(|_| format!("error: invalid --dst '{value}'"))?);
            }
            "--zones" => {
                let value = args.next().ok_or_else(|| "error: --zones expects a query".to_string())?;
                zones_query = Some(value);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(rest);
                break;
            }
            _ if arg.starts_with("--reference=") => {
                let value = arg.trim_start_matches("--reference=");
                reference = parse_reference(value)?;
            }
            _ if arg.starts_with("--zone=") => {
                let value = arg.trim_start_matches("--zone=");
                zone = value.parse::<Tz>().map_err(|_| format!("error: unknown time zone '{value}'"))?;
                zone_arg = Some(value.to_string());
            }
            _ if arg.starts_with('-') && arg.len() > 1 && !arg[1..].chars().all(|c| c.is_ascii_digit()) => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(rest);
                break;
            }
        }
    }

    let mode = if let Some(time) = resolve {
        Mode::Resolve { time, date, dst }
    } else if let Some(query) = zones_query {
        Mode::Zones(query)
    } else {
        let input = match input {
            Some(value) => value,
            None => read_stdin_input()?,
        };
        Mode::Suggest(input.trim().to_string())
    };

    Ok(CliConfig { mode, reference, zone, zone_arg })
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn parse_reference(value: &str) -> Result<DateTime<Utc>, String> {
    format!("{value}Z")
        .parse::<DateTime<Utc>>()
        .map_err(|_| format!("error: invalid --reference '{value}' (expected YYYY-MM-DDTHH:MM:SS, UTC)"))
}

fn print_help() {
    println!(
        "datehint {version}

Date expression autocomplete CLI.

Usage:
  datehint [OPTIONS] [--] [input...]
  datehint [OPTIONS] --zones <query>
  datehint [OPTIONS] --resolve <time> [--date <date>] [--dst <bool>]

Modes:
  (default)                  Print ranked date suggestions for the input.
                             An empty input lists the surrounding week.
                             Reads stdin when no input is given on a pipe.
  --zones <query>            Print time zone suggestions for the query,
                             by name or by current local time.
  --resolve <time>           Resolve a time (plus optional --date) into a
                             zoned instant, printed locally and in UTC.

Options:
  --reference <timestamp>    Reference time in YYYY-MM-DDTHH:MM:SS, UTC.
                             Default: now.
  --zone <id>                Time zone for \"today\" and resolution.
                             Default: UTC.
  --date <date>              Date for --resolve (e.g. 7/14, tomorrow, +3).
  --dst <bool>               Prefer the DST reading of an ambiguous time.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Exit codes:
  0  Success.
  1  Unresolvable time, date or zone.
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION")
    )
}
