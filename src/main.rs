//! Purpose: `tweetshape` CLI entry point.
//! Role: Binary crate root; parses args, installs logging, runs commands, emits JSON on stdout.
//! Invariants: Decoded records are printed in canonical encoding on stdout.
//! Invariants: Non-interactive errors and notices are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
#![allow(clippy::result_large_err)]
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum, error::ErrorKind as ClapErrorKind};
use clap_complete::aot::Shell;
use serde_json::{Map, Value, json};
use std::error::Error as StdError;
use tracing_subscriber::EnvFilter;

mod color_json;
mod command_dispatch;

use color_json::{Layout, render_json};
use tweetshape::api::{
    DEFAULT_MAX_DEPTH, DateFallback, DecodeOptions, Error, ErrorKind, prepare_all, to_exit_code,
};
use tweetshape::notice::{Notice, notice_json};

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    init_tracing();
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn run() -> Result<RunOutcome, (Error, ColorMode)> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(clap_error_summary(&err))
                        .with_hint(clap_error_hint(&err)),
                    ColorMode::Auto,
                ));
            }
        },
    };

    let color_mode = cli.color;
    if cli.command.needs_catalog() {
        prepare_all().map_err(|err| (err, color_mode))?;
    }
    command_dispatch::dispatch_command(cli.command, color_mode).map_err(|err| (err, color_mode))
}

#[derive(Parser)]
#[command(
    name = "tweetshape",
    version,
    about = "Map social-media REST payloads to typed records and back",
    help_template = r#"{about-with-newline}
{before-help}USAGE
  {usage}

COMMANDS
{subcommands}

OPTIONS
{options}

{after-help}
"#,
    long_about = None,
    before_help = r#"Every record type is declared as a schema. `decode` reads a JSON payload,
maps it onto the named record, and prints its canonical encoding.
"#,
    after_help = r#"EXAMPLES
  $ tweetshape decode tweet status.json
  $ curl -s "$API/followers/ids.json" | tweetshape decode id --page ids
  $ tweetshape schema user
  $ tweetshape types

LEARN MORE
  $ tweetshape <command> --help
  Set RUST_LOG=debug to trace schema derivation and ignored keys."#,
    arg_required_else_help = true,
    disable_help_subcommand = false
)]
struct Cli {
    #[arg(
        long,
        default_value = "auto",
        value_enum,
        help = "Colorize stderr diagnostics and JSON output: auto|always|never"
    )]
    color: ColorMode,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    #[command(
        about = "Decode a payload into a record and print its canonical encoding",
        after_help = r#"EXAMPLES
  $ tweetshape decode user user.json
  $ tweetshape decode search_result --strict-dates < result.json
  $ tweetshape decode user --page users friends.json
  $ tweetshape decode id --page ids followers.json

NOTES
  - INPUT defaults to stdin; `-` also means stdin
  - `id` with --page decodes pages of plain id strings
  - Unparseable optional dates become the zero value and a notice on stderr"#
    )]
    Decode(DecodeArgs),
    #[command(about = "Print the field table of a record type as JSON")]
    Schema {
        #[arg(help = "Record type name (see `tweetshape types`)")]
        record: String,
    },
    #[command(about = "List catalogued record types")]
    Types,
    #[command(about = "Derive every record schema and report declaration defects")]
    Check,
    #[command(
        about = "Generate shell completions",
        after_help = r#"EXAMPLES
  $ tweetshape completion bash > ~/.local/share/bash-completion/completions/tweetshape
  $ tweetshape completion zsh > ~/.zfunc/_tweetshape"#
    )]
    Completion {
        #[arg(help = "Shell to generate completions for")]
        shell: Shell,
    },
}

impl Command {
    fn needs_catalog(&self) -> bool {
        matches!(
            self,
            Command::Decode(_) | Command::Schema { .. } | Command::Types
        )
    }
}

#[derive(Args)]
struct DecodeArgs {
    #[arg(help = "Record type name, or `id` together with --page")]
    record: String,
    #[arg(help = "Payload file (default: stdin)")]
    input: Option<PathBuf>,
    #[arg(long, value_name = "KEY", help = "Decode a cursor page whose elements live under KEY")]
    page: Option<String>,
    #[arg(long, help = "Fail on unparseable optional date-times instead of zeroing them")]
    strict_dates: bool,
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH, help = "Maximum nesting depth")]
    max_depth: usize,
    #[arg(long, help = "Print compact single-line JSON")]
    compact: bool,
}

impl DecodeArgs {
    fn options(&self) -> DecodeOptions {
        DecodeOptions {
            date_fallback: if self.strict_dates {
                DateFallback::Strict
            } else {
                DateFallback::ZeroOnOptional
            },
            max_depth: self.max_depth,
        }
    }
}

fn read_input(input: Option<&PathBuf>) -> Result<Vec<u8>, Error> {
    match input {
        Some(path) if path.as_os_str() != "-" => std::fs::read(path).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message(format!("failed to read {}", path.display()))
                .with_hint("Check the path, or pipe the payload on stdin.")
                .with_source(err)
        }),
        _ => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf).map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message("failed to read stdin")
                    .with_source(err)
            })?;
            Ok(buf)
        }
    }
}

fn unknown_record_error(name: &str) -> Error {
    Error::new(ErrorKind::Usage)
        .with_message(format!("unknown record type `{name}`"))
        .with_hint("Run `tweetshape types` to list record types.")
}

fn emit_json(value: &Value, compact: bool, color_mode: ColorMode) {
    let use_color = color_mode.use_color(io::stdout().is_terminal());
    let layout = if compact {
        Layout::Compact
    } else {
        Layout::Pretty
    };
    println!("{}", render_json(value, layout, use_color));
}

#[derive(Copy, Clone, Debug)]
enum AnsiColor {
    Red,
    Yellow,
}

fn colorize_label(label: &str, enabled: bool, color: AnsiColor) -> String {
    if !enabled {
        return label.to_string();
    }
    let code = match color {
        AnsiColor::Red => "31",
        AnsiColor::Yellow => "33",
    };
    format!("\u{1b}[{code}m{label}\u{1b}[0m")
}

fn emit_error(err: &Error, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err, color_mode.use_color(is_tty)));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn notice_time_now() -> String {
    use time::format_description::well_known::Rfc3339;
    time::OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}

fn emit_notice(notice: &Notice, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        let label = colorize_label("notice:", color_mode.use_color(is_tty), AnsiColor::Yellow);
        eprintln!("{label} {} (record: {})", notice.message, notice.record);
        return;
    }

    let value = notice_json(notice);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"notice\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
        ErrorKind::Parse => "invalid json".to_string(),
        ErrorKind::SchemaDefinition => "invalid record declaration".to_string(),
        ErrorKind::MissingField => "missing required field".to_string(),
        ErrorKind::TypeMismatch => "type mismatch".to_string(),
        ErrorKind::UnknownDiscriminator => "unknown discriminator".to_string(),
        ErrorKind::ValueFormat => "malformed value".to_string(),
        ErrorKind::DepthLimit => "nesting too deep".to_string(),
        ErrorKind::UnreadableResponse => "response could not be understood".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(record) = err.record() {
        inner.insert("record".to_string(), json!(record));
    }
    if let Some(field) = err.field() {
        inner.insert("field".to_string(), json!(field));
    }
    if let Some(expected) = err.expected() {
        inner.insert("expected".to_string(), json!(expected));
    }
    if let Some(actual) = err.actual() {
        inner.insert("actual".to_string(), json!(actual));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {}",
        colorize_label("error:", use_color, AnsiColor::Red),
        error_message(err)
    ));

    if let Some(hint) = err.hint() {
        lines.push(format!(
            "{} {hint}",
            colorize_label("hint:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(record) = err.record() {
        lines.push(format!(
            "{} {record}",
            colorize_label("record:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(field) = err.field() {
        lines.push(format!(
            "{} {field}",
            colorize_label("field:", use_color, AnsiColor::Yellow)
        ));
    }
    if let (Some(expected), Some(actual)) = (err.expected(), err.actual()) {
        lines.push(format!(
            "{} {expected}, found {actual}",
            colorize_label("expected:", use_color, AnsiColor::Yellow)
        ));
    }

    let causes = error_causes(err);
    if let Some(cause) = causes.first() {
        lines.push(format!(
            "{} {cause}",
            colorize_label("caused by:", use_color, AnsiColor::Yellow)
        ));
    }

    lines.join("\n")
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}

fn clap_error_hint(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let usage = rendered
        .lines()
        .find_map(|line| line.trim().strip_prefix("Usage: "))
        .map(str::trim);
    let Some(usage) = usage else {
        return "Try `tweetshape --help`.".to_string();
    };

    let tokens: Vec<&str> = usage.split_whitespace().collect();
    let Some(pos) = tokens.iter().position(|t| *t == "tweetshape") else {
        return "Try `tweetshape --help`.".to_string();
    };
    let parts: Vec<&str> = tokens
        .iter()
        .skip(pos + 1)
        .take_while(|token| {
            !(token.starts_with('-') || token.starts_with('<') || token.starts_with('['))
        })
        .copied()
        .collect();

    if parts.is_empty() {
        return "Try `tweetshape --help`.".to_string();
    }
    format!("Try `tweetshape {} --help`.", parts.join(" "))
}

#[cfg(test)]
mod tests {
    use super::{
        Cli, Command, DateFallback, Error, ErrorKind, clap_error_hint, error_json, error_text,
    };
    use clap::Parser;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn error_text_respects_color_flag() {
        let err = Error::new(ErrorKind::MissingField)
            .with_message("missing required field `id_str`")
            .with_field("status.id_str");
        let colored = error_text(&err, true);
        let plain = error_text(&err, false);
        assert!(colored.contains("\u{1b}[31merror:\u{1b}[0m"));
        assert!(plain.contains("field: status.id_str"));
        assert!(!plain.contains("\u{1b}["));
    }

    #[test]
    fn error_json_carries_path_and_shapes() {
        let err = Error::new(ErrorKind::TypeMismatch)
            .with_record("User")
            .with_field("followers_count")
            .with_shapes("integer", "string");
        let value = error_json(&err);
        let inner = value.get("error").expect("error object");
        assert_eq!(inner.get("kind").and_then(|v| v.as_str()), Some("TypeMismatch"));
        assert_eq!(inner.get("message").and_then(|v| v.as_str()), Some("type mismatch"));
        assert_eq!(inner.get("record").and_then(|v| v.as_str()), Some("User"));
        assert_eq!(inner.get("expected").and_then(|v| v.as_str()), Some("integer"));
        assert_eq!(inner.get("actual").and_then(|v| v.as_str()), Some("string"));
    }

    #[test]
    fn decode_flags_build_options() {
        let cli = Cli::try_parse_from([
            "tweetshape",
            "decode",
            "tweet",
            "status.json",
            "--strict-dates",
            "--max-depth",
            "8",
        ])
        .expect("parse");
        let Command::Decode(args) = cli.command else {
            panic!("expected decode");
        };
        let options = args.options();
        assert_eq!(options.date_fallback, DateFallback::Strict);
        assert_eq!(options.max_depth, 8);
        assert!(args.page.is_none());
    }

    #[test]
    fn decode_defaults_are_lenient() {
        let cli = Cli::try_parse_from(["tweetshape", "decode", "user"]).expect("parse");
        let Command::Decode(args) = cli.command else {
            panic!("expected decode");
        };
        assert!(args.input.is_none());
        assert_eq!(args.options().date_fallback, DateFallback::ZeroOnOptional);
        assert_eq!(args.options().max_depth, super::DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn clap_hint_names_the_subcommand() {
        let err = match Cli::try_parse_from(["tweetshape", "schema"]) {
            Ok(_) => panic!("missing record should fail"),
            Err(err) => err,
        };
        assert_eq!(clap_error_hint(&err), "Try `tweetshape schema --help`.");
    }

    #[test]
    fn read_input_reads_files() {
        let mut file = NamedTempFile::new().expect("tempfile");
        file.write_all(b"{\"id_str\":\"1\"}").expect("write");
        let path = file.path().to_path_buf();
        let bytes = super::read_input(Some(&path)).expect("read");
        assert_eq!(bytes, b"{\"id_str\":\"1\"}");
    }

    #[test]
    fn read_input_reports_missing_files_as_io() {
        let path = std::path::PathBuf::from("/nonexistent/tweetshape/input.json");
        let err = super::read_input(Some(&path)).expect_err("missing");
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
