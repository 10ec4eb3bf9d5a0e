//! Purpose: Hold top-level CLI command dispatch for `tweetshape`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: stdout carries only command output; notices and errors go to stderr.

use super::*;
use tweetshape::api::{
    Decoded, catalog, decode_page_reported, encode_page, find, parse_payload,
};

/// Pseudo record name for pages whose elements are plain id strings.
const ID_RECORD: &str = "id";

pub(super) fn dispatch_command(command: Command, color_mode: ColorMode) -> Result<RunOutcome, Error> {
    match command {
        Command::Decode(args) => {
            let bytes = read_input(args.input.as_ref())?;
            let payload = parse_payload(&bytes, "decode input")?;
            let options = args.options();

            let (value, absorbed) = if args.record == ID_RECORD {
                let Some(key) = args.page.as_deref() else {
                    return Err(Error::new(ErrorKind::Usage)
                        .with_message("`id` can only be decoded as a page")
                        .with_hint("Add --page <KEY>, for example `--page ids`."));
                };
                let Decoded { value, absorbed } =
                    decode_page_reported::<String>(&payload, key, &options)?;
                (encode_page::<String>(&value, key)?, absorbed)
            } else {
                let entry = find(&args.record).ok_or_else(|| unknown_record_error(&args.record))?;
                let canonical = match args.page.as_deref() {
                    Some(key) => (entry.canonicalize_page)(&payload, key, &options)?,
                    None => (entry.canonicalize)(&payload, &options)?,
                };
                (canonical.value, canonical.absorbed)
            };

            if !absorbed.is_empty() {
                let time = notice_time_now();
                for failure in &absorbed {
                    emit_notice(&Notice::from_absorbed(failure, "decode", time.clone()), color_mode);
                }
            }
            emit_json(&value, args.compact, color_mode);
            Ok(RunOutcome::ok())
        }
        Command::Schema { record } => {
            let entry = find(&record).ok_or_else(|| unknown_record_error(&record))?;
            let schema = (entry.schema)()?;
            let fields = serde_json::to_value(schema.describe()).map_err(|err| {
                Error::new(ErrorKind::Internal)
                    .with_message("failed to serialize field table")
                    .with_source(err)
            })?;
            emit_json(
                &json!({ "name": entry.name, "record": schema.name(), "fields": fields }),
                false,
                color_mode,
            );
            Ok(RunOutcome::ok())
        }
        Command::Types => {
            let mut types = catalog()
                .iter()
                .map(|entry| json!({ "name": entry.name, "record": entry.record }))
                .collect::<Vec<_>>();
            types.push(json!({ "name": ID_RECORD, "record": "String", "page_only": true }));
            emit_json(&json!({ "types": types }), false, color_mode);
            Ok(RunOutcome::ok())
        }
        Command::Check => {
            let mut defects = Vec::new();
            for entry in catalog() {
                if let Err(err) = (entry.schema)() {
                    defects.push(error_json(&err));
                }
            }
            let checked = catalog().len();
            emit_json(
                &json!({ "checked": checked, "defects": defects }),
                false,
                color_mode,
            );
            let exit_code = if defects.is_empty() {
                0
            } else {
                to_exit_code(ErrorKind::SchemaDefinition)
            };
            Ok(RunOutcome::with_code(exit_code))
        }
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "tweetshape", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
    }
}

