use std::ffi::OsString;

use clap::{error::ErrorKind, Parser};

use crate::error::ScriptError;

/// Parse the process arguments, turning clap errors into [`ScriptError::Usage`] so the
/// script exits 1 with its own usage block. `--help` and `--version` behave as usual.
pub fn parse_args<T: Parser>(usage: &'static str, example: &'static str) -> Result<T, ScriptError> {
    parse_args_from(std::env::args_os(), usage, example)
}

pub fn parse_args_from<T, I, A>(args: I, usage: &'static str, example: &'static str) -> Result<T, ScriptError>
where
    T: Parser,
    I: IntoIterator<Item = A>,
    A: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    match T::try_parse_from(&args) {
        Ok(parsed) => Ok(parsed),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let given: Vec<String> = args.iter().skip(1).map(|a| a.to_string_lossy().into_owned()).collect();
            let reason = e.to_string();
            let reason = reason.lines().next().unwrap_or_default().trim_start_matches("error: ");
            Err(ScriptError::Usage {
                message: format!("Invalid arguments: {} ({reason})", given.join(" ")),
                usage,
                example,
            })
        }
    }
}
