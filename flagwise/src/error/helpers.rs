//! Helpers for classifying tokenizer errors.

use clap::error::ErrorKind;

use super::FlagError;

/// Returns `true` when `err` wraps a clap `--help` or `--version` request.
///
/// Clap surfaces these through the error channel, so callers that tokenise
/// with [`crate::RawSourceMap::parse_from`] should check this before treating
/// the error as a failure and delegate to [`clap::Error::exit`] instead.
#[must_use]
pub fn is_display_request(err: &FlagError) -> bool {
    match err {
        FlagError::CliParsing(clap_err) => matches!(
            clap_err.kind(),
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
        ),
        _ => false,
    }
}
