use anyhow::Error;
use clientele_config::ConfigError;
use clientele_core::time::TimeParseError;
use clientele_core::{CoreError, Violation};
use clientele_store::error::{StoreError, StoreErrorKind};
use std::error::Error as StdError;
use std::process::ExitCode;
use thiserror::Error as ThisError;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_NOT_FOUND: u8 = 2;
pub const EXIT_INVALID_INPUT: u8 = 3;

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
}

pub fn invalid_input(message: impl Into<String>) -> Error {
    CliError::InvalidInput(message.into()).into()
}

pub fn not_found(message: impl Into<String>) -> Error {
    CliError::NotFound(message.into()).into()
}

/// Validation failures print one line per violated rule.
pub fn report_error(err: &Error, verbose: bool) {
    if let Some(violations) = err.chain().find_map(violations_of) {
        eprintln!("error: validation failed");
        for violation in violations {
            eprintln!("  - {violation}");
        }
    } else if verbose {
        eprintln!("error: {err:#}");
    } else {
        eprintln!("error: {err}");
    }
}

/// The first cause in the chain with a known classification wins.
pub fn exit_code_for(err: &Error) -> ExitCode {
    let code = err.chain().find_map(classify).unwrap_or(EXIT_FAILURE);
    ExitCode::from(code)
}

fn violations_of<'e>(cause: &'e (dyn StdError + 'static)) -> Option<&'e [Violation]> {
    let violations = if let Some(err) = cause.downcast_ref::<CoreError>() {
        err.violations()
    } else if let Some(err) = cause.downcast_ref::<StoreError>() {
        err.violations()
    } else {
        return None;
    };
    (!violations.is_empty()).then_some(violations)
}

fn classify(cause: &(dyn StdError + 'static)) -> Option<u8> {
    if let Some(err) = cause.downcast_ref::<CliError>() {
        return Some(match err {
            CliError::InvalidInput(_) => EXIT_INVALID_INPUT,
            CliError::NotFound(_) => EXIT_NOT_FOUND,
        });
    }
    if let Some(err) = cause.downcast_ref::<StoreError>() {
        return Some(store_exit_code(err));
    }
    if let Some(err) = cause.downcast_ref::<ConfigError>() {
        return Some(config_exit_code(err));
    }
    if cause.is::<CoreError>() || cause.is::<TimeParseError>() {
        return Some(EXIT_INVALID_INPUT);
    }
    None
}

fn store_exit_code(err: &StoreError) -> u8 {
    match err.kind() {
        StoreErrorKind::NotFound => EXIT_NOT_FOUND,
        StoreErrorKind::Core
        | StoreErrorKind::InvalidId
        | StoreErrorKind::InvalidDataPath
        | StoreErrorKind::InvalidBackupPath => EXIT_INVALID_INPUT,
        StoreErrorKind::Io
        | StoreErrorKind::Sql
        | StoreErrorKind::MissingHomeDir
        | StoreErrorKind::InvalidEnum
        | StoreErrorKind::InvalidRow
        | StoreErrorKind::Migration => EXIT_FAILURE,
    }
}

fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::MissingHomeDir => EXIT_FAILURE,
        ConfigError::InvalidConfigPath(_)
        | ConfigError::MissingConfigFile(_)
        | ConfigError::InsecurePermissions(_)
        | ConfigError::InvalidUpcomingDays(_)
        | ConfigError::Read { .. }
        | ConfigError::Parse { .. } => EXIT_INVALID_INPUT,
    }
}

#[cfg(test)]
mod tests {
    use super::{classify, not_found, EXIT_INVALID_INPUT, EXIT_NOT_FOUND};
    use clientele_core::{CoreError, Violation};
    use clientele_store::error::StoreError;

    #[test]
    fn classifies_wrapped_errors() {
        let err = anyhow::Error::from(StoreError::Core(CoreError::Validation(vec![
            Violation::NameRequired,
        ])))
        .context("add customer");
        assert_eq!(err.chain().find_map(classify), Some(EXIT_INVALID_INPUT));

        let err = not_found("customer").context("show customer");
        assert_eq!(err.chain().find_map(classify), Some(EXIT_NOT_FOUND));
    }
}
