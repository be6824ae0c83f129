//! Exit codes following sysexits.h conventions.
//!
//! These codes let scripts and CI tell a failing test apart from a broken
//! invocation or an unreadable corpus.

use seedfuzz_core::HarnessError;

/// Successful execution, every selected test passed.
pub const SUCCESS: i32 = 0;

/// At least one test or trial failed (also the catch-all).
pub const TEST_FAILED: i32 = 1;

/// Command line usage error (unknown test, bad flag values).
/// Maps to EX_USAGE from sysexits.h.
pub const USAGE_ERROR: i32 = 64;

/// Malformed corpus entry.
/// Maps to EX_DATAERR from sysexits.h.
pub const DATA_ERROR: i32 = 65;

/// Cannot open input file.
/// Maps to EX_NOINPUT from sysexits.h.
pub const INPUT_ERROR: i32 = 66;

/// I/O error (cannot write a corpus entry).
/// Maps to EX_IOERR from sysexits.h.
pub const IO_ERROR: i32 = 74;

/// Represents an exit code with optional error context.
pub struct ExitCode {
    pub code: i32,
    pub message: Option<String>,
}

impl ExitCode {
    pub const fn success() -> Self {
        Self {
            code: SUCCESS,
            message: None,
        }
    }

    pub const fn tests_failed() -> Self {
        Self {
            code: TEST_FAILED,
            message: None,
        }
    }

    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        let message = format!("{err:#}");

        // Classify by the first recognisable error in the chain
        let code = err
            .chain()
            .find_map(|cause| {
                if let Some(harness) = cause.downcast_ref::<HarnessError>() {
                    Some(classify_harness(harness))
                } else {
                    cause
                        .downcast_ref::<std::io::Error>()
                        .map(classify_io)
                }
            })
            .unwrap_or(TEST_FAILED);

        Self {
            code,
            message: Some(message),
        }
    }
}

fn classify_harness(err: &HarnessError) -> i32 {
    match err {
        HarnessError::DuplicateTest(_)
        | HarnessError::UnknownTest(_)
        | HarnessError::NotAFuzzTest(_)
        | HarnessError::InvalidConfig(_) => USAGE_ERROR,
        HarnessError::CorpusFormat(_) => DATA_ERROR,
        HarnessError::CorpusIo { source, .. } => classify_io(source),
    }
}

fn classify_io(err: &std::io::Error) -> i32 {
    match err.kind() {
        std::io::ErrorKind::NotFound => INPUT_ERROR,
        _ => IO_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_harness_errors_map_to_codes() {
        let unknown = anyhow::Error::new(HarnessError::UnknownTest("x".into()));
        assert_eq!(ExitCode::from_anyhow(&unknown).code, USAGE_ERROR);

        let format = anyhow::Error::new(HarnessError::CorpusFormat("bad".into()));
        assert_eq!(ExitCode::from_anyhow(&format).code, DATA_ERROR);

        let missing = anyhow::Error::new(HarnessError::CorpusIo {
            path: "crash.json".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        });
        assert_eq!(ExitCode::from_anyhow(&missing).code, INPUT_ERROR);

        let denied = anyhow::Error::new(HarnessError::CorpusIo {
            path: "out".into(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        });
        assert_eq!(ExitCode::from_anyhow(&denied).code, IO_ERROR);
    }

    #[test]
    fn test_context_is_preserved_in_message() {
        let err = Err::<(), _>(HarnessError::NotAFuzzTest("pkg::value".into()))
            .context("Cannot fuzz")
            .unwrap_err();
        let exit = ExitCode::from_anyhow(&err);

        assert_eq!(exit.code, USAGE_ERROR);
        let message = exit.message.unwrap();
        assert!(message.contains("Cannot fuzz"));
        assert!(message.contains("pkg::value"));
    }

    #[test]
    fn test_unclassified_error_is_general_failure() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(ExitCode::from_anyhow(&err).code, TEST_FAILED);
    }
}
