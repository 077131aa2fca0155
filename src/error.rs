//! Application error type.
//!
//! Every fallible path in the crate returns `Result<_, AppError>`. Errors are
//! terminal for a single run; the binary prints the message and exits with the
//! attached code.
//!
//! Exit code conventions:
//!
//! - `2` — bad input or configuration (missing CSV columns, unreadable files,
//!   non-positive sigma, empty keyword set, bad display-order list)
//! - `4` — network failures while fetching a URL source
//! - `5` — chart rendering / PNG encoding failures
//!
//! An empty result (no observation matches the keyword set) is deliberately
//! *not* an error; the pipeline completes and the run summary carries a
//! warning line instead.

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
