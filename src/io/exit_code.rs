//! Process exit codes.

/// Exit code reported by every command, in text and JSON mode alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Ran and produced results
    Success = 0,
    /// Ran but nothing met the thresholds
    NotFound = 1,
    /// Unexpected failure
    GeneralError = 2,
    /// Invalid settings or arguments
    ConfigError = 3,
    /// A deck could not be read or parsed
    InputError = 4,
    /// Signals missing or incompatible between decks
    SignalError = 5,
}

impl ExitCode {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code.as_u8())
    }
}
