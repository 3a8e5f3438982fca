use std::error::Error;
use std::fmt::{Display, Formatter};

pub type MieResult<T> = Result<T, MieError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MieErrorCategory {
    Success,
    InputValidationError,
    IoSystemError,
    /// Reserved: the recurrences hand non-finite values back instead of failing, so no
    /// code path raises this today. It keeps exit code 4 out of the other categories.
    ComputationError,
    InternalError,
}

impl MieErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::InputValidationError => 2,
            Self::IoSystemError => 3,
            Self::ComputationError => 4,
            Self::InternalError => 5,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::InputValidationError => "InputValidationError",
            Self::IoSystemError => "IoSystemError",
            Self::ComputationError => "ComputationError",
            Self::InternalError => "InternalError",
        }
    }

    pub const fn is_fatal(self) -> bool {
        !matches!(self, Self::Success)
    }
}

impl Display for MieErrorCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// Categorized failure with a stable dotted code (`INPUT.RADIUS`, `IO.CONFIG_READ`, ...).
///
/// Only malformed input and I/O produce errors. Numerical degeneracies inside the
/// recurrences are not intercepted and surface as non-finite table entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MieError {
    category: MieErrorCategory,
    code: &'static str,
    message: String,
}

impl MieError {
    pub fn new(category: MieErrorCategory, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            category,
            code,
            message: message.into(),
        }
    }

    pub fn input_validation(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(MieErrorCategory::InputValidationError, code, message)
    }

    pub fn io_system(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(MieErrorCategory::IoSystemError, code, message)
    }

    pub fn internal(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(MieErrorCategory::InternalError, code, message)
    }

    pub const fn category(&self) -> MieErrorCategory {
        self.category
    }

    pub const fn code(&self) -> &'static str {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        let severity = if self.category.is_fatal() {
            "ERROR"
        } else {
            "INFO"
        };
        format!("{}: [{}] {}", severity, self.code, self.message)
    }

    pub fn fatal_exit_line(&self) -> Option<String> {
        self.category
            .is_fatal()
            .then(|| format!("FATAL EXIT CODE: {}", self.exit_code()))
    }
}

impl Display for MieError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.category, self.code, self.message)
    }
}

impl Error for MieError {}
