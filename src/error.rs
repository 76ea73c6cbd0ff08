//! Error types for snmp-tables.
//!
//! Every failure surfaces as one [`Error`] value carrying an [`ErrorKind`]
//! plus whatever the agent reported: the raw error code, the 1-based error
//! index, and the varlist that was in flight. Transports never raise errors
//! of their own kind; they hand back a [`Fault`] and the session classifies
//! it with [`Error::from_fault`].

use crate::varbind::VarBind;

/// Result type alias using the library's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Error index the underlying engine reports when a request timed out.
///
/// A fault carrying this index is a timeout regardless of its error code.
pub const TIMEOUT_ERROR_INDEX: i32 = -24;

/// Semantic classification of an error.
///
/// Codes 1 through 18 follow the SNMP error-status table (RFC 3416).
/// `Timeout` and `Generic` cover transport-level failures, and the last
/// three kinds are raised by this crate without involving the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The response would not fit in a single message.
    TooBig,
    /// The request identified an unknown variable.
    NoSuchName,
    /// A set carried a syntax or value error.
    BadValue,
    /// The variable is not writable under the community profile.
    ReadOnly,
    /// Unclassified agent error.
    GenErr,
    /// The variable is not accessible.
    NoAccess,
    /// The value's type is inconsistent with the variable.
    WrongType,
    /// The value's length is inconsistent with the variable.
    WrongLength,
    /// The value's ASN.1 encoding does not match its tag.
    WrongEncoding,
    /// The value cannot be assigned to the variable.
    WrongValue,
    /// The variable does not exist and cannot be created.
    NoCreation,
    /// The value conflicts with other managed objects.
    InconsistentValue,
    /// Resources needed for the assignment are unavailable.
    ResourceUnavailable,
    /// No validation error, but no variable was updated.
    CommitFailed,
    /// Some variables were updated and could not be rolled back.
    UndoFailed,
    /// Authorization failure.
    Authorization,
    /// The variable exists but the agent cannot modify it.
    NotWritable,
    /// The instance name conflicts with other managed objects.
    InconsistentName,
    /// The request timed out.
    Timeout,
    /// Any other failure reported by the transport.
    Generic,
    /// The request was rejected before reaching the transport.
    InvalidRequest,
    /// A walk result could not be reshaped into a rectangular table.
    MalformedTable,
    /// The agent returned a continuation cursor that did not advance.
    NonIncreasingOid,
}

impl ErrorKind {
    /// Map an agent error-status code to its kind.
    ///
    /// Returns `None` for codes outside the table (including 0, noError).
    pub fn from_code(code: i32) -> Option<Self> {
        let kind = match code {
            1 => Self::TooBig,
            2 => Self::NoSuchName,
            3 => Self::BadValue,
            4 => Self::ReadOnly,
            5 => Self::GenErr,
            6 => Self::NoAccess,
            7 => Self::WrongType,
            8 => Self::WrongLength,
            9 => Self::WrongEncoding,
            10 => Self::WrongValue,
            11 => Self::NoCreation,
            12 => Self::InconsistentValue,
            13 => Self::ResourceUnavailable,
            14 => Self::CommitFailed,
            15 => Self::UndoFailed,
            16 => Self::Authorization,
            17 => Self::NotWritable,
            18 => Self::InconsistentName,
            _ => return None,
        };
        Some(kind)
    }

    /// The agent error-status code for this kind, if it has one.
    pub fn code(&self) -> Option<i32> {
        let code = match self {
            Self::TooBig => 1,
            Self::NoSuchName => 2,
            Self::BadValue => 3,
            Self::ReadOnly => 4,
            Self::GenErr => 5,
            Self::NoAccess => 6,
            Self::WrongType => 7,
            Self::WrongLength => 8,
            Self::WrongEncoding => 9,
            Self::WrongValue => 10,
            Self::NoCreation => 11,
            Self::InconsistentValue => 12,
            Self::ResourceUnavailable => 13,
            Self::CommitFailed => 14,
            Self::UndoFailed => 15,
            Self::Authorization => 16,
            Self::NotWritable => 17,
            Self::InconsistentName => 18,
            Self::Timeout
            | Self::Generic
            | Self::InvalidRequest
            | Self::MalformedTable
            | Self::NonIncreasingOid => return None,
        };
        Some(code)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooBig => write!(f, "tooBig"),
            Self::NoSuchName => write!(f, "noSuchName"),
            Self::BadValue => write!(f, "badValue"),
            Self::ReadOnly => write!(f, "readOnly"),
            Self::GenErr => write!(f, "genErr"),
            Self::NoAccess => write!(f, "noAccess"),
            Self::WrongType => write!(f, "wrongType"),
            Self::WrongLength => write!(f, "wrongLength"),
            Self::WrongEncoding => write!(f, "wrongEncoding"),
            Self::WrongValue => write!(f, "wrongValue"),
            Self::NoCreation => write!(f, "noCreation"),
            Self::InconsistentValue => write!(f, "inconsistentValue"),
            Self::ResourceUnavailable => write!(f, "resourceUnavailable"),
            Self::CommitFailed => write!(f, "commitFailed"),
            Self::UndoFailed => write!(f, "undoFailed"),
            Self::Authorization => write!(f, "authorizationError"),
            Self::NotWritable => write!(f, "notWritable"),
            Self::InconsistentName => write!(f, "inconsistentName"),
            Self::Timeout => write!(f, "timeout"),
            Self::Generic => write!(f, "generic"),
            Self::InvalidRequest => write!(f, "invalidRequest"),
            Self::MalformedTable => write!(f, "malformedTable"),
            Self::NonIncreasingOid => write!(f, "nonIncreasingOid"),
        }
    }
}

/// Structured failure reported by a transport for one call.
///
/// This is the engine's "last error": a message plus the raw error code and
/// error index, both optional because not every failure comes from an agent
/// response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    /// Human-readable description from the engine.
    pub message: String,
    /// Agent error-status code, if any.
    pub code: Option<i32>,
    /// Error index, if any. [`TIMEOUT_ERROR_INDEX`] marks a timeout.
    pub index: Option<i32>,
}

impl Fault {
    /// Create a fault with only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            index: None,
        }
    }

    /// Create a fault as an agent error response would report it.
    pub fn status(message: impl Into<String>, code: i32, index: i32) -> Self {
        Self {
            message: message.into(),
            code: Some(code),
            index: Some(index),
        }
    }

    /// Create a timeout fault.
    pub fn timeout() -> Self {
        Self {
            message: "Timeout".into(),
            code: None,
            index: Some(TIMEOUT_ERROR_INDEX),
        }
    }
}

/// Library error type.
#[derive(Debug, Clone, thiserror::Error)]
#[error(
    "{message}{}{}",
    code.map(|c| format!(" Error Number: {}", c)).unwrap_or_default(),
    index.map(|i| format!(" Error Index: {}", i)).unwrap_or_default()
)]
pub struct Error {
    kind: ErrorKind,
    message: Box<str>,
    code: Option<i32>,
    index: Option<i32>,
    varlist: Option<Vec<VarBind>>,
}

impl Error {
    /// Create an error of the given kind with no agent details.
    pub fn new(kind: ErrorKind, message: impl Into<Box<str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            code: None,
            index: None,
            varlist: None,
        }
    }

    /// Classify a transport fault.
    ///
    /// A timeout index takes priority over the code; a code outside the
    /// agent table (or no code at all) yields [`ErrorKind::Generic`]. The
    /// raw message, code and index are preserved either way.
    pub fn from_fault(fault: Fault, varlist: Option<Vec<VarBind>>) -> Self {
        let kind = if fault.index == Some(TIMEOUT_ERROR_INDEX) {
            ErrorKind::Timeout
        } else {
            fault
                .code
                .and_then(ErrorKind::from_code)
                .unwrap_or(ErrorKind::Generic)
        };
        Self {
            kind,
            message: fault.message.into(),
            code: fault.code,
            index: fault.index,
            varlist,
        }
    }

    /// Attach the 1-based index of the offending varbind.
    pub fn with_index(mut self, index: i32) -> Self {
        self.index = Some(index);
        self
    }

    /// The error classification.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The message reported by the engine (or by this crate).
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The raw agent error code, if any.
    pub fn code(&self) -> Option<i32> {
        self.code
    }

    /// The error index, if any.
    pub fn index(&self) -> Option<i32> {
        self.index
    }

    /// The varlist that triggered the fault, if recorded.
    pub fn varlist(&self) -> Option<&[VarBind]> {
        self.varlist.as_deref()
    }

    /// Whether this error is a timeout.
    pub fn is_timeout(&self) -> bool {
        self.kind == ErrorKind::Timeout
    }
}
