//! rc exit codes and how loudly each one is reported.
//!
//! The numeric values are defined by rc itself and must not change.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Known rc exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RcExitCode {
    Success,
    GeneralFailure,
    NetworkFailure,
    TimeoutFailure,
    NotIndexed,
    ConnectionFailure,
    ProtocolFailure,
    ArgumentParseError,
}

impl RcExitCode {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Success),
            32 => Some(Self::GeneralFailure),
            33 => Some(Self::NetworkFailure),
            34 => Some(Self::TimeoutFailure),
            35 => Some(Self::NotIndexed),
            36 => Some(Self::ConnectionFailure),
            37 => Some(Self::ProtocolFailure),
            38 => Some(Self::ArgumentParseError),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::GeneralFailure => 32,
            Self::NetworkFailure => 33,
            Self::TimeoutFailure => 34,
            Self::NotIndexed => 35,
            Self::ConnectionFailure => 36,
            Self::ProtocolFailure => 37,
            Self::ArgumentParseError => 38,
        }
    }
}

impl fmt::Display for RcExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Success => "success",
            Self::GeneralFailure => "general failure",
            Self::NetworkFailure => "network failure",
            Self::TimeoutFailure => "timeout failure",
            Self::NotIndexed => "not indexed",
            Self::ConnectionFailure => "connection failure",
            Self::ProtocolFailure => "protocol failure",
            Self::ArgumentParseError => "argument parse error",
        };
        f.write_str(name)
    }
}

/// Who gets to hear about a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Trace-level detail only.
    Silent,
    /// Diagnostic log only; the user is not interrupted.
    Logged,
    /// Modal notification before the action returns.
    UserFacing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub code: i32,
    pub kind: Option<RcExitCode>,
    pub severity: Severity,
    pub message: Option<&'static str>,
}

const NOT_INDEXED_MESSAGE: &str = "File is not indexed.\n\
    The compilation database is missing, outdated, or not watched by rdm.";

const CONNECTION_MESSAGE: &str = "Cannot reach the indexing daemon (rdm).\n\
    Are you sure it is running?";

const PROTOCOL_MESSAGE: &str = "Client/daemon protocol version mismatch.\n\
    This client does not support your RTags installation version.";

const UNKNOWN_MESSAGE: &str = "rc exited with an unknown code.";

pub fn classify(code: i32) -> Classification {
    let kind = RcExitCode::from_code(code);
    let (severity, message) = match kind {
        Some(RcExitCode::Success) => (Severity::Silent, None),
        Some(
            RcExitCode::GeneralFailure
            | RcExitCode::NetworkFailure
            | RcExitCode::TimeoutFailure
            | RcExitCode::ArgumentParseError,
        ) => (Severity::Logged, None),
        Some(RcExitCode::NotIndexed) => (Severity::UserFacing, Some(NOT_INDEXED_MESSAGE)),
        Some(RcExitCode::ConnectionFailure) => (Severity::UserFacing, Some(CONNECTION_MESSAGE)),
        Some(RcExitCode::ProtocolFailure) => (Severity::UserFacing, Some(PROTOCOL_MESSAGE)),
        None => (Severity::Logged, Some(UNKNOWN_MESSAGE)),
    };

    Classification {
        code,
        kind,
        severity,
        message,
    }
}
