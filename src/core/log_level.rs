//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derive(Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Panic,
    Fatal,
    /// A level outside the standard set, rendered as its raw numeric value
    Other(i32),
}

impl LogLevel {
    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Panic => "PANIC",
            LogLevel::Fatal => "FATAL",
            LogLevel::Other(_) => "OTHER",
        }
    }

    /// Append the one-letter entry tag for this level, or the raw decimal
    /// value for levels outside the standard set.
    pub(crate) fn append_tag(&self, out: &mut Vec<u8>) {
        match self {
            LogLevel::Debug => out.push(b'D'),
            LogLevel::Info => out.push(b'I'),
            LogLevel::Warn => out.push(b'W'),
            LogLevel::Error => out.push(b'E'),
            LogLevel::Panic => out.push(b'P'),
            LogLevel::Fatal => out.push(b'F'),
            LogLevel::Other(raw) => out.extend_from_slice(raw.to_string().as_bytes()),
        }
    }

    /// Default terminal color for this level, `None` for nonstandard levels
    pub fn color_code(&self) -> Option<colored::Color> {
        use colored::Color::*;
        match self {
            LogLevel::Debug | LogLevel::Info => Some(Green),
            LogLevel::Warn => Some(Yellow),
            LogLevel::Error | LogLevel::Panic | LogLevel::Fatal => Some(Red),
            LogLevel::Other(_) => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Other(raw) => write!(f, "{}", raw),
            _ => write!(f, "{}", self.to_str()),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            "PANIC" => Ok(LogLevel::Panic),
            "FATAL" => Ok(LogLevel::Fatal),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}
