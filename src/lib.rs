//! # Line Encoder
//!
//! A pooled, line-oriented log entry encoder: typed key=value fields plus a
//! level, timestamp, logger name, and message become one human-readable text
//! line, optionally ANSI color-coded by severity, written atomically to any
//! output sink.
//!
//! ## Features
//!
//! - **Low Overhead**: Pooled encoder instances and render buffers, one
//!   growable byte buffer per encoder
//! - **Typed Fields**: Strings, booleans, hex-rendered bytes, integers, and
//!   floats with exact round-trip formatting
//! - **Nested Objects**: Values serialize their own fields through the
//!   marshaler contract
//! - **Color Output**: Per-level ANSI escapes via the decorating variant
//!
//! ## Example
//!
//! ```
//! use line_encoder::prelude::*;
//! use chrono::Utc;
//!
//! let mut enc = TextEncoder::new();
//! enc.add_string("peer", "10.0.0.7");
//! enc.add_u64("bytes", 512);
//!
//! let mut stdout = std::io::stdout();
//! enc.write_entry(Some(&mut stdout), "ingest", "chunk stored", LogLevel::Info, Utc::now())
//!     .unwrap();
//! enc.release();
//! ```

pub mod core;
pub mod encoders;

pub mod prelude {
    pub use crate::core::{append_hex, Encoder, EncoderError, LogLevel, LogMarshaler, Result};
    pub use crate::encoders::ansi::{color_sequence, RESET_SEQUENCE};
    pub use crate::encoders::text::DEFAULT_TIME_FORMAT;
    pub use crate::encoders::{AnsiEncoder, TextEncoder};
}

pub use crate::core::{append_hex, Encoder, EncoderError, LogLevel, LogMarshaler, Result};
pub use crate::encoders::ansi::{color_sequence, RESET_SEQUENCE};
pub use crate::encoders::text::DEFAULT_TIME_FORMAT;
pub use crate::encoders::{AnsiEncoder, TextEncoder};
