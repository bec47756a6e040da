//! Encoder implementations

pub mod ansi;
pub mod text;

pub use ansi::AnsiEncoder;
pub use text::TextEncoder;

use crate::core::error::{EncoderError, Result};
use std::io;

/// Emit the assembled entry bytes in exactly one write and verify the count
pub(crate) fn write_checked(sink: &mut dyn io::Write, bytes: &[u8]) -> Result<()> {
    let expected = bytes.len();
    let written = sink.write(bytes)?;
    if written != expected {
        return Err(EncoderError::incomplete_write(written, expected));
    }
    Ok(())
}
