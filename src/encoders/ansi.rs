//! ANSI color-decorated encoder
//!
//! Wraps the text encoder and brackets each rendered line in the escape
//! sequence for the entry's level. Field formatting and entry framing are
//! delegated to the wrapped encoder, so both variants stay byte-identical
//! between the escape sequences.

use crate::core::encoder::{Encoder, LogMarshaler};
use crate::core::error::{EncoderError, Result};
use crate::core::log_level::LogLevel;
use crate::core::pool::{Pool, RenderBuf};
use chrono::{DateTime, Utc};
use colored::Color;
use std::fmt;
use std::io;

use super::text::TextEncoder;
use super::write_checked;

/// Escape sequence restoring the terminal's default attributes
pub const RESET_SEQUENCE: &str = "\x1b[0m";

/// Foreground escape sequence for a terminal color
pub fn color_sequence(color: Color) -> String {
    format!("\x1b[{}m", color.to_fg_str())
}

fn default_color(level: LogLevel) -> String {
    level.color_code().map(color_sequence).unwrap_or_default()
}

static ANSI_POOL: Pool<AnsiEncoder> = Pool::new();

/// Text encoder variant that color-codes entries by severity
///
/// Defaults: green for debug and info, yellow for warn, red for error,
/// panic, and fatal. Levels outside the standard set render without color
/// and without a reset sequence.
pub struct AnsiEncoder {
    text: TextEncoder,
    debug_color: String,
    info_color: String,
    warn_color: String,
    error_color: String,
    panic_color: String,
    fatal_color: String,
}

impl AnsiEncoder {
    /// Acquire an encoder from the pool, reset to an empty buffer, default
    /// settings, and the default palette
    pub fn new() -> Self {
        let mut enc = ANSI_POOL.get_or_else(AnsiEncoder::fresh);
        enc.reset();
        enc
    }

    /// Return this encoder to the pool
    pub fn release(self) {
        ANSI_POOL.put(self);
    }

    /// Override the timestamp layout (strftime syntax, rendered against UTC)
    #[must_use]
    pub fn with_time_format(mut self, layout: impl Into<String>) -> Self {
        self.text = self.text.with_time_format(layout);
        self
    }

    /// Omit timestamps from rendered entries
    #[must_use]
    pub fn with_no_time(mut self) -> Self {
        self.text = self.text.with_no_time();
        self
    }

    /// Omit the logger name from rendered entries
    #[must_use]
    pub fn with_no_name(mut self) -> Self {
        self.text = self.text.with_no_name();
        self
    }

    /// Override the escape sequence used for debug entries
    #[must_use]
    pub fn with_debug_color(mut self, sequence: impl Into<String>) -> Self {
        self.debug_color = sequence.into();
        self
    }

    /// Override the escape sequence used for info entries
    #[must_use]
    pub fn with_info_color(mut self, sequence: impl Into<String>) -> Self {
        self.info_color = sequence.into();
        self
    }

    /// Override the escape sequence used for warn entries
    #[must_use]
    pub fn with_warn_color(mut self, sequence: impl Into<String>) -> Self {
        self.warn_color = sequence.into();
        self
    }

    /// Override the escape sequence used for error entries
    #[must_use]
    pub fn with_error_color(mut self, sequence: impl Into<String>) -> Self {
        self.error_color = sequence.into();
        self
    }

    /// Override the escape sequence used for panic entries
    #[must_use]
    pub fn with_panic_color(mut self, sequence: impl Into<String>) -> Self {
        self.panic_color = sequence.into();
        self
    }

    /// Override the escape sequence used for fatal entries
    #[must_use]
    pub fn with_fatal_color(mut self, sequence: impl Into<String>) -> Self {
        self.fatal_color = sequence.into();
        self
    }

    fn fresh() -> Self {
        Self {
            text: TextEncoder::fresh(),
            debug_color: String::new(),
            info_color: String::new(),
            warn_color: String::new(),
            error_color: String::new(),
            panic_color: String::new(),
            fatal_color: String::new(),
        }
    }

    fn reset(&mut self) {
        self.text.reset();
        self.debug_color = default_color(LogLevel::Debug);
        self.info_color = default_color(LogLevel::Info);
        self.warn_color = default_color(LogLevel::Warn);
        self.error_color = default_color(LogLevel::Error);
        self.panic_color = default_color(LogLevel::Panic);
        self.fatal_color = default_color(LogLevel::Fatal);
    }

    fn level_color(&self, level: LogLevel) -> Option<&str> {
        match level {
            LogLevel::Debug => Some(self.debug_color.as_str()),
            LogLevel::Info => Some(self.info_color.as_str()),
            LogLevel::Warn => Some(self.warn_color.as_str()),
            LogLevel::Error => Some(self.error_color.as_str()),
            LogLevel::Panic => Some(self.panic_color.as_str()),
            LogLevel::Fatal => Some(self.fatal_color.as_str()),
            LogLevel::Other(_) => None,
        }
    }
}

impl Default for AnsiEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder for AnsiEncoder {
    fn add_string(&mut self, key: &str, value: &str) {
        self.text.add_string(key, value);
    }

    fn add_bool(&mut self, key: &str, value: bool) {
        self.text.add_bool(key, value);
    }

    fn add_byte(&mut self, key: &str, value: u8) {
        self.text.add_byte(key, value);
    }

    fn add_bytes(&mut self, key: &str, value: &[u8]) {
        self.text.add_bytes(key, value);
    }

    fn add_i64(&mut self, key: &str, value: i64) {
        self.text.add_i64(key, value);
    }

    fn add_u64(&mut self, key: &str, value: u64) {
        self.text.add_u64(key, value);
    }

    fn add_f32(&mut self, key: &str, value: f32) {
        self.text.add_f32(key, value);
    }

    fn add_f64(&mut self, key: &str, value: f64) {
        self.text.add_f64(key, value);
    }

    fn add_marshaler(&mut self, key: &str, value: &dyn LogMarshaler) -> Result<()> {
        self.text.add_marshaler(key, value)
    }

    fn add_object(&mut self, key: &str, value: &dyn fmt::Debug) {
        self.text.add_object(key, value);
    }

    fn buffer(&self) -> &[u8] {
        self.text.buffer()
    }

    fn clone_encoder(&self) -> Box<dyn Encoder> {
        let mut clone = ANSI_POOL.get_or_else(AnsiEncoder::fresh);
        clone.text.copy_from(&self.text);
        clone.debug_color.clone_from(&self.debug_color);
        clone.info_color.clone_from(&self.info_color);
        clone.warn_color.clone_from(&self.warn_color);
        clone.error_color.clone_from(&self.error_color);
        clone.panic_color.clone_from(&self.panic_color);
        clone.fatal_color.clone_from(&self.fatal_color);
        Box::new(clone)
    }

    fn write_entry(
        &self,
        sink: Option<&mut dyn io::Write>,
        name: &str,
        message: &str,
        level: LogLevel,
        time: DateTime<Utc>,
    ) -> Result<()> {
        let Some(sink) = sink else {
            return Err(EncoderError::NilSink);
        };

        let mut out = RenderBuf::acquire();
        let color = self.level_color(level);
        if let Some(color) = color {
            out.extend_from_slice(color.as_bytes());
        }
        self.text.append_entry(&mut out, name, message, level, time);
        if color.is_some() {
            out.extend_from_slice(RESET_SEQUENCE.as_bytes());
        }
        out.push(b'\n');
        write_checked(sink, &out)
    }

    fn free(self: Box<Self>) {
        (*self).release();
    }
}
