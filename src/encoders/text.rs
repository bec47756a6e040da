//! Line-oriented text encoder
//!
//! Renders one human-readable line per entry: a bracketed level tag, an
//! optional timestamp, an optional logger name, the message, and the
//! accumulated `key=value` fields, separated by single spaces.

use crate::core::encoder::{Encoder, LogMarshaler};
use crate::core::error::{EncoderError, Result};
use crate::core::hex::append_hex;
use crate::core::log_level::LogLevel;
use crate::core::pool::{Pool, RenderBuf, INITIAL_BUFFER_CAPACITY};
use chrono::{DateTime, Utc};
use std::fmt;
use std::io;

use super::write_checked;

/// Default timestamp layout: RFC 3339 at seconds precision for UTC instants
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

static TEXT_POOL: Pool<TextEncoder> = Pool::new();

/// Plain text encoder with pooled acquisition
///
/// # Examples
///
/// ```
/// use line_encoder::prelude::*;
/// use chrono::{TimeZone, Utc};
///
/// let mut enc = TextEncoder::new();
/// enc.add_string("user", "alice");
/// enc.add_i64("attempt", 3);
///
/// let mut out = Vec::new();
/// let time = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
/// enc.write_entry(Some(&mut out), "auth", "login ok", LogLevel::Info, time)
///     .unwrap();
/// assert_eq!(
///     out,
///     b"[I] 2021-01-01T00:00:00Z auth login ok user=alice attempt=3\n"
/// );
/// enc.release();
/// ```
pub struct TextEncoder {
    bytes: Vec<u8>,
    time_format: String,
    no_name: bool,
}

impl TextEncoder {
    /// Acquire an encoder from the pool, reset to an empty buffer and
    /// default settings
    pub fn new() -> Self {
        let mut enc = TEXT_POOL.get_or_else(TextEncoder::fresh);
        enc.reset();
        enc
    }

    /// Return this encoder to the pool
    pub fn release(self) {
        TEXT_POOL.put(self);
    }

    /// Override the timestamp layout (strftime syntax, rendered against UTC)
    #[must_use]
    pub fn with_time_format(mut self, layout: impl Into<String>) -> Self {
        self.time_format = layout.into();
        self
    }

    /// Omit timestamps from rendered entries
    #[must_use]
    pub fn with_no_time(self) -> Self {
        self.with_time_format("")
    }

    /// Omit the logger name from rendered entries
    #[must_use]
    pub fn with_no_name(mut self) -> Self {
        self.no_name = true;
        self
    }

    pub(crate) fn fresh() -> Self {
        Self {
            bytes: Vec::with_capacity(INITIAL_BUFFER_CAPACITY),
            time_format: String::new(),
            no_name: false,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.bytes.clear();
        self.time_format.clear();
        self.time_format.push_str(DEFAULT_TIME_FORMAT);
        self.no_name = false;
    }

    /// Overwrite this encoder's buffer and settings with a copy of another's
    pub(crate) fn copy_from(&mut self, source: &TextEncoder) {
        self.bytes.clear();
        self.bytes.extend_from_slice(&source.bytes);
        self.time_format.clone_from(&source.time_format);
        self.no_name = source.no_name;
    }

    /// Append the level/time/name/message/field segments of one entry,
    /// without the trailing newline
    pub(crate) fn append_entry(
        &self,
        out: &mut Vec<u8>,
        name: &str,
        message: &str,
        level: LogLevel,
        time: DateTime<Utc>,
    ) {
        out.push(b'[');
        level.append_tag(out);
        out.push(b']');
        if !self.time_format.is_empty() {
            out.push(b' ');
            out.extend_from_slice(time.format(&self.time_format).to_string().as_bytes());
        }
        if !name.is_empty() && !self.no_name {
            out.push(b' ');
            out.extend_from_slice(name.as_bytes());
        }
        out.push(b' ');
        out.extend_from_slice(message.as_bytes());
        if !self.bytes.is_empty() {
            out.push(b' ');
            out.extend_from_slice(&self.bytes);
        }
    }

    fn add_key(&mut self, key: &str) {
        // A space precedes every field except the first one at its nesting
        // depth, marked by the preceding opening brace
        if let Some(&last) = self.bytes.last() {
            if last != b'{' {
                self.bytes.push(b' ');
            }
        }
        self.bytes.extend_from_slice(key.as_bytes());
        self.bytes.push(b'=');
    }

    fn add_float(&mut self, key: &str, value: impl Into<f64> + fmt::Display + Copy) {
        self.add_key(key);
        let wide: f64 = value.into();
        if wide.is_nan() {
            self.bytes.extend_from_slice(b"NaN");
        } else if wide == f64::INFINITY {
            self.bytes.extend_from_slice(b"+Inf");
        } else if wide == f64::NEG_INFINITY {
            self.bytes.extend_from_slice(b"-Inf");
        } else {
            // Display renders the shortest decimal that round-trips at the
            // value's own bit width
            self.bytes.extend_from_slice(value.to_string().as_bytes());
        }
    }
}

impl Default for TextEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder for TextEncoder {
    fn add_string(&mut self, key: &str, value: &str) {
        self.add_key(key);
        self.bytes.extend_from_slice(value.as_bytes());
    }

    fn add_bool(&mut self, key: &str, value: bool) {
        self.add_key(key);
        if value {
            self.bytes.extend_from_slice(b"true");
        } else {
            self.bytes.extend_from_slice(b"false");
        }
    }

    fn add_byte(&mut self, key: &str, value: u8) {
        self.add_key(key);
        append_hex(&mut self.bytes, &[value]);
    }

    fn add_bytes(&mut self, key: &str, value: &[u8]) {
        self.add_key(key);
        append_hex(&mut self.bytes, value);
    }

    fn add_i64(&mut self, key: &str, value: i64) {
        self.add_key(key);
        self.bytes.extend_from_slice(value.to_string().as_bytes());
    }

    fn add_u64(&mut self, key: &str, value: u64) {
        self.add_key(key);
        self.bytes.extend_from_slice(value.to_string().as_bytes());
    }

    fn add_f32(&mut self, key: &str, value: f32) {
        self.add_float(key, value);
    }

    fn add_f64(&mut self, key: &str, value: f64) {
        self.add_float(key, value);
    }

    fn add_marshaler(&mut self, key: &str, value: &dyn LogMarshaler) -> Result<()> {
        self.add_key(key);
        self.bytes.push(b'{');
        let result = value.marshal_log(self);
        // Close the brace pair even when the marshal failed partway
        self.bytes.push(b'}');
        result
    }

    fn add_object(&mut self, key: &str, value: &dyn fmt::Debug) {
        let dump = format!("{:?}", value);
        self.add_string(key, &dump);
    }

    fn buffer(&self) -> &[u8] {
        &self.bytes
    }

    fn clone_encoder(&self) -> Box<dyn Encoder> {
        let mut clone = TEXT_POOL.get_or_else(TextEncoder::fresh);
        clone.copy_from(self);
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
        self.append_entry(&mut out, name, message, level, time);
        out.push(b'\n');
        write_checked(sink, &out)
    }

    fn free(self: Box<Self>) {
        (*self).release();
    }
}
