//! Encoder contract shared by the text and ANSI variants

use super::error::Result;
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use std::fmt;
use std::io;

/// A value that can serialize its own fields into an encoder.
///
/// The encoder calls back into the value with itself as the target, so
/// nested objects render through the same typed `add_*` surface as top-level
/// fields. A reported error propagates out of
/// [`add_marshaler`](Encoder::add_marshaler); output appended before the
/// failure is retained.
pub trait LogMarshaler {
    fn marshal_log(&self, encoder: &mut dyn Encoder) -> Result<()>;
}

/// The field-accumulation and entry-emission surface of an encoder.
///
/// Loggers hold a `Box<dyn Encoder>` and stay agnostic to whether output is
/// plain or color-decorated. Field mutators are infallible: every supported
/// value has a total textual rendering. Only nested marshaling and the final
/// entry write can fail.
///
/// An encoder is exclusively owned by its holder. Handing state to another
/// thread requires a completed [`clone_encoder`](Encoder::clone_encoder)
/// first; the clone's buffer is disjoint from the source's.
pub trait Encoder: Send {
    /// Append `key=value` with the string verbatim
    fn add_string(&mut self, key: &str, value: &str);

    /// Append `key=true` or `key=false`
    fn add_bool(&mut self, key: &str, value: bool);

    /// Append `key=0xHH` with the byte in uppercase hex
    fn add_byte(&mut self, key: &str, value: u8);

    /// Append `key=0xHH..` with every byte in uppercase hex, in order
    fn add_bytes(&mut self, key: &str, value: &[u8]);

    /// Append `key=value` in base 10. Narrower signed widths widen
    /// losslessly via `into()` at the call site.
    fn add_i64(&mut self, key: &str, value: i64);

    /// Append `key=value` in base 10. Narrower unsigned widths widen
    /// losslessly via `into()` at the call site.
    fn add_u64(&mut self, key: &str, value: u64);

    /// Append `key=value` with the minimal decimal text that round-trips at
    /// 32-bit width; NaN and infinities render as `NaN`, `+Inf`, `-Inf`
    fn add_f32(&mut self, key: &str, value: f32);

    /// Append `key=value` with the minimal decimal text that round-trips at
    /// 64-bit width; NaN and infinities render as `NaN`, `+Inf`, `-Inf`
    fn add_f64(&mut self, key: &str, value: f64);

    /// Append `key={...}` by letting the value serialize its own fields into
    /// this encoder. The closing brace is appended and the error propagated
    /// if the value reports one; partial output is not rolled back.
    fn add_marshaler(&mut self, key: &str, value: &dyn LogMarshaler) -> Result<()>;

    /// Append `key=<debug dump>` for an opaque value
    fn add_object(&mut self, key: &str, value: &dyn fmt::Debug);

    /// The accumulated field bytes, in insertion order
    fn buffer(&self) -> &[u8];

    /// Acquire a pooled instance carrying a disjoint copy of this encoder's
    /// buffer and formatting settings
    fn clone_encoder(&self) -> Box<dyn Encoder>;

    /// Assemble one complete entry (level tag, optional timestamp, optional
    /// name, message, accumulated fields, trailing newline) and emit it to
    /// the sink in a single verified write.
    ///
    /// `None` for the sink fails with [`EncoderError::NilSink`] before any
    /// rendering. A short write fails with
    /// [`EncoderError::IncompleteWrite`] carrying both byte counts. The
    /// accumulated fields are not consumed; repeated calls re-render them.
    ///
    /// [`EncoderError::NilSink`]: super::error::EncoderError::NilSink
    /// [`EncoderError::IncompleteWrite`]: super::error::EncoderError::IncompleteWrite
    fn write_entry(
        &self,
        sink: Option<&mut dyn io::Write>,
        name: &str,
        message: &str,
        level: LogLevel,
        time: DateTime<Utc>,
    ) -> Result<()>;

    /// Return this encoder to its pool. The instance must be logically
    /// treated as gone; the pool may hand it to any other acquirer.
    fn free(self: Box<Self>);
}
