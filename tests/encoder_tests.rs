//! Integration tests for entry assembly and the write protocol
//!
//! These tests verify:
//! - Byte-exact rendered lines for both encoder variants
//! - Option handling (time format, name suppression)
//! - Error paths: nil sink, sink failure, short write
//! - Encoder reuse, cloning, and cross-thread handoff

use chrono::{DateTime, TimeZone, Utc};
use line_encoder::prelude::*;
use std::fs;
use std::io::{self, Write};
use tempfile::TempDir;

fn entry_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap()
}

/// Sink that claims to accept fewer bytes than it was handed
struct ShortSink {
    accept: usize,
}

impl Write for ShortSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(buf.len().min(self.accept))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Sink that fails every write
struct FailingSink;

impl Write for FailingSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_basic_entry() {
    let enc = TextEncoder::new();
    let mut out = Vec::new();
    enc.write_entry(Some(&mut out), "svc", "started", LogLevel::Info, entry_time())
        .unwrap();
    assert_eq!(out, b"[I] 2021-01-01T00:00:00Z svc started\n");
    enc.release();
}

#[test]
fn test_entry_with_field() {
    let mut enc = TextEncoder::new();
    enc.add_i64("count", 3);
    let mut out = Vec::new();
    enc.write_entry(Some(&mut out), "svc", "started", LogLevel::Info, entry_time())
        .unwrap();
    assert_eq!(out, b"[I] 2021-01-01T00:00:00Z svc started count=3\n");
    enc.release();
}

#[test]
fn test_color_entry_with_field() {
    let mut enc = AnsiEncoder::new();
    enc.add_i64("count", 3);
    let mut out = Vec::new();
    enc.write_entry(Some(&mut out), "svc", "started", LogLevel::Info, entry_time())
        .unwrap();
    assert_eq!(
        out,
        b"\x1b[32m[I] 2021-01-01T00:00:00Z svc started count=3\x1b[0m\n"
    );
    enc.release();
}

#[test]
fn test_nil_sink_on_both_variants() {
    let text = TextEncoder::new();
    let err = text
        .write_entry(None, "svc", "msg", LogLevel::Info, entry_time())
        .unwrap_err();
    assert!(matches!(err, EncoderError::NilSink));
    text.release();

    let ansi = AnsiEncoder::new();
    let err = ansi
        .write_entry(None, "svc", "msg", LogLevel::Info, entry_time())
        .unwrap_err();
    assert!(matches!(err, EncoderError::NilSink));
    ansi.release();
}

#[test]
fn test_short_write_carries_both_counts() {
    let enc = TextEncoder::new();

    // Render the same entry into a vector first to learn its length
    let mut reference = Vec::new();
    enc.write_entry(Some(&mut reference), "svc", "started", LogLevel::Info, entry_time())
        .unwrap();

    let mut sink = ShortSink { accept: 5 };
    let err = enc
        .write_entry(Some(&mut sink), "svc", "started", LogLevel::Info, entry_time())
        .unwrap_err();
    match err {
        EncoderError::IncompleteWrite { written, expected } => {
            assert_eq!(written, 5);
            assert_eq!(expected, reference.len());
        }
        other => panic!("expected IncompleteWrite, got {:?}", other),
    }
    enc.release();
}

#[test]
fn test_short_write_on_color_variant() {
    let enc = AnsiEncoder::new();
    let mut sink = ShortSink { accept: 0 };
    let err = enc
        .write_entry(Some(&mut sink), "svc", "started", LogLevel::Warn, entry_time())
        .unwrap_err();
    assert!(matches!(
        err,
        EncoderError::IncompleteWrite { written: 0, .. }
    ));
    enc.release();
}

#[test]
fn test_sink_error_propagates() {
    let enc = TextEncoder::new();
    let err = enc
        .write_entry(
            Some(&mut FailingSink),
            "svc",
            "msg",
            LogLevel::Error,
            entry_time(),
        )
        .unwrap_err();
    match err {
        EncoderError::Io(io_err) => assert_eq!(io_err.kind(), io::ErrorKind::BrokenPipe),
        other => panic!("expected Io, got {:?}", other),
    }
    enc.release();
}

#[test]
fn test_name_suppression_leaves_no_stray_separator() {
    let mut enc = TextEncoder::new().with_no_name();
    enc.add_bool("ready", true);
    let mut out = Vec::new();
    enc.write_entry(Some(&mut out), "svc", "up", LogLevel::Info, entry_time())
        .unwrap();
    assert_eq!(out, b"[I] 2021-01-01T00:00:00Z up ready=true\n");
    enc.release();
}

#[test]
fn test_empty_name_is_omitted() {
    let enc = TextEncoder::new();
    let mut out = Vec::new();
    enc.write_entry(Some(&mut out), "", "up", LogLevel::Info, entry_time())
        .unwrap();
    assert_eq!(out, b"[I] 2021-01-01T00:00:00Z up\n");
    enc.release();
}

#[test]
fn test_no_time_option() {
    let enc = TextEncoder::new().with_no_time();
    let mut out = Vec::new();
    enc.write_entry(Some(&mut out), "svc", "up", LogLevel::Debug, entry_time())
        .unwrap();
    assert_eq!(out, b"[D] svc up\n");
    enc.release();
}

#[test]
fn test_custom_time_format() {
    let enc = TextEncoder::new().with_time_format("%Y/%m/%d %H:%M");
    let mut out = Vec::new();
    enc.write_entry(Some(&mut out), "svc", "up", LogLevel::Info, entry_time())
        .unwrap();
    assert_eq!(out, b"[I] 2021/01/01 00:00 svc up\n");
    enc.release();
}

#[test]
fn test_empty_message_still_gets_its_separator() {
    let enc = TextEncoder::new().with_no_time();
    let mut out = Vec::new();
    enc.write_entry(Some(&mut out), "", "", LogLevel::Info, entry_time())
        .unwrap();
    assert_eq!(out, b"[I] \n");
    enc.release();
}

#[test]
fn test_unknown_level_renders_raw_value() {
    let enc = TextEncoder::new().with_no_time();
    let mut out = Vec::new();
    enc.write_entry(Some(&mut out), "svc", "odd", LogLevel::Other(42), entry_time())
        .unwrap();
    assert_eq!(out, b"[42] svc odd\n");
    enc.release();
}

#[test]
fn test_accumulator_survives_repeated_writes() {
    let mut enc = TextEncoder::new().with_no_time();
    enc.add_string("job", "sync");

    let mut out = Vec::new();
    enc.write_entry(Some(&mut out), "w", "tick", LogLevel::Info, entry_time())
        .unwrap();
    enc.write_entry(Some(&mut out), "w", "tick", LogLevel::Info, entry_time())
        .unwrap();
    assert_eq!(out, b"[I] w tick job=sync\n[I] w tick job=sync\n");
    assert_eq!(enc.buffer(), b"job=sync");
    enc.release();
}

#[test]
fn test_logger_agnostic_trait_usage() {
    let encoders: Vec<Box<dyn Encoder>> = vec![
        Box::new(TextEncoder::new().with_no_time()),
        Box::new(AnsiEncoder::new().with_no_time()),
    ];

    for mut enc in encoders {
        enc.add_u64("n", 1);
        let mut out = Vec::new();
        enc.write_entry(Some(&mut out), "svc", "go", LogLevel::Info, entry_time())
            .unwrap();
        let line = String::from_utf8(out).unwrap();
        assert!(line.contains("[I] svc go n=1"));
        assert!(line.ends_with('\n'));
        enc.free();
    }
}

#[test]
fn test_clone_handoff_to_another_thread() {
    let mut base = TextEncoder::new().with_no_time();
    base.add_string("service", "api");

    let clone = base.clone_encoder();
    let handle = std::thread::spawn(move || {
        let mut clone = clone;
        clone.add_i64("worker", 7);
        let mut out = Vec::new();
        clone
            .write_entry(Some(&mut out), "bg", "spawned", LogLevel::Info, entry_time())
            .unwrap();
        clone.free();
        out
    });

    let out = handle.join().unwrap();
    assert_eq!(out, b"[I] bg spawned service=api worker=7\n");
    assert_eq!(base.buffer(), b"service=api");
    base.release();
}

#[test]
fn test_file_sink() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("entries.log");

    let mut enc = TextEncoder::new();
    enc.add_string("run", "nightly");

    let mut file = fs::File::create(&log_file).expect("Failed to create log file");
    enc.write_entry(Some(&mut file), "batch", "begin", LogLevel::Info, entry_time())
        .unwrap();
    enc.write_entry(Some(&mut file), "batch", "end", LogLevel::Info, entry_time())
        .unwrap();
    file.flush().unwrap();
    enc.release();

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert_eq!(
        content,
        "[I] 2021-01-01T00:00:00Z batch begin run=nightly\n\
         [I] 2021-01-01T00:00:00Z batch end run=nightly\n"
    );
}

#[test]
fn test_marshal_failure_leaves_partial_line_material() {
    struct Broken;

    impl LogMarshaler for Broken {
        fn marshal_log(&self, encoder: &mut dyn Encoder) -> Result<()> {
            encoder.add_string("stage", "half");
            Err(EncoderError::marshal("upstream gone"))
        }
    }

    let mut enc = TextEncoder::new().with_no_time();
    enc.add_marshaler("obj", &Broken).unwrap_err();

    // The truncated nested object still renders; nothing is rolled back
    let mut out = Vec::new();
    enc.write_entry(Some(&mut out), "svc", "partial", LogLevel::Warn, entry_time())
        .unwrap();
    assert_eq!(out, b"[W] svc partial obj={stage=half}\n");
    enc.release();
}
