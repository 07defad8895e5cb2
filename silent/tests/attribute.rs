use std::io;
use std::sync::{Arc, Mutex};

use silent::{Fault, bail, silent};

#[silent(fallback = -1, message = "parsing quantity")]
fn quantity(input: &str) -> Result<i32, Fault> {
    Ok(input.trim().parse()?)
}

#[silent]
fn names(raw: &str) -> Result<Vec<String>, Fault> {
    if raw.is_empty() {
        bail!("no names");
    }
    Ok(raw.split(',').map(str::to_owned).collect())
}

#[silent(fallback = String::from("unknown"), level = "debug", quiet = true)]
fn home_dir(user: &str) -> Result<String, Fault> {
    match user {
        "root" => Ok("/root".to_owned()),
        _ => Err(io::Error::new(io::ErrorKind::NotFound, "no such user").into()),
    }
}

#[silent(fallback = 0)]
fn first_byte(bytes: Vec<u8>) -> io::Result<u8> {
    match bytes.first() {
        Some(b) => Ok(*b),
        None => Err(io::Error::new(io::ErrorKind::UnexpectedEof, "empty")),
    }
}

struct Meter {
    readings: Vec<u32>,
}

impl Meter {
    #[silent(fallback = 0)]
    fn latest(&self) -> Result<u32, Fault> {
        Ok(*self.readings.last().expect("at least one reading"))
    }
}

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture(f: impl FnOnce()) -> String {
    let out = Captured::default();
    let writer = out.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    let bytes = out.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

#[test]
fn returns_ok_value_or_fallback() {
    assert_eq!(quantity("12"), 12);
    assert_eq!(quantity("twelve"), -1);
}

#[test]
fn default_fallback() {
    assert_eq!(names("a,b"), ["a", "b"]);
    assert!(names("").is_empty());
}

#[test]
fn converted_errors_and_io_result_alias() {
    assert_eq!(home_dir("root"), "/root");
    assert_eq!(home_dir("nobody"), "unknown");
    assert_eq!(first_byte(vec![9, 8]), 9);
    assert_eq!(first_byte(Vec::new()), 0);
}

#[test]
fn methods_and_panics() {
    assert_eq!(Meter { readings: vec![3, 5] }.latest(), 5);
    assert_eq!(Meter { readings: vec![] }.latest(), 0);
}

#[test]
fn logs_through_tracing_with_label() {
    let output = capture(|| {
        quantity("x");
    });
    assert!(output.contains("ERROR"));
    assert!(output.contains("[custom_msg:parsing quantity] [msg:invalid digit found in string] [file:"));
    assert!(output.contains("attribute.rs:"));
}

#[test]
fn io_result_errors_are_located_in_the_annotated_file() {
    let output = capture(|| {
        first_byte(Vec::new());
    });
    assert!(output.contains("[msg:empty] [file:"));
    assert!(output.contains("attribute.rs:"));
    assert!(!output.contains("/rustc/"));
}

#[test]
fn quiet_skips_logging() {
    let output = capture(|| {
        home_dir("nobody");
    });
    assert!(output.is_empty());
}
