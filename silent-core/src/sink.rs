use serde_json::{Map, Value};
use tracing::Level;

use crate::LogLevel;

/// Destination for the log records produced by a [`SilentTry`](crate::SilentTry).
///
/// `context` is the structured payload set with `with_context`; it is never
/// part of `message`.
pub trait LogSink: Send + Sync {
    fn log(&self, level: LogLevel, message: &str, context: &Map<String, Value>);
}

/// Default sink: forwards every record to `tracing` under the `silent` target.
///
/// The eight-level severity name is kept in the `severity` field because
/// `tracing` only has five levels. The context map is rendered as JSON in the
/// `context` field.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, level: LogLevel, message: &str, context: &Map<String, Value>) {
        let severity = level.as_str();
        let context = Value::Object(context.clone()).to_string();

        match level.tracing_level() {
            Level::TRACE => {
                tracing::trace!(target: "silent", severity, context = %context, "{message}")
            }
            Level::DEBUG => {
                tracing::debug!(target: "silent", severity, context = %context, "{message}")
            }
            Level::INFO => {
                tracing::info!(target: "silent", severity, context = %context, "{message}")
            }
            Level::WARN => {
                tracing::warn!(target: "silent", severity, context = %context, "{message}")
            }
            _ => {
                tracing::error!(target: "silent", severity, context = %context, "{message}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use super::*;

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
    fn emits_message_severity_and_context() {
        let mut context = Map::new();
        context.insert("user".into(), json!(7));

        let output = capture(|| {
            TracingSink.log(LogLevel::Critical, "[msg:boom] [file:a.rs:1]", &context)
        });

        assert!(output.contains("ERROR"));
        assert!(output.contains("[msg:boom] [file:a.rs:1]"));
        assert!(output.contains("severity=\"critical\""));
        assert!(output.contains(r#"context={"user":7}"#));
    }

    #[test]
    fn every_level_goes_out_at_its_tracing_level() {
        for level in LogLevel::ALL {
            let output = capture(|| TracingSink.log(level, "x", &Map::new()));
            let expected = format!("{:>5} silent:", level.tracing_level().as_str());
            assert!(output.contains(&expected), "{level}: {output}");
            assert!(output.contains(&format!("severity=\"{level}\"")));
        }
    }

    #[test]
    fn notice_goes_out_as_info() {
        let output = capture(|| TracingSink.log(LogLevel::Notice, "heads up", &Map::new()));
        assert!(output.contains(" INFO "));
        assert!(output.contains("context={}"));
    }
}
