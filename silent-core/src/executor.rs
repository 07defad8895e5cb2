use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::format::format_message;
use crate::{Fault, IntoFault, LogLevel, LogSink, SilentConfig, TracingSink, panic};

/// Label used when the exception callback itself fails.
pub const FAIL_CALLBACK_LABEL: &str = "FailCallback Error";
/// Label used when the final callback fails.
pub const FINAL_CALLBACK_LABEL: &str = "FinalCallback Error";

type ExceptionCallback<'a> = Box<dyn FnOnce(&mut SilentTry<'a>, &Fault) -> Result<(), Fault> + 'a>;
type FinalCallback<'a> = Box<dyn FnOnce() -> Result<(), Fault> + 'a>;

/// Runs a unit of work and never lets a fault escape.
///
/// Configure it with the chained `with_*` / `on_*` methods, then call
/// [`exec`](Self::exec) once. `exec` takes the executor by value, so an
/// instance cannot be run twice.
///
/// A fault is an `Err` returned by the work closure or a panic unwinding out
/// of it. On a fault the executor logs (unless disabled), runs the exception
/// callback, and returns the fallback. The final callback runs in every case.
pub struct SilentTry<'a> {
    exception_callback: Option<ExceptionCallback<'a>>,
    final_callback: Option<FinalCallback<'a>>,
    logable: bool,
    message: String,
    data: Map<String, Value>,
    context: Map<String, Value>,
    exec_context: Map<String, Value>,
    level: LogLevel,
    sink: Arc<dyn LogSink>,
}

impl Default for SilentTry<'_> {
    fn default() -> Self {
        Self {
            exception_callback: None,
            final_callback: None,
            logable: true,
            message: String::new(),
            data: Map::new(),
            context: Map::new(),
            exec_context: Map::new(),
            level: LogLevel::default(),
            sink: Arc::new(TracingSink),
        }
    }
}

impl fmt::Debug for SilentTry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SilentTry")
            .field("has_exception_callback", &self.exception_callback.is_some())
            .field("has_final_callback", &self.final_callback.is_some())
            .field("logable", &self.logable)
            .field("message", &self.message)
            .field("data", &self.data)
            .field("context", &self.context)
            .field("exec_context", &self.exec_context)
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}

impl<'a> SilentTry<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed logging settings from a deserialised [`SilentConfig`].
    pub fn with_config(mut self, config: &SilentConfig) -> Self {
        self.logable = config.logable;
        self.level = config.log_level;
        self.message = config.message.clone();
        self.data = config.data.clone();
        self.context = config.context.clone();
        self
    }

    /// Called with the executor and the fault after a fault is caught.
    ///
    /// An `Err` or panic from the callback is swallowed and, when logging is
    /// on, logged as `FailCallback Error`. Errors other than [`Fault`] are
    /// located where this method was called.
    #[track_caller]
    pub fn on_exception<F, E>(mut self, callback: F) -> Self
    where
        F: FnOnce(&mut SilentTry<'a>, &Fault) -> Result<(), E> + 'a,
        E: IntoFault,
    {
        let location = Location::caller();
        self.exception_callback = Some(Box::new(
            move |executor: &mut SilentTry<'a>, fault: &Fault| {
                callback(executor, fault).map_err(|err| err.into_fault(location))
            },
        ));
        self
    }

    /// Called with no arguments after the work, whether it failed or not.
    #[track_caller]
    pub fn on_finally<F, E>(mut self, callback: F) -> Self
    where
        F: FnOnce() -> Result<(), E> + 'a,
        E: IntoFault,
    {
        let location = Location::caller();
        self.final_callback = Some(Box::new(move || {
            callback().map_err(|err| err.into_fault(location))
        }));
        self
    }

    pub fn logable(mut self, logable: bool) -> Self {
        self.logable = logable;
        self
    }

    /// Label prefixed to the log line as `[custom_msg:...]`.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.set_message(message);
        self
    }

    /// Replace the key/value pairs appended to the log line.
    pub fn with_data(mut self, data: Map<String, Value>) -> Self {
        self.data = data;
        self
    }

    pub fn with_data_entry(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Replace the structured context handed to the sink.
    pub fn with_context(mut self, context: Map<String, Value>) -> Self {
        self.context = context;
        self
    }

    pub fn with_context_entry(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    pub fn with_exec_context(mut self, exec_context: Map<String, Value>) -> Self {
        self.exec_context = exec_context;
        self
    }

    /// Set the severity by name. Unknown names leave the level unchanged.
    pub fn with_log_level(mut self, level: &str) -> Self {
        if let Ok(level) = level.parse() {
            self.level = level;
        }
        self
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn is_logable(&self) -> bool {
        self.logable
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn set_logable(&mut self, logable: bool) {
        self.logable = logable;
    }

    pub fn set_level(&mut self, level: LogLevel) {
        self.level = level;
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn data_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.data
    }

    pub fn context_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.context
    }

    /// State shared between the work closure and the exception callback.
    pub fn exec_context(&self) -> &Map<String, Value> {
        &self.exec_context
    }

    pub fn exec_context_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.exec_context
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.exec_context.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.exec_context.insert(key.into(), value.into())
    }

    /// Run `work` with logging disabled.
    #[track_caller]
    pub fn simple_exec<T, E, F>(self, work: F, fallback: T) -> T
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
        E: IntoFault,
    {
        self.logable(false).exec(work, fallback)
    }

    /// Run `work`, returning its value, or `fallback` if it fails.
    ///
    /// A [`Fault`] error keeps its own location, so `?` inside a closure
    /// returning `Result<T, Fault>` logs the exact line. Any other error type
    /// is logged at the line that called `exec`.
    #[track_caller]
    pub fn exec<T, E, F>(self, work: F, fallback: T) -> T
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
        E: IntoFault,
    {
        self.exec_with(work, move |_| fallback)
    }

    /// Like [`exec`](Self::exec) with `T::default()` as the fallback.
    #[track_caller]
    pub fn exec_or_default<T, E, F>(self, work: F) -> T
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
        E: IntoFault,
        T: Default,
    {
        self.exec_with(work, |_| T::default())
    }

    /// Like [`exec`](Self::exec), building the fallback from the fault only
    /// when one occurs. `fallback` runs after the final callback.
    #[track_caller]
    pub fn exec_with<T, E, F, G>(mut self, work: F, fallback: G) -> T
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
        E: IntoFault,
        G: FnOnce(&Fault) -> T,
    {
        let location = Location::caller();
        let outcome = panic::catch(|| work(&mut self).map_err(|err| err.into_fault(location)));

        if let Err(fault) = &outcome {
            self.handle_fault(fault);
        }
        self.run_final();

        match outcome {
            Ok(value) => value,
            Err(fault) => fallback(&fault),
        }
    }

    fn handle_fault(&mut self, fault: &Fault) {
        if self.logable {
            self.log(&self.message, fault, &self.data, &self.context);
        }

        if let Some(callback) = self.exception_callback.take() {
            let result = panic::catch(|| callback(&mut *self, fault));
            if let Err(secondary) = result
                && self.logable
            {
                self.log(FAIL_CALLBACK_LABEL, &secondary, &Map::new(), &Map::new());
            }
        }
    }

    fn run_final(&mut self) {
        if let Some(callback) = self.final_callback.take()
            && let Err(fault) = panic::catch(callback)
            && self.logable
        {
            self.log(FINAL_CALLBACK_LABEL, &fault, &Map::new(), &Map::new());
        }
    }

    fn log(
        &self,
        label: &str,
        fault: &Fault,
        data: &Map<String, Value>,
        context: &Map<String, Value>,
    ) {
        let line = format_message(label, fault, data);
        // sink panics are dropped
        let _ = panic::catch(|| {
            self.sink.log(self.level, &line, context);
            Ok(())
        });
    }
}
