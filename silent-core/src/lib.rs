//! # silent-core
//!
//! Core of the `silent` crate: [`SilentTry`] runs a unit of work and never lets
//! a fault escape. A fault is an `Err` from the work or a panic inside it. On a
//! fault the executor logs a single line through a [`LogSink`], calls the
//! exception callback, always calls the final callback, and hands back a
//! fallback value.
//!
//! # Quick Start
//!
//! ```rust
//! use silent_core::{Fault, SilentTry};
//!
//! let port: u16 = SilentTry::new()
//!     .with_message("reading port")
//!     .exec(|_| -> Result<u16, Fault> { Ok("8080".parse()?) }, 80);
//!
//! assert_eq!(port, 8080);
//! ```
//!
//! # Log line
//!
//! A caught fault is logged at the configured [`LogLevel`] (default `error`) as
//!
//! ```text
//! [custom_msg:billing calc failed] [msg:divide by zero] [file:src/calc.rs:42] [invoiceId:123]
//! ```
//!
//! `with_data` entries are appended in insertion order, `with_context` is
//! passed to the sink as structured context and never shows up in the text.
//!
//! # Shared state
//!
//! ```rust
//! use silent_core::{fault, Fault, SilentTry};
//!
//! let mut seen = None;
//! let total = SilentTry::new()
//!     .logable(false)
//!     .on_exception(|executor, _fault| {
//!         seen = executor.get("step").cloned();
//!         Ok::<_, Fault>(())
//!     })
//!     .exec(
//!         |executor| -> Result<i32, Fault> {
//!             executor.insert("step", "charge");
//!             Err(fault!("card declined"))
//!         },
//!         0,
//!     );
//!
//! assert_eq!(total, 0);
//! assert_eq!(seen, Some(serde_json::json!("charge")));
//! ```
//!
//! # Panics
//!
//! Panics are caught with `catch_unwind`. This needs the default
//! `panic = "unwind"` strategy; with `panic = "abort"` the process still
//! aborts.

mod config;
mod executor;
mod fault;
mod format;
mod level;
mod panic;
mod sink;
pub mod testing;

pub use config::SilentConfig;
pub use executor::{FAIL_CALLBACK_LABEL, FINAL_CALLBACK_LABEL, SilentTry};
pub use fault::{Fault, IntoFault};
pub use level::{LogLevel, ParseLevelError};
pub use sink::{LogSink, TracingSink};
