//! # silent
//!
//! Silent lets calling code treat "this may fail" as an expression instead of
//! control flow. Work runs inside [`SilentTry`]; any error or panic is caught,
//! optionally logged, and replaced with a fallback value.
//!
//! # Quick Start
//!
//! ```rust
//! use silent::{attempt, fault, Fault};
//!
//! let total: i64 = attempt()
//!     .with_message("billing calc failed")
//!     .with_data_entry("invoiceId", "123")
//!     .exec(|_| -> Result<i64, Fault> { Err(fault!("divide by zero")) }, -1);
//!
//! assert_eq!(total, -1);
//! ```
//!
//! The fault above is logged at `error` through `tracing` as
//!
//! ```text
//! [custom_msg:billing calc failed] [msg:divide by zero] [file:src/main.rs:7] [invoiceId:123]
//! ```
//!
//! # Examples
//!
//! ## Without logging
//!
//! ```rust
//! use silent::{attempt, Fault};
//!
//! let n: u8 = attempt().simple_exec(|_| -> Result<u8, Fault> { Ok("300".parse()?) }, 0);
//! assert_eq!(n, 0);
//! ```
//!
//! ## Callbacks
//!
//! ```rust
//! use std::cell::Cell;
//! use silent::{attempt, fault, Fault};
//!
//! let released = Cell::new(false);
//! let ok = attempt()
//!     .logable(false)
//!     .on_exception(|executor, fault| {
//!         executor.insert("reason", fault.message());
//!         Ok::<_, Fault>(())
//!     })
//!     .on_finally(|| {
//!         released.set(true);
//!         Ok::<_, Fault>(())
//!     })
//!     .exec(|_| -> Result<bool, Fault> { Err(fault!("lock busy")) }, false);
//!
//! assert!(!ok);
//! assert!(released.get());
//! ```
//!
//! ## Attribute
//!
//! ```rust
//! use silent::{silent, Fault};
//!
//! #[silent(fallback = Vec::new(), level = "warning")]
//! fn load_ids(raw: &str) -> Result<Vec<u32>, Fault> {
//!     let mut ids: Vec<u32> = Vec::new();
//!     for id in raw.split(',') {
//!         ids.push(id.trim().parse()?);
//!     }
//!     Ok(ids)
//! }
//!
//! assert_eq!(load_ids("1, 2"), vec![1, 2]);
//! assert!(load_ids("1, x").is_empty());
//! ```
//!
//! ## Custom sink
//!
//! ```rust
//! use std::sync::Arc;
//! use silent::{attempt, fault, Fault, LogLevel, testing::MemorySink};
//!
//! let sink = Arc::new(MemorySink::new());
//! attempt()
//!     .with_sink(sink.clone())
//!     .with_log_level("critical")
//!     .exec(|_| -> Result<(), Fault> { Err(fault!("disk full")) }, ());
//!
//! assert_eq!(sink.records()[0].level, LogLevel::Critical);
//! ```

pub use silent_core::*;
pub use silent_macro::*;

pub extern crate silent_core;

/// A fresh executor, one per operation.
pub fn attempt<'a>() -> SilentTry<'a> {
    SilentTry::new()
}
