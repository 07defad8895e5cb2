//! Panic capture for guarded closures.
//!
//! `catch_unwind` hands back only the payload, so a process-wide hook records
//! where the panic happened. The hook is installed once and only intercepts
//! panics raised while a guarded closure is running on the current thread;
//! every other panic goes to whatever hook was installed before.

use std::any::Any;
use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

use crate::Fault;

static HOOK: Once = Once::new();

thread_local! {
    static GUARD_DEPTH: Cell<usize> = const { Cell::new(0) };
    static LAST_PANIC: RefCell<Option<(String, u32)>> = const { RefCell::new(None) };
}

fn install_hook() {
    HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if GUARD_DEPTH.with(Cell::get) > 0 {
                let location = info
                    .location()
                    .map(|loc| (loc.file().to_string(), loc.line()));
                LAST_PANIC.with(|slot| *slot.borrow_mut() = location);
            } else {
                previous(info);
            }
        }));
    });
}

/// Decrements the guard depth even if the closure unwinds past us.
struct DepthGuard;

impl DepthGuard {
    fn enter() -> Self {
        GUARD_DEPTH.with(|depth| depth.set(depth.get() + 1));
        DepthGuard
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        GUARD_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

/// Run `f`, turning a panic into a [`Fault`].
pub(crate) fn catch<T>(f: impl FnOnce() -> Result<T, Fault>) -> Result<T, Fault> {
    install_hook();
    // drop a location left by a panic that was caught elsewhere
    LAST_PANIC.with(|slot| slot.borrow_mut().take());

    let outcome = {
        let _depth = DepthGuard::enter();
        panic::catch_unwind(AssertUnwindSafe(f))
    };

    match outcome {
        Ok(result) => result,
        Err(payload) => {
            let message = payload_message(payload.as_ref());
            let fault = match LAST_PANIC.with(|slot| slot.borrow_mut().take()) {
                Some((file, line)) => Fault::with_location(message, file, line),
                None => Fault::with_location(message, "<unknown>", 0),
            };
            Err(fault)
        }
    }
}

fn payload_message(payload: &(dyn Any + Send)) -> Cow<'static, str> {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        Cow::Borrowed(s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        Cow::Owned(s.clone())
    } else {
        Cow::Borrowed("unknown panic")
    }
}
