use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::panic::Location;

/// A fault caught by [`SilentTry`](crate::SilentTry).
///
/// Carries the three things the log line needs: a message, the file and the
/// line where the fault was raised. Errors converted with `?` record the
/// location of the `?` itself, panics record the location reported by the
/// panic hook.
///
/// `Fault` deliberately does not implement [`std::error::Error`], which is what
/// allows the blanket `From<E: Error>` conversion.
pub struct Fault {
    message: String,
    file: Cow<'static, str>,
    line: u32,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

impl Fault {
    /// Build a fault located at the caller.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self::at(message, Location::caller())
    }

    /// Build a fault at an explicit source location.
    pub fn at(message: impl Into<String>, location: &'static Location<'static>) -> Self {
        Self::with_location(message, location.file(), location.line())
    }

    pub fn with_location(
        message: impl Into<String>,
        file: impl Into<Cow<'static, str>>,
        line: u32,
    ) -> Self {
        Self {
            message: message.into(),
            file: file.into(),
            line,
            source: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    /// The error this fault was converted from, if any.
    pub fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_deref().map(|err| err as &(dyn Error + 'static))
    }

    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        self.source()?.downcast_ref::<E>()
    }
}

impl<E> From<E> for Fault
where
    E: Error + Send + Sync + 'static,
{
    #[track_caller]
    fn from(err: E) -> Self {
        err.into_fault(Location::caller())
    }
}

/// Conversion used by [`SilentTry`](crate::SilentTry) for whatever a closure
/// returned as its error.
///
/// A [`Fault`] keeps the location it already carries. Any other error is
/// placed at `location`, which the executor takes from its own caller.
pub trait IntoFault {
    fn into_fault(self, location: &'static Location<'static>) -> Fault;
}

impl IntoFault for Fault {
    fn into_fault(self, _location: &'static Location<'static>) -> Fault {
        self
    }
}

impl<E> IntoFault for E
where
    E: Error + Send + Sync + 'static,
{
    fn into_fault(self, location: &'static Location<'static>) -> Fault {
        Fault {
            message: self.to_string(),
            file: Cow::Borrowed(location.file()),
            line: location.line(),
            source: Some(Box::new(self)),
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl fmt::Debug for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fault")
            .field("message", &self.message)
            .field("file", &self.file)
            .field("line", &self.line)
            .field("source", &self.source)
            .finish()
    }
}

/// Build a [`Fault`] from a format string, located at the macro call.
///
/// ```rust
/// let fault = silent_core::fault!("invoice {} not found", 7);
/// assert_eq!(fault.message(), "invoice 7 not found");
/// ```
#[macro_export]
macro_rules! fault {
    ($($arg:tt)*) => {
        $crate::Fault::new(::std::format!($($arg)*))
    };
}

/// Return early with `Err(fault!(...))`.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return ::core::result::Result::Err($crate::fault!($($arg)*))
    };
}
