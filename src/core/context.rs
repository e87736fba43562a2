//! Per-call context: locale description, warning sink, cooperative
//! cancellation.
//!
//! The host owns the warning channel and the interrupt flag; this crate only
//! borrows them for the duration of one call. A `CallContext` is therefore
//! constructed per call, which is also what scopes the encoding-warning cap.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::core::error::Error;

/// How many bad-encoding warnings to emit per call.
const NWARN: usize = 5;

/// Host locale flags consumed by the encoding classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    /// The locale encoding is UTF-8.
    pub utf8: bool,
    /// The locale encoding is Latin-1.
    pub latin1: bool,
    /// The locale encoding is multibyte.
    pub mbcs: bool,
}

impl Locale {
    /// A UTF-8 locale (the default on modern systems).
    pub fn utf8() -> Self {
        Locale {
            utf8: true,
            latin1: false,
            mbcs: true,
        }
    }

    /// A Latin-1 single-byte locale.
    pub fn latin1() -> Self {
        Locale {
            utf8: false,
            latin1: true,
            mbcs: false,
        }
    }

    /// A single-byte locale that is neither UTF-8 nor Latin-1 (e.g. C).
    pub fn single_byte() -> Self {
        Locale {
            utf8: false,
            latin1: false,
            mbcs: false,
        }
    }

    /// A multibyte locale whose encoding is not UTF-8 (e.g. an East Asian
    /// system codepage). Drives the wide-character path of the extended
    /// dialect.
    pub fn multibyte_non_utf8() -> Self {
        Locale {
            utf8: false,
            latin1: false,
            mbcs: true,
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::utf8()
    }
}

/// Receiver for non-fatal diagnostics, provided by the host.
pub trait WarningSink {
    fn warning(&mut self, message: &str);
}

/// A Vec-backed sink for tests and embedders without a native channel.
#[derive(Debug, Default)]
pub struct Warnings(pub Vec<String>);

impl WarningSink for Warnings {
    fn warning(&mut self, message: &str) {
        self.0.push(message.to_string());
    }
}

/// Everything one call needs from its host. Construct one per call.
pub struct CallContext<'a> {
    pub locale: Locale,
    sink: &'a mut dyn WarningSink,
    interrupt: Option<&'a AtomicBool>,
    encoding_warnings: usize,
}

impl<'a> CallContext<'a> {
    pub fn new(sink: &'a mut dyn WarningSink) -> Self {
        CallContext {
            locale: Locale::default(),
            sink,
            interrupt: None,
            encoding_warnings: 0,
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Attach a cooperative-cancellation flag, checked between elements.
    pub fn with_interrupt(mut self, flag: &'a AtomicBool) -> Self {
        self.interrupt = Some(flag);
        self
    }

    pub fn warn(&mut self, message: &str) {
        self.sink.warning(message);
    }

    /// Warn about a bad input element (1-based index), capped per call.
    pub(crate) fn warn_invalid_input(&mut self, index: usize) {
        if self.encoding_warnings < NWARN {
            self.encoding_warnings += 1;
            self.sink
                .warning(&format!("input string {} is invalid UTF-8", index + 1));
        }
    }

    pub(crate) fn check_interrupt(&self) -> Result<(), Error> {
        match self.interrupt {
            Some(flag) if flag.load(Ordering::Relaxed) => Err(Error::Interrupted),
            _ => Ok(()),
        }
    }
}
