//! Logging shim over the optional `log` and `defmt` backends.
//!
//! Compiles to nothing if neither feature is enabled. Keep the format
//! strings to `{}` and `{:?}`, the subset both backends understand.
//!
//! `warning!` cannot be called `warn!`, the name clashes with the builtin
//! `#[warn]` attribute once re-exported.

macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "log")]
        ::log::debug!($($arg)*);
        #[cfg(feature = "defmt")]
        ::defmt::debug!($($arg)*);
    }};
}

macro_rules! warning {
    ($($arg:tt)*) => {{
        #[cfg(feature = "log")]
        ::log::warn!($($arg)*);
        #[cfg(feature = "defmt")]
        ::defmt::warn!($($arg)*);
    }};
}

pub(crate) use debug;
pub(crate) use warning;
