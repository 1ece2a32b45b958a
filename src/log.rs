//! Internal logging macros.
//!
//! With the `defmt` feature these forward to the matching `defmt` macros.
//! Without it they expand to nothing and their arguments are not evaluated.

macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($($arg)*);
    }};
}

macro_rules! log_trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::trace!($($arg)*);
    }};
}

pub(crate) use log_debug;
pub(crate) use log_trace;
