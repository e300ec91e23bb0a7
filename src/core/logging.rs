//! Logging macros
//!
//! - `pico2_w`: defmt
//! - host tests: stdout/stderr with a level prefix
//! - host non-test: arguments are type-checked, nothing is emitted
//!
//! Format strings must work for both defmt and `core::fmt`: plain `{}`
//! placeholders with integers, bools, or `&str`. Never log passwords.

#[doc(hidden)]
#[macro_export]
macro_rules! __log {
    ($defmt:ident, $host:ident, $tag:literal, $($arg:tt)*) => {{
        #[cfg(feature = "pico2_w")]
        ::defmt::$defmt!($($arg)*);

        #[cfg(all(not(feature = "pico2_w"), test))]
        $host!("[{}] {}", $tag, format!($($arg)*));

        #[cfg(all(not(feature = "pico2_w"), not(test)))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => { $crate::__log!(error, eprintln, "ERROR", $($arg)*) };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => { $crate::__log!(warn, println, "WARN", $($arg)*) };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => { $crate::__log!(info, println, "INFO", $($arg)*) };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => { $crate::__log!(debug, println, "DEBUG", $($arg)*) };
}
