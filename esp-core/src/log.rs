//! Logging-Makros
//!
//! `trace!`, `debug!` und `log_warn!` leiten an `defmt` weiter wenn das
//! Feature aktiv ist, sonst werden die Argumente nur ausgewertet (Host-Tests, andere Targets).

#[cfg(feature = "defmt")]
macro_rules! trace {
    ($($arg:tt)*) => { ::defmt::trace!($($arg)*) };
}

#[cfg(not(feature = "defmt"))]
macro_rules! trace {
    ($($arg:tt)*) => {{
        let _ = ($($arg)*);
    }};
}

#[cfg(feature = "defmt")]
macro_rules! debug {
    ($($arg:tt)*) => { ::defmt::debug!($($arg)*) };
}

#[cfg(not(feature = "defmt"))]
macro_rules! debug {
    ($($arg:tt)*) => {{
        let _ = ($($arg)*);
    }};
}

#[cfg(feature = "defmt")]
macro_rules! log_warn {
    ($($arg:tt)*) => { ::defmt::warn!($($arg)*) };
}

#[cfg(not(feature = "defmt"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        let _ = ($($arg)*);
    }};
}

// `warn` würde mit dem eingebauten `#[warn]`-Attribut kollidieren
pub(crate) use {debug, log_warn, trace};
