//! FILENAME: core/tabulate-engine/src/logging.rs
// PURPOSE: Category-tagged logging macros for the tabulation engine.
// CONTEXT: Lines go through the `log` facade with the category as target, so the
//          host application decides where they end up. The engine never installs a logger.

/// Category used by the engine's own log lines.
pub const CATEGORY: &str = "TABULATE";

/// Write one log line for `category` at `level`.
pub fn write_log(level: log::Level, category: &str, message: &str) {
    log::log!(target: category, level, "{}", message);
}

/// Write an ENTER line for function entry.
pub fn write_log_enter(level: log::Level, category: &str, func_name: &str, params: &str) {
    if params.is_empty() {
        write_log(level, category, &format!("ENTER {}", func_name));
    } else {
        write_log(level, category, &format!("ENTER {} {}", func_name, params));
    }
}

/// Write an EXIT line for function exit.
pub fn write_log_exit(level: log::Level, category: &str, func_name: &str, result: &str) {
    if result.is_empty() {
        write_log(level, category, &format!("EXIT {}", func_name));
    } else {
        write_log(level, category, &format!("EXIT {} {}", func_name, result));
    }
}

// ============================================================================
// MACRO DEFINITIONS & EXPORTS
// ============================================================================

#[macro_export]
macro_rules! log_debug {
    ($cat:expr, $($arg:tt)*) => {
        if ::log::log_enabled!(target: $cat, ::log::Level::Debug) {
            $crate::logging::write_log(::log::Level::Debug, $cat, &format!($($arg)*))
        }
    };
}

#[macro_export]
macro_rules! log_warn {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log(::log::Level::Warn, $cat, &format!($($arg)*))
    };
}

// ENTER/EXIT macros for function tracing

#[macro_export]
macro_rules! log_enter {
    ($cat:expr, $func:expr) => {
        $crate::logging::write_log_enter(::log::Level::Debug, $cat, $func, "")
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        if ::log::log_enabled!(target: $cat, ::log::Level::Debug) {
            $crate::logging::write_log_enter(::log::Level::Debug, $cat, $func, &format!($($arg)*))
        }
    };
}

#[macro_export]
macro_rules! log_exit {
    ($cat:expr, $func:expr) => {
        $crate::logging::write_log_exit(::log::Level::Debug, $cat, $func, "")
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        if ::log::log_enabled!(target: $cat, ::log::Level::Debug) {
            $crate::logging::write_log_exit(::log::Level::Debug, $cat, $func, &format!($($arg)*))
        }
    };
}

// Re-export the macros so they can be imported via `use crate::logging::log_debug;`
pub use log_debug;
pub use log_warn;
pub use log_enter;
pub use log_exit;
