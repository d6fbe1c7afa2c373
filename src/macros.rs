//! Logging macros
//!
//! Each level has a plain variant collecting message parts and an `…f!`
//! variant with `format!` semantics, mirroring the paired emit functions of
//! the public API.
//!
//! # Examples
//!
//! ```
//! use fanlog::prelude::*;
//! use fanlog::{info, infof};
//!
//! let logger = Logger::new();
//!
//! // Parts are joined by single spaces.
//! info!(logger, "listening on port", 8080, "tls", true);
//!
//! // Formatted variant.
//! infof!(logger, "listening on port {}", 8080);
//! # logger.flush();
//! ```

/// Build a `Vec<Part>` from a list of values.
#[macro_export]
macro_rules! parts {
    ($($part:expr),* $(,)?) => {
        vec![$($crate::Part::from($part)),*]
    };
}

/// Log at an explicit level.
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($part:expr),+ $(,)?) => {
        $logger.log($level, $crate::parts![$($part),+])
    };
}

/// Log a debug-level message from parts.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($part:expr),+ $(,)?) => {
        $logger.debug($crate::parts![$($part),+])
    };
}

/// Log an info-level message from parts.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($part:expr),+ $(,)?) => {
        $logger.info($crate::parts![$($part),+])
    };
}

/// Log a warn-level message from parts.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($part:expr),+ $(,)?) => {
        $logger.warn($crate::parts![$($part),+])
    };
}

/// Log an error-level message from parts.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($part:expr),+ $(,)?) => {
        $logger.error($crate::parts![$($part),+])
    };
}

/// Log a fatal-level message from parts.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($part:expr),+ $(,)?) => {
        $logger.fatal($crate::parts![$($part),+])
    };
}

/// Log a debug-level message with `format!` semantics.
#[macro_export]
macro_rules! debugf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debug($crate::parts![format!($($arg)+)])
    };
}

/// Log an info-level message with `format!` semantics.
#[macro_export]
macro_rules! infof {
    ($logger:expr, $($arg:tt)+) => {
        $logger.info($crate::parts![format!($($arg)+)])
    };
}

/// Log a warn-level message with `format!` semantics.
#[macro_export]
macro_rules! warnf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warn($crate::parts![format!($($arg)+)])
    };
}

/// Log an error-level message with `format!` semantics.
#[macro_export]
macro_rules! errorf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.error($crate::parts![format!($($arg)+)])
    };
}

/// Log a fatal-level message with `format!` semantics.
#[macro_export]
macro_rules! fatalf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatal($crate::parts![format!($($arg)+)])
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Level, Logger};

    #[test]
    fn test_log_macro() {
        let logger = Logger::new();
        log!(logger, Level::Info, "status", 200);
        log!(logger, Level::Warn, "retrying");
        logger.flush();
    }

    #[test]
    fn test_level_macros() {
        let logger = Logger::new();
        debug!(logger, "debug parts", 1, true);
        info!(logger, "info parts");
        warn!(logger, "warn parts", 2.5);
        error!(logger, "error parts");
        fatal!(logger, "fatal parts");
        logger.flush();
    }

    #[test]
    fn test_formatted_macros() {
        let logger = Logger::new();
        debugf!(logger, "counter: {}", 10);
        infof!(logger, "user {} logged in", "alice");
        warnf!(logger, "retry {} of {}", 1, 3);
        errorf!(logger, "code: {}", 500);
        fatalf!(logger, "lost {} shards", 2);
        logger.flush();
    }
}
