//! Logging macros that capture full call-site attribution
//!
//! ```ignore
//! use sinklog_logs::{log_error, log_info};
//!
//! log_info!(logger, "listening on {}", addr);
//! log_error!(logger, "boom {}", 42);
//! ```

/// Fully qualified path of the enclosing function
#[doc(hidden)]
#[macro_export]
macro_rules! __function_path {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::core::any::type_name::<T>()
        }
        let name = __type_name_of(__here);
        &name[..name.len() - "::__here".len()]
    }};
}

/// Capture the current call site
#[macro_export]
macro_rules! caller_info {
    () => {
        $crate::CallerInfo::new(
            $crate::__function_path!(),
            ::core::file!(),
            ::core::line!(),
        )
    };
}

/// Log at an explicit severity
#[macro_export]
macro_rules! log_at {
    ($logger:expr, $severity:expr, $($arg:tt)+) => {
        $logger.log($severity, $crate::caller_info!(), ::core::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debug($crate::caller_info!(), ::core::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_trace {
    ($logger:expr, $($arg:tt)+) => {
        $logger.trace($crate::caller_info!(), ::core::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.info($crate::caller_info!(), ::core::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warn($crate::caller_info!(), ::core::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.error($crate::caller_info!(), ::core::format_args!($($arg)+))
    };
}

/// Log at PANIC, close the logger, and unwind
#[macro_export]
macro_rules! log_panic {
    ($logger:expr, $($arg:tt)+) => {
        $logger.panic($crate::caller_info!(), ::core::format_args!($($arg)+))
    };
}

/// Log at FATAL, close the logger, and exit the process
#[macro_export]
macro_rules! log_fatal {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatal($crate::caller_info!(), ::core::format_args!($($arg)+))
    };
}
