/// Captures the current [`CallSite`](crate::callsite::CallSite).
#[doc(hidden)]
#[macro_export]
macro_rules! __callsite {
    () => {{
        fn __alog_here() {}
        $crate::private::CallSite::new(
            ::core::module_path!(),
            ::core::file!(),
            ::core::line!(),
            $crate::private::type_name_of(__alog_here),
        )
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log {
    (@emit $logger:expr, $level:expr, $err:expr, $message:expr) => {{
        let __logger = $logger;
        let __level = $level;
        if __logger.is_enabled(__level) {
            let __site = $crate::__callsite!();
            __logger.log(__level, ::core::option::Option::Some(&__site), $err, $message);
        }
    }};
    ($logger:expr, $level:expr $(,)?) => {
        $crate::__log!(@emit $logger, $level, ::core::option::Option::None, $crate::Message::Empty)
    };
    ($logger:expr, $level:expr, err: $err:expr $(,)?) => {
        $crate::__log!(@emit $logger, $level,
            ::core::option::Option::Some($err as &(dyn ::std::error::Error + 'static)),
            $crate::Message::Empty)
    };
    ($logger:expr, $level:expr, err: $err:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__log!(@emit $logger, $level,
            ::core::option::Option::Some($err as &(dyn ::std::error::Error + 'static)),
            $crate::Message::Format($fmt, &[$(&$arg as &dyn $crate::Loggable),*]))
    };
    ($logger:expr, $level:expr, err: $err:expr, $value:expr $(,)?) => {
        $crate::__log!(@emit $logger, $level,
            ::core::option::Option::Some($err as &(dyn ::std::error::Error + 'static)),
            $crate::Message::Value(&$value))
    };
    ($logger:expr, $level:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__log!(@emit $logger, $level, ::core::option::Option::None,
            $crate::Message::Format($fmt, &[$(&$arg as &dyn $crate::Loggable),*]))
    };
    ($logger:expr, $level:expr, $value:expr $(,)?) => {
        $crate::__log!(@emit $logger, $level, ::core::option::Option::None,
            $crate::Message::Value(&$value))
    };
}

/// Logs a record at the given [`Level`](crate::Level).
///
/// Every form takes an optional leading `logger: <expr>;` to log through a
/// specific [`Logger`](crate::Logger) instead of the process-wide one. The
/// message can be:
///
/// - nothing, which emits only the prefix,
/// - a printf-style literal followed by arguments,
/// - a single value, rendered as if by `%s`,
/// - any of the above preceded by `err: <&error>,`, or just `err: <&error>`.
///
/// ```
/// use alog::Level;
///
/// let logger = alog::Logger::disabled();
/// let err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
///
/// alog::log!(Level::Info);
/// alog::log!(Level::Info, "Message %s, %d", "title", 100);
/// alog::log!(Level::Debug, vec![1, 2, 3]);
/// alog::log!(Level::Error, err: &err, "saving %s failed", "report.pdf");
/// alog::log!(logger: logger; Level::Warning, err: &err);
/// ```
#[macro_export]
macro_rules! log {
    (logger: $logger:expr; $level:expr $(, $($rest:tt)+)?) => {
        $crate::__log!(&$logger, $level $(, $($rest)+)?)
    };
    ($level:expr $(, $($rest:tt)+)?) => {
        $crate::__log!($crate::logger(), $level $(, $($rest)+)?)
    };
}

/// Logs at [`Level::Verbose`](crate::Level::Verbose). See [`log!`](crate::log!).
#[macro_export]
macro_rules! verbose {
    (logger: $logger:expr $(; $($rest:tt)+)?) => {
        $crate::__log!(&$logger, $crate::Level::Verbose $(, $($rest)+)?)
    };
    ($($rest:tt)*) => {
        $crate::__log!($crate::logger(), $crate::Level::Verbose, $($rest)*)
    };
}

/// Logs at [`Level::Debug`](crate::Level::Debug). See [`log!`](crate::log!).
#[macro_export]
macro_rules! debug {
    (logger: $logger:expr $(; $($rest:tt)+)?) => {
        $crate::__log!(&$logger, $crate::Level::Debug $(, $($rest)+)?)
    };
    ($($rest:tt)*) => {
        $crate::__log!($crate::logger(), $crate::Level::Debug, $($rest)*)
    };
}

/// Logs at [`Level::Info`](crate::Level::Info). See [`log!`](crate::log!).
///
/// ```
/// #[derive(Debug)]
/// struct Cart { items: u32 }
///
/// let cart = Cart { items: 3 };
/// alog::info!("checkout started for %s", alog::formatter::debug(&cart));
/// ```
#[macro_export]
macro_rules! info {
    (logger: $logger:expr $(; $($rest:tt)+)?) => {
        $crate::__log!(&$logger, $crate::Level::Info $(, $($rest)+)?)
    };
    ($($rest:tt)*) => {
        $crate::__log!($crate::logger(), $crate::Level::Info, $($rest)*)
    };
}

/// Logs at [`Level::Warning`](crate::Level::Warning). See [`log!`](crate::log!).
#[macro_export]
macro_rules! warning {
    (logger: $logger:expr $(; $($rest:tt)+)?) => {
        $crate::__log!(&$logger, $crate::Level::Warning $(, $($rest)+)?)
    };
    ($($rest:tt)*) => {
        $crate::__log!($crate::logger(), $crate::Level::Warning, $($rest)*)
    };
}

/// Logs at [`Level::Error`](crate::Level::Error). See [`log!`](crate::log!).
#[macro_export]
macro_rules! error {
    (logger: $logger:expr $(; $($rest:tt)+)?) => {
        $crate::__log!(&$logger, $crate::Level::Error $(, $($rest)+)?)
    };
    ($($rest:tt)*) => {
        $crate::__log!($crate::logger(), $crate::Level::Error, $($rest)*)
    };
}

/// Logs at [`Level::Wtf`](crate::Level::Wtf). See [`log!`](crate::log!).
#[macro_export]
macro_rules! wtf {
    (logger: $logger:expr $(; $($rest:tt)+)?) => {
        $crate::__log!(&$logger, $crate::Level::Wtf $(, $($rest)+)?)
    };
    ($($rest:tt)*) => {
        $crate::__log!($crate::logger(), $crate::Level::Wtf, $($rest)*)
    };
}
