//! Internal tracing macro; compiles to nothing without the `log` feature.

#[cfg(feature = "log")]
macro_rules! trace {
    ($($arg:tt)*) => {
        ::log::trace!(target: "symvec", $($arg)*)
    };
}

#[cfg(not(feature = "log"))]
macro_rules! trace {
    ($($arg:tt)*) => {
        if false {
            let _ = format_args!($($arg)*);
        }
    };
}
