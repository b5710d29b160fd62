// -----------------------------------------------------------------------------
// Compilation config

/// Expands the body only in debug builds with the `debug` feature.
macro_rules! debug {
    ($($tt:tt)*) => {
        #[cfg(all(debug_assertions, feature = "debug"))]
        {
            $($tt)*
        }
    };
}

pub(crate) use debug;
