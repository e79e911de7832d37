//! Convenience macros for error handling and propagation

/// Equivalent to `anyhow::ensure!` but for `VisError`
///
/// # Examples
///
/// ```rust
/// use netvis_common::ensure;
/// use netvis_common::Result;
///
/// fn validate_positive(value: i32) -> Result<()> {
///     ensure!(value > 0, "Value must be positive, got: {}", value);
///     Ok(())
/// }
/// assert!(validate_positive(-1).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $msg:literal $(,)?) => {
        if !$cond {
            return Err($crate::VisError::new($msg));
        }
    };
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return Err($crate::VisError::new($err));
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)*) => {
        if !$cond {
            return Err($crate::VisError::new(format!($fmt, $($arg)*)));
        }
    };
}
