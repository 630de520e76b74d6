//! Convenience macros for error handling and propagation

/// Equivalent to `anyhow::ensure!` but for `UiError`
///
/// The two-argument form with an expression accepts any `UiError`, so callers
/// can pick the variant.
///
/// # Examples
///
/// ```rust
/// use cvm_common::{ensure, Result, UiError};
///
/// fn validate_ticks(ticks: &[f64]) -> Result<()> {
///     ensure!(!ticks.is_empty(), UiError::validation_field("no ticks", "ticks"));
///     ensure!(ticks.len() < 100, "too many ticks: {}", ticks.len());
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $msg:literal $(,)?) => {
        if !$cond {
            return Err($crate::UiError::new($msg));
        }
    };
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return Err($crate::UiError::from($err));
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)*) => {
        if !$cond {
            return Err($crate::UiError::new(format!($fmt, $($arg)*)));
        }
    };
}
