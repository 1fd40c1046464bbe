/// Checks that a numerical value is in the provided interval `[a,b]` and returns early
/// with an [`Error::InvalidConfiguration`](crate::Error::InvalidConfiguration) naming the
/// offending expression if not
///
/// ### Example
/// ```ignore
/// fn check(alpha: f32) -> gridq::Result<()> {
///     ensure_interval!(alpha, 0.0, 1.0);
///     Ok(())
/// }
/// ```
/// For `alpha = 2.0` this returns the error "Invalid value for \`alpha\`. Must be in the interval \[0, 1\]."
#[macro_export]
macro_rules! ensure_interval {
    ($var:expr, $a:expr, $b:expr) => {
        if !($var >= $a && $var <= $b) {
            return Err($crate::Error::InvalidConfiguration(format!(
                "Invalid value for `{}`. Must be in the interval [{}, {}].",
                stringify!($var),
                $a,
                $b,
            )));
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{Error, Result};

    fn check(alpha: f32) -> Result<()> {
        ensure_interval!(alpha, 0.0, 1.0);
        Ok(())
    }

    #[test]
    fn interval_bounds_inclusive() {
        assert!(check(0.0).is_ok());
        assert!(check(1.0).is_ok());
        assert!(check(0.5).is_ok());
    }

    #[test]
    fn interval_rejects_outside_and_nan() {
        for value in [-0.1, 1.1, f32::NAN] {
            match check(value) {
                Err(Error::InvalidConfiguration(msg)) => assert!(msg.contains("`alpha`"), "{msg}"),
                other => panic!("expected configuration error, got {other:?}"),
            }
        }
    }
}
