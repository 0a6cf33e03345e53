/// Comparison tolerance used across the engine. Surface-acne offsets
/// (over/under points) and degenerate-direction checks all use this value.
pub const EPSILON: f64 = 1e-5;

/// True iff `a` and `b` differ by less than [`EPSILON`].
pub fn near_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

pub fn min_max(a: f64, b: f64) -> (f64, f64) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

#[macro_export]
macro_rules! assert_close {
    ($left:expr, $right:expr) => {
        if ($left - $right).abs() >= 1e-4 {
            panic!(
                "Assertion failed: {} close to {} (values: {} vs. {})",
                stringify!($left),
                stringify!($right),
                $left,
                $right
            )
        }
    };
    ($left:expr, $right:expr, $tol:expr) => {
        if ($left - $right).abs() >= $tol {
            panic!(
                "Assertion failed: {} close to {} (values: {} vs. {}, tol {})",
                stringify!($left),
                stringify!($right),
                $left,
                $right,
                $tol
            )
        }
    };
}

#[macro_export]
macro_rules! assert_le {
    ($left:expr, $right:expr) => {
        if $left > $right {
            panic!(
                "Assertion failed: {} <= {} (values: {} vs. {})",
                stringify!($left),
                stringify!($right),
                $left,
                $right
            )
        }
    };
}

#[macro_export]
macro_rules! assert_ge {
    ($left:expr, $right:expr) => {
        if $left < $right {
            panic!(
                "Assertion failed: {} >= {} (values: {} vs. {})",
                stringify!($left),
                stringify!($right),
                $left,
                $right
            )
        }
    };
}
