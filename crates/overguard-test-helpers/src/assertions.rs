//! Assertion macros for integrator values and tick sequences.

/// Assert that two floating-point values are within `tolerance`.
///
/// # Example
///
/// ```rust
/// use overguard_test_helpers::assert_approx_eq;
///
/// assert_approx_eq!(1.0, 1.0001, 0.001);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr $(,)?) => {
        $crate::assert_approx_eq!($left, $right, 1e-9)
    };
    ($left:expr, $right:expr, $tolerance:expr $(,)?) => {{
        let left: f64 = $left;
        let right: f64 = $right;
        let tolerance: f64 = $tolerance;
        let diff = (left - right).abs();
        if !(diff <= tolerance) {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}`,\n  tolerance: `{:?}`",
                left, right, diff, tolerance
            );
        }
    }};
}

/// Assert that a sequence strictly decreases element over element.
///
/// # Example
///
/// ```rust
/// use overguard_test_helpers::assert_strictly_decreasing;
///
/// assert_strictly_decreasing!(&[2.0, 1.0, -0.5]);
/// ```
#[macro_export]
macro_rules! assert_strictly_decreasing {
    ($collection:expr $(,)?) => {{
        let collection = $collection;
        let mut iter = collection.iter();
        if let Some(mut prev) = iter.next() {
            for (i, curr) in iter.enumerate() {
                if !(prev > curr) {
                    panic!(
                        "assertion failed: sequence is not strictly decreasing\n  violation at index {}: {:?} <= {:?}",
                        i + 1,
                        prev,
                        curr
                    );
                }
                prev = curr;
            }
        }
    }};
}
