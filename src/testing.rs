//! Testing helpers.

use assert_float_eq::*;

fn assert_same_length(expected: &[f64], actual: &[f64]) {
    assert_eq!(
        expected.len(),
        actual.len(),
        "lengths do not match: {} ≠ {}",
        expected.len(),
        actual.len()
    );
}

/// Element-wise relative comparison; exact matches (including zeros) always pass.
pub fn assert_slice_f64_relative(expected: &[f64], actual: &[f64], epsilon: f64) {
    assert_same_length(expected, actual);
    for (&expected, &actual) in expected.iter().zip(actual) {
        if actual != expected {
            assert_float_relative_eq!(expected, actual, epsilon);
        }
    }
}

/// Element-wise absolute comparison, for vectors holding vanishingly small tail probabilities.
pub fn assert_slice_f64_absolute(expected: &[f64], actual: &[f64], epsilon: f64) {
    assert_same_length(expected, actual);
    for (&expected, &actual) in expected.iter().zip(actual) {
        assert_float_absolute_eq!(expected, actual, epsilon);
    }
}
