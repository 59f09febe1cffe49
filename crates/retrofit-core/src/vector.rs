//! Dense vector arithmetic on `f64` slices.
//!
//! Everything here works in place or into caller-provided buffers; the
//! engine's inner loop never allocates per word.

use crate::constants::NORM_EPSILON;

/// L2-normalize in place, dividing by `sqrt(sum(x²) + 1e-6)`.
///
/// The epsilon keeps all-zero vectors finite (they stay zero).
pub fn normalize_in_place(v: &mut [f64]) {
    let norm = (v.iter().map(|x| x * x).sum::<f64>() + NORM_EPSILON).sqrt();
    for x in v.iter_mut() {
        *x /= norm;
    }
}

/// Euclidean norm.
pub fn l2_norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// `acc += other`.
pub fn add_assign(acc: &mut [f64], other: &[f64]) {
    for (a, b) in acc.iter_mut().zip(other) {
        *a += b;
    }
}

/// `acc += scale * other`.
pub fn add_scaled(acc: &mut [f64], other: &[f64], scale: f64) {
    for (a, b) in acc.iter_mut().zip(other) {
        *a += scale * b;
    }
}

/// `acc += target - source`.
pub fn add_difference(acc: &mut [f64], target: &[f64], source: &[f64]) {
    for ((a, t), s) in acc.iter_mut().zip(target).zip(source) {
        *a += t - s;
    }
}

/// Largest absolute componentwise difference. Mismatched lengths compare
/// over the shorter prefix.
pub fn max_abs_diff(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_divides_by_epsilon_norm() {
        let mut v = vec![3.0, 4.0];
        normalize_in_place(&mut v);
        let expected = (25.0f64 + NORM_EPSILON).sqrt();
        assert!((v[0] - 3.0 / expected).abs() < 1e-12);
        assert!((v[1] - 4.0 / expected).abs() < 1e-12);
        assert!(l2_norm(&v) < 1.0);
    }

    #[test]
    fn zero_vector_stays_zero() {
        let mut v = vec![0.0; 4];
        normalize_in_place(&mut v);
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn arithmetic_helpers() {
        let mut acc = vec![1.0, 1.0];
        add_assign(&mut acc, &[1.0, 2.0]);
        assert_eq!(acc, vec![2.0, 3.0]);
        add_scaled(&mut acc, &[1.0, 1.0], 2.0);
        assert_eq!(acc, vec![4.0, 5.0]);
        add_difference(&mut acc, &[0.0, 1.0], &[1.0, 0.0]);
        assert_eq!(acc, vec![3.0, 6.0]);
        assert_eq!(max_abs_diff(&acc, &[2.5, 6.0]), 0.5);
    }
}
