//! Utilities for working with probabilities.

pub trait SliceExt {
    fn sum(&self) -> f64;
    fn normalise(&mut self, target: f64) -> f64;
    fn scale(&mut self, factor: f64);
    fn invert(&self) -> Vec<f64>;
}
impl SliceExt for [f64] {
    fn sum(&self) -> f64 {
        self.iter().sum()
    }

    fn normalise(&mut self, target: f64) -> f64 {
        let sum = self.sum();
        self.scale(target / sum);
        sum
    }

    fn scale(&mut self, factor: f64) {
        for element in self {
            *element *= factor;
        }
    }

    fn invert(&self) -> Vec<f64> {
        self.iter().map(|value| 1.0 / value).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::assert_slice_f64_relative;
    use assert_float_eq::*;

    #[test]
    fn sum() {
        let data = [0.0, 0.1, 0.2];
        assert_eq!(0.30000000000000004, data.sum());
    }

    #[test]
    fn normalise() {
        let mut data = [0.05, 0.1, 0.15, 0.2];
        let sum = data.normalise(1.0);
        assert_float_relative_eq!(0.5, sum, 1e-12);
        assert_slice_f64_relative(&[0.1, 0.2, 0.3, 0.4], &data, 1e-9);
    }

    #[test]
    fn scale() {
        let mut data = [0.5, 1.0, 2.0];
        data.scale(2.0);
        assert_eq!([1.0, 2.0, 4.0], data);
    }

    #[test]
    fn invert() {
        let data = [2.0, 4.0, 5.0];
        assert_eq!(vec![0.5, 0.25, 0.2], data.invert());
    }
}
