//! Scalar statistics over `f64` slices.
//!
//! All helpers return `None` when the input does not carry enough data to
//! produce a meaningful result; callers decide whether `None` maps to a zero
//! sentinel or an unavailable field.

/// Arithmetic mean. `None` for an empty slice.
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Sample variance (n - 1 denominator). `None` for fewer than 2 observations.
pub fn variance(data: &[f64]) -> Option<f64> {
    if data.len() < 2 {
        return None;
    }
    let m = mean(data)?;
    let sum_sq: f64 = data.iter().map(|value| (value - m) * (value - m)).sum();
    Some(sum_sq / (data.len() - 1) as f64)
}

/// Sample standard deviation. `None` for fewer than 2 observations.
pub fn std_dev(data: &[f64]) -> Option<f64> {
    variance(data).map(f64::sqrt)
}

/// Population variance (n denominator). `None` for an empty slice.
pub fn population_variance(data: &[f64]) -> Option<f64> {
    let m = mean(data)?;
    let sum_sq: f64 = data.iter().map(|value| (value - m) * (value - m)).sum();
    Some(sum_sq / data.len() as f64)
}

/// Sample covariance between two equally long slices (n - 1 denominator).
pub fn covariance(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let mx = mean(xs)?;
    let my = mean(ys)?;
    let sum: f64 = xs
        .iter()
        .zip(ys)
        .map(|(x, y)| (x - mx) * (y - my))
        .sum();
    Some(sum / (xs.len() - 1) as f64)
}

/// Percentile in `[0, 100]` with linear interpolation between order
/// statistics. `None` for an empty slice or an out-of-range rank.
pub fn percentile(data: &[f64], pct: f64) -> Option<f64> {
    if data.is_empty() || !(0.0..=100.0).contains(&pct) {
        return None;
    }

    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let rank = pct / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64))
}

/// Sample-adjusted skewness (adjusted Fisher-Pearson estimator).
///
/// `None` for fewer than 3 observations or zero dispersion.
pub fn skewness(data: &[f64]) -> Option<f64> {
    let n = data.len();
    if n < 3 {
        return None;
    }
    let m = mean(data)?;
    let s = std_dev(data)?;
    if s == 0.0 {
        return None;
    }

    let sum_cubed: f64 = data
        .iter()
        .map(|value| {
            let z = (value - m) / s;
            z * z * z
        })
        .sum();
    let n = n as f64;
    Some(n / ((n - 1.0) * (n - 2.0)) * sum_cubed)
}

/// Sample-adjusted excess kurtosis.
///
/// `None` for fewer than 4 observations or zero dispersion.
pub fn kurtosis(data: &[f64]) -> Option<f64> {
    let n = data.len();
    if n < 4 {
        return None;
    }
    let m = mean(data)?;
    let s = std_dev(data)?;
    if s == 0.0 {
        return None;
    }

    let sum_quartic: f64 = data
        .iter()
        .map(|value| {
            let z = (value - m) / s;
            z * z * z * z
        })
        .sum();
    let n = n as f64;
    let leading = n * (n + 1.0) / ((n - 1.0) * (n - 2.0) * (n - 3.0));
    let correction = 3.0 * (n - 1.0) * (n - 1.0) / ((n - 2.0) * (n - 3.0));
    Some(leading * sum_quartic - correction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
    }

    #[test]
    fn sample_variance_and_std() {
        let v = variance(&[1.0, 2.0, 3.0]).expect("variance");
        assert!((v - 1.0).abs() < 1e-12);
        let s = std_dev(&[1.0, 2.0, 3.0]).expect("std dev");
        assert!((s - 1.0).abs() < 1e-12);
    }

    #[test]
    fn population_variance_uses_n_denominator() {
        let v = population_variance(&[2.0, 4.0, 6.0]).expect("variance");
        assert!((v - 8.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn covariance_of_scaled_series() {
        let cov = covariance(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).expect("covariance");
        assert!((cov - 2.0).abs() < 1e-12);
        assert_eq!(covariance(&[1.0], &[1.0]), None);
        assert_eq!(covariance(&[1.0, 2.0], &[1.0]), None);
    }

    #[test]
    fn percentile_interpolates_linearly() {
        let data = [5.0, 1.0, 3.0, 2.0, 4.0];
        let median = percentile(&data, 50.0).expect("median");
        assert!((median - 3.0).abs() < 1e-12);
        let p5 = percentile(&data, 5.0).expect("p5");
        assert!((p5 - 1.2).abs() < 1e-12);
        assert_eq!(percentile(&[], 50.0), None);
    }

    #[test]
    fn skewness_sign_tracks_tail() {
        let symmetric = [-2.0, -1.0, 0.0, 1.0, 2.0];
        let skew = skewness(&symmetric).expect("skew");
        assert!(skew.abs() < 1e-12);

        let right_tailed = [0.0, 0.0, 0.0, 0.0, 10.0];
        assert!(skewness(&right_tailed).expect("skew") > 0.0);

        assert_eq!(skewness(&[1.0, 1.0, 1.0]), None);
    }

    #[test]
    fn kurtosis_requires_dispersion() {
        assert_eq!(kurtosis(&[3.0, 3.0, 3.0, 3.0]), None);
        let heavy_tailed = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 20.0];
        assert!(kurtosis(&heavy_tailed).expect("kurtosis") > 0.0);
    }
}
