//! Descriptive statistics over plain `f64` slices.

use serde::{Deserialize, Serialize};

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator). Fewer than two values give 0.
pub fn sample_std(values: &[f64], mean: f64) -> f64 {
    let n = values.len() as f64;
    if n < 2.0 {
        return 0.0;
    }
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

/// Quantile of already sorted values, linear interpolation between ranks.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let pos = q.clamp(0.0, 1.0) * last as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Describe {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub max: f64,
}

pub fn describe(values: &[f64]) -> Option<Describe> {
    let mean = mean(values)?;
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Some(Describe {
        count: values.len(),
        mean,
        std: sample_std(values, mean),
        min: sorted[0],
        q25: quantile(&sorted, 0.25)?,
        q50: quantile(&sorted, 0.50)?,
        q75: quantile(&sorted, 0.75)?,
        max: sorted[sorted.len() - 1],
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBucket {
    pub left_edge: f64,
    pub width: f64,
    pub count: usize,
}

/// Equal-width buckets over `[min, max]`.
///
/// Buckets are `[edge, edge + width)` except the last, which also holds `max`.
/// A zero range is widened to `[v - 0.5, v + 0.5]`. Returns `None` for an
/// empty slice or zero buckets.
pub fn histogram(values: &[f64], bucket_count: usize) -> Option<Vec<HistogramBucket>> {
    if values.is_empty() || bucket_count == 0 {
        return None;
    }
    let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if hi == lo {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bucket_count as f64;

    let mut buckets: Vec<HistogramBucket> = (0..bucket_count)
        .map(|i| HistogramBucket {
            left_edge: lo + width * i as f64,
            width,
            count: 0,
        })
        .collect();
    let last = bucket_count - 1;
    for &v in values {
        let mut idx = (((v - lo) / width).floor() as usize).min(last);
        // Correct for float error at bucket edges.
        while idx > 0 && v < buckets[idx].left_edge {
            idx -= 1;
        }
        while idx < last && v >= buckets[idx + 1].left_edge {
            idx += 1;
        }
        buckets[idx].count += 1;
    }
    Some(buckets)
}

/// Pearson correlation. `None` when the slices differ in length, are empty,
/// or either side has zero variance.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() {
        return None;
    }
    let mx = mean(xs)?;
    let my = mean(ys)?;
    let mut cov = 0.0;
    let mut vx = 0.0;
    let mut vy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mx;
        let dy = y - my;
        cov += dx * dy;
        vx += dx * dx;
        vy += dy * dy;
    }
    if vx == 0.0 || vy == 0.0 {
        return None;
    }
    Some((cov / (vx.sqrt() * vy.sqrt())).clamp(-1.0, 1.0))
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
    fn std_matches_sample_formula() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let m = mean(&v).unwrap();
        assert!((sample_std(&v, m) - 2.138089935).abs() < 1e-6);
        assert_eq!(sample_std(&[3.0], 3.0), 0.0);
    }

    #[test]
    fn quantiles_interpolate() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.5), Some(2.5));
        assert_eq!(quantile(&sorted, 0.25), Some(1.75));
        assert_eq!(quantile(&sorted, 1.0), Some(4.0));
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn histogram_closes_last_bucket() {
        let buckets = histogram(&[0.0, 1.0, 2.0, 3.0, 4.0], 4).unwrap();
        let counts: Vec<usize> = buckets.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 1, 1, 2]);
        assert_eq!(buckets[0].left_edge, 0.0);
        assert_eq!(buckets[3].left_edge, 3.0);
    }

    #[test]
    fn histogram_half_open_edges() {
        // 5.0 sits exactly on the second bucket's left edge.
        let buckets = histogram(&[0.0, 5.0, 10.0], 2).unwrap();
        assert_eq!(buckets[0].count, 1);
        assert_eq!(buckets[1].count, 2);
    }

    #[test]
    fn histogram_of_constant_values() {
        let buckets = histogram(&[1.0, 1.0, 1.0], 2).unwrap();
        assert_eq!(buckets[0].left_edge, 0.5);
        assert_eq!(buckets.iter().map(|b| b.count).sum::<usize>(), 3);
        assert!(histogram(&[1.0], 0).is_none());
    }

    #[test]
    fn pearson_extremes() {
        let xs = [1.0, 2.0, 3.0];
        assert!((pearson(&xs, &[2.0, 4.0, 6.0]).unwrap() - 1.0).abs() < 1e-12);
        assert!((pearson(&xs, &[3.0, 2.0, 1.0]).unwrap() + 1.0).abs() < 1e-12);
        assert_eq!(pearson(&xs, &[1.0, 1.0, 1.0]), None);
    }
}
