const MIN_SAMPLE_SIZE: usize = 3;
const OUTLIER_Z: f64 = 2.0;

/// Distance of `value` from the sample mean in population standard
/// deviations. `None` for an empty sample or one without spread.
pub fn z_score(value: f64, sample: &[f64]) -> Option<f64> {
    if sample.is_empty() {
        return None;
    }

    let n = sample.len() as f64;
    let mean = sample.iter().sum::<f64>() / n;
    let variance = sample.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();

    if std_dev == 0.0 || !std_dev.is_finite() {
        return None;
    }

    Some((value - mean) / std_dev)
}

/// Advisory only: flags a value more than two standard deviations from the
/// sample mean. Samples smaller than three never flag anything.
pub fn is_outlier(value: f64, sample: &[f64]) -> bool {
    if sample.len() < MIN_SAMPLE_SIZE {
        return false;
    }

    match z_score(value, sample) {
        Some(z) => z.abs() > OUTLIER_Z,
        // No spread: anything off the common value stands out.
        None => sample.first().is_some_and(|first| (value - first).abs() > 0.0),
    }
}
