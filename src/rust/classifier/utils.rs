use ndarray::Array1;

/// Scales a fraction to a percentage rounded to two decimal places.
///
/// Exact ties round to even, judged on the exact value of `fraction * 100`
/// rather than on its scaled float, so `1/32` gives `3.12`.
pub(crate) fn to_percentage(fraction: f64) -> f64 {
    let percent = fraction * 100.0;
    let scaled = percent * 100.0;
    // Rounding error of the second multiplication, exact under fma
    let error = percent.mul_add(100.0, -scaled);
    let rounded = if scaled.fract().abs() == 0.5 && error != 0.0 {
        if error > 0.0 {
            scaled.ceil()
        } else {
            scaled.floor()
        }
    } else {
        scaled.round_ties_even()
    };
    rounded / 100.0
}

/// Index of the first maximum, or `None` for an empty vector.
pub(crate) fn argmax(values: &Array1<f64>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        if best.map_or(true, |(_, b)| v > b) {
            best = Some((i, v));
        }
    }
    best.map(|(i, _)| i)
}

pub(crate) fn normalize_counts(counts: &Array1<f64>) -> Array1<f64> {
    let total = counts.sum();
    if total > 0.0 {
        counts / total
    } else {
        Array1::zeros(counts.len())
    }
}
