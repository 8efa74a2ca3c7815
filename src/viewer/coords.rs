/// Mouse-over readout. The intensity is omitted when the cursor is off the
/// image.
pub fn format_readout(x: f64, y: f64, value: Option<f64>) -> String {
    match value {
        Some(z) => format!("x={x:.4}, y={y:.4}, z={z:.4}"),
        None => format!("x={x:.4}, y={y:.4}"),
    }
}

/// Nearest pixel as `(row, column)`, rounding half to even. Negative and
/// non-finite coordinates have no pixel.
pub fn pixel_index(x: f64, y: f64) -> Option<(usize, usize)> {
    if !x.is_finite() || !y.is_finite() {
        return None;
    }
    let column = x.round_ties_even();
    let row = y.round_ties_even();
    if column < 0.0 || row < 0.0 {
        return None;
    }
    Some((row as usize, column as usize))
}
