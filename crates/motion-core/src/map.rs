//! Range mapping between input and output intervals.

/// Map `value` from `input` to `output`, clamping to the output range.
///
/// Works for inverted ranges on either side, e.g. mapping a pointer
/// offset of `[-300, 300]` onto a tilt of `[15, -15]`. A degenerate input
/// range maps everything to the start of the output range.
pub fn map_range(value: f64, input: (f64, f64), output: (f64, f64)) -> f64 {
    let (in0, in1) = input;
    let (out0, out1) = output;
    let span = in1 - in0;
    if span == 0.0 || !span.is_finite() || value.is_nan() {
        return out0;
    }
    let t = ((value - in0) / span).clamp(0.0, 1.0);
    out0 + (out1 - out0) * t
}

/// Linear interpolation without clamping.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
