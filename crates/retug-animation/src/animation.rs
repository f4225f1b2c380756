/// Easing functions for settle animations, matching the Jetpack Compose
/// material curves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    /// Linear interpolation (no easing).
    LinearEasing,
    /// Ease out using cubic curve.
    EaseOut,
    /// Fast out, slow in (material design standard).
    FastOutSlowInEasing,
    /// Linear out, slow in (material design); the classic decelerate curve.
    LinearOutSlowInEasing,
}

impl Easing {
    /// Apply the easing function to a linear fraction [0, 1].
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::LinearEasing => fraction,
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, fraction),
            Easing::FastOutSlowInEasing => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
            Easing::LinearOutSlowInEasing => cubic_bezier(0.0, 0.0, 0.2, 1.0, fraction),
        }
    }
}

/// Cubic bezier curve approximation for easing.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    // Polynomial coefficients for one bezier axis with endpoints 0 and 1.
    fn coefficients(p1: f32, p2: f32) -> (f32, f32, f32) {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        let a = 1.0 - c - b;
        (a, b, c)
    }

    fn sample(coeffs: (f32, f32, f32), t: f32) -> f32 {
        let (a, b, c) = coeffs;
        ((a * t + b) * t + c) * t
    }

    fn sample_derivative(coeffs: (f32, f32, f32), t: f32) -> f32 {
        let (a, b, c) = coeffs;
        (3.0 * a * t + 2.0 * b) * t + c
    }

    let x_coeffs = coefficients(x1, x2);
    let y_coeffs = coefficients(y1, y2);

    // Newton-Raphson for the parametric `t` whose x equals `fraction`,
    // clamped to [0, 1] to keep the iteration in bounds.
    let mut t = fraction;
    let mut converged = false;
    for _ in 0..8 {
        let error = sample(x_coeffs, t) - fraction;
        if error.abs() < 1e-6 {
            converged = true;
            break;
        }
        let slope = sample_derivative(x_coeffs, t);
        if slope.abs() < 1e-6 {
            break;
        }
        t = (t - error / slope).clamp(0.0, 1.0);
    }

    if !converged {
        // Binary subdivision fallback when the slope flattens out.
        let mut low = 0.0;
        let mut high = 1.0;
        t = fraction;
        for _ in 0..16 {
            let error = sample(x_coeffs, t) - fraction;
            if error.abs() < 1e-6 {
                break;
            }
            if error > 0.0 {
                high = t;
            } else {
                low = t;
            }
            t = 0.5 * (low + high);
        }
    }

    sample(y_coeffs, t)
}

/// Animation specification combining duration and easing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    /// Duration in milliseconds.
    pub duration_millis: u64,
    /// Easing function to apply.
    pub easing: Easing,
}

impl AnimationSpec {
    /// Create a tween animation with duration and easing.
    pub const fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
        }
    }

    /// Create a linear tween animation.
    pub const fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::LinearEasing)
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(300, Easing::FastOutSlowInEasing)
    }
}

/// One frame's worth of a [`ScrollSession`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSample {
    /// Interpolated offset for this frame.
    pub value: f32,
    /// True on the sample that lands exactly on the target.
    pub finished: bool,
}

/// A one-shot settle tween between two spinner offsets.
///
/// A fresh session is created for every settle request; sessions are never
/// reused or force-finished. The start time latches on the first sample, so
/// scheduling latency never eats into the animation.
#[derive(Debug, Clone)]
pub struct ScrollSession {
    from: f32,
    to: f32,
    spec: AnimationSpec,
    start_time_nanos: Option<u64>,
}

impl ScrollSession {
    pub fn new(from: f32, to: f32, spec: AnimationSpec) -> Self {
        Self {
            from,
            to,
            spec,
            start_time_nanos: None,
        }
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    /// Samples the tween at `frame_time_nanos`.
    ///
    /// The final sample returns the target exactly, with no floating point
    /// residue from the interpolation.
    pub fn sample(&mut self, frame_time_nanos: u64) -> ScrollSample {
        let start = *self.start_time_nanos.get_or_insert(frame_time_nanos);
        let elapsed_millis = frame_time_nanos.saturating_sub(start) / 1_000_000;
        if elapsed_millis >= self.spec.duration_millis {
            return ScrollSample {
                value: self.to,
                finished: true,
            };
        }
        let fraction = elapsed_millis as f32 / self.spec.duration_millis as f32;
        let eased = self.spec.easing.transform(fraction);
        ScrollSample {
            value: self.from + (self.to - self.from) * eased,
            finished: false,
        }
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
