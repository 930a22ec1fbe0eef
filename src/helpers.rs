//! Small math utilities shared by movement systems

/// Critically-damped spring toward `target`, tracking rate in `velocity`.
/// `smooth_time` is roughly the time to cover most of the distance.
/// Matches the classic game-math formulation, including the overshoot clamp.
pub fn smooth_damp(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    dt: f32,
) -> f32 {
    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);
    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = target + (change + temp) * exp;
    // Don't overshoot the target
    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = (output - target) / dt;
    }
    output
}

/// True when `value` is within `epsilon` of zero
pub fn approx_zero(value: f32, epsilon: f32) -> bool {
    value.abs() <= epsilon
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smooth_damp_converges_to_target() {
        let mut value = 0.0;
        let mut rate = 0.0;
        for _ in 0..200 {
            value = smooth_damp(value, 5.0, &mut rate, 0.1, 1.0 / 60.0);
        }
        assert!((value - 5.0).abs() < 1e-3);
    }

    #[test]
    fn smooth_damp_never_overshoots() {
        let mut value: f32 = 0.0;
        let mut rate = 0.0;
        for _ in 0..300 {
            value = smooth_damp(value, 1.0, &mut rate, 0.05, 1.0 / 60.0);
            assert!(value <= 1.0 + 1e-6);
        }
    }

    #[test]
    fn smooth_damp_moves_toward_lower_target() {
        let mut value = 3.0;
        let mut rate = 0.0;
        let next = smooth_damp(value, -3.0, &mut rate, 0.1, 1.0 / 60.0);
        assert!(next < value);
        value = next;
        for _ in 0..200 {
            value = smooth_damp(value, -3.0, &mut rate, 0.1, 1.0 / 60.0);
        }
        assert!((value - -3.0).abs() < 1e-3);
    }

    #[test]
    fn approx_zero_respects_epsilon() {
        assert!(approx_zero(0.0005, 1e-3));
        assert!(!approx_zero(0.002, 1e-3));
    }
}
