/// Counts a "seconds remaining" field down by `dt`, never below zero.
///
/// Fire cooldown, invincibility and active power-up durations all tick through
/// here so they clamp identically.
#[inline]
pub fn decay(remaining: f64, dt: f64) -> f64 {
    (remaining - dt).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::decay;

    #[test]
    fn decays_by_dt() {
        assert!((decay(1.0, 0.25) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn floors_at_zero() {
        assert_eq!(decay(0.1, 0.5), 0.0);
        assert_eq!(decay(0.0, 0.016), 0.0);
    }
}
