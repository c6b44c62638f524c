use crate::config::{ENTROPY_INCREASE, MAX_ENTROPY, PRESS_DECREMENT};

/// Bounded disorder scalar driving offset magnitude and hue.
///
/// Always within `[0, MAX_ENTROPY]`: frame advances saturate at the ceiling,
/// presses saturate at zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Entropy {
    value: f64,
}

impl Entropy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Per-frame increment, clamped at `MAX_ENTROPY`
    pub fn advance(&mut self) {
        self.value = (self.value + ENTROPY_INCREASE).min(MAX_ENTROPY);
    }

    /// Press handler: remove one unit, floored at zero
    pub fn press(&mut self) {
        self.value = (self.value - PRESS_DECREMENT).max(0.0);
    }

    pub fn is_saturated(&self) -> bool {
        self.value >= MAX_ENTROPY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn after_frames(frames: u32) -> Entropy {
        let mut entropy = Entropy::new();
        for _ in 0..frames {
            entropy.advance();
        }
        entropy
    }

    #[test]
    fn test_starts_at_zero() {
        assert_eq!(Entropy::new().value(), 0.0);
    }

    #[test]
    fn test_linear_growth_until_ceiling() {
        for frames in [0u32, 1, 10, 100, 499, 500, 501, 2000] {
            let expected = (frames as f64 * ENTROPY_INCREASE).min(MAX_ENTROPY);
            let actual = after_frames(frames).value();
            assert!(
                (actual - expected).abs() < 1e-6,
                "after {} frames expected {}, got {}",
                frames,
                expected,
                actual
            );
        }
    }

    #[test]
    fn test_never_exceeds_ceiling() {
        let entropy = after_frames(10_000);
        assert_eq!(entropy.value(), MAX_ENTROPY);
        assert!(entropy.is_saturated());
    }

    #[test]
    fn test_press_floors_at_zero() {
        let mut entropy = Entropy::new();
        entropy.press();
        entropy.press();
        assert_eq!(entropy.value(), 0.0);

        let mut entropy = after_frames(50);
        entropy.press();
        assert_eq!(entropy.value(), 0.0);
    }

    #[test]
    fn test_press_scenario() {
        let mut entropy = after_frames(250);
        assert!((entropy.value() - 2.5).abs() < 1e-6);

        entropy.press();
        assert!((entropy.value() - 1.5).abs() < 1e-6);

        for _ in 0..10 {
            entropy.press();
        }
        assert_eq!(entropy.value(), 0.0);
    }

    #[test]
    fn test_bounded_under_interleaving() {
        // Deterministic mix of frame advances and presses
        let mut entropy = Entropy::new();
        let mut state = 0x2545_f491_u32;
        for _ in 0..20_000 {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            if state % 97 == 0 {
                entropy.press();
            } else {
                entropy.advance();
            }
            let v = entropy.value();
            assert!((0.0..=MAX_ENTROPY).contains(&v), "entropy out of range: {}", v);
        }
    }
}
