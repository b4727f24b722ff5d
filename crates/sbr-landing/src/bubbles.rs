//! Background bubble particles.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::LandingError;

/// Bounds for generated bubbles. All ranges are inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BubbleSettings {
    pub min_count: u32,
    pub max_count: u32,
    pub min_size_px: u32,
    pub max_size_px: u32,
    pub max_delay_s: u32,
    pub min_duration_s: u32,
    pub max_duration_s: u32,
    pub max_blur_px: u32,
}

impl Default for BubbleSettings {
    fn default() -> Self {
        Self {
            min_count: 20,
            max_count: 60,
            min_size_px: 3,
            max_size_px: 12,
            max_delay_s: 15,
            min_duration_s: 3,
            max_duration_s: 8,
            max_blur_px: 2,
        }
    }
}

impl BubbleSettings {
    pub fn validate(&self) -> Result<(), LandingError> {
        let ranges = [
            ("count", self.min_count, self.max_count),
            ("size", self.min_size_px, self.max_size_px),
            ("duration", self.min_duration_s, self.max_duration_s),
        ];
        for (setting, min, max) in ranges {
            if min > max {
                return Err(LandingError::InvalidRange { setting, min, max });
            }
        }
        Ok(())
    }
}

/// One bubble: a positioned container holding a sized dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bubble {
    /// Horizontal position, 0–100 % of the viewport width.
    pub left_percent: u8,
    pub size_px: u32,
    pub delay_s: u32,
    pub duration_s: u32,
    pub blur_px: u32,
}

impl Bubble {
    /// Inline style for the bubble container.
    pub fn style(&self) -> String {
        format!(
            "left: {}%; animation-duration: {}s; animation-delay: {}s; filter: blur({}px);",
            self.left_percent, self.duration_s, self.delay_s, self.blur_px
        )
    }

    /// Inline style for the dot inside the container.
    pub fn dot_style(&self) -> String {
        format!("width: {0}px; height: {0}px;", self.size_px)
    }
}

/// A generated set of bubbles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BubbleField {
    bubbles: Vec<Bubble>,
}

impl BubbleField {
    /// Generate a field within `settings`.
    pub fn generate(settings: &BubbleSettings, rng: &mut impl Rng) -> Result<Self, LandingError> {
        settings.validate()?;

        let count = rng.gen_range(settings.min_count..=settings.max_count);
        let bubbles = (0..count)
            .map(|_| Bubble {
                left_percent: rng.gen_range(0..=100),
                size_px: rng.gen_range(settings.min_size_px..=settings.max_size_px),
                delay_s: rng.gen_range(0..=settings.max_delay_s),
                duration_s: rng.gen_range(settings.min_duration_s..=settings.max_duration_s),
                blur_px: rng.gen_range(0..=settings.max_blur_px),
            })
            .collect();

        tracing::debug!(count, "generated bubble field");
        Ok(Self { bubbles })
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bubble> {
        self.bubbles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_bounds_hold_for_many_seeds() {
        let settings = BubbleSettings::default();
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let field = BubbleField::generate(&settings, &mut rng).unwrap();

            assert!((20..=60).contains(&field.len()), "seed {}", seed);
            for bubble in field.iter() {
                assert!(bubble.left_percent <= 100);
                assert!((3..=12).contains(&bubble.size_px));
                assert!(bubble.delay_s <= 15);
                assert!((3..=8).contains(&bubble.duration_s));
                assert!(bubble.blur_px <= 2);
            }
        }
    }

    #[test]
    fn test_same_seed_same_field() {
        let settings = BubbleSettings::default();
        let a = BubbleField::generate(&settings, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = BubbleField::generate(&settings, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_fixed_count() {
        let settings = BubbleSettings {
            min_count: 5,
            max_count: 5,
            ..Default::default()
        };
        let field = BubbleField::generate(&settings, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(field.len(), 5);
    }

    #[test]
    fn test_reversed_range_rejected() {
        let settings = BubbleSettings {
            min_size_px: 12,
            max_size_px: 3,
            ..Default::default()
        };
        let err = BubbleField::generate(&settings, &mut StdRng::seed_from_u64(1)).unwrap_err();
        assert_eq!(
            err,
            LandingError::InvalidRange {
                setting: "size",
                min: 12,
                max: 3
            }
        );
    }

    #[test]
    fn test_styles() {
        let bubble = Bubble {
            left_percent: 42,
            size_px: 7,
            delay_s: 3,
            duration_s: 5,
            blur_px: 1,
        };
        assert_eq!(
            bubble.style(),
            "left: 42%; animation-duration: 5s; animation-delay: 3s; filter: blur(1px);"
        );
        assert_eq!(bubble.dot_style(), "width: 7px; height: 7px;");
    }
}
