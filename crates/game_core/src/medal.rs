use bevy::prelude::*;
use game_config::ScoringConfig;

/// Cosmetic tier awarded on the result screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Medal {
    Bronze,
    Silver,
    Gold,
}

impl Medal {
    /// Step function over the final score; each threshold is inclusive.
    pub fn for_score(score: u32, scoring: &ScoringConfig) -> Option<Medal> {
        if score >= scoring.gold {
            Some(Medal::Gold)
        } else if score >= scoring.silver {
            Some(Medal::Silver)
        } else if score >= scoring.bronze {
            Some(Medal::Bronze)
        } else {
            None
        }
    }

    pub fn color(self) -> Color {
        match self {
            Medal::Bronze => Color::srgb_u8(0xcd, 0x7f, 0x32),
            Medal::Silver => Color::srgb_u8(0xbf, 0xc0, 0xc0),
            Medal::Gold => Color::srgb_u8(0xff, 0xd7, 0x00),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Medal::Bronze => "БРОНЗА",
            Medal::Silver => "СЕРЕБРО",
            Medal::Gold => "ЗОЛОТО",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive() {
        let s = ScoringConfig::default();
        for score in 0..20 {
            assert_eq!(Medal::for_score(score, &s), None, "score {score}");
        }
        for score in 20..40 {
            assert_eq!(Medal::for_score(score, &s), Some(Medal::Bronze), "score {score}");
        }
        for score in 40..60 {
            assert_eq!(Medal::for_score(score, &s), Some(Medal::Silver), "score {score}");
        }
        assert_eq!(Medal::for_score(60, &s), Some(Medal::Gold));
    }

    #[test]
    fn medals_order_by_rank() {
        assert!(Medal::Bronze < Medal::Silver);
        assert!(Medal::Silver < Medal::Gold);
    }
}
