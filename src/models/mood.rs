use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MoodError;

/// Glyph shown when the classifier returns a label outside the known set.
pub const UNKNOWN_EMOJI: &str = "🤔";

/// The closed set of labels the classifier can produce. Score, emoji and
/// motivation text are fixed functions of the label and are never supplied
/// by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Joy,
    Sadness,
    Anger,
    Fear,
    Love,
    Neutral,
}

impl Mood {
    pub const ALL: [Mood; 6] = [
        Mood::Joy,
        Mood::Sadness,
        Mood::Anger,
        Mood::Fear,
        Mood::Love,
        Mood::Neutral,
    ];

    /// Sentiment weight in [-1.0, 1.0].
    pub const fn score(self) -> f64 {
        match self {
            Mood::Joy => 0.9,
            Mood::Love => 0.8,
            Mood::Neutral => 0.0,
            Mood::Sadness => -0.6,
            Mood::Fear => -0.7,
            Mood::Anger => -0.8,
        }
    }

    pub const fn emoji(self) -> &'static str {
        match self {
            Mood::Joy => "😊",
            Mood::Sadness => "😢",
            Mood::Anger => "😡",
            Mood::Fear => "😱",
            Mood::Love => "❤️",
            Mood::Neutral => "😐",
        }
    }

    /// Short encouragement shown right after an entry is logged.
    pub const fn motivation(self) -> &'static str {
        match self {
            Mood::Joy => "You're in a good mood, keep it going!",
            Mood::Sadness => "Feeling down is okay. Rest up and take care of yourself.",
            Mood::Anger => "Take a moment to cool off. Things will be alright.",
            Mood::Fear => "It's fine to be scared, but you're stronger than you think.",
            Mood::Love => "Love is all around you. Spread the positive energy!",
            Mood::Neutral => "A steady day. Keep your spirits up!",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Mood::Joy => "joy",
            Mood::Sadness => "sadness",
            Mood::Anger => "anger",
            Mood::Fear => "fear",
            Mood::Love => "love",
            Mood::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = MoodError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_lowercase().as_str() {
            "joy" => Ok(Mood::Joy),
            "sadness" => Ok(Mood::Sadness),
            "anger" => Ok(Mood::Anger),
            "fear" => Ok(Mood::Fear),
            "love" => Ok(Mood::Love),
            "neutral" => Ok(Mood::Neutral),
            other => Err(MoodError::Classification(format!(
                "Unknown mood label: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scores_stay_in_range() {
        for mood in Mood::ALL {
            assert!((-1.0..=1.0).contains(&mood.score()), "{} out of range", mood);
        }
    }

    #[test]
    fn test_emoji_and_score_fixed_per_label() {
        assert_eq!(Mood::Joy.emoji(), "😊");
        assert_eq!(Mood::Joy.score(), 0.9);
        assert_eq!(Mood::Anger.emoji(), "😡");
        assert_eq!(Mood::Anger.score(), -0.8);
        assert_eq!(Mood::Neutral.score(), 0.0);
    }

    #[test]
    fn test_parse_roundtrip() {
        for mood in Mood::ALL {
            assert_eq!(mood.as_str().parse::<Mood>().unwrap(), mood);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("  JOY ".parse::<Mood>().unwrap(), Mood::Joy);
    }

    #[test]
    fn test_parse_rejects_unknown_label() {
        assert!("ecstatic".parse::<Mood>().is_err());
    }
}
