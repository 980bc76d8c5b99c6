// rank.rs — Score-based rank ladder.
//
// Purely cosmetic gamification: the total score maps onto a fixed ladder
// of titles. Thresholds are inclusive lower bounds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A player rank derived from the total score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Rank {
    /// Below 1,000 points.
    NoviceSeeker,
    /// 1,000 to 4,999 points.
    ApprenticeDisciple,
    /// 5,000 to 9,999 points.
    FaithfulTraveler,
    /// 10,000 to 24,999 points.
    MasterBuilder,
    /// 25,000 points and up.
    EternalQuestor,
}

impl Rank {
    /// Rank for a given total score. Negative scores map to the lowest rank.
    pub fn for_score(score: i64) -> Self {
        if score < 1_000 {
            Rank::NoviceSeeker
        } else if score < 5_000 {
            Rank::ApprenticeDisciple
        } else if score < 10_000 {
            Rank::FaithfulTraveler
        } else if score < 25_000 {
            Rank::MasterBuilder
        } else {
            Rank::EternalQuestor
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rank::NoviceSeeker => "Novice Seeker",
            Rank::ApprenticeDisciple => "Apprentice Disciple",
            Rank::FaithfulTraveler => "Faithful Traveler",
            Rank::MasterBuilder => "Master Builder",
            Rank::EternalQuestor => "Eternal Questor",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds() {
        assert_eq!(Rank::for_score(0), Rank::NoviceSeeker);
        assert_eq!(Rank::for_score(999), Rank::NoviceSeeker);
        assert_eq!(Rank::for_score(1_000), Rank::ApprenticeDisciple);
        assert_eq!(Rank::for_score(4_999), Rank::ApprenticeDisciple);
        assert_eq!(Rank::for_score(5_000), Rank::FaithfulTraveler);
        assert_eq!(Rank::for_score(10_000), Rank::MasterBuilder);
        assert_eq!(Rank::for_score(25_000), Rank::EternalQuestor);
        assert_eq!(Rank::for_score(1_000_000), Rank::EternalQuestor);
    }

    #[test]
    fn negative_score_is_lowest_rank() {
        assert_eq!(Rank::for_score(-50), Rank::NoviceSeeker);
    }

    #[test]
    fn ranks_are_ordered() {
        assert!(Rank::NoviceSeeker < Rank::EternalQuestor);
        assert!(Rank::for_score(100) < Rank::for_score(30_000));
    }

    #[test]
    fn display_names() {
        assert_eq!(Rank::NoviceSeeker.to_string(), "Novice Seeker");
        assert_eq!(Rank::EternalQuestor.to_string(), "Eternal Questor");
    }
}
