//! Session phases and the static phase table
//!
//! A creative session advances through a fixed, totally ordered set of
//! phases. The phase table maps each phase to the ordered roster of
//! specialist roles that participate in it. Both the succession order and
//! the rosters are static; they are safe to share across any number of
//! orchestrators.

use crate::specialist::role::SpecialistRole;
use serde::{Deserialize, Serialize};

/// Phase of a creative session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Open brainstorming - style, composition, and story explore the idea
    Ideation,
    /// The critic joins to tighten the concept
    Refinement,
    /// The technical director translates the concept into parameters
    Synthesis,
    /// Final critique pass before generation
    Review,
    /// An image generation job is in flight; no specialists speak
    Generating,
    /// Terminal phase; the session is finished
    Complete,
}

impl Phase {
    /// All phases in succession order.
    pub const ALL: [Phase; 6] = [
        Phase::Ideation,
        Phase::Refinement,
        Phase::Synthesis,
        Phase::Review,
        Phase::Generating,
        Phase::Complete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Ideation => "ideation",
            Phase::Refinement => "refinement",
            Phase::Synthesis => "synthesis",
            Phase::Review => "review",
            Phase::Generating => "generating",
            Phase::Complete => "complete",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Phase::Ideation => "Ideation",
            Phase::Refinement => "Refinement",
            Phase::Synthesis => "Synthesis",
            Phase::Review => "Review",
            Phase::Generating => "Generating",
            Phase::Complete => "Complete",
        }
    }

    /// The phase immediately following this one in the fixed order.
    ///
    /// `Complete` is a fixed point: advancing past it returns `Complete`.
    pub fn next(&self) -> Phase {
        match self {
            Phase::Ideation => Phase::Refinement,
            Phase::Refinement => Phase::Synthesis,
            Phase::Synthesis => Phase::Review,
            Phase::Review => Phase::Generating,
            Phase::Generating => Phase::Complete,
            Phase::Complete => Phase::Complete,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Complete)
    }

    /// The ordered roster of specialist roles active in this phase.
    ///
    /// The order is significant: specialists speak strictly in roster order
    /// within a round. `Generating` and `Complete` have empty rosters.
    pub fn roster(&self) -> &'static [SpecialistRole] {
        match self {
            Phase::Ideation => &[
                SpecialistRole::Style,
                SpecialistRole::Composition,
                SpecialistRole::Story,
            ],
            Phase::Refinement => &[
                SpecialistRole::Style,
                SpecialistRole::Composition,
                SpecialistRole::Story,
                SpecialistRole::Critic,
            ],
            Phase::Synthesis => &[SpecialistRole::Technical],
            Phase::Review => &[SpecialistRole::Critic],
            Phase::Generating | Phase::Complete => &[],
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Phase {
    type Err = crate::core::error::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ideation" => Ok(Phase::Ideation),
            "refinement" => Ok(Phase::Refinement),
            "synthesis" => Ok(Phase::Synthesis),
            "review" => Ok(Phase::Review),
            "generating" => Ok(Phase::Generating),
            "complete" => Ok(Phase::Complete),
            other => Err(crate::core::error::DomainError::UnknownPhase(
                other.to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn succession_reaches_complete_and_stays() {
        for start in Phase::ALL {
            let mut phase = start;
            for _ in 0..Phase::ALL.len() {
                phase = phase.next();
            }
            assert_eq!(phase, Phase::Complete);
        }
        assert_eq!(Phase::Complete.next(), Phase::Complete);
    }

    #[test]
    fn succession_follows_fixed_order() {
        assert_eq!(Phase::Ideation.next(), Phase::Refinement);
        assert_eq!(Phase::Refinement.next(), Phase::Synthesis);
        assert_eq!(Phase::Synthesis.next(), Phase::Review);
        assert_eq!(Phase::Review.next(), Phase::Generating);
        assert_eq!(Phase::Generating.next(), Phase::Complete);
    }

    #[test]
    fn ideation_roster_order() {
        assert_eq!(
            Phase::Ideation.roster(),
            &[
                SpecialistRole::Style,
                SpecialistRole::Composition,
                SpecialistRole::Story,
            ]
        );
    }

    #[test]
    fn refinement_adds_critic_last() {
        assert_eq!(
            Phase::Refinement.roster().last(),
            Some(&SpecialistRole::Critic)
        );
        assert_eq!(Phase::Refinement.roster().len(), 4);
    }

    #[test]
    fn generating_and_complete_have_empty_rosters() {
        assert!(Phase::Generating.roster().is_empty());
        assert!(Phase::Complete.roster().is_empty());
    }

    #[test]
    fn phase_string_roundtrip() {
        for phase in Phase::ALL {
            let parsed: Phase = phase.as_str().parse().unwrap();
            assert_eq!(parsed, phase);
        }
        assert!("warmup".parse::<Phase>().is_err());
    }

    #[test]
    fn serde_as_lowercase_string() {
        let json = serde_json::to_string(&Phase::Ideation).unwrap();
        assert_eq!(json, "\"ideation\"");
        let back: Phase = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Phase::Ideation);
    }
}
