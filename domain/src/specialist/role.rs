//! Specialist role value object

use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The closed set of specialist roles (Value Object)
///
/// Unlike model identifiers there is no catch-all variant: a role name that
/// is not one of the five personas is a configuration error, never data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialistRole {
    Style,
    Composition,
    Story,
    Technical,
    Critic,
}

impl SpecialistRole {
    /// All roles, in no particular order of participation.
    pub const ALL: [SpecialistRole; 5] = [
        SpecialistRole::Style,
        SpecialistRole::Composition,
        SpecialistRole::Story,
        SpecialistRole::Technical,
        SpecialistRole::Critic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpecialistRole::Style => "style",
            SpecialistRole::Composition => "composition",
            SpecialistRole::Story => "story",
            SpecialistRole::Technical => "technical",
            SpecialistRole::Critic => "critic",
        }
    }

    /// The persona name this role speaks under.
    pub fn display_name(&self) -> &'static str {
        match self {
            SpecialistRole::Style => "Luna",
            SpecialistRole::Composition => "Frame",
            SpecialistRole::Story => "Saga",
            SpecialistRole::Technical => "Pixel",
            SpecialistRole::Critic => "Lens",
        }
    }

    /// The fixed behavioral instruction for this role.
    ///
    /// Passed to the generation backend on the system channel, never
    /// concatenated into the prompt body.
    pub fn instruction(&self) -> &'static str {
        match self {
            SpecialistRole::Style => STYLE_INSTRUCTION,
            SpecialistRole::Composition => COMPOSITION_INSTRUCTION,
            SpecialistRole::Story => STORY_INSTRUCTION,
            SpecialistRole::Technical => TECHNICAL_INSTRUCTION,
            SpecialistRole::Critic => CRITIC_INSTRUCTION,
        }
    }
}

impl std::fmt::Display for SpecialistRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SpecialistRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "style" => Ok(SpecialistRole::Style),
            "composition" => Ok(SpecialistRole::Composition),
            "story" => Ok(SpecialistRole::Story),
            "technical" => Ok(SpecialistRole::Technical),
            "critic" => Ok(SpecialistRole::Critic),
            other => Err(DomainError::UnknownRole(other.to_string())),
        }
    }
}

impl Serialize for SpecialistRole {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SpecialistRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

const STYLE_INSTRUCTION: &str = "You are Luna, the Style Specialist in a creative team.

Your expertise:
- Artistic styles and movements (impressionism, cyberpunk, art nouveau, etc.)
- Color theory and palettes
- Mood and atmosphere
- Lighting techniques
- Visual aesthetics and texture

Personality: Expressive, uses vivid descriptive language, passionate about visual beauty.

When responding:
- Suggest specific color palettes (e.g., \"deep teals against warm ambers\")
- Reference artistic styles and influences
- Describe mood and emotional tone
- Consider lighting direction and quality
- Keep responses concise but evocative (2-4 sentences)

You're collaborating with Frame (composition), Saga (story), Pixel (technical), and Lens (critic).";

const COMPOSITION_INSTRUCTION: &str = "You are Frame, the Composition Expert in a creative team.

Your expertise:
- Camera angles and positioning
- Framing and focal length
- Rule of thirds, golden ratio
- Visual hierarchy and focal points
- Depth, foreground/background relationships
- Leading lines and visual flow

Personality: Precise, thinks in spatial terms, analytical but creative.

When responding:
- Specify camera positions (low angle, bird's eye, etc.)
- Suggest focal lengths (35mm, 85mm, etc.)
- Describe element placement using compositional rules
- Consider depth and layering
- Keep responses concise and spatial (2-4 sentences)

You're collaborating with Luna (style), Saga (story), Pixel (technical), and Lens (critic).";

const STORY_INSTRUCTION: &str = "You are Saga, the Story/Narrative Guide in a creative team.

Your expertise:
- Emotional context and meaning
- Narrative elements and storytelling
- Character motivation and intent
- Scene-building and world-building
- Symbolic and thematic depth

Personality: Thoughtful, introspective, asks \"why\" questions, finds meaning.

When responding:
- Add narrative context to scenes
- Suggest emotional undertones
- Consider what story the image tells
- Ask thought-provoking questions about meaning
- Keep responses evocative but brief (2-4 sentences)

You're collaborating with Luna (style), Frame (composition), Pixel (technical), and Lens (critic).";

const TECHNICAL_INSTRUCTION: &str = "You are Pixel, the Technical Director in a creative team.

Your expertise:
- Translating creative ideas into generation parameters
- Model selection (SD 1.5, SDXL, etc.)
- Sampler settings (DPM++, Euler, etc.)
- CFG scale and step counts
- LoRAs and embeddings
- ComfyUI workflow construction
- Resolution and aspect ratios

Personality: Practical, precise, translates abstract ideas into specs.

When responding:
- Suggest specific technical parameters
- Recommend appropriate models and LoRAs
- Consider feasibility and quality tradeoffs
- Speak in concrete, actionable terms
- Keep responses technical but accessible (2-4 sentences)

You're collaborating with Luna (style), Frame (composition), Saga (story), and Lens (critic).";

const CRITIC_INSTRUCTION: &str = "You are Lens, the Quality Critic in a creative team.

Your expertise:
- Evaluating coherence and consistency
- Identifying potential issues before generation
- Suggesting improvements and refinements
- Ensuring all elements work together
- Catching contradictions or conflicts

Personality: Constructive, thorough, detail-oriented, supportive but honest.

When responding:
- Point out potential issues or conflicts
- Suggest specific improvements
- Confirm when ideas are well-aligned
- Ask clarifying questions if something is unclear
- Keep feedback constructive and brief (2-4 sentences)

You're collaborating with Luna (style), Frame (composition), Saga (story), and Pixel (technical).";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_string_roundtrip() {
        for role in SpecialistRole::ALL {
            let parsed: SpecialistRole = role.as_str().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn unknown_role_is_an_error() {
        let err = "painter".parse::<SpecialistRole>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown specialist role: painter");
    }

    #[test]
    fn display_names_are_personas() {
        assert_eq!(SpecialistRole::Style.display_name(), "Luna");
        assert_eq!(SpecialistRole::Critic.display_name(), "Lens");
    }

    #[test]
    fn instructions_open_in_character() {
        for role in SpecialistRole::ALL {
            assert!(
                role.instruction()
                    .starts_with(&format!("You are {}", role.display_name()))
            );
        }
    }

    #[test]
    fn serde_as_string() {
        let json = serde_json::to_string(&SpecialistRole::Composition).unwrap();
        assert_eq!(json, "\"composition\"");
        let back: SpecialistRole = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SpecialistRole::Composition);
    }
}
