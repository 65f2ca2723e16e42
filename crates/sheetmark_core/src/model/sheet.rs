//! Unified sheet shape shared by every source format.
//!
//! # Invariants
//! - Source order is preserved at every nesting level.
//! - Links are optional and passed through without validation.

use serde::{Deserialize, Serialize};

/// Full curriculum: ordered steps.
pub type UnifiedSheet = Vec<UnifiedStep>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnifiedStep {
    pub step_no: u32,
    pub step_title: String,
    #[serde(default)]
    pub sub_steps: Vec<UnifiedSubStep>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnifiedSubStep {
    pub sub_step_no: u32,
    pub sub_step_title: String,
    #[serde(default)]
    pub topics: Vec<UnifiedTopic>,
}

/// One problem entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnifiedTopic {
    /// Stable id used as the key in progress, revision and notes.
    pub id: String,
    pub step_no: u32,
    pub sub_step_no: u32,
    /// Sequence number within the step or sub-step.
    pub sl_no: u32,
    pub step_title: String,
    pub sub_step_title: String,
    pub question_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yt_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editorial_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lc_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plus_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cs_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gfg_link: Option<String>,
    /// Numeric difficulty code; see [`Difficulty::from_code`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ques_topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_tags: Option<String>,
}

impl UnifiedTopic {
    pub fn difficulty_level(&self) -> Difficulty {
        Difficulty::from_code(self.difficulty)
    }
}

/// Difficulty derived from the numeric code in sheet data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Unknown,
}

impl Difficulty {
    /// `0` Easy, `1` Medium, `2` Hard, anything else or absent Unknown.
    pub fn from_code(code: Option<u8>) -> Self {
        match code {
            Some(0) => Self::Easy,
            Some(1) => Self::Medium,
            Some(2) => Self::Hard,
            _ => Self::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Unknown => "Unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Difficulty;

    #[test]
    fn difficulty_codes_map_to_labels() {
        assert_eq!(Difficulty::from_code(Some(0)).label(), "Easy");
        assert_eq!(Difficulty::from_code(Some(1)).label(), "Medium");
        assert_eq!(Difficulty::from_code(Some(2)).label(), "Hard");
        assert_eq!(Difficulty::from_code(Some(7)), Difficulty::Unknown);
        assert_eq!(Difficulty::from_code(None), Difficulty::Unknown);
    }
}
