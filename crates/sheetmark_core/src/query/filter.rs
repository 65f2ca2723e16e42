//! Topic flattening and filtering.

use crate::model::sheet::{Difficulty, UnifiedStep, UnifiedTopic};
use crate::model::status::FlagSet;

/// Difficulty selector; `All` disables the clause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DifficultyFilter {
    #[default]
    All,
    Easy,
    Medium,
    Hard,
}

impl DifficultyFilter {
    /// Parses `all|easy|medium|hard` (case-insensitive); blank means `All`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Some(Self::All),
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }

    fn matches(self, difficulty: Difficulty) -> bool {
        match self {
            Self::All => true,
            Self::Easy => difficulty == Difficulty::Easy,
            Self::Medium => difficulty == Difficulty::Medium,
            Self::Hard => difficulty == Difficulty::Hard,
        }
    }
}

/// Progress-status selector; `All` disables the clause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    /// Not completed.
    Pending,
    /// Flagged for revision, regardless of completion.
    Revision,
}

impl StatusFilter {
    /// Parses `all|completed|pending|revision` (case-insensitive); blank means `All`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Some(Self::All),
            "completed" => Some(Self::Completed),
            "pending" => Some(Self::Pending),
            "revision" => Some(Self::Revision),
            _ => None,
        }
    }

    fn matches(self, id: &str, completed: &FlagSet, revision: &FlagSet) -> bool {
        match self {
            Self::All => true,
            Self::Completed => completed.contains(id),
            Self::Pending => !completed.contains(id),
            Self::Revision => revision.contains(id),
        }
    }
}

/// Combined filter; every clause must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicFilter {
    pub difficulty: DifficultyFilter,
    /// Case-insensitive substring; blank disables the clause.
    pub search: String,
    pub status: StatusFilter,
}

impl TopicFilter {
    pub fn matches(&self, topic: &UnifiedTopic, completed: &FlagSet, revision: &FlagSet) -> bool {
        self.difficulty.matches(topic.difficulty_level())
            && self.matches_search(topic)
            && self.status.matches(&topic.id, completed, revision)
    }

    fn matches_search(&self, topic: &UnifiedTopic) -> bool {
        if self.search.trim().is_empty() {
            return true;
        }
        let haystack = [
            topic.question_title.as_str(),
            topic.step_title.as_str(),
            topic.sub_step_title.as_str(),
            topic.ques_topic.as_deref().unwrap_or(""),
        ]
        .join(" ")
        .to_lowercase();
        haystack.contains(&self.search.to_lowercase())
    }
}

/// All topics of a sheet in step, sub-step, topic order.
pub fn flatten(sheet: &[UnifiedStep]) -> Vec<&UnifiedTopic> {
    sheet
        .iter()
        .flat_map(|step| step.sub_steps.iter())
        .flat_map(|sub_step| sub_step.topics.iter())
        .collect()
}

/// Keeps topics matching `filter`, preserving input order.
pub fn filter_topics<'a, I>(
    topics: I,
    filter: &TopicFilter,
    completed: &FlagSet,
    revision: &FlagSet,
) -> Vec<&'a UnifiedTopic>
where
    I: IntoIterator<Item = &'a UnifiedTopic>,
{
    topics
        .into_iter()
        .filter(|topic| filter.matches(topic, completed, revision))
        .collect()
}
