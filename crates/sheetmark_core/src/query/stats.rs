//! Progress statistics for one sheet.

use super::filter::flatten;
use crate::model::sheet::{Difficulty, UnifiedStep};
use crate::model::status::FlagSet;
use serde::Serialize;

/// Total vs completed count for one difficulty bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub total: usize,
    pub completed: usize,
}

/// Per-difficulty tallies; topics with unknown difficulty are not bucketed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DifficultyStats {
    pub easy: Tally,
    pub medium: Tally,
    pub hard: Tally,
}

/// Aggregate progress over every topic of a sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProgressStats {
    #[serde(rename = "totalProblems")]
    pub total: usize,
    #[serde(rename = "completedProblems")]
    pub completed: usize,
    #[serde(rename = "revisionProblems")]
    pub in_revision: usize,
    #[serde(rename = "pendingProblems")]
    pub pending: usize,
    /// `round(100 * completed / total)`, `0` for an empty sheet.
    #[serde(rename = "progressPercentage")]
    pub percent: u32,
    #[serde(rename = "difficultyStats")]
    pub per_difficulty: DifficultyStats,
}

/// Computes progress statistics.
pub fn aggregate(sheet: &[UnifiedStep], completed: &FlagSet, revision: &FlagSet) -> ProgressStats {
    let mut stats = ProgressStats::default();

    for topic in flatten(sheet) {
        let is_completed = completed.contains(&topic.id);
        stats.total += 1;
        if is_completed {
            stats.completed += 1;
        }
        if revision.contains(&topic.id) {
            stats.in_revision += 1;
        }

        let bucket = match topic.difficulty_level() {
            Difficulty::Easy => &mut stats.per_difficulty.easy,
            Difficulty::Medium => &mut stats.per_difficulty.medium,
            Difficulty::Hard => &mut stats.per_difficulty.hard,
            Difficulty::Unknown => continue,
        };
        bucket.total += 1;
        if is_completed {
            bucket.completed += 1;
        }
    }

    stats.pending = stats.total - stats.completed;
    stats.percent = rounded_percent(stats.completed, stats.total);
    stats
}

/// Integer percentage rounded half up.
fn rounded_percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let rounded = (200 * part + total) / (2 * total);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{aggregate, rounded_percent, Tally};
    use crate::model::sheet::{UnifiedStep, UnifiedSubStep, UnifiedTopic};
    use crate::model::status::FlagSet;

    fn topic(id: String, difficulty: Option<u8>) -> UnifiedTopic {
        UnifiedTopic {
            id,
            step_no: 1,
            sub_step_no: 1,
            sl_no: 1,
            step_title: "s".to_string(),
            sub_step_title: "ss".to_string(),
            question_title: "q".to_string(),
            post_link: None,
            yt_link: None,
            editorial_link: None,
            lc_link: None,
            plus_link: None,
            cs_link: None,
            gfg_link: None,
            difficulty,
            ques_topic: None,
            company_tags: None,
        }
    }

    fn ten_topic_sheet() -> Vec<UnifiedStep> {
        let mut topics = Vec::new();
        for i in 0..4 {
            topics.push(topic(format!("e{i}"), Some(0)));
        }
        for i in 0..4 {
            topics.push(topic(format!("m{i}"), Some(1)));
        }
        for i in 0..2 {
            topics.push(topic(format!("h{i}"), Some(2)));
        }
        vec![UnifiedStep {
            step_no: 1,
            step_title: "s".to_string(),
            sub_steps: vec![UnifiedSubStep {
                sub_step_no: 1,
                sub_step_title: "ss".to_string(),
                topics,
            }],
        }]
    }

    #[test]
    fn aggregate_matches_worked_example() {
        let sheet = ten_topic_sheet();
        let completed: FlagSet = ["e0", "e1", "e2", "h0", "stale-id"].into_iter().collect();
        let revision: FlagSet = ["m0"].into_iter().collect();

        let stats = aggregate(&sheet, &completed, &revision);

        assert_eq!(stats.total, 10);
        assert_eq!(stats.completed, 4);
        assert_eq!(stats.in_revision, 1);
        assert_eq!(stats.pending, 6);
        assert_eq!(stats.percent, 40);
        assert_eq!(stats.per_difficulty.easy, Tally { total: 4, completed: 3 });
        assert_eq!(stats.per_difficulty.medium, Tally { total: 4, completed: 0 });
        assert_eq!(stats.per_difficulty.hard, Tally { total: 2, completed: 1 });
    }

    #[test]
    fn empty_sheet_has_zero_percent() {
        let stats = aggregate(&[], &FlagSet::new(), &FlagSet::new());
        assert_eq!(stats.total, 0);
        assert_eq!(stats.percent, 0);
    }

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(rounded_percent(1, 3), 33);
        assert_eq!(rounded_percent(2, 3), 67);
        assert_eq!(rounded_percent(1, 8), 13);
        assert_eq!(rounded_percent(3, 3), 100);
    }

    #[test]
    fn stats_serialize_with_report_keys() {
        let stats = aggregate(&ten_topic_sheet(), &FlagSet::new(), &FlagSet::new());
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["totalProblems"], 10);
        assert_eq!(json["difficultyStats"]["hard"]["total"], 2);
    }
}
