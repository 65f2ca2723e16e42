//! User profile model.
//!
//! # Invariants
//! - Exactly one profile exists per installation.
//! - `created_at` is set once and survives every later update.
//! - Any update through [`UserProfile::apply_patch`] marks the profile onboarded.
//! - A JSON `null` in any stored or submitted field decodes as that field's default.

use serde::{Deserialize, Deserializer, Serialize};

const DEFAULT_DAILY_PROBLEMS: u32 = 3;
const DEFAULT_WEEKLY_GOAL: u32 = 20;

/// Practice goals attached to the profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileGoals {
    #[serde(deserialize_with = "daily_problems_or_default")]
    pub daily_problems: u32,
    #[serde(deserialize_with = "weekly_goal_or_default")]
    pub weekly_goal: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub focus_areas: Vec<String>,
}

impl Default for ProfileGoals {
    fn default() -> Self {
        Self {
            daily_problems: DEFAULT_DAILY_PROBLEMS,
            weekly_goal: DEFAULT_WEEKLY_GOAL,
            focus_areas: Vec::new(),
        }
    }
}

/// Singleton user profile document.
///
/// Missing fields in a stored document fall back to defaults so older files
/// stay readable, as do `null` values; other wrong JSON types still fail to
/// parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Goal category picked during onboarding.
    #[serde(default, deserialize_with = "null_as_default")]
    pub aim: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub target_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub goals: ProfileGoals,
    /// RFC 3339 creation time.
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_onboarded: bool,
}

impl UserProfile {
    /// Creates the first-run profile: empty strings, default goals, not onboarded.
    pub fn new_default(created_at: impl Into<String>) -> Self {
        Self {
            name: String::new(),
            aim: String::new(),
            target_date: String::new(),
            goals: ProfileGoals::default(),
            created_at: created_at.into(),
            is_onboarded: false,
        }
    }

    /// Merges `patch` over this profile.
    ///
    /// Fields absent from the patch keep their value; `goals` is replaced as a
    /// whole when present. `created_at` only changes when it was empty.
    pub fn apply_patch(&mut self, patch: ProfilePatch, now: impl FnOnce() -> String) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(aim) = patch.aim {
            self.aim = aim;
        }
        if let Some(target_date) = patch.target_date {
            self.target_date = target_date;
        }
        if let Some(goals) = patch.goals {
            self.goals = goals;
        }
        if self.created_at.trim().is_empty() {
            self.created_at = now();
        }
        self.is_onboarded = true;
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn daily_problems_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(Option::deserialize(deserializer)?.unwrap_or(DEFAULT_DAILY_PROBLEMS))
}

fn weekly_goal_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(Option::deserialize(deserializer)?.unwrap_or(DEFAULT_WEEKLY_GOAL))
}

/// Partial profile update accepted from clients.
///
/// A `null` field counts as absent.
///
/// `createdAt` and `isOnboarded` are owned by the server and ignored here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub aim: Option<String>,
    pub target_date: Option<String>,
    pub goals: Option<ProfileGoals>,
}
