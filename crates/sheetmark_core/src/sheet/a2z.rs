//! Nested step → sub-step → topic format.

use crate::model::sheet::{UnifiedSheet, UnifiedStep, UnifiedSubStep, UnifiedTopic};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct RawStep {
    #[serde(default)]
    step_no: u32,
    #[serde(default)]
    step_title: String,
    #[serde(default)]
    sub_steps: Vec<RawSubStep>,
}

#[derive(Debug, Deserialize)]
struct RawSubStep {
    #[serde(default)]
    sub_step_no: u32,
    #[serde(default)]
    sub_step_title: String,
    #[serde(default)]
    topics: Vec<RawTopic>,
}

#[derive(Debug, Deserialize)]
struct RawTopic {
    #[serde(deserialize_with = "super::string_or_number")]
    id: String,
    #[serde(default)]
    step_no: u32,
    #[serde(default)]
    sub_step_no: u32,
    #[serde(default)]
    sl_no: u32,
    #[serde(default)]
    step_title: String,
    #[serde(default)]
    sub_step_title: String,
    #[serde(default)]
    question_title: String,
    post_link: Option<String>,
    yt_link: Option<String>,
    editorial_link: Option<String>,
    lc_link: Option<String>,
    plus_link: Option<String>,
    difficulty: Option<u8>,
    ques_topic: Option<String>,
}

pub(super) fn normalize(raw: Value) -> Result<UnifiedSheet, serde_json::Error> {
    let steps: Vec<RawStep> = serde_json::from_value(raw)?;
    Ok(steps.into_iter().map(convert_step).collect())
}

fn convert_step(step: RawStep) -> UnifiedStep {
    UnifiedStep {
        step_no: step.step_no,
        step_title: step.step_title,
        sub_steps: step
            .sub_steps
            .into_iter()
            .map(|sub_step| UnifiedSubStep {
                sub_step_no: sub_step.sub_step_no,
                sub_step_title: sub_step.sub_step_title,
                topics: sub_step.topics.into_iter().map(convert_topic).collect(),
            })
            .collect(),
    }
}

fn convert_topic(topic: RawTopic) -> UnifiedTopic {
    UnifiedTopic {
        id: topic.id,
        step_no: topic.step_no,
        sub_step_no: topic.sub_step_no,
        sl_no: topic.sl_no,
        step_title: topic.step_title,
        sub_step_title: topic.sub_step_title,
        question_title: topic.question_title,
        post_link: topic.post_link,
        yt_link: topic.yt_link,
        editorial_link: topic.editorial_link,
        lc_link: topic.lc_link,
        plus_link: topic.plus_link,
        cs_link: None,
        gfg_link: None,
        difficulty: topic.difficulty,
        ques_topic: topic.ques_topic,
        company_tags: None,
    }
}
