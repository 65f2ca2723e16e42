//! Flat step → topic format.
//!
//! Each step becomes one unified step holding exactly one synthetic sub-step
//! numbered `1` and titled with the step's `head_step_no` label.

use crate::model::sheet::{UnifiedSheet, UnifiedStep, UnifiedSubStep, UnifiedTopic};
use serde::Deserialize;
use serde_json::Value;

const SYNTHETIC_SUB_STEP_NO: u32 = 1;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSheet {
    #[serde(default)]
    sheet_data: Vec<RawStep>,
}

#[derive(Debug, Deserialize)]
struct RawStep {
    #[serde(default)]
    step_no: u32,
    #[serde(default)]
    head_step_no: String,
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
    sl_no_in_step: u32,
    #[serde(default)]
    head_step_no: String,
    #[serde(default)]
    title: String,
    post_link: Option<String>,
    yt_link: Option<String>,
    editorial_link: Option<String>,
    lc_link: Option<String>,
    plus_link: Option<String>,
    cs_link: Option<String>,
    gfg_link: Option<String>,
    difficulty: Option<u8>,
    ques_topic: Option<String>,
    company_tags: Option<String>,
}

pub(super) fn normalize(raw: Value) -> Result<UnifiedSheet, serde_json::Error> {
    let sheet: RawSheet = serde_json::from_value(raw)?;
    Ok(sheet.sheet_data.into_iter().map(convert_step).collect())
}

fn convert_step(step: RawStep) -> UnifiedStep {
    let sub_step = UnifiedSubStep {
        sub_step_no: SYNTHETIC_SUB_STEP_NO,
        sub_step_title: step.head_step_no.clone(),
        topics: step.topics.into_iter().map(convert_topic).collect(),
    };
    UnifiedStep {
        step_no: step.step_no,
        step_title: step.head_step_no,
        sub_steps: vec![sub_step],
    }
}

fn convert_topic(topic: RawTopic) -> UnifiedTopic {
    UnifiedTopic {
        id: topic.id,
        step_no: topic.step_no,
        sub_step_no: SYNTHETIC_SUB_STEP_NO,
        sl_no: topic.sl_no_in_step,
        step_title: topic.head_step_no.clone(),
        sub_step_title: topic.head_step_no,
        question_title: topic.title,
        post_link: topic.post_link,
        yt_link: topic.yt_link,
        editorial_link: topic.editorial_link,
        lc_link: topic.lc_link,
        plus_link: topic.plus_link,
        cs_link: topic.cs_link,
        gfg_link: topic.gfg_link,
        difficulty: topic.difficulty,
        ques_topic: topic.ques_topic,
        company_tags: topic.company_tags,
    }
}

#[cfg(test)]
mod tests {
    use super::normalize;
    use serde_json::json;

    fn topic(id: &str, sl: u32, title: &str) -> serde_json::Value {
        json!({
            "id": id, "step_no": 1, "sl_no_in_step": sl, "head_step_no": "Arrays",
            "title": title, "difficulty": 1, "gfg_link": "https://gfg.example/x",
            "company_tags": "Amazon"
        })
    }

    #[test]
    fn one_step_becomes_one_synthetic_sub_step_in_order() {
        let raw = json!({
            "sheetData": [{
                "step_no": 1,
                "head_step_no": "Arrays",
                "topics": [topic("t1", 1, "Two sum"), topic("t2", 2, "Kadane"), topic("t3", 3, "Sort 012")]
            }]
        });

        let sheet = normalize(raw).unwrap();

        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet[0].step_title, "Arrays");
        assert_eq!(sheet[0].sub_steps.len(), 1);
        let sub_step = &sheet[0].sub_steps[0];
        assert_eq!(sub_step.sub_step_no, 1);
        assert_eq!(sub_step.sub_step_title, "Arrays");
        let ids: Vec<&str> = sub_step.topics.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t2", "t3"]);
        assert_eq!(sub_step.topics[1].question_title, "Kadane");
        assert_eq!(sub_step.topics[1].sl_no, 2);
        assert_eq!(sub_step.topics[2].company_tags.as_deref(), Some("Amazon"));
    }

    #[test]
    fn normalization_is_deterministic() {
        let raw = json!({"sheetData": [{"step_no": 3, "head_step_no": "DP", "topics": [topic("a", 1, "x")]}]});
        assert_eq!(normalize(raw.clone()).unwrap(), normalize(raw).unwrap());
    }

    #[test]
    fn missing_sheet_data_is_an_empty_sheet() {
        assert!(normalize(json!({})).unwrap().is_empty());
    }
}
