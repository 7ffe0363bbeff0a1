use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One aggregated daily mood entry as returned by the remote store.
///
/// The store is spreadsheet backed, so blank cells arrive as `null`; those
/// read as the field's default instead of failing the whole response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodRecord {
    #[serde(rename = "row_number", default, deserialize_with = "null_as_default")]
    pub sequence_number: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(rename = "averageMood", default, deserialize_with = "null_as_default")]
    pub average_mood: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_submissions: i64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl MoodRecord {
    /// The image url, if present and not blank.
    pub fn image(&self) -> Option<&str> {
        self.image_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }
}

/// Body posted to the submit webhook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub mood: String,
    pub date: String,
}

impl SubmitRequest {
    pub fn new(mood: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            mood: mood.into(),
            date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// The submit webhook answers with either a bare record or a list holding one.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SubmitResponse {
    One(MoodRecord),
    Many(Vec<MoodRecord>),
}

impl SubmitResponse {
    pub fn into_record(self) -> Option<MoodRecord> {
        match self {
            SubmitResponse::One(record) => Some(record),
            SubmitResponse::Many(records) => records.into_iter().next(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    pub moods: Vec<MoodRecord>,
    pub loading_initial: bool,
    pub submitting: bool,
    pub submit_progress: u8,
    pub today_image: Option<String>,
    /// Text still sitting in the input field; cleared after a successful submit.
    pub draft: String,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            moods: Vec::new(),
            loading_initial: true,
            submitting: false,
            submit_progress: 0,
            today_image: None,
            draft: String::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MoodForm {
    #[serde(default)]
    pub mood: String,
}

#[derive(Debug, Deserialize)]
pub struct SubmitMoodRequest {
    pub mood: String,
}
