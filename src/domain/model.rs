use crate::core::grades::Grade;
use serde::{de, Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub value: String,
    pub label: String,
}

impl Subject {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectGrade {
    pub subject: String,
    pub grade: Grade,
}

/// 課程資料，欄位名稱沿用 API 的 camelCase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    #[serde(default)]
    pub code: String,
    pub title: String,
    #[serde(default)]
    pub university: String,
    #[serde(rename = "points", deserialize_with = "deserialize_points")]
    pub required_points: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_deadline: Option<String>,
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub campuses: Vec<String>,
    #[serde(default)]
    pub careers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_description: Option<String>,
}

/// 分數欄位接受小數、負數（視為 0）或數字字串
fn deserialize_points<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let points = match &value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match points {
        Some(p) if p.is_finite() => Ok(p.clamp(0.0, u32::MAX as f64) as u32),
        _ => Err(de::Error::custom(format!("invalid course points: {}", value))),
    }
}

/// Query sent to the course catalog. Empty fields are left off the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseQuery {
    pub subjects: Vec<String>,
    pub min_points: Option<u32>,
}

impl CourseQuery {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs: Vec<(&'static str, String)> = self
            .subjects
            .iter()
            .map(|s| ("subject", s.clone()))
            .collect();
        if let Some(points) = self.min_points.filter(|p| *p > 0) {
            pairs.push(("min_points", points.to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    pub subject_grades: Vec<SubjectGrade>,
    pub total_points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// Catalog endpoints answer either with a bare array or a `{ "results": [...] }` envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Items(Vec<T>),
    Envelope {
        #[serde(default = "Vec::new")]
        results: Vec<T>,
    },
}

impl<T> Listing<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Listing::Items(items) => items,
            Listing::Envelope { results } => results,
        }
    }
}
