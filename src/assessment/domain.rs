use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::recommendations::Recommendation;
use super::scoring::ScoreSnapshot;

/// Identifier wrapper for assessments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssessmentId(pub String);

/// Typed answer to a criterion, matching the criterion's declared kind.
/// A mismatched variant is treated by scoring as an absent response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResponseValue {
    Boolean(bool),
    Number(f64),
    Text(String),
    Selection(String),
}

/// Current answer for a criterion with the moment it was recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedResponse {
    pub value: ResponseValue,
    pub recorded_at: DateTime<Utc>,
}

/// Map of criterion id to the single current response. Resubmission
/// overwrites; extra entries for ids unknown to the catalog are kept here
/// but ignored by scoring, since the catalog is authoritative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseSet {
    entries: BTreeMap<String, RecordedResponse>,
}

impl ResponseSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, criterion_id: &str, value: ResponseValue, recorded_at: DateTime<Utc>) {
        self.entries.insert(
            criterion_id.to_string(),
            RecordedResponse { value, recorded_at },
        );
    }

    pub fn get(&self, criterion_id: &str) -> Option<&RecordedResponse> {
        self.entries.get(criterion_id)
    }

    pub fn value(&self, criterion_id: &str) -> Option<&ResponseValue> {
        self.entries.get(criterion_id).map(|entry| &entry.value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &RecordedResponse)> {
        self.entries.iter()
    }
}

/// Lifecycle of an assessment. A completed assessment is a frozen scored
/// snapshot; later assessments supersede it rather than mutate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssessmentStatus {
    InProgress,
    Completed,
}

impl AssessmentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            AssessmentStatus::InProgress => "in_progress",
            AssessmentStatus::Completed => "completed",
        }
    }
}

/// Aggregate root tying responses, the latest scored snapshot, and the
/// recommendations generated alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: AssessmentId,
    pub owner: String,
    pub responses: ResponseSet,
    pub snapshot: Option<ScoreSnapshot>,
    pub recommendations: Vec<Recommendation>,
    pub status: AssessmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Assessment {
    pub fn new(id: AssessmentId, owner: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            owner: owner.to_string(),
            responses: ResponseSet::new(),
            snapshot: None,
            recommendations: Vec::new(),
            status: AssessmentStatus::InProgress,
            created_at,
            updated_at: created_at,
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.status == AssessmentStatus::Completed
    }
}

/// Attributes lenders screen against, independent of the questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowerProfile {
    pub credit_score: u16,
    pub annual_revenue: u64,
    pub months_in_business: u32,
    pub industry: String,
}
