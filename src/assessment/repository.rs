use std::collections::HashMap;
use std::sync::Mutex;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{Assessment, AssessmentId};
use super::matching::LenderOpportunity;
use super::scoring::Grade;

/// Storage abstraction so the service module can be exercised in isolation.
pub trait AssessmentRepository: Send + Sync {
    fn insert(&self, assessment: Assessment) -> Result<Assessment, RepositoryError>;
    fn update(&self, assessment: Assessment) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &AssessmentId) -> Result<Option<Assessment>, RepositoryError>;
    fn append_history(&self, entry: ScoreHistoryEntry) -> Result<(), RepositoryError>;
    fn history(&self, owner: &str) -> Result<Vec<ScoreHistoryEntry>, RepositoryError>;
}

/// Source of the administered lender/opportunity catalog.
pub trait OpportunityDirectory: Send + Sync {
    fn opportunities(&self) -> Result<Vec<LenderOpportunity>, DirectoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Opportunity directory failure.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("opportunity directory unavailable: {0}")]
    Unavailable(String),
}

/// One point on a user's score-over-time trail, appended per scoring run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreHistoryEntry {
    pub owner: String,
    pub recorded_on: NaiveDate,
    pub percentage: u8,
    pub grade: Grade,
}

/// Sanitized representation of an assessment's exposed status.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentStatusView {
    pub assessment_id: AssessmentId,
    pub status: &'static str,
    pub completion_percent: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_percentage: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<&'static str>,
}

impl AssessmentStatusView {
    pub fn from_assessment(assessment: &Assessment) -> Self {
        Self {
            assessment_id: assessment.id.clone(),
            status: assessment.status.label(),
            completion_percent: assessment
                .snapshot
                .as_ref()
                .map(|snapshot| snapshot.completion_percent)
                .unwrap_or(0),
            overall_percentage: assessment
                .snapshot
                .as_ref()
                .map(|snapshot| snapshot.overall.percentage),
            grade: assessment
                .snapshot
                .as_ref()
                .map(|snapshot| snapshot.overall.grade.label()),
        }
    }
}

/// In-memory repository used by tests, the demo command, and single-process
/// deployments; production deployments swap in a database-backed impl.
#[derive(Default)]
pub struct InMemoryAssessmentRepository {
    records: Mutex<HashMap<AssessmentId, Assessment>>,
    history: Mutex<Vec<ScoreHistoryEntry>>,
}

impl AssessmentRepository for InMemoryAssessmentRepository {
    fn insert(&self, assessment: Assessment) -> Result<Assessment, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&assessment.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(assessment.id.clone(), assessment.clone());
        Ok(assessment)
    }

    fn update(&self, assessment: Assessment) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if !guard.contains_key(&assessment.id) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(assessment.id.clone(), assessment);
        Ok(())
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<Assessment>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn append_history(&self, entry: ScoreHistoryEntry) -> Result<(), RepositoryError> {
        self.history
            .lock()
            .expect("history mutex poisoned")
            .push(entry);
        Ok(())
    }

    fn history(&self, owner: &str) -> Result<Vec<ScoreHistoryEntry>, RepositoryError> {
        let guard = self.history.lock().expect("history mutex poisoned");
        Ok(guard
            .iter()
            .filter(|entry| entry.owner == owner)
            .cloned()
            .collect())
    }
}

/// Fixed opportunity catalog for demos and tests.
pub struct StaticOpportunityDirectory {
    opportunities: Vec<LenderOpportunity>,
}

impl StaticOpportunityDirectory {
    pub fn new(opportunities: Vec<LenderOpportunity>) -> Self {
        Self { opportunities }
    }

    /// Representative slice of the administered lender catalog.
    pub fn sample() -> Self {
        Self::new(vec![
            LenderOpportunity {
                id: "lend-001".to_string(),
                name: "Harbor Business Capital".to_string(),
                product: "Term loan".to_string(),
                min_credit_score: 650,
                min_annual_revenue: 100_000,
                min_months_in_business: 24,
                allowed_industries: Vec::new(),
                requires_personal_guarantee: false,
            },
            LenderOpportunity {
                id: "lend-002".to_string(),
                name: "Summit Line of Credit".to_string(),
                product: "Revolving line".to_string(),
                min_credit_score: 680,
                min_annual_revenue: 250_000,
                min_months_in_business: 24,
                allowed_industries: Vec::new(),
                requires_personal_guarantee: true,
            },
            LenderOpportunity {
                id: "lend-003".to_string(),
                name: "Mercantile Net-30 Vendor".to_string(),
                product: "Vendor tradeline".to_string(),
                min_credit_score: 0,
                min_annual_revenue: 0,
                min_months_in_business: 0,
                allowed_industries: Vec::new(),
                requires_personal_guarantee: false,
            },
            LenderOpportunity {
                id: "lend-004".to_string(),
                name: "Fleetway Equipment Finance".to_string(),
                product: "Equipment financing".to_string(),
                min_credit_score: 620,
                min_annual_revenue: 150_000,
                min_months_in_business: 12,
                allowed_industries: vec!["trucking".to_string(), "construction".to_string()],
                requires_personal_guarantee: true,
            },
        ])
    }
}

impl OpportunityDirectory for StaticOpportunityDirectory {
    fn opportunities(&self) -> Result<Vec<LenderOpportunity>, DirectoryError> {
        Ok(self.opportunities.clone())
    }
}
