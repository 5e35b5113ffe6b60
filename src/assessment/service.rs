use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{NaiveDate, Utc};
use tracing::info;

use super::catalog::{CatalogError, CriteriaCatalog};
use super::domain::{Assessment, AssessmentId, BorrowerProfile, ResponseValue};
use super::matching::{rank_matches, LenderMatch};
use super::recommendations::RecommendationGenerator;
use super::repository::{
    AssessmentRepository, DirectoryError, OpportunityDirectory, RepositoryError, ScoreHistoryEntry,
};
use super::scoring::ScoringEngine;
use crate::config::EngineConfig;

static ASSESSMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_assessment_id() -> AssessmentId {
    let id = ASSESSMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AssessmentId(format!("asmt-{id:06}"))
}

/// Service composing the scoring engine, recommendation generator, and the
/// external repository and opportunity directory collaborators.
pub struct AssessmentService<R, O> {
    repository: Arc<R>,
    directory: Arc<O>,
    engine: Arc<ScoringEngine>,
    generator: RecommendationGenerator,
    match_cutoff: u8,
}

impl<R, O> AssessmentService<R, O>
where
    R: AssessmentRepository + 'static,
    O: OpportunityDirectory + 'static,
{
    pub fn new(
        repository: Arc<R>,
        directory: Arc<O>,
        catalog: CriteriaCatalog,
        config: EngineConfig,
    ) -> Result<Self, CatalogError> {
        let engine = Arc::new(ScoringEngine::new(catalog)?);

        Ok(Self {
            repository,
            directory,
            engine,
            generator: RecommendationGenerator::new(config.recommendation_threshold),
            match_cutoff: config.match_cutoff,
        })
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// Start a fresh assessment for an owner.
    pub fn start(&self, owner: &str) -> Result<Assessment, ServiceError> {
        let assessment = Assessment::new(next_assessment_id(), owner, Utc::now());
        let stored = self.repository.insert(assessment)?;
        info!(assessment_id = %stored.id.0, owner, "assessment started");
        Ok(stored)
    }

    /// Record (or overwrite) responses on an in-progress assessment.
    pub fn record_responses(
        &self,
        id: &AssessmentId,
        entries: Vec<(String, ResponseValue)>,
    ) -> Result<Assessment, ServiceError> {
        let mut assessment = self.fetch_required(id)?;

        if assessment.is_frozen() {
            return Err(ServiceError::Frozen);
        }

        let now = Utc::now();
        for (criterion_id, value) in entries {
            assessment.responses.record(&criterion_id, value, now);
        }
        assessment.updated_at = now;

        self.repository.update(assessment.clone())?;
        Ok(assessment)
    }

    /// Run a scoring pass: compute the snapshot and recommendations, persist
    /// them, then append a history entry, freezing the assessment once every
    /// required criterion is answered.
    pub fn score(
        &self,
        id: &AssessmentId,
        industry: Option<&str>,
        today: NaiveDate,
    ) -> Result<Assessment, ServiceError> {
        let mut assessment = self.fetch_required(id)?;

        if assessment.is_frozen() {
            return Err(ServiceError::Frozen);
        }

        let snapshot = self.engine.score(&assessment.responses);
        let recommendations =
            self.generator
                .generate(&snapshot, self.engine.catalog(), industry);

        if self.engine.required_complete(&assessment.responses) {
            assessment.status = super::domain::AssessmentStatus::Completed;
        }

        info!(
            assessment_id = %assessment.id.0,
            percentage = snapshot.overall.percentage,
            grade = snapshot.overall.grade.label(),
            recommendations = recommendations.len(),
            "assessment scored"
        );

        let history_entry = ScoreHistoryEntry {
            owner: assessment.owner.clone(),
            recorded_on: today,
            percentage: snapshot.overall.percentage,
            grade: snapshot.overall.grade,
        };

        assessment.snapshot = Some(snapshot);
        assessment.recommendations = recommendations;
        assessment.updated_at = Utc::now();

        // History records only scoring runs that actually persisted.
        self.repository.update(assessment.clone())?;
        self.repository.append_history(history_entry)?;
        Ok(assessment)
    }

    /// Fetch an assessment and its current status for API responses.
    pub fn get(&self, id: &AssessmentId) -> Result<Assessment, ServiceError> {
        self.fetch_required(id)
    }

    /// Rank the administered opportunity catalog against a borrower profile.
    pub fn matches(&self, profile: &BorrowerProfile) -> Result<Vec<LenderMatch>, ServiceError> {
        let opportunities = self.directory.opportunities()?;
        Ok(rank_matches(&opportunities, profile, self.match_cutoff))
    }

    fn fetch_required(&self, id: &AssessmentId) -> Result<Assessment, ServiceError> {
        Ok(self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?)
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("assessment is completed and frozen")]
    Frozen,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Frozen => StatusCode::CONFLICT,
            ServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            ServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
            ServiceError::Repository(RepositoryError::Unavailable(_))
            | ServiceError::Directory(DirectoryError::Unavailable(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
