//! Fundability assessment core: criteria catalog, scoring engine,
//! recommendation generator, and lender matching, plus the repository traits
//! and axum router that expose them.
//!
//! All computation here is pure and deterministic; persistence and HTTP are
//! boundary collaborators injected through the service.

pub mod catalog;
pub mod domain;
pub mod matching;
pub mod recommendations;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::{
    CatalogError, Category, CriteriaCatalog, Criterion, ResponseKind, ScoreBand, SelectOption,
};
pub use domain::{
    Assessment, AssessmentId, AssessmentStatus, BorrowerProfile, RecordedResponse, ResponseSet,
    ResponseValue,
};
pub use matching::{
    rank_matches, score_match, LenderMatch, LenderOpportunity, MATCH_CUTOFF, PREQUALIFIED_SCORE,
};
pub use recommendations::{Priority, Recommendation, RecommendationGenerator};
pub use repository::{
    AssessmentRepository, AssessmentStatusView, DirectoryError, InMemoryAssessmentRepository,
    OpportunityDirectory, RepositoryError, ScoreHistoryEntry, StaticOpportunityDirectory,
};
pub use router::assessment_router;
pub use scoring::{
    CategoryScore, CriterionScore, Grade, OverallScore, ScoreSnapshot, ScoringEngine,
};
pub use service::{AssessmentService, ServiceError};
