use std::sync::Arc;

use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::assessment::catalog::CriteriaCatalog;
use crate::assessment::domain::{BorrowerProfile, ResponseSet, ResponseValue};
use crate::assessment::matching::LenderOpportunity;
use crate::assessment::repository::{InMemoryAssessmentRepository, StaticOpportunityDirectory};
use crate::assessment::router::assessment_router;
use crate::assessment::scoring::ScoringEngine;
use crate::assessment::service::AssessmentService;
use crate::config::EngineConfig;

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::new(CriteriaCatalog::standard()).expect("standard catalog validates")
}

pub(super) fn respond(pairs: &[(&str, ResponseValue)]) -> ResponseSet {
    let recorded_at = Utc
        .with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
        .single()
        .expect("valid timestamp");
    let mut responses = ResponseSet::new();
    for (criterion_id, value) in pairs {
        responses.record(criterion_id, value.clone(), recorded_at);
    }
    responses
}

/// Best possible answer to every criterion in the standard catalog.
pub(super) fn full_responses() -> ResponseSet {
    respond(&[
        ("entity_registered", ResponseValue::Boolean(true)),
        ("ein_obtained", ResponseValue::Boolean(true)),
        ("business_address", ResponseValue::Boolean(true)),
        ("business_phone", ResponseValue::Boolean(true)),
        ("dba_registered", ResponseValue::Boolean(true)),
        ("months_in_business", ResponseValue::Number(30.0)),
        ("business_bank_account", ResponseValue::Boolean(true)),
        ("monthly_revenue", ResponseValue::Number(60_000.0)),
        (
            "account_balance",
            ResponseValue::Selection("strong".to_string()),
        ),
        ("tax_returns_filed", ResponseValue::Boolean(true)),
        ("bookkeeping_system", ResponseValue::Boolean(true)),
        ("duns_number", ResponseValue::Boolean(true)),
        ("tradelines_reporting", ResponseValue::Number(6.0)),
        ("personal_credit_score", ResponseValue::Number(750.0)),
        ("derogatory_free", ResponseValue::Boolean(true)),
        ("website_live", ResponseValue::Boolean(true)),
        ("business_email", ResponseValue::Boolean(true)),
        ("listings_consistent", ResponseValue::Boolean(true)),
        (
            "social_activity",
            ResponseValue::Selection("active".to_string()),
        ),
        ("online_reviews", ResponseValue::Number(25.0)),
        ("licenses_current", ResponseValue::Boolean(true)),
        (
            "industry_risk",
            ResponseValue::Selection("low_risk".to_string()),
        ),
        (
            "location_type",
            ResponseValue::Selection("commercial".to_string()),
        ),
        ("employee_count", ResponseValue::Number(12.0)),
    ])
}

pub(super) fn term_loan_opportunity() -> LenderOpportunity {
    LenderOpportunity {
        id: "opp-term".to_string(),
        name: "Harbor Business Capital".to_string(),
        product: "Term loan".to_string(),
        min_credit_score: 650,
        min_annual_revenue: 100_000,
        min_months_in_business: 24,
        allowed_industries: Vec::new(),
        requires_personal_guarantee: false,
    }
}

pub(super) fn profile(
    credit_score: u16,
    annual_revenue: u64,
    months_in_business: u32,
    industry: &str,
) -> BorrowerProfile {
    BorrowerProfile {
        credit_score,
        annual_revenue,
        months_in_business,
        industry: industry.to_string(),
    }
}

pub(super) type TestService =
    AssessmentService<InMemoryAssessmentRepository, StaticOpportunityDirectory>;

pub(super) fn build_service() -> (Arc<TestService>, Arc<InMemoryAssessmentRepository>) {
    let repository = Arc::new(InMemoryAssessmentRepository::default());
    let directory = Arc::new(StaticOpportunityDirectory::sample());
    let service = AssessmentService::new(
        repository.clone(),
        directory,
        CriteriaCatalog::standard(),
        EngineConfig::default(),
    )
    .expect("standard catalog validates");
    (Arc::new(service), repository)
}

pub(super) fn router_with_service(service: Arc<TestService>) -> axum::Router {
    assessment_router(service)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
