use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use fundability::assessment::{
    assessment_router, rank_matches, AssessmentService, BorrowerProfile, CriteriaCatalog,
    InMemoryAssessmentRepository, OpportunityDirectory, RecommendationGenerator, ResponseValue,
    ScoringEngine, StaticOpportunityDirectory, MATCH_CUTOFF,
};
use fundability::config::AppConfig;
use fundability::error::AppError;
use fundability::telemetry;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Fundability Assessment Service",
    about = "Score business fundability assessments and rank lender matches",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a sample assessment and print the report for stakeholder demos
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug, Default)]
struct DemoArgs {
    /// Industry used for industry-specific recommendations and matching
    #[arg(long, default_value = "trucking")]
    industry: String,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Demo(args) => run_demo(args),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let repository = Arc::new(InMemoryAssessmentRepository::default());
    let directory = Arc::new(StaticOpportunityDirectory::sample());
    let service = AssessmentService::new(
        repository,
        directory,
        CriteriaCatalog::standard(),
        config.engine,
    )?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(assessment_router(Arc::new(service)))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "fundability assessment service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let catalog = CriteriaCatalog::standard();
    let engine = ScoringEngine::new(catalog)?;

    let mut responses = fundability::assessment::ResponseSet::new();
    let now = chrono::Utc::now();
    for (criterion_id, value) in sample_responses() {
        responses.record(criterion_id, value, now);
    }

    let snapshot = engine.score(&responses);
    let generator = RecommendationGenerator::default();
    let recommendations = generator.generate(&snapshot, engine.catalog(), Some(&args.industry));

    println!("Fundability assessment demo");
    println!(
        "Evaluated {} against catalog {}",
        Local::now().date_naive(),
        snapshot.catalog_version
    );

    println!("\nCategory scores");
    for score in &snapshot.category_scores {
        println!(
            "- {}: {}% ({}/{} points, {}/{} answered){}",
            score.category_id,
            score.percentage,
            score.raw_points,
            score.max_points,
            score.answered,
            score.total,
            if score.complete { "" } else { " [incomplete]" }
        );
    }

    println!(
        "\nOverall: {}% (grade {}), {}% complete",
        snapshot.overall.percentage,
        snapshot.overall.grade.label(),
        snapshot.completion_percent
    );

    if recommendations.is_empty() {
        println!("\nRecommendations: none");
    } else {
        println!("\nRecommendations");
        for recommendation in &recommendations {
            println!(
                "- [{}] {} (+{} pts)",
                recommendation.priority.label(),
                recommendation.title,
                recommendation.estimated_impact
            );
            for action in &recommendation.actions {
                println!("    * {action}");
            }
        }
    }

    let profile = BorrowerProfile {
        credit_score: 685,
        annual_revenue: 240_000,
        months_in_business: 30,
        industry: args.industry.clone(),
    };
    let directory = StaticOpportunityDirectory::sample();
    let opportunities = directory
        .opportunities()
        .map_err(fundability::assessment::ServiceError::from)?;
    let matches = rank_matches(&opportunities, &profile, MATCH_CUTOFF);

    if matches.is_empty() {
        println!("\nLender matches: none at or above the {MATCH_CUTOFF} cutoff");
    } else {
        println!("\nLender matches");
        for candidate in &matches {
            println!(
                "- {}: {}{}",
                candidate.opportunity_id,
                candidate.score,
                if candidate.prequalified {
                    " (prequalified)"
                } else {
                    ""
                }
            );
        }
    }

    Ok(())
}

fn sample_responses() -> Vec<(&'static str, ResponseValue)> {
    vec![
        ("entity_registered", ResponseValue::Boolean(true)),
        ("ein_obtained", ResponseValue::Boolean(true)),
        ("business_address", ResponseValue::Boolean(true)),
        ("business_phone", ResponseValue::Boolean(false)),
        ("months_in_business", ResponseValue::Number(30.0)),
        ("business_bank_account", ResponseValue::Boolean(true)),
        ("monthly_revenue", ResponseValue::Number(20_000.0)),
        (
            "account_balance",
            ResponseValue::Selection("stable".to_string()),
        ),
        ("tax_returns_filed", ResponseValue::Boolean(true)),
        ("duns_number", ResponseValue::Boolean(false)),
        ("tradelines_reporting", ResponseValue::Number(1.0)),
        ("personal_credit_score", ResponseValue::Number(685.0)),
        ("derogatory_free", ResponseValue::Boolean(true)),
        ("website_live", ResponseValue::Boolean(true)),
        ("business_email", ResponseValue::Boolean(true)),
        ("listings_consistent", ResponseValue::Boolean(false)),
        ("licenses_current", ResponseValue::Boolean(true)),
        (
            "industry_risk",
            ResponseValue::Selection("moderate_risk".to_string()),
        ),
        (
            "location_type",
            ResponseValue::Selection("commercial".to_string()),
        ),
    ]
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
