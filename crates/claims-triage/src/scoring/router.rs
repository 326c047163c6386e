use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{ClaimId, RiskAssessmentResult, StrategyKind, StrategyWeights};
use super::repository::{AssessmentStore, ClaimStore};
use super::service::{AssessmentError, RiskAssessmentService};

/// Router builder exposing the assessment and model-metadata endpoints.
pub fn assessment_router<C, A>(service: Arc<RiskAssessmentService<C, A>>) -> Router
where
    C: ClaimStore + 'static,
    A: AssessmentStore + 'static,
{
    Router::new()
        .route("/api/v1/claims/assessments", post(batch_handler::<C, A>))
        .route(
            "/api/v1/claims/assessments/:claim_id",
            get(single_handler::<C, A>),
        )
        .route("/api/v1/models", get(models_handler::<C, A>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct BatchAssessmentRequest {
    pub(crate) claim_ids: Vec<String>,
    /// Assessment time override for reproducible runs; defaults to now.
    #[serde(default)]
    pub(crate) assessed_at: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize)]
pub(crate) struct BatchAssessmentResponse {
    pub(crate) assessed_at: NaiveDateTime,
    pub(crate) results: BTreeMap<String, BatchEntry>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub(crate) enum BatchEntry {
    Ok { assessment: Box<RiskAssessmentResult> },
    Error { error: String },
}

pub(crate) async fn batch_handler<C, A>(
    State(service): State<Arc<RiskAssessmentService<C, A>>>,
    axum::Json(request): axum::Json<BatchAssessmentRequest>,
) -> Response
where
    C: ClaimStore + 'static,
    A: AssessmentStore + 'static,
{
    let assessed_at = request
        .assessed_at
        .unwrap_or_else(|| Local::now().naive_local());
    let ids: Vec<ClaimId> = request.claim_ids.into_iter().map(ClaimId).collect();

    match service.assess_batch(&ids, assessed_at) {
        Ok(outcomes) => {
            let results = outcomes
                .into_iter()
                .map(|(id, outcome)| {
                    let entry = match outcome {
                        Ok(assessment) => BatchEntry::Ok {
                            assessment: Box::new(assessment),
                        },
                        Err(err) => BatchEntry::Error {
                            error: err.to_string(),
                        },
                    };
                    (id.0, entry)
                })
                .collect();
            (
                StatusCode::OK,
                axum::Json(BatchAssessmentResponse {
                    assessed_at,
                    results,
                }),
            )
                .into_response()
        }
        Err(err @ AssessmentError::BatchTooLarge { .. }) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::PAYLOAD_TOO_LARGE, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn single_handler<C, A>(
    State(service): State<Arc<RiskAssessmentService<C, A>>>,
    Path(claim_id): Path<String>,
) -> Response
where
    C: ClaimStore + 'static,
    A: AssessmentStore + 'static,
{
    let id = ClaimId(claim_id);
    match service.assess(&id, Local::now().naive_local()) {
        Ok(assessment) => (StatusCode::OK, axum::Json(assessment)).into_response(),
        Err(err @ AssessmentError::NotFound(_)) => {
            let payload = json!({ "claim_id": id.0, "error": err.to_string() });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(err @ AssessmentError::InvalidInput { .. }) => {
            let payload = json!({ "claim_id": id.0, "error": err.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

/// Static model metadata for dashboard display. The quality figures are
/// illustrative configuration data, not validated accuracy, and are labeled
/// as such in the payload.
#[derive(Debug, Serialize)]
pub struct ModelCatalog {
    pub version: &'static str,
    pub weights: StrategyWeights,
    pub models: Vec<ModelCard>,
    pub illustrative: bool,
}

#[derive(Debug, Serialize)]
pub struct ModelCard {
    pub strategy: StrategyKind,
    pub weight: f64,
    pub precision: f64,
    pub recall: f64,
}

pub fn model_catalog(weights: StrategyWeights) -> ModelCatalog {
    ModelCatalog {
        version: "policy-2024.1",
        weights,
        models: vec![
            ModelCard {
                strategy: StrategyKind::RuleAccumulation,
                weight: weights.rule_accumulation,
                precision: 0.81,
                recall: 0.74,
            },
            ModelCard {
                strategy: StrategyKind::StagedIncrement,
                weight: weights.staged_increment,
                precision: 0.78,
                recall: 0.79,
            },
            ModelCard {
                strategy: StrategyKind::Linear,
                weight: weights.linear,
                precision: 0.72,
                recall: 0.81,
            },
        ],
        illustrative: true,
    }
}

pub(crate) async fn models_handler<C, A>(
    State(service): State<Arc<RiskAssessmentService<C, A>>>,
) -> Response
where
    C: ClaimStore + 'static,
    A: AssessmentStore + 'static,
{
    let catalog = model_catalog(service.engine().config().strategy_weights);
    (StatusCode::OK, axum::Json(catalog)).into_response()
}
