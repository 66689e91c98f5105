use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::shared::{AppError, AppState};
use crate::unparsed::QueueStatus;

use super::report::{ActionResult, RecalcReport};
use super::service::RetrySweepOutcome;

/// Admin trigger surface. Every mutation endpoint responds with a stage
/// report so operators can see which part of the pipeline did what.
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/admin/recalc/match/:match_id", post(recalc_match))
        .route("/admin/recalc/all", post(recalc_all_matches))
        .route("/admin/recalc/fantasy", post(recalc_fantasy))
        .route(
            "/admin/recalc/comprehensive-stats",
            post(recalc_comprehensive_stats),
        )
        .route("/admin/unparsed/retry", post(retry_unparsed_games))
        .route("/admin/unparsed", get(check_unparsed_games))
}

async fn recalc_match(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
) -> Result<Json<ActionResult<RecalcReport>>, AppError> {
    let report = state.orchestrator.match_updated(&match_id).await?;
    Ok(Json(ActionResult::new(
        report.success(),
        format!("recalculated match {match_id}"),
        report,
    )))
}

async fn recalc_all_matches(
    State(state): State<AppState>,
) -> Result<Json<ActionResult<RecalcReport>>, AppError> {
    let report = state.orchestrator.full_rebuild().await?;
    Ok(Json(ActionResult::new(
        report.success(),
        "full recalculation finished",
        report,
    )))
}

#[derive(Debug, Deserialize)]
struct FantasyParams {
    round: Option<String>,
}

async fn recalc_fantasy(
    State(state): State<AppState>,
    Query(params): Query<FantasyParams>,
) -> Result<Json<ActionResult<RecalcReport>>, AppError> {
    let report = state
        .orchestrator
        .recalc_fantasy(params.round.as_deref())
        .await?;
    let message = match params.round {
        Some(round) => format!("recalculated fantasy scores for round {round}"),
        None => "recalculated fantasy scores for every round".to_string(),
    };
    Ok(Json(ActionResult::new(report.success(), message, report)))
}

async fn recalc_comprehensive_stats(
    State(state): State<AppState>,
) -> Result<Json<ActionResult<RecalcReport>>, AppError> {
    let report = state.orchestrator.recalc_comprehensive_stats().await?;
    Ok(Json(ActionResult::new(
        report.success(),
        "rebuilt comprehensive stats",
        report,
    )))
}

async fn retry_unparsed_games(
    State(state): State<AppState>,
) -> Result<Json<ActionResult<RetrySweepOutcome>>, AppError> {
    let outcome = state.orchestrator.retry_unparsed_games().await?;
    let message = format!(
        "parsed {} game(s), {} still unparsed",
        outcome.retry.parsed_count, outcome.retry.still_unparsed_count
    );
    let success = outcome.stages.iter().all(|s| s.succeeded());
    Ok(Json(ActionResult::new(success, message, outcome)))
}

async fn check_unparsed_games(
    State(state): State<AppState>,
) -> Result<Json<ActionResult<QueueStatus>>, AppError> {
    let status = state.orchestrator.check_unparsed_games().await?;
    let message = format!(
        "{} queued game(s), {} exhausted",
        status.total, status.exhausted_count
    );
    Ok(Json(ActionResult::new(true, message, status)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bracket::InMemoryBracketStore;
    use crate::config::EngineConfig;
    use crate::fantasy::InMemoryFantasyStore;
    use crate::leaderboard::InMemoryLeaderboardStore;
    use crate::provider::{ProviderError, RawGameStats, StatsProvider};
    use crate::recalc::RecalcOrchestrator;
    use crate::season::InMemorySeasonStatsStore;
    use crate::standings::InMemoryGroupStore;
    use crate::tournament::InMemoryMatchStore;
    use crate::unparsed::InMemoryUnparsedQueue;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct NoopProvider;

    #[async_trait]
    impl StatsProvider for NoopProvider {
        async fn fetch_game_stats(&self, _id: i64) -> Result<RawGameStats, ProviderError> {
            Err(ProviderError::Unavailable("not wired in tests".into()))
        }
    }

    fn app() -> Router {
        let orchestrator = Arc::new(RecalcOrchestrator::new(
            Arc::new(InMemoryMatchStore::new()),
            Arc::new(InMemoryGroupStore::new()),
            Arc::new(InMemoryBracketStore::new()),
            Arc::new(InMemoryFantasyStore::new()),
            Arc::new(InMemoryLeaderboardStore::new()),
            Arc::new(InMemorySeasonStatsStore::new()),
            Arc::new(InMemoryUnparsedQueue::new()),
            Arc::new(NoopProvider),
            EngineConfig::default(),
        ));
        admin_router().with_state(AppState::new(orchestrator))
    }

    #[tokio::test]
    async fn unknown_match_maps_to_404() {
        let response = app()
            .oneshot(
                Request::post("/admin/recalc/match/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn queue_check_responds_with_envelope() {
        let response = app()
            .oneshot(Request::get("/admin/unparsed").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["total"], 0);
        assert_eq!(body["exhausted_count"], 0);
    }

    #[tokio::test]
    async fn fantasy_recalc_reports_its_stages() {
        let response = app()
            .oneshot(
                Request::post("/admin/recalc/fantasy")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["stages"][0]["stage"], "fantasy");
        assert_eq!(body["stages"][1]["stage"], "leaderboard");
    }
}
