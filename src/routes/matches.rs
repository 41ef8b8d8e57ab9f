use super::{ApiError, AppState};
use crate::models::{
    Dog, FindMatchesQuery, FindMatchesResponse, HealthResponse, MatchStatsResponse, MatchedDog, SourceDogSummary,
};
use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

/// Configure health and match routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/matches/{dog_id}", web::get().to(find_matches))
        .route("/matches/{dog_id}/stats", web::get().to(match_stats));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

async fn load_source_dog(state: &AppState, raw_id: &str) -> Result<Dog, ApiError> {
    let dog_id = Uuid::parse_str(raw_id.trim()).map_err(|_| ApiError::BadRequest("Invalid dog ID".to_string()))?;

    state
        .store
        .get_dog(dog_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Dog not found".to_string()))
}

/// Find breeding partners
///
/// GET /api/v1/matches/{dogId}?limit=20&minScore=25
async fn find_matches(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<FindMatchesQuery>,
) -> Result<HttpResponse, ApiError> {
    query.validate()?;

    let source = load_source_dog(&state, &path).await?;
    let limit = query
        .limit
        .unwrap_or(state.matching.default_limit)
        .min(state.matching.max_limit);
    let min_score = query.min_score.unwrap_or(state.matching.min_score);

    tracing::info!("Finding matches for dog: {}, limit: {}, min score: {}", source.id, limit, min_score);

    let candidates = state.store.active_dogs().await?;
    let outcome = state.matcher.find_matches(&source, candidates, min_score, limit);

    tracing::info!(
        "Found {} matches for dog {} out of {} candidates",
        outcome.matches.len(),
        source.id,
        outcome.total_candidates
    );

    let matches: Vec<MatchedDog> = outcome
        .matches
        .into_iter()
        .map(|(dog, result)| MatchedDog { dog, result })
        .collect();

    Ok(HttpResponse::Ok().json(FindMatchesResponse {
        source_dog: SourceDogSummary::from(&source),
        total: matches.len(),
        matches,
    }))
}

/// GET /api/v1/matches/{dogId}/stats
async fn match_stats(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let source = load_source_dog(&state, &path).await?;
    let candidates = state.store.active_dogs().await?;

    let stats = state.matcher.stats(&source, &candidates);
    tracing::debug!("Match stats for dog {}: {:?}", source.id, stats);

    Ok(HttpResponse::Ok().json(MatchStatsResponse { stats }))
}
