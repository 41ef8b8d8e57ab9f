use super::{ApiError, AppState};
use crate::core::{matcher::paginate, search, BreedFilter, BreedSort, ValidationError};
use crate::models::{
    BreedField, BreedListQuery, BreedListResponse, BreedRecord, BreedSearchQuery, BreedSearchResponse,
    BreedTypesResponse, Pagination,
};
use actix_web::{web, HttpResponse};
use validator::Validate;

/// Configure all breed routes
///
/// The literal paths are registered before `/breeds/{slug}` so they are
/// not captured as slugs.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/breeds", web::get().to(list_breeds))
        .route("/breeds/types", web::get().to(breed_types))
        .route("/breeds/search", web::get().to(search_breeds))
        .route("/breeds/{slug}", web::get().to(get_breed));
}

/// GET /api/v1/breeds?type=&size=&page=&limit=&sortBy=&order=
async fn list_breeds(
    state: web::Data<AppState>,
    query: web::Query<BreedListQuery>,
) -> Result<HttpResponse, ApiError> {
    query.validate()?;

    let limit = query.limit.min(state.search.max_limit);
    let filter = BreedFilter::new(query.breed_type.as_deref(), query.size.as_deref());

    let catalog = state.catalog.breeds().await?;
    let mut breeds: Vec<BreedRecord> = catalog.iter().filter(|b| filter.matches(b)).cloned().collect();
    BreedSort::parse(query.sort_by.as_deref(), query.order.as_deref()).apply(&mut breeds);

    let total = breeds.len();
    let data = paginate(breeds, query.page, limit);

    Ok(HttpResponse::Ok().json(BreedListResponse {
        data,
        pagination: Pagination::new(query.page, limit, total),
    }))
}

/// GET /api/v1/breeds/types
async fn breed_types(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let types = state.store.count_breeds_by(BreedField::Type).await?;
    let sizes = state.store.count_breeds_by(BreedField::Size).await?;

    Ok(HttpResponse::Ok().json(BreedTypesResponse { types, sizes }))
}

/// GET /api/v1/breeds/search?q=&limit=
async fn search_breeds(
    state: web::Data<AppState>,
    query: web::Query<BreedSearchQuery>,
) -> Result<HttpResponse, ApiError> {
    let q = query.q.as_deref().ok_or(ValidationError::EmptyQuery)?;
    let limit = state.search.effective(query.limit)?;

    let catalog = state.catalog.breeds().await?;
    let data = search(q, catalog.iter(), limit)?;

    tracing::debug!("Breed search \"{}\" returned {} results", q.trim(), data.len());

    Ok(HttpResponse::Ok().json(BreedSearchResponse { total: data.len(), data }))
}

/// GET /api/v1/breeds/{slug}
async fn get_breed(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let slug = path.into_inner();

    match state.store.get_breed(&slug).await? {
        Some(breed) => Ok(HttpResponse::Ok().json(breed)),
        None => Err(ApiError::NotFound(format!("Breed '{}' not found", slug))),
    }
}
