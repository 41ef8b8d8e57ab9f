use super::{ApiError, AppState};
use crate::core::{
    matcher::{nearby, paginate},
    DogFilter, ValidationError,
};
use crate::models::{Coordinate, Gender, NearbyDog, NearbyQuery, NearbyResponse, Pagination};
use actix_web::{web, HttpResponse};
use validator::Validate;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/dogs/nearby", web::get().to(nearby_dogs));
}

/// GET /api/v1/dogs/nearby?latitude=&longitude=&radius=&breed=&gender=&page=&limit=
async fn nearby_dogs(
    state: web::Data<AppState>,
    query: web::Query<NearbyQuery>,
) -> Result<HttpResponse, ApiError> {
    query.validate()?;

    let origin = Coordinate::new(query.latitude, query.longitude).ok_or(ValidationError::InvalidCoordinate)?;
    let radius_km = query.radius.unwrap_or(state.matching.nearby_radius_km);
    let limit = query.limit.min(state.matching.max_limit);

    let gender = match query.gender.as_deref().map(str::trim).filter(|g| !g.is_empty()) {
        Some(value) => Some(
            Gender::parse(value).ok_or_else(|| ApiError::BadRequest(format!("Unknown gender '{}'", value)))?,
        ),
        None => None,
    };

    let filter = DogFilter {
        breed: query.breed.clone().filter(|b| !b.trim().is_empty()),
        gender,
        available: query.available,
    };

    let dogs = state.store.active_dogs().await?;
    let within = nearby(origin, radius_km, dogs, &filter);
    let total = within.len();

    tracing::debug!(
        "Nearby search at ({}, {}) within {}km found {} dogs",
        origin.latitude,
        origin.longitude,
        radius_km,
        total
    );

    let dogs = paginate(within, query.page, limit)
        .into_iter()
        .map(|(dog, distance_km)| NearbyDog { dog, distance_km })
        .collect();

    Ok(HttpResponse::Ok().json(NearbyResponse {
        dogs,
        pagination: Pagination::new(query.page, limit, total),
    }))
}
