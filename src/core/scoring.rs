use crate::core::distance::distance_between;
use crate::models::{Dog, MatchResult, ScoringWeights};

/// Distance tiers in km and the share of the distance weight each earns
const DISTANCE_TIERS: [(f64, f64, &str); 3] = [
    (25.0, 1.0, "Very close"),
    (50.0, 2.0 / 3.0, "Close by"),
    (100.0, 1.0 / 3.0, "Within reach"),
];

/// Share of the breed weight awarded to a cross-breed pairing
const MIXED_BREED_SHARE: f64 = 0.2;

/// Calculate a breeding match score (0-100) for `candidate` against `criteria`
///
/// Points per criterion:
/// ```text
/// breed        same breed = full, cross-breed = 20%
/// age          <= 2 years apart = full, <= 4 = half
/// health       both vaccinated = half, both intact = half, otherwise penalty
/// distance     <= 25km full, <= 50km 2/3, <= 100km 1/3
/// temperament  at least one shared trait = full
/// ```
/// The point total is divided by the maximum and scaled to 0-100.
/// Dogs of the same gender always score 0.
pub fn score(candidate: &Dog, criteria: &Dog, weights: &ScoringWeights) -> MatchResult {
    let mut points = 0.0;
    let mut reasons = Vec::new();

    if candidate.gender == criteria.gender {
        return MatchResult {
            dog_id: candidate.id,
            score: 0.0,
            reasons: vec!["Same gender - not compatible".to_string()],
            distance_km: None,
        };
    }

    if candidate.breed.trim().eq_ignore_ascii_case(criteria.breed.trim()) {
        points += weights.breed;
        reasons.push("Same breed".to_string());
    } else {
        points += weights.breed * MIXED_BREED_SHARE;
        reasons.push("Different breed (mixed breeding)".to_string());
    }

    let age_difference = (candidate.age - criteria.age).abs();
    if age_difference <= 2 {
        points += weights.age;
        reasons.push("Similar age".to_string());
    } else if age_difference <= 4 {
        points += weights.age * 0.5;
        reasons.push("Close in age".to_string());
    }

    if candidate.vaccinated && criteria.vaccinated {
        points += weights.health * 0.5;
        reasons.push("Both vaccinated".to_string());
    }

    if !candidate.neutered && !criteria.neutered {
        points += weights.health * 0.5;
        reasons.push("Both not neutered".to_string());
    } else {
        points -= weights.neutered_penalty;
        reasons.push("One or both neutered - not suitable for breeding".to_string());
    }

    let distance_km = match (candidate.coordinate(), criteria.coordinate()) {
        (Some(from), Some(to)) => Some(distance_between(from, to)),
        _ => None,
    };

    if let Some(distance) = distance_km {
        let (share, label) = distance_tier(distance);
        points += weights.distance * share;
        reasons.push(format!("{} ({}km away)", label, distance.round() as i64));
    }

    let common_traits = shared_traits(&candidate.temperament, &criteria.temperament);
    if common_traits > 0 {
        points += weights.temperament;
        reasons.push(format!("Compatible temperament ({} common traits)", common_traits));
    }

    let max_points = weights.max_points();
    let normalized = if max_points > 0.0 {
        points / max_points * 100.0
    } else {
        0.0
    };

    MatchResult {
        dog_id: candidate.id,
        score: normalized.clamp(0.0, 100.0),
        reasons,
        distance_km,
    }
}

#[inline]
fn distance_tier(distance_km: f64) -> (f64, &'static str) {
    DISTANCE_TIERS
        .iter()
        .find(|(limit, _, _)| distance_km <= *limit)
        .map(|&(_, share, label)| (share, label))
        .unwrap_or((0.0, "Far away"))
}

/// Count temperament traits present on both sides, ignoring case
fn shared_traits(a: &[String], b: &[String]) -> usize {
    a.iter()
        .filter(|trait_a| b.iter().any(|trait_b| trait_b.trim().eq_ignore_ascii_case(trait_a.trim())))
        .count()
}
