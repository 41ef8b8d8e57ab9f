use crate::core::{
    distance::{calculate_bounding_box, distance_between, is_within_bounding_box, round_km},
    filters::{is_eligible_partner, DogFilter},
    scoring::score,
};
use crate::models::{Coordinate, Dog, MatchResult, MatchStats, ScoringWeights};
use std::cmp::Ordering;

/// Result of a partner search
#[derive(Debug)]
pub struct MatchOutcome {
    pub matches: Vec<(Dog, MatchResult)>,
    pub total_candidates: usize,
}

/// Breeding partner orchestrator
///
/// # Pipeline Stages
/// 1. Eligibility filter (owner, status, availability, gender, neutered)
/// 2. Scoring against the source dog
/// 3. Minimum score cut-off
/// 4. Ranking by score, then distance
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
    reason_display_count: usize,
}

impl Matcher {
    pub fn new(weights: ScoringWeights, reason_display_count: usize) -> Self {
        Self {
            weights,
            reason_display_count,
        }
    }

    pub fn with_default_weights() -> Self {
        Self::new(ScoringWeights::default(), 3)
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Find breeding partners for `source`
    ///
    /// # Arguments
    /// * `source` - The dog a partner is wanted for
    /// * `candidates` - Dogs loaded from the store
    /// * `min_score` - Normalized score (0-100) a match must reach
    /// * `limit` - Maximum number of matches to return
    pub fn find_matches(&self, source: &Dog, candidates: Vec<Dog>, min_score: f64, limit: usize) -> MatchOutcome {
        let total_candidates = candidates.len();

        let mut matches: Vec<(Dog, MatchResult)> = candidates
            .into_iter()
            .filter(|candidate| is_eligible_partner(candidate, source))
            .filter_map(|candidate| {
                let mut result = score(&candidate, source, &self.weights);
                if result.score < min_score {
                    return None;
                }
                result.truncate_reasons(self.reason_display_count);
                result.distance_km = result.distance_km.map(round_km);
                Some((candidate, result))
            })
            .collect();

        matches.sort_by(|(_, a), (_, b)| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| compare_distance(a.distance_km, b.distance_km))
        });

        matches.truncate(limit);

        tracing::debug!(
            source = %source.id,
            total_candidates,
            returned = matches.len(),
            "Ranked breeding partners"
        );

        MatchOutcome {
            matches,
            total_candidates,
        }
    }

    /// Aggregate counts over the eligible partners of `source`
    pub fn stats(&self, source: &Dog, candidates: &[Dog]) -> MatchStats {
        let eligible: Vec<&Dog> = candidates
            .iter()
            .filter(|candidate| is_eligible_partner(candidate, source))
            .collect();

        let total_potential = eligible.len();
        let same_breed = eligible
            .iter()
            .filter(|dog| dog.breed.trim().eq_ignore_ascii_case(source.breed.trim()))
            .count();
        let nearby = if source.coordinate().is_some() {
            eligible.iter().filter(|dog| dog.coordinate().is_some()).count()
        } else {
            0
        };

        let breed_compatibility = if total_potential > 0 {
            (same_breed as f64 / total_potential as f64 * 100.0).round() as u32
        } else {
            0
        };

        MatchStats {
            total_potential,
            same_breed,
            nearby,
            breed_compatibility,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Located matches sort ahead of unlocated ones
fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Dogs within `radius_km` of `origin` that pass `filter`, nearest first
///
/// Uses a bounding box pre-filter before the exact distance. Distances
/// are rounded to 0.1 km.
pub fn nearby(origin: Coordinate, radius_km: f64, dogs: Vec<Dog>, filter: &DogFilter) -> Vec<(Dog, f64)> {
    let bbox = calculate_bounding_box(origin, radius_km);

    let mut within: Vec<(Dog, f64)> = dogs
        .into_iter()
        .filter(|dog| filter.matches(dog))
        .filter_map(|dog| {
            let point = dog.coordinate()?;
            if !is_within_bounding_box(point, &bbox) {
                return None;
            }
            let distance = distance_between(origin, point);
            (distance <= radius_km).then(|| (dog, round_km(distance)))
        })
        .collect();

    within.sort_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    within
}

/// Slice one page out of an ordered result set
pub fn paginate<T>(items: Vec<T>, page: usize, limit: usize) -> Vec<T> {
    let skip = page.saturating_sub(1).saturating_mul(limit);
    items.into_iter().skip(skip).take(limit).collect()
}
