use crate::models::BreedRecord;
use std::cmp::Ordering;
use thiserror::Error;

/// Client-input errors on search and listing requests
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Search query is required")]
    EmptyQuery,

    #[error("Limit must be at least 1, got {0}")]
    InvalidLimit(usize),

    #[error("Page must be at least 1")]
    InvalidPage,

    #[error("Invalid coordinate")]
    InvalidCoordinate,
}

/// Limits applied to breed search requests
#[derive(Debug, Clone, Copy)]
pub struct SearchLimits {
    pub default_limit: usize,
    pub max_limit: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            default_limit: 20,
            max_limit: 50,
        }
    }
}

impl SearchLimits {
    /// Resolve the requested limit against the default and the cap
    pub fn effective(&self, requested: Option<usize>) -> Result<usize, ValidationError> {
        match requested {
            Some(0) => Err(ValidationError::InvalidLimit(0)),
            Some(limit) => Ok(limit.min(self.max_limit)),
            None => Ok(self.default_limit.min(self.max_limit)),
        }
    }
}

fn contains_ci(field: Option<&str>, needle_lower: &str) -> bool {
    field.is_some_and(|value| value.to_lowercase().contains(needle_lower))
}

/// Whether a breed matches a lower-cased, trimmed query
///
/// Substring on name, type, category or temperament, or an exact keyword hit.
pub fn breed_matches(breed: &BreedRecord, needle_lower: &str) -> bool {
    contains_ci(Some(&breed.name), needle_lower)
        || contains_ci(Some(&breed.breed_type), needle_lower)
        || contains_ci(breed.kennel_club_category.as_deref(), needle_lower)
        || contains_ci(breed.temperament.as_deref(), needle_lower)
        || breed.search_keywords.iter().any(|k| k == needle_lower)
}

/// Order breeds by name, ignoring case first
pub fn compare_by_name(a: &BreedRecord, b: &BreedRecord) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
}

/// Filter a breed corpus by a free-text query
///
/// This is a filter, not a ranking: matches come back in name order,
/// truncated to `limit`. Callers cap `limit` beforehand.
pub fn search<'a, I>(query: &str, corpus: I, limit: usize) -> Result<Vec<BreedRecord>, ValidationError>
where
    I: IntoIterator<Item = &'a BreedRecord>,
{
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Err(ValidationError::EmptyQuery);
    }
    if limit == 0 {
        return Err(ValidationError::InvalidLimit(limit));
    }

    let mut matches: Vec<BreedRecord> = corpus
        .into_iter()
        .filter(|breed| breed_matches(breed, &needle))
        .cloned()
        .collect();

    matches.sort_by(compare_by_name);
    matches.truncate(limit);

    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<BreedRecord> {
        let mut retriever = BreedRecord::new("Labrador Retriever", "Gundog");
        retriever.temperament = Some("Kind, outgoing".to_string());

        let mut shepherd = BreedRecord::new("German Shepherd Dog", "Pastoral");
        shepherd.kennel_club_category = Some("Working line".to_string());
        shepherd.reindex();

        vec![
            shepherd,
            retriever,
            BreedRecord::new("Golden Retriever", "Gundog"),
            BreedRecord::new("Pug", "Toy"),
        ]
    }

    #[test]
    fn test_substring_on_name() {
        let corpus = corpus();
        let results = search("retriever", &corpus, 10).unwrap();

        let names: Vec<&str> = results.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Golden Retriever", "Labrador Retriever"]);
    }

    #[test]
    fn test_matches_type_category_and_temperament() {
        let corpus = corpus();

        assert_eq!(search("GUNDOG", &corpus, 10).unwrap().len(), 2);
        assert_eq!(search("working", &corpus, 10).unwrap()[0].name, "German Shepherd Dog");
        assert_eq!(search("outgoing", &corpus, 10).unwrap()[0].name, "Labrador Retriever");
    }

    #[test]
    fn test_keyword_exact_match() {
        let mut breed = BreedRecord::new("Xoloitzcuintle", "Utility");
        breed.search_keywords.push("mexican hairless".to_string());

        let corpus = vec![breed];
        assert_eq!(search("  Mexican Hairless ", &corpus, 10).unwrap().len(), 1);
        assert!(search("mexican hair", &corpus, 10).unwrap().is_empty());
    }

    #[test]
    fn test_results_truncated() {
        let corpus = corpus();
        assert_eq!(search("e", &corpus, 2).unwrap().len(), 2);
    }

    #[test]
    fn test_empty_query_rejected() {
        let corpus = corpus();
        assert_eq!(search("", &corpus, 10), Err(ValidationError::EmptyQuery));
        assert_eq!(search("   ", &corpus, 10), Err(ValidationError::EmptyQuery));
        assert_eq!(search("pug", &corpus, 0), Err(ValidationError::InvalidLimit(0)));
    }

    #[test]
    fn test_effective_limit() {
        let limits = SearchLimits::default();
        assert_eq!(limits.effective(None), Ok(20));
        assert_eq!(limits.effective(Some(500)), Ok(50));
        assert_eq!(limits.effective(Some(5)), Ok(5));
        assert!(limits.effective(Some(0)).is_err());
    }
}
