use crate::core::search::compare_by_name;
use crate::models::{BreedRecord, Dog, DogStatus, Gender};
use std::cmp::Ordering;

/// Check whether a dog can be offered as a breeding partner for `source`
///
/// Candidates must be another owner's active, available, intact dog of the
/// opposite gender.
#[inline]
pub fn is_eligible_partner(candidate: &Dog, source: &Dog) -> bool {
    candidate.id != source.id
        && candidate.owner_id != source.owner_id
        && candidate.status == DogStatus::Active
        && candidate.available
        && !candidate.neutered
        && candidate.gender == source.gender.opposite()
}

fn is_wildcard(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}

/// Listing filter for breeds
#[derive(Debug, Clone, Default)]
pub struct BreedFilter {
    pub breed_type: Option<String>,
    pub size: Option<String>,
}

impl BreedFilter {
    pub fn new(breed_type: Option<&str>, size: Option<&str>) -> Self {
        Self {
            breed_type: is_wildcard(breed_type).map(str::to_string),
            size: is_wildcard(size).map(str::to_lowercase),
        }
    }

    /// Type must match exactly; size is a case-insensitive substring
    pub fn matches(&self, breed: &BreedRecord) -> bool {
        if let Some(breed_type) = &self.breed_type {
            if &breed.breed_type != breed_type {
                return false;
            }
        }

        if let Some(size) = &self.size {
            let matches_size = breed
                .size
                .as_deref()
                .is_some_and(|s| s.to_lowercase().contains(size.as_str()));
            if !matches_size {
                return false;
            }
        }

        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BreedSortField {
    #[default]
    Name,
    Type,
    Size,
}

/// Sort order for breed listings; unknown fields fall back to name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BreedSort {
    pub field: BreedSortField,
    pub descending: bool,
}

impl BreedSort {
    pub fn parse(sort_by: Option<&str>, order: Option<&str>) -> Self {
        let field = match sort_by.map(str::trim) {
            Some("type") => BreedSortField::Type,
            Some("size") => BreedSortField::Size,
            _ => BreedSortField::Name,
        };

        Self {
            field,
            descending: order.is_some_and(|o| o.trim().eq_ignore_ascii_case("desc")),
        }
    }

    pub fn apply(&self, breeds: &mut [BreedRecord]) {
        breeds.sort_by(|a, b| {
            let ordering = match self.field {
                BreedSortField::Name => compare_by_name(a, b),
                BreedSortField::Type => a.breed_type.cmp(&b.breed_type).then_with(|| compare_by_name(a, b)),
                BreedSortField::Size => compare_sizes(a, b).then_with(|| compare_by_name(a, b)),
            };
            if self.descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
    }
}

/// Breeds without a size sort after those with one
fn compare_sizes(a: &BreedRecord, b: &BreedRecord) -> Ordering {
    match (&a.size, &b.size) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Filters for the radius search
#[derive(Debug, Clone, Default)]
pub struct DogFilter {
    pub breed: Option<String>,
    pub gender: Option<Gender>,
    pub available: Option<bool>,
}

impl DogFilter {
    #[inline]
    pub fn matches(&self, dog: &Dog) -> bool {
        if let Some(breed) = &self.breed {
            if !dog.breed.to_lowercase().contains(&breed.to_lowercase()) {
                return false;
            }
        }

        if self.gender.is_some_and(|g| g != dog.gender) {
            return false;
        }

        if self.available.is_some_and(|a| a != dog.available) {
            return false;
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn create_dog(gender: Gender) -> Dog {
        Dog {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            name: "Test".to_string(),
            breed: "Border Collie".to_string(),
            gender,
            age: 4,
            available: true,
            vaccinated: true,
            neutered: false,
            temperament: vec![],
            status: DogStatus::Active,
            address: None,
            city: None,
            county: None,
            postcode: None,
            country: None,
            latitude: None,
            longitude: None,
        }
    }

    #[test]
    fn test_eligible_partner() {
        let source = create_dog(Gender::Male);
        let candidate = create_dog(Gender::Female);

        assert!(is_eligible_partner(&candidate, &source));
    }

    #[test]
    fn test_ineligible_partners() {
        let source = create_dog(Gender::Male);

        assert!(!is_eligible_partner(&source, &source));
        assert!(!is_eligible_partner(&create_dog(Gender::Male), &source));

        let mut same_owner = create_dog(Gender::Female);
        same_owner.owner_id = source.owner_id;
        assert!(!is_eligible_partner(&same_owner, &source));

        let mut neutered = create_dog(Gender::Female);
        neutered.neutered = true;
        assert!(!is_eligible_partner(&neutered, &source));

        let mut pending = create_dog(Gender::Female);
        pending.status = DogStatus::Pending;
        assert!(!is_eligible_partner(&pending, &source));

        let mut unavailable = create_dog(Gender::Female);
        unavailable.available = false;
        assert!(!is_eligible_partner(&unavailable, &source));
    }

    #[test]
    fn test_breed_filter() {
        let mut pug = BreedRecord::new("Pug", "Toy");
        pug.size = Some("Small".to_string());
        let beagle = BreedRecord::new("Beagle", "Hound");

        let filter = BreedFilter::new(Some("Toy"), Some("small"));
        assert!(filter.matches(&pug));
        assert!(!filter.matches(&beagle));

        let all = BreedFilter::new(Some("all"), Some("all"));
        assert!(all.matches(&pug));
        assert!(all.matches(&beagle));
    }

    #[test]
    fn test_breed_sort() {
        let mut breeds = vec![
            BreedRecord::new("beagle", "Hound"),
            BreedRecord::new("Afghan Hound", "Hound"),
            BreedRecord::new("Pug", "Toy"),
        ];

        BreedSort::parse(None, None).apply(&mut breeds);
        assert_eq!(breeds[0].name, "Afghan Hound");
        assert_eq!(breeds[1].name, "beagle");

        BreedSort::parse(Some("type"), Some("DESC")).apply(&mut breeds);
        assert_eq!(breeds[0].name, "Pug");
    }

    #[test]
    fn test_dog_filter() {
        let dog = create_dog(Gender::Female);

        let filter = DogFilter {
            breed: Some("collie".to_string()),
            gender: Some(Gender::Female),
            available: Some(true),
        };
        assert!(filter.matches(&dog));

        let filter = DogFilter {
            gender: Some(Gender::Male),
            ..Default::default()
        };
        assert!(!filter.matches(&dog));
    }
}
