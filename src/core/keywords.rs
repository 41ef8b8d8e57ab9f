use crate::models::BreedSize;

/// Slug used when a name has no word characters at all
pub const UNKNOWN_BREED_SLUG: &str = "unknown-breed";

/// ASCII letters, digits and `_`; everything else separates words
#[inline]
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Derive the URL-safe slug for a breed name
///
/// Lower-cases, collapses every run of whitespace/non-word characters into a
/// single `-` and strips hyphens from both ends. Non-ASCII characters count as
/// separators, so the slug is always URL-safe. Names that collapse to nothing
/// map to [`UNKNOWN_BREED_SLUG`]. Distinct names with the same slug are the
/// same breed as far as upserts are concerned.
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_separator = false;

    for c in lowered.trim().chars() {
        if is_word_char(c) {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        } else {
            pending_separator = true;
        }
    }

    if slug.is_empty() {
        UNKNOWN_BREED_SLUG.to_string()
    } else {
        slug
    }
}

/// Split a lower-cased name into word tokens
fn name_tokens(lowered: &str) -> impl Iterator<Item = &str> {
    lowered
        .split(|c: char| !is_word_char(c))
        .filter(|token| !token.is_empty())
}

/// Build the keyword set used for exact-token breed search
///
/// The result holds the full lower-cased name, type and category plus every
/// word of the name, without empties or duplicates, in first-seen order.
pub fn derive_keywords(name: &str, breed_type: Option<&str>, category: Option<&str>) -> Vec<String> {
    let name = name.to_lowercase();
    let breed_type = breed_type.unwrap_or_default().to_lowercase();
    let category = category.unwrap_or_default().to_lowercase();

    let candidates = [name.as_str(), breed_type.as_str(), category.as_str()]
        .into_iter()
        .chain(name_tokens(&name));

    let mut keywords: Vec<String> = Vec::new();
    for keyword in candidates {
        if !keyword.is_empty() && !keywords.iter().any(|k| k == keyword) {
            keywords.push(keyword.to_string());
        }
    }

    keywords
}

/// Strip NUL characters and surrounding whitespace; blank values become `None`
pub fn sanitize(value: Option<&str>) -> Option<String> {
    let cleaned: String = value?.chars().filter(|&c| c != '\0').collect();
    let trimmed = cleaned.trim();

    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Classify a free-text size description ("Small to medium", "Giant", ...)
pub fn normalize_size(size: &str) -> Option<BreedSize> {
    let lower = size.to_lowercase();

    if lower.contains("small") {
        Some(BreedSize::Small)
    } else if lower.contains("medium") {
        Some(BreedSize::Medium)
    } else if lower.contains("large") || lower.contains("giant") {
        Some(BreedSize::Large)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_examples() {
        assert_eq!(slugify("Labrador Retriever"), "labrador-retriever");
        assert_eq!(slugify("  Retriever (Golden)  "), "retriever-golden");
        assert_eq!(slugify("Bichon Frisé"), "bichon-fris");
        assert_eq!(slugify("Dachshund -- Miniature Long-Haired"), "dachshund-miniature-long-haired");
    }

    #[test]
    fn test_slugify_sentinel() {
        assert_eq!(slugify(""), UNKNOWN_BREED_SLUG);
        assert_eq!(slugify("!!!"), UNKNOWN_BREED_SLUG);
        assert_eq!(slugify("   "), UNKNOWN_BREED_SLUG);
    }

    #[test]
    fn test_slugify_is_ascii() {
        for name in ["Bichon Frisé", "Löwchen", "Spinone Italiano²", "Åland Hound"] {
            let slug = slugify(name);
            assert!(slug.is_ascii(), "{} gave {}", name, slug);
            assert!(!slug.starts_with('-') && !slug.ends_with('-'));
        }
        assert_eq!(slugify("Löwchen"), "l-wchen");
        assert_eq!(slugify("Ελληνικός"), UNKNOWN_BREED_SLUG);
    }

    #[test]
    fn test_keywords_split_on_non_ascii() {
        let keywords = derive_keywords("Bichon Frisé", Some("Toy"), None);
        assert_eq!(keywords, vec!["bichon frisé", "toy", "bichon", "fris"]);
    }

    #[test]
    fn test_slugify_is_stable() {
        let name = "Cavalier King Charles Spaniel";
        assert_eq!(slugify(name), slugify(name));
    }

    #[test]
    fn test_keywords_contain_full_name_and_tokens() {
        let keywords = derive_keywords("German Shepherd Dog", Some("Pastoral"), Some("Pastoral"));

        assert_eq!(keywords[0], "german shepherd dog");
        assert!(keywords.contains(&"pastoral".to_string()));
        assert!(keywords.contains(&"german".to_string()));
        assert!(keywords.contains(&"shepherd".to_string()));
        assert!(keywords.contains(&"dog".to_string()));
        // "pastoral" appears once despite being both type and category
        assert_eq!(keywords.iter().filter(|k| *k == "pastoral").count(), 1);
    }

    #[test]
    fn test_keywords_skip_missing_fields() {
        let keywords = derive_keywords("Pug", None, None);
        assert_eq!(keywords, vec!["pug".to_string()]);
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize(Some("  Gundog\0 ")), Some("Gundog".to_string()));
        assert_eq!(sanitize(Some(" \0 ")), None);
        assert_eq!(sanitize(None), None);
    }

    #[test]
    fn test_normalize_size() {
        assert_eq!(normalize_size("Small"), Some(BreedSize::Small));
        assert_eq!(normalize_size("Medium to large"), Some(BreedSize::Medium));
        assert_eq!(normalize_size("Giant"), Some(BreedSize::Large));
        assert_eq!(normalize_size("Varies"), None);
    }
}
