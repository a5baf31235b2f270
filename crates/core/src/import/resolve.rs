//! Plant-name resolution: exact match first, then bounded fuzzy match.
//!
//! Exact matches (after trim + lowercase on both sides) are safe to import
//! without confirmation. Anything else goes through Levenshtein distance
//! against the whole catalog, and the best candidate within
//! [`FUZZY_DISTANCE_THRESHOLD`](super::FUZZY_DISTANCE_THRESHOLD) is offered
//! as a suggestion -- never applied automatically.

use super::{CanonicalPlant, FUZZY_DISTANCE_THRESHOLD};

/// Normalize a plant name for comparison: trim and lowercase.
pub fn normalize_plant_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Outcome of resolving one raw plant name against the catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum NameMatch<'a> {
    /// Case-insensitive exact match.
    Exact(&'a CanonicalPlant),
    /// Closest catalog entry within the fuzzy threshold. Requires an
    /// explicit human decision before import.
    Suggestion {
        plant: &'a CanonicalPlant,
        distance: usize,
    },
    /// No catalog entry close enough to suggest.
    Unknown,
}

/// Resolve a raw plant name against the catalog.
///
/// The fuzzy pass keeps the first candidate at the minimum distance, so
/// ties are broken by catalog iteration order. That order is deterministic
/// (the catalog is listed by id) but carries no further meaning.
pub fn resolve_plant_name<'a>(raw: &str, catalog: &'a [CanonicalPlant]) -> NameMatch<'a> {
    let needle = normalize_plant_name(raw);

    for plant in catalog {
        if normalize_plant_name(&plant.name) == needle {
            return NameMatch::Exact(plant);
        }
    }

    let mut best: Option<(&CanonicalPlant, usize)> = None;
    for plant in catalog {
        let distance = levenshtein(&needle, &normalize_plant_name(&plant.name));
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((plant, distance));
        }
    }

    match best {
        Some((plant, distance)) if distance <= FUZZY_DISTANCE_THRESHOLD => {
            NameMatch::Suggestion { plant, distance }
        }
        _ => NameMatch::Unknown,
    }
}

/// Levenshtein edit distance between two strings.
///
/// Classic dynamic program over characters with unit insert/delete/substitute
/// costs, computed with two rolling rows of length `b.chars().count() + 1`
/// instead of the full matrix.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr: Vec<usize> = vec![0; b_chars.len() + 1];

    for (i, &a_ch) in a_chars.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &b_ch) in b_chars.iter().enumerate() {
            let substitution_cost = usize::from(a_ch != b_ch);
            curr[j + 1] = (prev[j + 1] + 1)
                .min(curr[j] + 1)
                .min(prev[j] + substitution_cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
