use crate::Constraints;

/// Words accepted as tastes. Anything else found in `tastes_include` is
/// treated as a cuisine.
pub const TASTE_VOCAB: [&str; 6] = ["sweet", "spicy", "savory", "sour", "bitter", "umami"];

pub fn is_taste(word: &str) -> bool {
    let word = word.to_lowercase();
    TASTE_VOCAB.contains(&word.as_str())
}

/// Canonical form of a constraints value.
///
/// Entries of `tastes_include` outside [`TASTE_VOCAB`] are moved, in order,
/// to the end of `cuisines_include`; blank entries are dropped. Every other
/// field is kept as is. Normalizing twice gives the same result.
pub fn normalize(raw: &Constraints) -> Constraints {
    let (tastes, misfiled): (Vec<String>, Vec<String>) = raw
        .tastes_include
        .iter()
        .filter(|t| !t.trim().is_empty())
        .cloned()
        .partition(|t| is_taste(t));

    if !misfiled.is_empty() {
        tracing::debug!(moved = ?misfiled, "Moving non-taste entries to cuisines");
    }

    let mut cuisines = raw.cuisines_include.clone();
    cuisines.extend(misfiled);

    Constraints {
        tastes_include: tastes,
        cuisines_include: cuisines,
        ..raw.clone()
    }
}
