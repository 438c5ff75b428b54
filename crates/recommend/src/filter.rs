use smartmeal_recipe::{Catalog, Difficulty, Recipe, RecipeId};

use crate::Constraints;

/// Recipes satisfying a set of constraints, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    ids: Vec<RecipeId>,
}

impl CandidateSet {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[RecipeId] {
        &self.ids
    }

    pub fn contains(&self, id: RecipeId) -> bool {
        // ids are ascending
        self.ids.binary_search(&id).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = RecipeId> + '_ {
        self.ids.iter().copied()
    }
}

impl FromIterator<RecipeId> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = RecipeId>>(iter: I) -> Self {
        let mut ids = iter.into_iter().collect::<Vec<_>>();
        ids.sort_unstable();
        ids.dedup();
        Self { ids }
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn non_blank(values: &[String]) -> impl Iterator<Item = &str> {
    values.iter().map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Whether one recipe passes every set constraint.
pub fn matches(recipe: &Recipe, constraints: &Constraints) -> bool {
    if constraints
        .max_total_minutes
        .is_some_and(|max| recipe.total_time_min() > max)
    {
        return false;
    }

    if let Some(speed) = &constraints.cook_speed {
        let allowed = speed.values();
        let own = recipe.cook_speed.trim().to_lowercase();
        if !allowed.is_empty() && !allowed.contains(&own) {
            return false;
        }
    }

    if let Some(cutoff) = constraints
        .difficulty_max
        .as_deref()
        .and_then(|d| d.trim().parse::<Difficulty>().ok())
    {
        match recipe.difficulty_level() {
            Some(level) if level <= cutoff => {}
            _ => return false,
        }
    }

    if constraints
        .required_flags()
        .any(|flag| !recipe.has_flag(flag))
    {
        return false;
    }

    if !non_blank(&constraints.tastes_include).all(|t| contains_ignore_case(&recipe.tastes, t)) {
        return false;
    }

    if non_blank(&constraints.tastes_exclude).any(|t| contains_ignore_case(&recipe.tastes, t)) {
        return false;
    }

    if !non_blank(&constraints.cuisines_include)
        .all(|c| contains_ignore_case(&recipe.cuisine_list, c))
    {
        return false;
    }

    if constraints
        .healthiness_min
        .is_some_and(|min| recipe.healthiness_score < min)
    {
        return false;
    }

    true
}

/// Ids of all recipes matching `constraints`, in catalog order.
pub fn filter(catalog: &Catalog, constraints: &Constraints) -> CandidateSet {
    CandidateSet {
        ids: catalog
            .iter()
            .filter(|recipe| matches(recipe, constraints))
            .map(|recipe| recipe.id)
            .collect(),
    }
}

/// Outcome of filtering with the single relaxation fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSearch {
    /// The constraints that produced `candidates`.
    pub constraints: Constraints,
    pub candidates: CandidateSet,
    pub used_relaxation: bool,
}

/// Filter with `constraints`; if nothing matches, relax once and filter
/// again. When the relaxed attempt is also empty the original constraints
/// are reported with an empty candidate set.
pub fn find_candidates(catalog: &Catalog, constraints: Constraints) -> CandidateSearch {
    let candidates = filter(catalog, &constraints);
    if !candidates.is_empty() {
        return CandidateSearch {
            constraints,
            candidates,
            used_relaxation: false,
        };
    }

    let relaxed = constraints.relax();
    let relaxed_candidates = filter(catalog, &relaxed);
    if relaxed_candidates.is_empty() {
        tracing::info!("No recipes match, even after relaxing");
        return CandidateSearch {
            constraints,
            candidates,
            used_relaxation: false,
        };
    }

    tracing::info!(
        candidates = relaxed_candidates.len(),
        "No exact matches, using relaxed constraints"
    );
    CandidateSearch {
        constraints: relaxed,
        candidates: relaxed_candidates,
        used_relaxation: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CookSpeed;

    fn recipe(
        title: &str,
        speed: &str,
        difficulty: &str,
        minutes: f64,
        health: f64,
        tastes: &str,
        cuisines: &str,
    ) -> Recipe {
        Recipe {
            title: title.to_string(),
            cook_speed: speed.to_string(),
            difficulty: difficulty.to_string(),
            est_cook_time_min: minutes,
            healthiness_score: health,
            tastes: tastes.to_string(),
            cuisine_list: cuisines.to_string(),
            ..Default::default()
        }
    }

    fn catalog() -> Catalog {
        Catalog::from_recipes([
            Recipe {
                vegan: true,
                ..recipe("Curry", "medium", "medium", 40.0, 80.0, "['spicy','savory']", "['indian']")
            },
            recipe("Pancakes", "fast", "easy", 15.0, 40.0, "['sweet']", "['american']"),
            Recipe {
                vegan: true,
                gluten_free: true,
                ..recipe("Salad", "fast", "easy", 10.0, 95.0, "['sour']", "['greek']")
            },
            recipe("Brisket", "slow", "hard", 300.0, 30.0, "['savory','smoky']", "['american']"),
            recipe("Mystery", "Fast", "expert", 5.0, 60.0, "", ""),
        ])
    }

    fn ids(set: &CandidateSet) -> Vec<usize> {
        set.iter().map(RecipeId::index).collect()
    }

    #[test]
    fn test_empty_constraints_keep_everything() {
        let catalog = catalog();
        assert_eq!(ids(&filter(&catalog, &Constraints::default())), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_individual_predicates() {
        let catalog = catalog();
        let check = |c: Constraints, expected: Vec<usize>| {
            assert_eq!(ids(&filter(&catalog, &c)), expected, "{c:?}");
        };

        check(
            Constraints {
                max_total_minutes: Some(15.0),
                ..Default::default()
            },
            vec![1, 2, 4],
        );
        check(
            Constraints {
                cook_speed: Some(CookSpeed::One("fast".to_string())),
                ..Default::default()
            },
            vec![1, 2, 4],
        );
        check(
            Constraints {
                cook_speed: Some(CookSpeed::Many(vec!["slow".into(), "medium".into()])),
                ..Default::default()
            },
            vec![0, 3],
        );
        check(
            Constraints {
                difficulty_max: Some("medium".to_string()),
                ..Default::default()
            },
            vec![0, 1, 2],
        );
        check(
            Constraints {
                difficulty_max: Some("impossible".to_string()),
                ..Default::default()
            },
            vec![0, 1, 2, 3, 4],
        );
        check(
            Constraints {
                is_vegan: Some(true),
                is_gluten_free: Some(true),
                ..Default::default()
            },
            vec![2],
        );
        check(
            Constraints {
                is_vegan: Some(false),
                ..Default::default()
            },
            vec![0, 1, 2, 3, 4],
        );
        check(
            Constraints {
                tastes_include: vec!["SAVORY".into(), "spicy".into()],
                ..Default::default()
            },
            vec![0],
        );
        check(
            Constraints {
                tastes_exclude: vec!["savory".into()],
                ..Default::default()
            },
            vec![1, 2, 4],
        );
        check(
            Constraints {
                cuisines_include: vec!["American".into(), " ".into()],
                ..Default::default()
            },
            vec![1, 3],
        );
        check(
            Constraints {
                healthiness_min: Some(80.0),
                ..Default::default()
            },
            vec![0, 2],
        );
    }

    #[test]
    fn test_adding_predicates_never_grows_the_set() {
        let catalog = catalog();
        let steps: [fn(&mut Constraints); 6] = [
            |c| c.max_total_minutes = Some(60.0),
            |c| c.healthiness_min = Some(50.0),
            |c| c.is_vegan = Some(true),
            |c| c.tastes_exclude.push("sweet".into()),
            |c| c.difficulty_max = Some("easy".into()),
            |c| c.cook_speed = Some(CookSpeed::One("fast".into())),
        ];

        let mut constraints = Constraints::default();
        let mut previous = filter(&catalog, &constraints).len();
        for step in steps {
            step(&mut constraints);
            let current = filter(&catalog, &constraints).len();
            assert!(current <= previous);
            previous = current;
        }
    }

    #[test]
    fn test_relaxation_applies_once() {
        let catalog = catalog();
        let constraints = Constraints {
            cook_speed: Some(CookSpeed::One("medium".into())),
            healthiness_min: Some(90.0),
            ..Default::default()
        };

        let search = find_candidates(&catalog, constraints);
        assert!(search.used_relaxation);
        assert_eq!(search.constraints.cook_speed, None);
        assert_eq!(search.constraints.healthiness_min, Some(80.0));
        assert_eq!(ids(&search.candidates), vec![0, 2]);
        for id in search.candidates.iter() {
            assert!(matches(catalog.get(id).unwrap(), &search.constraints));
        }
    }

    #[test]
    fn test_no_relaxation_when_matches_exist() {
        let catalog = catalog();
        let constraints = Constraints {
            healthiness_min: Some(90.0),
            ..Default::default()
        };

        let search = find_candidates(&catalog, constraints.clone());
        assert!(!search.used_relaxation);
        assert_eq!(search.constraints, constraints);
        assert_eq!(ids(&search.candidates), vec![2]);
    }

    #[test]
    fn test_relaxation_that_still_fails() {
        let catalog = catalog();
        let constraints = Constraints {
            healthiness_min: Some(99.0),
            is_halal: Some(true),
            ..Default::default()
        };

        let search = find_candidates(&catalog, constraints.clone());
        assert!(!search.used_relaxation);
        assert!(search.candidates.is_empty());
        assert_eq!(search.constraints, constraints);
    }

    #[test]
    fn test_candidate_set_contains() {
        let set = [RecipeId(4), RecipeId(1), RecipeId(4)]
            .into_iter()
            .collect::<CandidateSet>();
        assert_eq!(set.len(), 2);
        assert!(set.contains(RecipeId(4)));
        assert!(!set.contains(RecipeId(2)));
    }
}
