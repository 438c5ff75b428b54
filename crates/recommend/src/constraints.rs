use serde::Serialize;
use serde_json::{Map, Value};
use smartmeal_recipe::DietaryFlag;

/// `cook_speed` accepts a single value or a set of values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CookSpeed {
    One(String),
    Many(Vec<String>),
}

impl CookSpeed {
    /// Non-blank values, lowercased.
    pub fn values(&self) -> Vec<String> {
        let values: &[String] = match self {
            CookSpeed::One(value) => std::slice::from_ref(value),
            CookSpeed::Many(values) => values,
        };

        values
            .iter()
            .map(|v| v.trim().to_lowercase())
            .filter(|v| !v.is_empty())
            .collect()
    }
}

/// Hard constraints on the catalog. Every field is optional; an unset field
/// (or an empty list) puts no restriction on that dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Constraints {
    pub max_total_minutes: Option<f64>,
    pub cook_speed: Option<CookSpeed>,
    pub difficulty_max: Option<String>,

    pub is_vegan: Option<bool>,
    pub is_vegetarian: Option<bool>,
    pub is_gluten_free: Option<bool>,
    pub is_dairy_free: Option<bool>,
    pub is_nut_free: Option<bool>,
    pub is_halal: Option<bool>,
    pub is_kosher: Option<bool>,

    pub tastes_include: Vec<String>,
    pub tastes_exclude: Vec<String>,
    pub cuisines_include: Vec<String>,

    pub healthiness_min: Option<f64>,
    pub num_results: Option<usize>,
}

impl Constraints {
    pub fn flag(&self, flag: DietaryFlag) -> Option<bool> {
        match flag {
            DietaryFlag::Vegan => self.is_vegan,
            DietaryFlag::Vegetarian => self.is_vegetarian,
            DietaryFlag::GlutenFree => self.is_gluten_free,
            DietaryFlag::DairyFree => self.is_dairy_free,
            DietaryFlag::NutFree => self.is_nut_free,
            DietaryFlag::Halal => self.is_halal,
            DietaryFlag::Kosher => self.is_kosher,
        }
    }

    pub fn flag_mut(&mut self, flag: DietaryFlag) -> &mut Option<bool> {
        match flag {
            DietaryFlag::Vegan => &mut self.is_vegan,
            DietaryFlag::Vegetarian => &mut self.is_vegetarian,
            DietaryFlag::GlutenFree => &mut self.is_gluten_free,
            DietaryFlag::DairyFree => &mut self.is_dairy_free,
            DietaryFlag::NutFree => &mut self.is_nut_free,
            DietaryFlag::Halal => &mut self.is_halal,
            DietaryFlag::Kosher => &mut self.is_kosher,
        }
    }

    /// Dietary flags that are required (`Some(true)`).
    pub fn required_flags(&self) -> impl Iterator<Item = DietaryFlag> + '_ {
        DietaryFlag::ALL
            .into_iter()
            .filter(|flag| self.flag(*flag) == Some(true))
    }

    /// Read a loosely shaped constraints object, as produced by a language
    /// model or sent by a client.
    ///
    /// Unknown keys are ignored. Known keys holding a value of the wrong type
    /// are skipped with a warning. Numbers may be given as strings and flags
    /// as `"true"`/`"false"`. A non-object value yields empty constraints.
    pub fn from_raw(raw: &Value) -> Self {
        let Some(obj) = raw.as_object() else {
            if !raw.is_null() {
                tracing::warn!(kind = value_kind(raw), "Constraints are not an object, ignoring");
            }
            return Self::default();
        };

        let mut constraints = Self {
            max_total_minutes: number(obj, "max_total_minutes"),
            cook_speed: cook_speed(obj),
            difficulty_max: text(obj, "difficulty_max"),
            tastes_include: list(obj, "tastes_include"),
            tastes_exclude: list(obj, "tastes_exclude"),
            cuisines_include: list(obj, "cuisines_include"),
            healthiness_min: number(obj, "healthiness_min"),
            num_results: count(obj, "num_results"),
            ..Self::default()
        };

        for flag in DietaryFlag::ALL {
            *constraints.flag_mut(flag) = dietary_flag(obj, flag);
        }

        constraints
    }

    /// Fill gaps in `self` from `baseline`.
    ///
    /// Scalars keep their own value when set. A dietary flag is required when
    /// either side requires it. Lists are the union, baseline entries first,
    /// without case-insensitive duplicates.
    pub fn merge_baseline(&self, baseline: &Constraints) -> Constraints {
        let mut merged = Constraints {
            max_total_minutes: self.max_total_minutes.or(baseline.max_total_minutes),
            cook_speed: self.cook_speed.clone().or_else(|| baseline.cook_speed.clone()),
            difficulty_max: self
                .difficulty_max
                .clone()
                .or_else(|| baseline.difficulty_max.clone()),
            tastes_include: union(&baseline.tastes_include, &self.tastes_include),
            tastes_exclude: union(&baseline.tastes_exclude, &self.tastes_exclude),
            cuisines_include: union(&baseline.cuisines_include, &self.cuisines_include),
            healthiness_min: self.healthiness_min.or(baseline.healthiness_min),
            num_results: self.num_results.or(baseline.num_results),
            ..Constraints::default()
        };

        for flag in DietaryFlag::ALL {
            *merged.flag_mut(flag) = match (self.flag(flag), baseline.flag(flag)) {
                (Some(true), _) | (_, Some(true)) => Some(true),
                (own, base) => own.or(base),
            };
        }

        merged
    }

    /// The single fallback used when nothing matches: `cook_speed` is dropped
    /// and `healthiness_min` is lowered by 10, never below 0.
    pub fn relax(&self) -> Constraints {
        Constraints {
            cook_speed: None,
            healthiness_min: self.healthiness_min.map(|min| (min - 10.0).max(0.0)),
            ..self.clone()
        }
    }

    /// Requested result count, when one was asked for.
    pub fn result_count(&self) -> Option<usize> {
        self.num_results.filter(|n| *n > 0)
    }
}

fn union(first: &[String], second: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(first.len() + second.len());
    for item in first.iter().chain(second) {
        if !out.iter().any(|kept| kept.eq_ignore_ascii_case(item)) {
            out.push(item.clone());
        }
    }
    out
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn ignored(key: &str, value: &Value) {
    tracing::warn!(key, kind = value_kind(value), "Ignoring constraint with unexpected type");
}

fn number(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    let value = obj.get(key)?;
    let parsed = match value {
        Value::Null => return None,
        Value::Number(n) => n.as_f64(),
        Value::String(s) if s.trim().is_empty() => return None,
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(n) if n.is_finite() => Some(n),
        _ => {
            ignored(key, value);
            None
        }
    }
}

fn count(obj: &Map<String, Value>, key: &str) -> Option<usize> {
    let n = number(obj, key)?;
    if n < 0.0 || n.fract() != 0.0 {
        tracing::warn!(key, value = n, "Ignoring constraint that is not a whole count");
        return None;
    }
    Some(n as usize)
}

fn text(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.trim().to_string()),
        other => {
            ignored(key, other);
            None
        }
    }
}

fn list(obj: &Map<String, Value>, key: &str) -> Vec<String> {
    match obj.get(key) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(s)) if s.trim().is_empty() => Vec::new(),
        Some(Value::String(s)) => vec![s.trim().to_string()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                Value::String(_) | Value::Null => None,
                other => {
                    ignored(key, other);
                    None
                }
            })
            .collect(),
        Some(other) => {
            ignored(key, other);
            Vec::new()
        }
    }
}

fn cook_speed(obj: &Map<String, Value>) -> Option<CookSpeed> {
    const KEY: &str = "cook_speed";

    match obj.get(KEY)? {
        Value::Array(_) => {
            let values = list(obj, KEY);
            (!values.is_empty()).then_some(CookSpeed::Many(values))
        }
        _ => text(obj, KEY).map(CookSpeed::One),
    }
}

fn dietary_flag(obj: &Map<String, Value>, flag: DietaryFlag) -> Option<bool> {
    let key = flag.key();
    let short = key.trim_start_matches("is_");
    let value = obj.get(key).or_else(|| obj.get(short))?;

    match value {
        Value::Null => None,
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            "" | "null" => None,
            _ => {
                ignored(key, value);
                None
            }
        },
        other => {
            ignored(key, other);
            None
        }
    }
}
