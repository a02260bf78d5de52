//! Diet labels and the ingredient exclusion tables behind them.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

mod tables;

/// Label stored when a user has not picked a diet.
pub const NOT_SET: &str = "Not Set";

/// Closed set of supported diet labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietType {
    Vegan,
    Vegetarian,
    PescoVegetarian,
    GlutenFree,
    DairyFree,
    NutFree,
    SoyFree,
    EggFree,
    Halal,
    Omnivore,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown diet type: {0}")]
pub struct UnknownDiet(pub String);

impl DietType {
    pub const ALL: [DietType; 10] = [
        DietType::Vegan,
        DietType::Vegetarian,
        DietType::PescoVegetarian,
        DietType::GlutenFree,
        DietType::DairyFree,
        DietType::NutFree,
        DietType::SoyFree,
        DietType::EggFree,
        DietType::Halal,
        DietType::Omnivore,
    ];

    /// Canonical label, as stored in the database and returned to clients.
    pub fn as_str(self) -> &'static str {
        match self {
            DietType::Vegan => "vegan",
            DietType::Vegetarian => "vegetarian",
            DietType::PescoVegetarian => "pesco-vegetarian",
            DietType::GlutenFree => "gluten-free",
            DietType::DairyFree => "dairy-free",
            DietType::NutFree => "nut-free",
            DietType::SoyFree => "soy-free",
            DietType::EggFree => "egg-free",
            DietType::Halal => "halal",
            DietType::Omnivore => "omnivore",
        }
    }

    /// Parse an optional label coming from a client.
    ///
    /// Empty input and `"Not Set"` mean "no diet" and yield `Ok(None)`; anything
    /// else must be a recognized label.
    pub fn parse_optional(label: &str) -> Result<Option<DietType>, UnknownDiet> {
        let trimmed = label.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NOT_SET) {
            return Ok(None);
        }
        trimmed.parse().map(Some)
    }

    pub fn excluded_ingredients(self) -> &'static [&'static str] {
        match self {
            DietType::Vegan => tables::VEGAN,
            DietType::Vegetarian => tables::VEGETARIAN,
            DietType::PescoVegetarian => tables::PESCO_VEGETARIAN,
            DietType::GlutenFree => tables::GLUTEN,
            DietType::DairyFree => tables::DAIRY,
            DietType::NutFree => tables::NUTS,
            DietType::SoyFree => tables::SOY,
            DietType::EggFree => tables::EGG,
            DietType::Halal => tables::HALAL,
            DietType::Omnivore => &[],
        }
    }

    /// Value for the recipe API's `diet` query parameter, when it has one.
    pub fn api_diet(self) -> Option<&'static str> {
        match self {
            DietType::Vegan => Some("vegan"),
            DietType::Vegetarian => Some("vegetarian"),
            DietType::PescoVegetarian => Some("pescetarian"),
            DietType::GlutenFree => Some("gluten free"),
            _ => None,
        }
    }

    /// Value for the recipe API's `intolerances` query parameter.
    pub fn api_intolerance(self) -> Option<&'static str> {
        match self {
            DietType::DairyFree => Some("dairy"),
            DietType::NutFree => Some("tree nut,peanut"),
            DietType::SoyFree => Some("soy"),
            DietType::EggFree => Some("egg"),
            DietType::GlutenFree => Some("gluten"),
            _ => None,
        }
    }
}

impl fmt::Display for DietType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DietType {
    type Err = UnknownDiet;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        let diet = match normalized.as_str() {
            "vegan" => DietType::Vegan,
            "vegetarian" | "lacto-ovo-vegetarian" => DietType::Vegetarian,
            "pesco-vegetarian" | "pescatarian" | "pescetarian" => DietType::PescoVegetarian,
            "gluten-free" => DietType::GlutenFree,
            "dairy-free" | "lactose-free" => DietType::DairyFree,
            "nut-free" => DietType::NutFree,
            "soy-free" => DietType::SoyFree,
            "egg-free" => DietType::EggFree,
            "halal" => DietType::Halal,
            "omnivore" | "none" => DietType::Omnivore,
            _ => return Err(UnknownDiet(s.to_string())),
        };
        Ok(diet)
    }
}

/// Exclusion set for a free-text label. Unrecognized or empty labels exclude nothing.
pub fn classify(label: &str) -> BTreeSet<&'static str> {
    match DietType::parse_optional(label) {
        Ok(Some(diet)) => diet.excluded_ingredients().iter().copied().collect(),
        _ => BTreeSet::new(),
    }
}

/// Drop every ingredient the diet excludes, keeping order and the caller's spelling.
///
/// Entries are trimmed and blank entries are skipped; the comparison itself is an
/// exact match on the lower-cased ingredient.
pub fn filter_ingredients<S: AsRef<str>>(ingredients: &[S], diet: Option<DietType>) -> Vec<String> {
    let excluded = diet.map(DietType::excluded_ingredients).unwrap_or(&[]);
    ingredients
        .iter()
        .map(|i| i.as_ref().trim())
        .filter(|i| !i.is_empty())
        .filter(|i| {
            let lowered = i.to_lowercase();
            !excluded.contains(&lowered.as_str())
        })
        .map(str::to_string)
        .collect()
}

/// Label-based variant of [`filter_ingredients`].
pub fn filter_by_label<S: AsRef<str>>(ingredients: &[S], label: &str) -> Vec<String> {
    filter_ingredients(ingredients, DietType::parse_optional(label).ok().flatten())
}
