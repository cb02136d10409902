use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One recipe line: `parts` of an ingredient drawn in `color`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub color: String,
    pub parts: u32,
}

/// Public projection of an ingredient; the name stays private
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngredientSummary {
    pub color: String,
    pub parts: u32,
}

/// Row as stored: the recipe is a JSON text column
#[derive(Debug, Clone, FromRow)]
pub struct DrinkRow {
    pub id: i64,
    pub title: String,
    pub recipe: String,
}

/// A drink with its recipe parsed. Serializes as the detail form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Drink {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

/// Summary form served on the public listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrinkSummary {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<IngredientSummary>,
}

impl TryFrom<DrinkRow> for Drink {
    type Error = serde_json::Error;

    fn try_from(row: DrinkRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            title: row.title,
            recipe: serde_json::from_str(&row.recipe)?,
        })
    }
}

impl Drink {
    pub fn summary(&self) -> DrinkSummary {
        DrinkSummary {
            id: self.id,
            title: self.title.clone(),
            recipe: self
                .recipe
                .iter()
                .map(|ingredient| IngredientSummary {
                    color: ingredient.color.clone(),
                    parts: ingredient.parts,
                })
                .collect(),
        }
    }
}

/// Validated input for creating a drink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDrink {
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

/// Partial update; `None` leaves the stored value as is
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrinkChanges {
    pub title: Option<String>,
    pub recipe: Option<Vec<Ingredient>>,
}

/// Request body shared by create and update
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DrinkPayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub recipe: Option<Vec<Ingredient>>,
}

impl DrinkPayload {
    /// Both fields are required; `None` when either is missing or invalid
    pub fn into_new_drink(self) -> Option<NewDrink> {
        let title = self.title.filter(|t| !t.trim().is_empty())?;
        let recipe = self.recipe.filter(|r| recipe_is_valid(r))?;
        Some(NewDrink { title, recipe })
    }

    /// Empty title or recipe means "no change"; `None` when the recipe is invalid
    pub fn into_changes(self) -> Option<DrinkChanges> {
        let recipe = match self.recipe {
            Some(recipe) if !recipe_is_valid(&recipe) => return None,
            Some(recipe) if recipe.is_empty() => None,
            other => other,
        };
        Some(DrinkChanges {
            title: self.title.filter(|t| !t.trim().is_empty()),
            recipe,
        })
    }
}

fn recipe_is_valid(recipe: &[Ingredient]) -> bool {
    recipe.iter().all(|ingredient| ingredient.parts > 0)
}
