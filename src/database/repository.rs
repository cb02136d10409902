use sqlx::SqlitePool;

use crate::database::manager::DatabaseError;
use crate::database::models::{Drink, DrinkChanges, DrinkRow, NewDrink};

/// Single-row operations on the drinks table. Identifiers are assigned here,
/// never by callers.
#[derive(Clone)]
pub struct DrinkRepository {
    pool: SqlitePool,
}

impl DrinkRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn list_all(&self) -> Result<Vec<Drink>, DatabaseError> {
        let rows = sqlx::query_as::<_, DrinkRow>("SELECT id, title, recipe FROM drinks ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|row| Drink::try_from(row).map_err(DatabaseError::from))
            .collect()
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Drink>, DatabaseError> {
        let row = sqlx::query_as::<_, DrinkRow>("SELECT id, title, recipe FROM drinks WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Drink::try_from).transpose()?)
    }

    pub async fn insert(&self, drink: &NewDrink) -> Result<Drink, DatabaseError> {
        let recipe = serde_json::to_string(&drink.recipe)?;

        let row = sqlx::query_as::<_, DrinkRow>(
            "INSERT INTO drinks (title, recipe) VALUES (?, ?) RETURNING id, title, recipe",
        )
        .bind(&drink.title)
        .bind(recipe)
        .fetch_one(&self.pool)
        .await?;

        Ok(Drink::try_from(row)?)
    }

    /// Apply `changes` in one statement. `None` when no drink has this id.
    pub async fn update(&self, id: i64, changes: &DrinkChanges) -> Result<Option<Drink>, DatabaseError> {
        let recipe = changes
            .recipe
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let row = sqlx::query_as::<_, DrinkRow>(
            "UPDATE drinks SET title = COALESCE(?, title), recipe = COALESCE(?, recipe) \
             WHERE id = ? RETURNING id, title, recipe",
        )
        .bind(changes.title.as_deref())
        .bind(recipe)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Drink::try_from).transpose()?)
    }

    /// Permanently remove a drink. `false` when no drink has this id.
    pub async fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM drinks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
