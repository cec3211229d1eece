//! Lookup tables: categories, locations and images

use sqlx::{PgExecutor, PgPool};

use crate::error::DatabaseError;

/// Read access to the category lookup table
#[derive(Debug, Clone)]
pub struct LookupRepository {
    pool: PgPool,
}

impl LookupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn categories(&self) -> Result<Vec<CategoryRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT category_id, name FROM categories ORDER BY category_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn category_exists<'e, E>(executor: E, category_id: i32) -> Result<bool, DatabaseError>
    where
        E: PgExecutor<'e>,
    {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM categories WHERE category_id = $1)",
        )
        .bind(category_id)
        .fetch_one(executor)
        .await?;
        Ok(exists)
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CategoryRow {
    pub category_id: i32,
    pub name: String,
}
