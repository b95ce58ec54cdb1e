use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteConnection, SqlitePool};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
}

pub async fn get_all_categories(pool: &SqlitePool) -> sqlx::Result<Vec<Category>> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT id, type FROM categories ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_category(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Category>> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT id, type FROM categories WHERE categories.id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Inserts the category, or renames it when the id is already taken.
pub async fn upsert_category(conn: &mut SqliteConnection, category: &Category) -> sqlx::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO categories (id, type) VALUES (?1, ?2)
        ON CONFLICT (id) DO UPDATE SET type = excluded.type
        "#,
    )
    .bind(category.id)
    .bind(&category.kind)
    .execute(conn)
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn category(id: i64, kind: &str) -> Category {
        Category {
            id,
            kind: kind.to_owned(),
        }
    }

    #[tokio::test]
    async fn categories_are_listed_by_id() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        upsert_category(&mut conn, &category(2, "Art")).await.unwrap();
        upsert_category(&mut conn, &category(1, "Science")).await.unwrap();
        drop(conn);

        let categories = get_all_categories(&pool).await.unwrap();
        assert_eq!(categories, vec![category(1, "Science"), category(2, "Art")]);
    }

    #[tokio::test]
    async fn upsert_renames_existing_category() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        upsert_category(&mut conn, &category(1, "Sciense")).await.unwrap();
        upsert_category(&mut conn, &category(1, "Science")).await.unwrap();
        drop(conn);

        assert_eq!(
            get_category(&pool, 1).await.unwrap(),
            Some(category(1, "Science"))
        );
        assert_eq!(get_all_categories(&pool).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_category_is_none() {
        let pool = test_pool().await;
        assert_eq!(get_category(&pool, 42).await.unwrap(), None);
    }

    #[test]
    fn category_serializes_kind_as_type() {
        let json = serde_json::to_value(category(1, "Science")).unwrap();
        assert_eq!(json, serde_json::json!({"id": 1, "type": "Science"}));
    }
}
