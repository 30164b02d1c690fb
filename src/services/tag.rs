use crate::db::Database;
use crate::error::{AppError, AppResult};
use crate::models::tag::{Tag, TagNamespace};
use crate::utils::misc::generate_uuid;
use crate::utils::time::current_timestamp_seconds;

/// Tag registry for one namespace. Name uniqueness is left to the table's
/// unique index so concurrent creates cannot both succeed.
pub struct TagService<'a> {
    db: &'a Database,
    namespace: TagNamespace,
}

impl<'a> TagService<'a> {
    pub fn new(db: &'a Database, namespace: TagNamespace) -> Self {
        TagService { db, namespace }
    }

    pub async fn get_tag_names(&self) -> AppResult<Vec<String>> {
        let names: Vec<(String,)> = sqlx::query_as(&format!(
            "SELECT name FROM {} ORDER BY name ASC",
            self.namespace.table()
        ))
        .fetch_all(&self.db.pool)
        .await?;

        Ok(names.into_iter().map(|(name,)| name).collect())
    }

    /// Inserts `name`; an exact, case-sensitive duplicate is a `Conflict`.
    pub async fn insert_new_tag(&self, name: &str) -> AppResult<Tag> {
        let tag = Tag {
            id: generate_uuid(),
            name: name.to_string(),
            created_at: current_timestamp_seconds(),
        };

        sqlx::query(&format!(
            "INSERT INTO {} (id, name, created_at) VALUES ($1, $2, $3)",
            self.namespace.table()
        ))
        .bind(&tag.id)
        .bind(&tag.name)
        .bind(tag.created_at)
        .execute(&self.db.pool)
        .await
        .map_err(|e| AppError::from_insert(e, "Tag already exists"))?;

        tracing::info!("Created {} tag {:?}", self.namespace, tag.name);
        Ok(tag)
    }
}
