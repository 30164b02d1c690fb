use crate::db::Database;
use crate::error::{AppError, AppResult};
use crate::models::representative::{Representative, RepresentativeForm, RepresentativeRow};
use crate::utils::misc::{generate_uuid, to_json_list};
use crate::utils::time::current_timestamp_seconds;

pub struct RepresentativeService<'a> {
    db: &'a Database,
}

impl<'a> RepresentativeService<'a> {
    pub fn new(db: &'a Database) -> Self {
        RepresentativeService { db }
    }

    pub async fn insert_new_representative(
        &self,
        form_data: &RepresentativeForm,
    ) -> AppResult<Representative> {
        let now = current_timestamp_seconds();
        let id = generate_uuid();

        let tags_json = to_json_list(form_data.tags.as_deref().unwrap_or_default());
        let links_json = to_json_list(form_data.pdf_links.as_deref().unwrap_or_default());

        sqlx::query(
            r#"
            INSERT INTO representative
                (id, rep_name, facility_and_drug, phone_number, fax_number,
                 location, tags, pdf_links, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(&id)
        .bind(&form_data.rep_name)
        .bind(&form_data.facility_and_drug)
        .bind(&form_data.phone_number)
        .bind(&form_data.fax_number)
        .bind(&form_data.location)
        .bind(&tags_json)
        .bind(&links_json)
        .bind(now)
        .bind(now)
        .execute(&self.db.pool)
        .await?;

        self.get_representative_by_id(&id)
            .await?
            .ok_or_else(|| AppError::Internal("Failed to create representative".to_string()))
    }

    pub async fn get_representative_by_id(&self, id: &str) -> AppResult<Option<Representative>> {
        let row = sqlx::query_as::<_, RepresentativeRow>(
            r#"
            SELECT id, rep_name, facility_and_drug, phone_number, fax_number,
                   location, tags, pdf_links, created_at, updated_at
            FROM representative
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db.pool)
        .await?;

        Ok(row.map(Representative::from))
    }

    /// All representatives in insertion order.
    pub async fn get_representatives(&self) -> AppResult<Vec<Representative>> {
        let rows = sqlx::query_as::<_, RepresentativeRow>(
            r#"
            SELECT id, rep_name, facility_and_drug, phone_number, fax_number,
                   location, tags, pdf_links, created_at, updated_at
            FROM representative
            ORDER BY created_at ASC, rowid ASC
            "#,
        )
        .fetch_all(&self.db.pool)
        .await?;

        Ok(rows.into_iter().map(Representative::from).collect())
    }

    /// Representatives whose name contains `name`, ignoring case.
    pub async fn get_representatives_by_name(&self, name: &str) -> AppResult<Vec<Representative>> {
        let needle = name.trim().to_lowercase();
        let reps = self.get_representatives().await?;

        Ok(reps
            .into_iter()
            .filter(|rep| {
                rep.rep_name
                    .as_deref()
                    .is_some_and(|n| n.to_lowercase().contains(&needle))
            })
            .collect())
    }

    /// Replaces every field of an existing representative.
    pub async fn update_representative_by_id(
        &self,
        id: &str,
        form_data: &RepresentativeForm,
    ) -> AppResult<Representative> {
        let now = current_timestamp_seconds();

        let tags_json = to_json_list(form_data.tags.as_deref().unwrap_or_default());
        let links_json = to_json_list(form_data.pdf_links.as_deref().unwrap_or_default());

        let result = sqlx::query(
            r#"
            UPDATE representative
            SET rep_name = $1, facility_and_drug = $2, phone_number = $3,
                fax_number = $4, location = $5, tags = $6, pdf_links = $7,
                updated_at = $8
            WHERE id = $9
            "#,
        )
        .bind(&form_data.rep_name)
        .bind(&form_data.facility_and_drug)
        .bind(&form_data.phone_number)
        .bind(&form_data.fax_number)
        .bind(&form_data.location)
        .bind(&tags_json)
        .bind(&links_json)
        .bind(now)
        .bind(id)
        .execute(&self.db.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Document not found".to_string()));
        }

        self.get_representative_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Document not found".to_string()))
    }

    /// Returns whether a row was removed. Missing ids are not an error.
    pub async fn delete_representative_by_id(&self, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM representative WHERE id = $1")
            .bind(id)
            .execute(&self.db.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
