use crate::db::Database;
use crate::error::{AppError, AppResult};
use crate::models::medication::{Medication, MedicationForm, MedicationRow};
use crate::utils::misc::{generate_uuid, non_blank, to_json_list};
use crate::utils::time::current_timestamp_seconds;

pub struct MedicationService<'a> {
    db: &'a Database,
}

impl<'a> MedicationService<'a> {
    pub fn new(db: &'a Database) -> Self {
        MedicationService { db }
    }

    pub async fn insert_new_medication(&self, form_data: &MedicationForm) -> AppResult<Medication> {
        let now = current_timestamp_seconds();
        let id = generate_uuid();
        let tags_json = to_json_list(form_data.med_tags.as_deref().unwrap_or_default());

        sqlx::query(
            r#"
            INSERT INTO medication
                (id, med_name, expiry_date, dosage, lot_number, med_tags,
                 rep_info, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(&id)
        .bind(&form_data.med_name)
        // An empty date from a blank form field means "no date"
        .bind(non_blank(form_data.expiry_date.as_deref()))
        .bind(&form_data.dosage)
        .bind(&form_data.lot_number)
        .bind(&tags_json)
        .bind(&form_data.rep_info)
        .bind(now)
        .bind(now)
        .execute(&self.db.pool)
        .await?;

        self.get_medication_by_id(&id)
            .await?
            .ok_or_else(|| AppError::Internal("Failed to create medication".to_string()))
    }

    pub async fn get_medication_by_id(&self, id: &str) -> AppResult<Option<Medication>> {
        let row = sqlx::query_as::<_, MedicationRow>(
            r#"
            SELECT id, med_name, expiry_date, dosage, lot_number, med_tags,
                   rep_info, created_at, updated_at
            FROM medication
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db.pool)
        .await?;

        Ok(row.map(Medication::from))
    }

    pub async fn get_medications(&self) -> AppResult<Vec<Medication>> {
        let rows = sqlx::query_as::<_, MedicationRow>(
            r#"
            SELECT id, med_name, expiry_date, dosage, lot_number, med_tags,
                   rep_info, created_at, updated_at
            FROM medication
            ORDER BY created_at ASC, rowid ASC
            "#,
        )
        .fetch_all(&self.db.pool)
        .await?;

        Ok(rows.into_iter().map(Medication::from).collect())
    }

    pub async fn update_medication_by_id(
        &self,
        id: &str,
        form_data: &MedicationForm,
    ) -> AppResult<Medication> {
        let now = current_timestamp_seconds();
        let tags_json = to_json_list(form_data.med_tags.as_deref().unwrap_or_default());

        let result = sqlx::query(
            r#"
            UPDATE medication
            SET med_name = $1, expiry_date = $2, dosage = $3, lot_number = $4,
                med_tags = $5, rep_info = $6, updated_at = $7
            WHERE id = $8
            "#,
        )
        .bind(&form_data.med_name)
        .bind(non_blank(form_data.expiry_date.as_deref()))
        .bind(&form_data.dosage)
        .bind(&form_data.lot_number)
        .bind(&tags_json)
        .bind(&form_data.rep_info)
        .bind(now)
        .bind(id)
        .execute(&self.db.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Document not found".to_string()));
        }

        self.get_medication_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Document not found".to_string()))
    }

    pub async fn delete_medication_by_id(&self, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM medication WHERE id = $1")
            .bind(id)
            .execute(&self.db.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
