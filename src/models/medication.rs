use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::expiry::ExpiryInfo;
use crate::utils::misc::parse_string_list;

#[derive(Debug, Clone, FromRow)]
pub struct MedicationRow {
    pub id: String,
    pub med_name: Option<String>,
    pub expiry_date: Option<String>,
    pub dosage: Option<String>,
    pub lot_number: Option<String>,
    #[sqlx(rename = "med_tags")]
    pub med_tags_str: Option<String>,
    pub rep_info: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A medication inventory item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    #[serde(rename = "_id")]
    pub id: String,
    pub med_name: Option<String>,
    pub expiry_date: Option<String>,
    pub dosage: Option<String>,
    pub lot_number: Option<String>,
    pub med_tags: Vec<String>,
    pub rep_info: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<MedicationRow> for Medication {
    fn from(row: MedicationRow) -> Self {
        Medication {
            id: row.id,
            med_name: row.med_name,
            expiry_date: row.expiry_date,
            dosage: row.dosage,
            lot_number: row.lot_number,
            med_tags: parse_string_list(row.med_tags_str.as_deref()),
            rep_info: row.rep_info,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationForm {
    #[serde(default)]
    pub med_name: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub dosage: Option<String>,
    #[serde(default)]
    pub lot_number: Option<String>,
    #[serde(default)]
    pub med_tags: Option<Vec<String>>,
    #[serde(default)]
    pub rep_info: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MedicationUpdateForm {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(flatten)]
    pub fields: MedicationForm,
}

/// A medication together with its expiry classification.
#[derive(Debug, Clone, Serialize)]
pub struct MedicationExpiryView {
    #[serde(flatten)]
    pub medication: Medication,
    pub expiry: ExpiryInfo,
}
