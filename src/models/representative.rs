use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::misc::{parse_string_list, string_or_number};

#[derive(Debug, Clone, FromRow)]
pub struct RepresentativeRow {
    pub id: String,
    pub rep_name: Option<String>,
    pub facility_and_drug: Option<String>,
    pub phone_number: Option<String>,
    pub fax_number: Option<String>,
    pub location: Option<String>,
    #[sqlx(rename = "tags")]
    pub tags_str: Option<String>,
    #[sqlx(rename = "pdf_links")]
    pub pdf_links_str: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A pharmaceutical representative contact ("basics" entry).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Representative {
    #[serde(rename = "_id")]
    pub id: String,
    pub rep_name: Option<String>,
    pub facility_and_drug: Option<String>,
    pub phone_number: Option<String>,
    pub fax_number: Option<String>,
    pub location: Option<String>,
    pub tags: Vec<String>,
    pub pdf_links: Vec<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<RepresentativeRow> for Representative {
    fn from(row: RepresentativeRow) -> Self {
        Representative {
            id: row.id,
            rep_name: row.rep_name,
            facility_and_drug: row.facility_and_drug,
            phone_number: row.phone_number,
            fax_number: row.fax_number,
            location: row.location,
            tags: parse_string_list(row.tags_str.as_deref()),
            pdf_links: parse_string_list(row.pdf_links_str.as_deref()),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Body of `POST /post`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepresentativeForm {
    #[serde(default)]
    pub rep_name: Option<String>,
    #[serde(default)]
    pub facility_and_drug: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub fax_number: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub pdf_links: Option<Vec<String>>,
}

/// Body of `PUT /update`: the id plus the full field set. Fields left out
/// are cleared.
#[derive(Debug, Clone, Deserialize)]
pub struct RepresentativeUpdateForm {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(flatten)]
    pub fields: RepresentativeForm,
}
