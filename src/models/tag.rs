use serde::{Deserialize, Serialize};
use std::fmt;

/// Tags live in two independent uniqueness domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagNamespace {
    Representative,
    Medication,
}

impl TagNamespace {
    pub fn table(&self) -> &'static str {
        match self {
            TagNamespace::Representative => "rep_tag",
            TagNamespace::Medication => "med_tag",
        }
    }
}

impl fmt::Display for TagNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagNamespace::Representative => write!(f, "representative"),
            TagNamespace::Medication => write!(f, "medication"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Tag {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTagRequest {
    pub tag_name: String,
}

#[derive(Debug, Serialize)]
pub struct CreateTagResponse {
    pub message: String,
    pub tag: Tag,
}
