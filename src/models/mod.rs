use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored portfolio project. Records are created once and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub project_name: String,
    pub images: Vec<String>,
    pub detail: String,
    pub role: String,
    pub tools: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_demo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A stored work/education experience entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    pub title: String,
    pub image: String,
    pub position: String,
    pub organization: String,
    pub year: String,
    pub description: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for a new project, image URLs already resolved.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub project_name: String,
    pub images: Vec<String>,
    pub detail: String,
    pub role: String,
    pub tools: String,
    pub link_demo: Option<String>,
}

/// Validated input for a new experience, image URL already resolved.
#[derive(Debug, Clone)]
pub struct NewExperience {
    pub title: String,
    pub image: String,
    pub position: String,
    pub organization: String,
    pub year: String,
    pub description: Vec<String>,
}
