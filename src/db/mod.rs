pub mod repository;

use anyhow::Result;
use async_trait::async_trait;
use mongodb::{bson::doc, Client, Database};

use crate::config::DatabaseConfig;
use crate::models::{Experience, NewExperience, NewProject, Project};

/// Persistence seam for project records. Injected into handlers so tests
/// can substitute an in-memory fake.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn insert(&self, new_project: NewProject) -> Result<Project>;

    /// All projects, ascending creation time.
    async fn list(&self) -> Result<Vec<Project>>;
}

/// Persistence seam for experience records.
#[async_trait]
pub trait ExperienceStore: Send + Sync {
    async fn insert(&self, new_experience: NewExperience) -> Result<Experience>;

    /// All experiences, ascending creation time.
    async fn list(&self) -> Result<Vec<Experience>>;
}

/// Connect to MongoDB and verify the connection with a ping. The caller
/// treats a failure here as fatal.
pub async fn connect(config: &DatabaseConfig) -> Result<Database> {
    let client = Client::with_uri_str(&config.uri).await?;
    let database = client.database(&config.database);
    database.run_command(doc! { "ping": 1 }).await?;
    Ok(database)
}
