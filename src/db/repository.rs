use anyhow::Result;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime},
    Collection, Database,
};
use serde::{Deserialize, Serialize};

use crate::db::{ExperienceStore, ProjectStore};
use crate::models::{Experience, NewExperience, NewProject, Project};

const PROJECTS_COLLECTION: &str = "projects";
const EXPERIENCES_COLLECTION: &str = "experiences";

/// Stored shape of a project. `_id` and the timestamps are assigned here;
/// the domain model surfaces them as a hex string and RFC 3339 datetimes.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    project_name: String,
    images: Vec<String>,
    detail: String,
    role: String,
    tools: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    link_demo: Option<String>,
    created_at: DateTime,
    updated_at: DateTime,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExperienceDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    title: String,
    image: String,
    position: String,
    organization: String,
    year: String,
    description: Vec<String>,
    created_at: DateTime,
    updated_at: DateTime,
}

impl From<ProjectDocument> for Project {
    fn from(document: ProjectDocument) -> Self {
        Project {
            id: document.id.to_hex(),
            project_name: document.project_name,
            images: document.images,
            detail: document.detail,
            role: document.role,
            tools: document.tools,
            link_demo: document.link_demo,
            created_at: document.created_at.to_chrono(),
            updated_at: document.updated_at.to_chrono(),
        }
    }
}

impl From<ExperienceDocument> for Experience {
    fn from(document: ExperienceDocument) -> Self {
        Experience {
            id: document.id.to_hex(),
            title: document.title,
            image: document.image,
            position: document.position,
            organization: document.organization,
            year: document.year,
            description: document.description,
            created_at: document.created_at.to_chrono(),
            updated_at: document.updated_at.to_chrono(),
        }
    }
}

/// MongoDB-backed project store.
pub struct MongoProjectStore {
    collection: Collection<ProjectDocument>,
}

impl MongoProjectStore {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(PROJECTS_COLLECTION),
        }
    }
}

#[async_trait]
impl ProjectStore for MongoProjectStore {
    async fn insert(&self, new_project: NewProject) -> Result<Project> {
        let now = DateTime::now();
        let document = ProjectDocument {
            id: ObjectId::new(),
            project_name: new_project.project_name,
            images: new_project.images,
            detail: new_project.detail,
            role: new_project.role,
            tools: new_project.tools,
            link_demo: new_project.link_demo,
            created_at: now,
            updated_at: now,
        };

        self.collection.insert_one(&document).await?;
        tracing::info!("Created project record: id={}", document.id.to_hex());

        Ok(document.into())
    }

    async fn list(&self) -> Result<Vec<Project>> {
        let documents: Vec<ProjectDocument> = self
            .collection
            .find(doc! {})
            .sort(doc! { "createdAt": 1 })
            .await?
            .try_collect()
            .await?;

        Ok(documents.into_iter().map(Project::from).collect())
    }
}

/// MongoDB-backed experience store.
pub struct MongoExperienceStore {
    collection: Collection<ExperienceDocument>,
}

impl MongoExperienceStore {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(EXPERIENCES_COLLECTION),
        }
    }
}

#[async_trait]
impl ExperienceStore for MongoExperienceStore {
    async fn insert(&self, new_experience: NewExperience) -> Result<Experience> {
        let now = DateTime::now();
        let document = ExperienceDocument {
            id: ObjectId::new(),
            title: new_experience.title,
            image: new_experience.image,
            position: new_experience.position,
            organization: new_experience.organization,
            year: new_experience.year,
            description: new_experience.description,
            created_at: now,
            updated_at: now,
        };

        self.collection.insert_one(&document).await?;
        tracing::info!("Created experience record: id={}", document.id.to_hex());

        Ok(document.into())
    }

    async fn list(&self) -> Result<Vec<Experience>> {
        let documents: Vec<ExperienceDocument> = self
            .collection
            .find(doc! {})
            .sort(doc! { "createdAt": 1 })
            .await?
            .try_collect()
            .await?;

        Ok(documents.into_iter().map(Experience::from).collect())
    }
}
