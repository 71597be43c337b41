use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::error::AppError;
use crate::models::{NewProject, Project};
use crate::AppState;

const IMAGES_FIELD: &str = "images";
const PROJECTS_FOLDER: &str = "projects";
const MISSING_FIELDS: &str = "projectName, detail, role and tools are required";
const MISSING_IMAGES: &str = "at least one image is required";

#[derive(Debug, Serialize)]
pub struct CreateProjectResponse {
    pub message: String,
    pub project: Project,
}

/// All projects, ascending creation time.
pub async fn list_projects(
    State(state): State<AppState>,
) -> Result<Json<Vec<Project>>, AppError> {
    let projects = state.projects.list().await.map_err(AppError::Database)?;
    Ok(Json(projects))
}

#[derive(Default)]
struct ProjectForm {
    project_name: Option<String>,
    detail: Option<String>,
    role: Option<String>,
    tools: Option<String>,
    link_demo: Option<String>,
    images: Vec<UploadedImage>,
}

struct UploadedImage {
    filename: String,
    data: Vec<u8>,
}

/// Create a project from a multipart form, uploading every attached image
/// first. Field checks run before the file check; both short-circuit.
pub async fn create_project(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<CreateProjectResponse>), AppError> {
    let mut form = ProjectForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::Multipart(err.to_string()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == IMAGES_FIELD {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|err| AppError::Multipart(err.to_string()))?
                .to_vec();
            form.images.push(UploadedImage { filename, data });
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|err| AppError::Multipart(err.to_string()))?;
        match name.as_str() {
            "projectName" => form.project_name = Some(value),
            "detail" => form.detail = Some(value),
            "role" => form.role = Some(value),
            "tools" => form.tools = Some(value),
            "linkDemo" => form.link_demo = Some(value),
            _ => {}
        }
    }

    let (Some(project_name), Some(detail), Some(role), Some(tools)) = (
        non_empty(form.project_name),
        non_empty(form.detail),
        non_empty(form.role),
        non_empty(form.tools),
    ) else {
        return Err(AppError::validation(MISSING_FIELDS));
    };

    if form.images.is_empty() {
        return Err(AppError::validation(MISSING_IMAGES));
    }

    tracing::info!(
        "Creating project: name={}, images={}",
        project_name,
        form.images.len()
    );

    // Uploaded sequentially so the stored URL order matches submission order.
    let mut image_urls = Vec::with_capacity(form.images.len());
    for image in form.images {
        let url = state
            .media
            .upload_image(PROJECTS_FOLDER, &image.filename, image.data)
            .await
            .map_err(AppError::Upload)?;
        image_urls.push(url);
    }

    let project = state
        .projects
        .insert(NewProject {
            project_name,
            images: image_urls,
            detail,
            role,
            tools,
            link_demo: non_empty(form.link_demo),
        })
        .await
        .map_err(AppError::Database)?;

    Ok((
        StatusCode::CREATED,
        Json(CreateProjectResponse {
            message: "Project created with uploaded images".to_string(),
            project,
        }),
    ))
}

/// Presence check treats an empty string the same as an absent field.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::handlers::testing::{
        get_request, multipart_request, send, test_context, FailingMedia, FailingProjects,
        InMemoryExperiences, InMemoryProjects, MultipartBuilder,
    };
    use crate::db::ProjectStore;
    use crate::{app, AppState};

    fn valid_form() -> MultipartBuilder {
        MultipartBuilder::new()
            .text("projectName", "Portfolio")
            .text("detail", "demo")
            .text("role", "dev")
            .text("tools", "rust")
            .file("images", "first.png", b"png-bytes-1")
            .file("images", "second.png", b"png-bytes-2")
    }

    #[tokio::test]
    async fn test_create_project_echoes_fields_and_preserves_image_order() {
        let ctx = test_context();

        let (status, body) = send(
            ctx.router.clone(),
            multipart_request("/api/projects/create-with-images", valid_form()),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert!(body["message"].is_string());

        let project = &body["project"];
        assert_eq!(project["projectName"], "Portfolio");
        assert_eq!(project["detail"], "demo");
        assert_eq!(project["role"], "dev");
        assert_eq!(project["tools"], "rust");
        assert!(!project["id"].as_str().unwrap().is_empty());
        assert!(project["createdAt"].is_string());

        let images = project["images"].as_array().unwrap();
        assert_eq!(images.len(), 2);
        assert!(images.iter().all(|url| !url.as_str().unwrap().is_empty()));
        // Upload order follows submission order.
        assert!(images[0].as_str().unwrap().contains("first.png"));
        assert!(images[1].as_str().unwrap().contains("second.png"));

        let uploads = ctx.media.uploads.lock().unwrap();
        assert_eq!(uploads.len(), 2);
        assert!(uploads.iter().all(|(folder, _)| folder == "projects"));
    }

    #[tokio::test]
    async fn test_optional_link_demo_round_trips() {
        let ctx = test_context();

        let form = valid_form().text("linkDemo", "https://example.com/demo");
        let (status, body) = send(
            ctx.router.clone(),
            multipart_request("/api/projects/create-with-images", form),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["project"]["linkDemo"], "https://example.com/demo");

        // Without the field the key is omitted entirely.
        let (_, body) = send(
            ctx.router.clone(),
            multipart_request("/api/projects/create-with-images", valid_form()),
        )
        .await;
        assert!(body["project"].get("linkDemo").is_none());
    }

    #[tokio::test]
    async fn test_missing_required_field_is_rejected_without_side_effects() {
        let ctx = test_context();

        let form = MultipartBuilder::new()
            .text("projectName", "Portfolio")
            .text("role", "dev")
            .text("tools", "rust")
            .file("images", "a.png", b"bytes");
        let (status, body) = send(
            ctx.router.clone(),
            multipart_request("/api/projects/create-with-images", form),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], MISSING_FIELDS);
        assert!(ctx.projects.list().await.unwrap().is_empty());
        assert!(ctx.media.uploads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_field_counts_as_missing() {
        let ctx = test_context();

        let form = MultipartBuilder::new()
            .text("projectName", "Portfolio")
            .text("detail", "")
            .text("role", "dev")
            .text("tools", "rust")
            .file("images", "a.png", b"bytes");
        let (status, body) = send(
            ctx.router,
            multipart_request("/api/projects/create-with-images", form),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], MISSING_FIELDS);
    }

    #[tokio::test]
    async fn test_zero_images_is_rejected() {
        let ctx = test_context();

        let form = MultipartBuilder::new()
            .text("projectName", "Portfolio")
            .text("detail", "demo")
            .text("role", "dev")
            .text("tools", "rust");
        let (status, body) = send(
            ctx.router.clone(),
            multipart_request("/api/projects/create-with-images", form),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], MISSING_IMAGES);
        assert!(ctx.projects.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_field_check_wins_over_file_check() {
        let ctx = test_context();

        let (status, body) = send(
            ctx.router,
            multipart_request(
                "/api/projects/create-with-images",
                MultipartBuilder::new(),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], MISSING_FIELDS);
    }

    #[tokio::test]
    async fn test_list_returns_records_in_creation_order() {
        let ctx = test_context();

        for name in ["alpha", "beta", "gamma"] {
            let form = MultipartBuilder::new()
                .text("projectName", name)
                .text("detail", "demo")
                .text("role", "dev")
                .text("tools", "rust")
                .file("images", "a.png", b"bytes");
            let (status, _) = send(
                ctx.router.clone(),
                multipart_request("/api/projects/create-with-images", form),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, body) = send(ctx.router, get_request("/api/projects")).await;
        assert_eq!(status, StatusCode::OK);

        let records = body.as_array().unwrap();
        assert_eq!(records.len(), 3);
        let names: Vec<&str> = records
            .iter()
            .map(|record| record["projectName"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["alpha", "beta", "gamma"]);
        assert!(records
            .iter()
            .all(|record| !record["id"].as_str().unwrap().is_empty()
                && record["createdAt"].is_string()
                && record["updatedAt"].is_string()));
    }

    #[tokio::test]
    async fn test_upload_failure_maps_to_generic_500() {
        let projects = Arc::new(InMemoryProjects::default());
        let router = app(AppState {
            projects: projects.clone(),
            experiences: Arc::new(InMemoryExperiences::default()),
            media: Arc::new(FailingMedia),
        });

        let (status, body) = send(
            router,
            multipart_request("/api/projects/create-with-images", valid_form()),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
        assert!(projects.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_maps_to_generic_500() {
        let router = app(AppState {
            projects: Arc::new(FailingProjects),
            experiences: Arc::new(InMemoryExperiences::default()),
            media: Arc::new(crate::handlers::testing::FakeMedia::default()),
        });

        let (status, body) = send(router, get_request("/api/projects")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
    }
}
