use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::error::AppError;
use crate::models::{Experience, NewExperience};
use crate::AppState;

const IMAGE_FIELD: &str = "image";
const EXPERIENCES_FOLDER: &str = "experiences";
const MISSING_FIELDS: &str = "title, position, organization, year and description are required";
const MISSING_IMAGE: &str = "an image upload is required";
const BAD_DESCRIPTION: &str = "description must be a non-empty JSON array of strings";

#[derive(Debug, Serialize)]
pub struct CreateExperienceResponse {
    pub message: String,
    pub experience: Experience,
}

/// All experiences, ascending creation time.
pub async fn list_experiences(
    State(state): State<AppState>,
) -> Result<Json<Vec<Experience>>, AppError> {
    let experiences = state.experiences.list().await.map_err(AppError::Database)?;
    Ok(Json(experiences))
}

#[derive(Default)]
struct ExperienceForm {
    title: Option<String>,
    position: Option<String>,
    organization: Option<String>,
    year: Option<String>,
    description: Option<String>,
    image: Option<UploadedImage>,
}

struct UploadedImage {
    filename: String,
    data: Vec<u8>,
}

/// Create an experience from a multipart form with a single image.
/// Validation order: required fields, then the file, then the
/// `description` format.
pub async fn create_experience(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<CreateExperienceResponse>), AppError> {
    let mut form = ExperienceForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::Multipart(err.to_string()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == IMAGE_FIELD {
            // One image per record; extra file parts are ignored.
            if form.image.is_none() {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|err| AppError::Multipart(err.to_string()))?
                    .to_vec();
                form.image = Some(UploadedImage { filename, data });
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|err| AppError::Multipart(err.to_string()))?;
        match name.as_str() {
            "title" => form.title = Some(value),
            "position" => form.position = Some(value),
            "organization" => form.organization = Some(value),
            "year" => form.year = Some(value),
            "description" => form.description = Some(value),
            _ => {}
        }
    }

    let (Some(title), Some(position), Some(organization), Some(year), Some(raw_description)) = (
        non_empty(form.title),
        non_empty(form.position),
        non_empty(form.organization),
        non_empty(form.year),
        non_empty(form.description),
    ) else {
        return Err(AppError::validation(MISSING_FIELDS));
    };

    let Some(image) = form.image else {
        return Err(AppError::validation(MISSING_IMAGE));
    };

    let description = parse_description(&raw_description)?;

    tracing::info!("Creating experience: title={}", title);

    let image_url = state
        .media
        .upload_image(EXPERIENCES_FOLDER, &image.filename, image.data)
        .await
        .map_err(AppError::Upload)?;

    let experience = state
        .experiences
        .insert(NewExperience {
            title,
            image: image_url,
            position,
            organization,
            year,
            description,
        })
        .await
        .map_err(AppError::Database)?;

    Ok((
        StatusCode::CREATED,
        Json(CreateExperienceResponse {
            message: "Experience created with uploaded image".to_string(),
            experience,
        }),
    ))
}

/// `description` arrives as a JSON-encoded array of strings. Anything
/// else, including an empty array, is rejected rather than coerced.
fn parse_description(raw: &str) -> Result<Vec<String>, AppError> {
    let parsed: Vec<String> =
        serde_json::from_str(raw).map_err(|_| AppError::validation(BAD_DESCRIPTION))?;
    if parsed.is_empty() {
        return Err(AppError::validation(BAD_DESCRIPTION));
    }
    Ok(parsed)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
