use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::forms::{CreateForm, DeleteForm, FormFields, UpdateForm};
use crate::api::AppState;
use crate::domain::Record;
use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct ProfilesPage {
    pub names: Vec<Record>,
}

#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub success: bool,
}

impl ActionResponse {
    fn ok() -> Json<Self> {
        Json(Self { success: true })
    }
}

pub async fn list_profiles(State(state): State<AppState>) -> Result<Json<ProfilesPage>, AppError> {
    let names = state.profiles.list().await?;
    Ok(Json(ProfilesPage { names }))
}

pub async fn create_profile(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ActionResponse>, AppError> {
    let form = CreateForm::from_fields(&FormFields::parse(&body))?;
    state.profiles.create(form.into_record()).await?;
    Ok(ActionResponse::ok())
}

pub async fn update_profiles(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ActionResponse>, AppError> {
    let form = UpdateForm::from_fields(&FormFields::parse(&body))?;
    state.profiles.update(form.rows).await?;
    Ok(ActionResponse::ok())
}

pub async fn delete_profile(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ActionResponse>, AppError> {
    let form = DeleteForm::from_fields(&FormFields::parse(&body))?;
    state.profiles.delete(form.id).await?;
    Ok(ActionResponse::ok())
}
