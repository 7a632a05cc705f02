//! Handlers for asset upload, lookup, classification override, and the
//! classification queue.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use dubline_core::classification::MediaKind;
use dubline_core::error::CoreError;
use dubline_core::naming;
use dubline_core::types::DbId;
use dubline_db::models::asset::{Asset, CreateAsset};
use dubline_db::repositories::{AssetRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::Actor;
use crate::middleware::rbac::RequireLeader;
use crate::response::DataResponse;
use crate::state::AppState;

/// Verify that an asset exists, returning the full row.
pub(crate) async fn ensure_asset_exists(
    pool: &sqlx::PgPool,
    id: DbId,
) -> AppResult<Asset> {
    AssetRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Asset",
            id,
        }))
}

/// POST /contents/{content_id}/assets
///
/// Multipart upload of a raw asset. The file is written and verified
/// before the row is inserted; media kind is inferred from the extension.
pub async fn upload_asset(
    actor: Actor,
    State(state): State<AppState>,
    Path(content_id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    ProjectRepo::find_content_by_id(&state.pool, content_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Content",
            id: content_id,
        }))?;

    let (filename, bytes) = super::read_file_field(multipart).await?;

    let extension = filename.rsplit_once('.').map(|(_, e)| e).unwrap_or("");
    let media_kind = MediaKind::from_extension(extension);
    let file_path = naming::upload_path(chrono::Utc::now(), &filename);

    // File first; an insert is only allowed to point at bytes on disk.
    state.files.save(&file_path, &bytes).await?;

    let asset = AssetRepo::create(
        &state.pool,
        &CreateAsset {
            content_id,
            media_kind,
            file_path,
            original_filename: filename,
        },
    )
    .await?;

    tracing::info!(
        asset_id = asset.id,
        content_id = content_id,
        actor_id = actor.user_id,
        media_kind = asset.media_kind.as_str(),
        "Asset uploaded"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: asset })))
}

/// GET /assets/{id}
pub async fn get_asset(
    _actor: Actor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let asset = ensure_asset_exists(&state.pool, id).await?;
    Ok(Json(DataResponse { data: asset }))
}

/// Body for the classification override.
#[derive(Debug, Deserialize)]
pub struct ClassifyBody {
    pub classification: String,
}

/// PUT /assets/{id}/classification
///
/// Direct admin override of an asset's classification. Requires an
/// elevated role; does not inspect referencing lines (manual correction
/// path).
pub async fn classify_asset(
    RequireLeader(actor): RequireLeader,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<ClassifyBody>,
) -> AppResult<impl IntoResponse> {
    let classification = dubline_core::classification::AssetClassification::parse(
        &body.classification,
    )?;

    let asset = AssetRepo::set_classification(&state.pool, id, classification)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Asset",
            id,
        }))?;

    tracing::info!(
        asset_id = id,
        actor_id = actor.user_id,
        classification = classification.as_str(),
        "Asset classification overridden"
    );

    Ok(Json(DataResponse { data: asset }))
}

/// GET /projects/{id}/assets/next-unclassified
///
/// The classification queue head for a project: lowest-id unclassified
/// audio asset plus the progress snapshot.
pub async fn next_unclassified(
    _actor: Actor,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    let next = AssetRepo::next_unclassified(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: next }))
}
