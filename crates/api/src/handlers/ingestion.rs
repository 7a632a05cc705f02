//! Handler for parsing a localization export asset into translation lines.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use dubline_core::error::CoreError;
use dubline_core::parser::{self, ParserFormat};
use dubline_core::types::DbId;
use dubline_db::repositories::{IngestionRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::Actor;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body for the parse operation.
#[derive(Debug, Deserialize)]
pub struct ParseBody {
    /// Registered format tag, e.g. `"terms_table"`.
    pub format: String,
    /// The project whose line set this parse seeds.
    pub project_id: DbId,
    /// Re-parse an already-processed asset, replacing its lines.
    #[serde(default)]
    pub force: bool,
}

/// POST /assets/{id}/parse
///
/// Parse the stored export into `(key, original_text)` pairs and persist
/// them in one transaction. Zero parsed lines aborts with 422 before any
/// row changes; the wrapper is left unprocessed so a later attempt (e.g.
/// once a binary format decode lands) can retry.
pub async fn parse_asset(
    actor: Actor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<ParseBody>,
) -> AppResult<impl IntoResponse> {
    let asset = super::assets::ensure_asset_exists(&state.pool, id).await?;

    ProjectRepo::find_by_id(&state.pool, body.project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: body.project_id,
        }))?;

    let format = ParserFormat::from_tag(&body.format)?;
    let raw = state.files.read(&asset.file_path).await?;
    let lines = parser::parse(format, &raw)?;

    if lines.is_empty() {
        return Err(AppError::Core(CoreError::NoTranslatableContent(id)));
    }

    let result =
        IngestionRepo::replace_parsed_lines(&state.pool, id, body.project_id, &lines, body.force)
            .await?;

    tracing::info!(
        asset_id = id,
        project_id = body.project_id,
        format = format.as_str(),
        lines_created = result.lines_created,
        force = body.force,
        actor_id = actor.user_id,
        "Localization export parsed"
    );

    Ok(Json(DataResponse { data: result }))
}
