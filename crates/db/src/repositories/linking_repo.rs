//! Cross-entity linking transactions.
//!
//! Every operation here touches both an asset's classification and the
//! lines referencing it, so each runs inside a single transaction: a
//! mid-operation failure must never leave a line pointing at a reset or
//! re-classified asset.

use sqlx::PgPool;

use dubline_core::classification::AssetClassification;
use dubline_core::error::CoreError;
use dubline_core::naming::non_dialogue_key;
use dubline_core::translation::TranslationStatus;
use dubline_core::types::DbId;

use super::asset_repo::ASSET_COLUMNS;
use super::translation_line_repo::LINE_COLUMNS;
use super::RepoError;
use crate::models::asset::Asset;
use crate::models::translation_line::{LinkAudio, TranslationLine};

/// Provides the audio-to-line linking and unlinking protocol.
pub struct LinkingRepo;

impl LinkingRepo {
    /// Non-dialogue shortcut: classify the asset NON_DIALOGUE_VOCAL and
    /// create its synthetic APPROVED line in one transaction.
    ///
    /// The synthetic key is deterministic per asset, so a second call
    /// collides on `uq_translation_lines_synthetic_key` instead of creating
    /// a second line; the API layer surfaces that as 409.
    pub async fn link_non_dialogue(
        pool: &PgPool,
        project_id: DbId,
        asset_id: DbId,
        character_id: Option<DbId>,
    ) -> Result<TranslationLine, RepoError> {
        let mut tx = pool.begin().await?;

        let update_asset = format!(
            "UPDATE assets SET classification = $2, updated_at = now() \
             WHERE id = $1 \
             RETURNING {ASSET_COLUMNS}"
        );
        let asset = sqlx::query_as::<_, Asset>(&update_asset)
            .bind(asset_id)
            .bind(AssetClassification::NonDialogueVocal)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Asset",
                id: asset_id,
            })?;

        let insert_line = format!(
            "INSERT INTO translation_lines \
                (project_id, key, status, character_id, voice_reference_asset_id, is_non_dialogue) \
             VALUES ($1, $2, $3, $4, $5, true) \
             RETURNING {LINE_COLUMNS}"
        );
        let line = sqlx::query_as::<_, TranslationLine>(&insert_line)
            .bind(project_id)
            .bind(non_dialogue_key(asset.id))
            .bind(TranslationStatus::Approved)
            .bind(character_id)
            .bind(asset.id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(line)
    }

    /// Detach an asset from every line referencing it and reset its
    /// classification to UNCLASSIFIED, atomically.
    ///
    /// Lines are null-ed out, not deleted; removing a synthetic line is a
    /// separate explicit operation. Returns the reset asset and the number
    /// of lines cleared.
    pub async fn unlink(pool: &PgPool, asset_id: DbId) -> Result<(Asset, u64), RepoError> {
        let mut tx = pool.begin().await?;

        let cleared = sqlx::query(
            "UPDATE translation_lines \
             SET voice_reference_asset_id = NULL, updated_at = now() \
             WHERE voice_reference_asset_id = $1",
        )
        .bind(asset_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let update_asset = format!(
            "UPDATE assets SET classification = $2, updated_at = now() \
             WHERE id = $1 \
             RETURNING {ASSET_COLUMNS}"
        );
        let asset = sqlx::query_as::<_, Asset>(&update_asset)
            .bind(asset_id)
            .bind(AssetClassification::Unclassified)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Asset",
                id: asset_id,
            })?;

        tx.commit().await?;
        Ok((asset, cleared))
    }

    /// Bind an audio asset to an existing line (the general-purpose path
    /// for dialogue lines seeded by the parser), updating the line's voice
    /// reference, character, and non-dialogue flag, then classifying the
    /// asset to match, all in one transaction.
    ///
    /// Rejects with `Conflict` if the asset is already the voice reference
    /// of a different line; callers must `unlink` first when re-binding.
    pub async fn link_audio(
        pool: &PgPool,
        line_id: DbId,
        input: &LinkAudio,
    ) -> Result<TranslationLine, RepoError> {
        let mut tx = pool.begin().await?;

        let bound_elsewhere: Option<DbId> = sqlx::query_scalar(
            "SELECT id FROM translation_lines \
             WHERE voice_reference_asset_id = $1 AND id <> $2 \
             FOR UPDATE",
        )
        .bind(input.asset_id)
        .bind(line_id)
        .fetch_optional(&mut *tx)
        .await?;

        if let Some(other) = bound_elsewhere {
            return Err(CoreError::Conflict(format!(
                "Asset {} is already the voice reference of line {other}; unlink it first",
                input.asset_id
            ))
            .into());
        }

        let update_line = format!(
            "UPDATE translation_lines \
             SET voice_reference_asset_id = $2, \
                 character_id = $3, \
                 is_non_dialogue = $4, \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING {LINE_COLUMNS}"
        );
        let line = sqlx::query_as::<_, TranslationLine>(&update_line)
            .bind(line_id)
            .bind(input.asset_id)
            .bind(input.character_id)
            .bind(input.is_non_dialogue)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "TranslationLine",
                id: line_id,
            })?;

        let classified = sqlx::query(
            "UPDATE assets SET classification = $2, updated_at = now() WHERE id = $1",
        )
        .bind(input.asset_id)
        .bind(AssetClassification::for_link(input.is_non_dialogue))
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if classified == 0 {
            return Err(CoreError::NotFound {
                entity: "Asset",
                id: input.asset_id,
            }
            .into());
        }

        tx.commit().await?;
        Ok(line)
    }
}
