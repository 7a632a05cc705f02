//! Repository for the two-phase recording pipeline.
//!
//! File writes and deletes happen at the API layer before these methods
//! run; everything here is row state only. Each phase transition locks the
//! line row, checks the step against `RecordingStatus::apply`, and commits
//! in one transaction, so an undo can never fabricate a forward transition
//! and a raw take can never be withdrawn out from under a delivered mix.

use sqlx::{PgPool, Postgres, Transaction};

use dubline_core::error::CoreError;
use dubline_core::recording::{RecordingStatus, RecordingStep};
use dubline_core::types::DbId;

use super::translation_line_repo::LINE_COLUMNS;
use super::RepoError;
use crate::models::raw_recording::RawRecording;
use crate::models::translation_line::TranslationLine;

/// Column list for `raw_recordings` queries.
const RAW_COLUMNS: &str = "id, translation_line_id, file_url, created_at";

/// Provides state transitions for raw captures and final mixes.
pub struct RecordingRepo;

impl RecordingRepo {
    pub async fn find_raw_by_line(
        pool: &PgPool,
        line_id: DbId,
    ) -> Result<Option<RawRecording>, sqlx::Error> {
        let query =
            format!("SELECT {RAW_COLUMNS} FROM raw_recordings WHERE translation_line_id = $1");
        sqlx::query_as::<_, RawRecording>(&query)
            .bind(line_id)
            .fetch_optional(pool)
            .await
    }

    /// Lock the line row for the duration of the transaction.
    async fn lock_line(
        tx: &mut Transaction<'_, Postgres>,
        line_id: DbId,
    ) -> Result<TranslationLine, RepoError> {
        let query =
            format!("SELECT {LINE_COLUMNS} FROM translation_lines WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, TranslationLine>(&query)
            .bind(line_id)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or(
                CoreError::NotFound {
                    entity: "TranslationLine",
                    id: line_id,
                }
                .into(),
            )
    }

    async fn set_status(
        tx: &mut Transaction<'_, Postgres>,
        line_id: DbId,
        status: RecordingStatus,
    ) -> Result<TranslationLine, sqlx::Error> {
        let query = format!(
            "UPDATE translation_lines SET recording_status = $2, updated_at = now() \
             WHERE id = $1 \
             RETURNING {LINE_COLUMNS}"
        );
        sqlx::query_as::<_, TranslationLine>(&query)
            .bind(line_id)
            .bind(status)
            .fetch_one(&mut **tx)
            .await
    }

    /// Record a raw capture: insert the unique take row and advance the
    /// line to PENDING_MIX in one transaction. A concurrent double-submit
    /// collides on `uq_raw_recordings_line` and surfaces as 409.
    pub async fn submit_raw(
        pool: &PgPool,
        line_id: DbId,
        file_url: &str,
    ) -> Result<(TranslationLine, RawRecording), RepoError> {
        let mut tx = pool.begin().await?;

        let line = Self::lock_line(&mut tx, line_id).await?;
        let next = line.recording_status.apply(RecordingStep::SubmitRaw)?;

        let insert = format!(
            "INSERT INTO raw_recordings (translation_line_id, file_url) \
             VALUES ($1, $2) \
             RETURNING {RAW_COLUMNS}"
        );
        let recording = sqlx::query_as::<_, RawRecording>(&insert)
            .bind(line_id)
            .bind(file_url)
            .fetch_one(&mut *tx)
            .await?;

        let line = Self::set_status(&mut tx, line_id, next).await?;

        tx.commit().await?;
        Ok((line, recording))
    }

    /// Withdraw the raw capture: delete the take row and reset the line to
    /// PENDING_RECORDING. With nothing to withdraw the call is a no-op
    /// success; with a mix already delivered it is refused.
    pub async fn undo_raw(pool: &PgPool, line_id: DbId) -> Result<TranslationLine, RepoError> {
        let mut tx = pool.begin().await?;

        let line = Self::lock_line(&mut tx, line_id).await?;
        let next = line.recording_status.apply(RecordingStep::UndoRaw)?;

        sqlx::query("DELETE FROM raw_recordings WHERE translation_line_id = $1")
            .bind(line_id)
            .execute(&mut *tx)
            .await?;

        let line = if next == line.recording_status {
            line
        } else {
            Self::set_status(&mut tx, line_id, next).await?
        };

        tx.commit().await?;
        Ok(line)
    }

    /// Record the final mix: set the mix URL and complete the line.
    /// Refused unless a raw take is awaiting its mix.
    pub async fn submit_mix(
        pool: &PgPool,
        line_id: DbId,
        file_url: &str,
    ) -> Result<TranslationLine, RepoError> {
        let mut tx = pool.begin().await?;

        let line = Self::lock_line(&mut tx, line_id).await?;
        let next = line.recording_status.apply(RecordingStep::SubmitMix)?;

        let query = format!(
            "UPDATE translation_lines \
             SET voice_recording_url = $2, recording_status = $3, updated_at = now() \
             WHERE id = $1 \
             RETURNING {LINE_COLUMNS}"
        );
        let line = sqlx::query_as::<_, TranslationLine>(&query)
            .bind(line_id)
            .bind(file_url)
            .bind(next)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(line)
    }

    /// Withdraw the final mix: clear the URL and fall back to PENDING_MIX.
    /// With no mix delivered the line is returned unchanged; the undo never
    /// advances a line that has yet to reach the mix phase.
    pub async fn undo_mix(pool: &PgPool, line_id: DbId) -> Result<TranslationLine, RepoError> {
        let mut tx = pool.begin().await?;

        let line = Self::lock_line(&mut tx, line_id).await?;
        let next = line.recording_status.apply(RecordingStep::UndoMix)?;

        let line = if next == line.recording_status {
            line
        } else {
            let query = format!(
                "UPDATE translation_lines \
                 SET voice_recording_url = NULL, recording_status = $2, updated_at = now() \
                 WHERE id = $1 \
                 RETURNING {LINE_COLUMNS}"
            );
            sqlx::query_as::<_, TranslationLine>(&query)
                .bind(line_id)
                .bind(next)
                .fetch_one(&mut *tx)
                .await?
        };

        tx.commit().await?;
        Ok(line)
    }
}
