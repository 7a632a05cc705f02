pub mod asset_repo;
pub mod character_repo;
pub mod ingestion_repo;
pub mod linking_repo;
pub mod project_asset_setting_repo;
pub mod project_repo;
pub mod recording_repo;
pub mod translation_line_repo;

pub use asset_repo::AssetRepo;
pub use character_repo::CharacterRepo;
pub use ingestion_repo::IngestionRepo;
pub use linking_repo::LinkingRepo;
pub use project_asset_setting_repo::ProjectAssetSettingRepo;
pub use project_repo::ProjectRepo;
pub use recording_repo::RecordingRepo;
pub use translation_line_repo::TranslationLineRepo;

use dubline_core::error::CoreError;

/// Error type for repository operations that enforce domain rules inside
/// their transaction (ingestion guard, link uniqueness). Plain CRUD methods
/// return `sqlx::Error` directly.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Db(#[from] sqlx::Error),

    #[error(transparent)]
    Domain(#[from] CoreError),
}
