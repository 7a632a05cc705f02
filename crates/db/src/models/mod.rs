pub mod asset;
pub mod character;
pub mod project;
pub mod project_asset_setting;
pub mod raw_recording;
pub mod translatable_asset;
pub mod translation_line;
