pub mod settings_repository;
pub mod static_settings_repository;

pub use settings_repository::PgSettingsRepository;
pub use static_settings_repository::StaticSettingsRepository;
