use crate::domain::settings::{FilterSpec, Settings, SettingsError, SettingsRepository};
use crate::error::AppResult;
use async_trait::async_trait;

/// Fixed settings snapshot, used when no database is configured
pub struct StaticSettingsRepository {
    settings: Settings,
}

impl StaticSettingsRepository {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn from_parts(pattern: &str, sources: Vec<String>) -> Result<Self, SettingsError> {
        Ok(Self::new(Settings::new(FilterSpec::parse(pattern)?, sources)))
    }
}

#[async_trait]
impl SettingsRepository for StaticSettingsRepository {
    async fn load(&self) -> AppResult<Settings> {
        Ok(self.settings.clone())
    }

    async fn check(&self) -> bool {
        true
    }
}
