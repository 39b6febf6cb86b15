use chrono::Utc;

use crate::error::{JournalError, Result};
use crate::models::{Settings, UpdateSettingsInput};
use crate::store::TradeStore;

pub fn get_settings(store: &dyn TradeStore) -> Result<Settings> {
    store.get_settings()
}

pub fn update_settings(store: &dyn TradeStore, input: UpdateSettingsInput) -> Result<Settings> {
    let mut settings = store.get_settings()?;

    if let Some(risk_percent) = input.risk_percent {
        Settings::validate_risk_percent(risk_percent).map_err(JournalError::Validation)?;
        settings.risk_percent = risk_percent;
    }

    let now = Utc::now().timestamp();
    if settings.created_at == 0 {
        settings.created_at = now;
    }
    settings.updated_at = now;

    store.save_settings(settings.clone())?;
    log::info!("Settings updated: risk {}%", settings.risk_percent);

    Ok(settings)
}
