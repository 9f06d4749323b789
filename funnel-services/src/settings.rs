//! App settings service
//!
//! The one singleton record. Reads fall back to defaults when nothing has
//! been stored yet; writes merge a partial patch over the current value.

use funnel_core::{keys, AppSettings, EntityId};
use funnel_store::Store;

/// Partial update for [`AppSettings`].
#[derive(Debug, Clone, Default)]
pub struct SettingsPatch {
    pub default_pipeline_id: Option<EntityId>,
    pub default_currency: Option<String>,
    pub dark_mode: Option<bool>,
}

/// Current settings, or defaults if none were ever saved.
pub fn get(store: &Store) -> AppSettings {
    store
        .get_object::<AppSettings>(keys::SETTINGS)
        .unwrap_or_default()
}

/// Merge `patch` over the current settings and persist the result.
pub fn update(store: &Store, patch: SettingsPatch) -> AppSettings {
    let mut settings = get(store);
    if let Some(id) = patch.default_pipeline_id {
        settings.default_pipeline_id = Some(id);
    }
    if let Some(currency) = patch.default_currency {
        settings.default_currency = currency;
    }
    if let Some(dark) = patch.dark_mode {
        settings.dark_mode = dark;
    }
    store.save_object(keys::SETTINGS, &settings);
    settings
}

/// Point the default-pipeline reference somewhere else (or nowhere).
/// Pipeline create/delete keeps this aligned with the single-default flag.
pub fn set_default_pipeline(store: &Store, pipeline_id: Option<EntityId>) -> AppSettings {
    let mut settings = get(store);
    settings.default_pipeline_id = pipeline_id;
    store.save_object(keys::SETTINGS, &settings);
    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_falls_back_to_defaults() {
        let store = Store::in_memory();
        let settings = get(&store);
        assert_eq!(settings.default_currency, "KRW");
        assert!(settings.default_pipeline_id.is_none());
    }

    #[test]
    fn test_update_merges_partial_fields() {
        let store = Store::in_memory();
        update(
            &store,
            SettingsPatch {
                dark_mode: Some(true),
                ..Default::default()
            },
        );
        let settings = update(
            &store,
            SettingsPatch {
                default_currency: Some("USD".into()),
                ..Default::default()
            },
        );
        assert!(settings.dark_mode);
        assert_eq!(settings.default_currency, "USD");
    }

    #[test]
    fn test_set_default_pipeline_can_clear() {
        let store = Store::in_memory();
        let id = funnel_core::new_entity_id();
        assert_eq!(
            set_default_pipeline(&store, Some(id)).default_pipeline_id,
            Some(id)
        );
        assert_eq!(set_default_pipeline(&store, None).default_pipeline_id, None);
    }
}
