use gloo_storage::{LocalStorage, Storage};

use crate::state::Theme;

const THEME_STORAGE_KEY: &str = "sato-ops-hub.theme";

pub fn load_theme() -> Theme {
    #[cfg(target_arch = "wasm32")]
    {
        LocalStorage::get::<String>(THEME_STORAGE_KEY)
            .map(|id| Theme::from_id(&id))
            .unwrap_or_default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Theme::default()
    }
}

pub fn store_theme(theme: Theme) {
    if cfg!(target_arch = "wasm32") {
        if let Err(err) = LocalStorage::set(THEME_STORAGE_KEY, theme.id()) {
            tracing::warn!(?err, "failed to persist theme preference");
        }
    }
}
