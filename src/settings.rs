//! Game settings and preferences
//!
//! Persisted to LocalStorage, independent of any running session.

use serde::{Deserialize, Serialize};

/// Visual preference toggles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Show FPS counter in the HUD
    pub show_fps: bool,
    /// Screen-darken cue on hits
    pub hit_flash: bool,
    /// Reduced motion (disables hit flash and the invincibility blink)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_fps: false,
            hit_flash: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "pig_arcade_settings";

    /// Effective hit flash (respects reduced_motion)
    pub fn effective_hit_flash(&self) -> bool {
        self.hit_flash && !self.reduced_motion
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_motion_disables_hit_flash() {
        let mut settings = Settings::default();
        assert!(settings.effective_hit_flash());
        settings.reduced_motion = true;
        assert!(!settings.effective_hit_flash());
    }

    #[test]
    fn test_hit_flash_toggle_disables_flash_cues() {
        // Both flash cues (runner screen darken, whack hole highlight) key
        // off this one predicate
        let settings = Settings {
            show_fps: false,
            hit_flash: false,
            reduced_motion: false,
        };
        assert!(!settings.effective_hit_flash());
    }

    #[test]
    fn test_settings_round_trip() {
        let settings = Settings {
            show_fps: true,
            hit_flash: false,
            reduced_motion: true,
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.show_fps, settings.show_fps);
        assert_eq!(back.hit_flash, settings.hit_flash);
        assert_eq!(back.reduced_motion, settings.reduced_motion);
    }
}
