//! Game settings and preferences
//!
//! Read from JSON in LocalStorage; the first run writes the defaults there
//! so they can be edited by hand. Missing fields take their defaults, so
//! older saved settings keep loading.

use serde::{Deserialize, Serialize};

use crate::consts::{CATCH_MESSAGE_MS, FISH_RESAMPLE_CHANCE, HOOK_SPEED};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// `KeyboardEvent.key` value that drops the hook
    pub action_key: String,
    /// Hook travel per step (logical px)
    pub hook_speed: f32,
    /// How long the catch message stays up (ms)
    pub catch_message_ms: f64,
    /// Per-step chance the fish changes course
    pub resample_chance: f64,
    /// Run the simulation at a fixed 60 Hz instead of once per display frame
    pub fixed_timestep: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            action_key: " ".to_string(),
            hook_speed: HOOK_SPEED,
            catch_message_ms: CATCH_MESSAGE_MS,
            resample_chance: FISH_RESAMPLE_CHANCE,
            fixed_timestep: true,
        }
    }
}

impl Settings {
    /// Copy with out-of-range values replaced by defaults
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        Self {
            action_key: if self.action_key.is_empty() {
                defaults.action_key
            } else {
                self.action_key.clone()
            },
            hook_speed: if self.hook_speed.is_finite() && self.hook_speed > 0.0 {
                self.hook_speed
            } else {
                defaults.hook_speed
            },
            catch_message_ms: if self.catch_message_ms.is_finite() && self.catch_message_ms >= 0.0 {
                self.catch_message_ms
            } else {
                defaults.catch_message_ms
            },
            resample_chance: if (0.0..=1.0).contains(&self.resample_chance) {
                self.resample_chance
            } else {
                defaults.resample_chance
            },
            fixed_timestep: self.fixed_timestep,
        }
    }

    /// Parse stored JSON, falling back to defaults
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => settings.sanitized(),
            Err(e) => {
                log::info!("Ignoring stored settings ({e}), using defaults");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> String {
        // A struct of plain fields always serializes
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Does this `KeyboardEvent.key` trigger the hook?
    pub fn is_action_key(&self, key: &str) -> bool {
        key == self.action_key
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "hook_line_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        let Some(storage) = storage else {
            log::info!("No LocalStorage, using default settings");
            return Self::default();
        };

        if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
            log::info!("Loaded settings from LocalStorage");
            return Self::from_json(&json);
        }

        // First run: store the defaults so there is an entry to edit
        let defaults = Self::default();
        if storage
            .set_item(Self::STORAGE_KEY, &defaults.to_json())
            .is_ok()
        {
            log::info!("Using default settings (written to {})", Self::STORAGE_KEY);
        }
        defaults
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let s = Settings::from_json(r#"{"hook_speed": 8.0}"#);
        assert_eq!(s.hook_speed, 8.0);
        assert_eq!(s.action_key, " ");
        assert!(s.fixed_timestep);
    }

    #[test]
    fn test_garbage_json_uses_defaults() {
        assert_eq!(Settings::from_json("not json"), Settings::default());
    }

    #[test]
    fn test_sanitized_rejects_bad_values() {
        let s = Settings {
            action_key: String::new(),
            hook_speed: -3.0,
            catch_message_ms: f64::NAN,
            resample_chance: 1.5,
            fixed_timestep: false,
        }
        .sanitized();
        assert_eq!(s.action_key, " ");
        assert_eq!(s.hook_speed, HOOK_SPEED);
        assert_eq!(s.catch_message_ms, CATCH_MESSAGE_MS);
        assert_eq!(s.resample_chance, FISH_RESAMPLE_CHANCE);
        assert!(!s.fixed_timestep);
    }

    #[test]
    fn test_json_round_trip() {
        let s = Settings {
            action_key: "Enter".to_string(),
            ..Default::default()
        };
        assert_eq!(Settings::from_json(&s.to_json()), s);
        assert!(s.is_action_key("Enter"));
        assert!(!s.is_action_key(" "));
    }
}
