use crate::core::storage::{KeyValueStore, StorageError};
use crate::core::theme::{theme_schema, Theme};
use std::sync::Arc;
use tracing::{debug, warn};

/// Storage key holding the JSON-serialized active theme.
pub const THEME_STORAGE_KEY: &str = "colorscheme";

pub type ThemeListener = Box<dyn Fn(&Theme) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Owns the active theme, persists every change and notifies subscribers.
pub struct ThemeStore {
    current: Theme,
    storage: Arc<dyn KeyValueStore>,
    listeners: Vec<(SubscriptionId, ThemeListener)>,
    next_id: u64,
}

impl ThemeStore {
    /// Restore the persisted theme, falling back to `fallback` when nothing
    /// valid is stored.
    pub fn restore(storage: Arc<dyn KeyValueStore>, fallback: Theme) -> Self {
        let current = match storage.get(THEME_STORAGE_KEY) {
            Ok(Some(raw)) => match parse_persisted_theme(&raw) {
                Some(theme) => theme,
                None => {
                    warn!("Invalid theme found in storage. Resetting to default.");
                    fallback
                }
            },
            Ok(None) => fallback,
            Err(err) => {
                warn!(error = %err, "Could not read persisted theme. Using default.");
                fallback
            }
        };

        Self {
            current,
            storage,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn get(&self) -> &Theme {
        &self.current
    }

    /// Replace the active theme. Subscribers are notified even when the write
    /// to storage fails; the error is returned so callers can say so.
    pub fn set(&mut self, theme: Theme) -> Result<(), StorageError> {
        self.current = theme;
        for (_, listener) in &self.listeners {
            listener(&self.current);
        }

        // Serializing plain strings cannot fail.
        let serialized = serde_json::to_string(&self.current).unwrap_or_default();
        debug!(theme = %self.current.name, "Persisting theme");
        self.storage.set(THEME_STORAGE_KEY, &serialized)
    }

    pub fn subscribe(&mut self, listener: ThemeListener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }
}

/// Parse and validate a stored theme. Returns `None` for anything that is not
/// a complete theme object.
pub fn parse_persisted_theme(raw: &str) -> Option<Theme> {
    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            debug!(error = %err, "Persisted theme is not valid JSON");
            return None;
        }
    };

    let validator = match jsonschema::validator_for(&theme_schema()) {
        Ok(validator) => validator,
        Err(err) => {
            warn!(error = %err, "Theme schema failed to compile");
            return None;
        }
    };
    if !validator.is_valid(&value) {
        return None;
    }

    serde_json::from_value(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryStore;
    use crate::core::theme::find_builtin_theme;
    use crate::ui::theme::Palette;
    use ratatui::style::Color;
    use std::sync::Mutex;

    fn store_with(raw: Option<&str>) -> (Arc<MemoryStore>, ThemeStore) {
        let storage = Arc::new(match raw {
            Some(raw) => MemoryStore::with_value(THEME_STORAGE_KEY, raw),
            None => MemoryStore::new(),
        });
        let store = ThemeStore::restore(storage.clone(), Theme::default_theme());
        (storage, store)
    }

    #[test]
    fn missing_value_uses_default() {
        let (_, store) = store_with(None);
        assert_eq!(store.get().name, "HackTheBox");
    }

    #[test]
    fn valid_value_is_restored() {
        let dracula = find_builtin_theme("dracula").unwrap();
        let raw = serde_json::to_string(&dracula).unwrap();
        let (_, store) = store_with(Some(&raw));
        assert_eq!(store.get(), &dracula);
    }

    #[test]
    fn malformed_values_fall_back_to_default() {
        let mut missing_field = serde_json::to_value(Theme::default_theme()).unwrap();
        missing_field.as_object_mut().unwrap().remove("brightCyan");
        let mut empty_field = serde_json::to_value(Theme::default_theme()).unwrap();
        empty_field["name"] = serde_json::Value::String(String::new());
        let mut wrong_type = serde_json::to_value(Theme::default_theme()).unwrap();
        wrong_type["red"] = serde_json::json!(255);
        let mut named_color = serde_json::to_value(Theme::default_theme()).unwrap();
        named_color["green"] = serde_json::Value::String("green".to_string());

        let cases = [
            "not json at all".to_string(),
            "[1, 2, 3]".to_string(),
            "\"Dracula\"".to_string(),
            "null".to_string(),
            missing_field.to_string(),
            empty_field.to_string(),
            wrong_type.to_string(),
            named_color.to_string(),
        ];
        for raw in cases {
            let (_, store) = store_with(Some(&raw));
            assert_eq!(store.get().name, "HackTheBox", "input: {raw}");
        }
    }

    #[test]
    fn set_persists_serialized_theme() {
        let (storage, mut store) = store_with(None);
        let nord = find_builtin_theme("nord").unwrap();
        store.set(nord.clone()).unwrap();

        let raw = storage.get(THEME_STORAGE_KEY).unwrap().unwrap();
        assert_eq!(raw, serde_json::to_string(&nord).unwrap());
        assert_eq!(parse_persisted_theme(&raw), Some(nord));
    }

    #[test]
    fn subscribers_are_notified_until_unsubscribed() {
        let (_, mut store) = store_with(None);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let id = store.subscribe(Box::new(move |theme: &Theme| {
            sink.lock().unwrap().push(theme.name.clone());
        }));

        store.set(find_builtin_theme("nord").unwrap()).unwrap();
        assert!(store.unsubscribe(id));
        store.set(find_builtin_theme("matrix").unwrap()).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec!["Nord".to_string()]);
        assert!(!store.unsubscribe(id));
    }

    #[test]
    fn non_ascii_colors_fall_back_and_still_build_a_palette() {
        for bad in ["#€", "#ééé", "#€€"] {
            let mut tampered = serde_json::to_value(Theme::default_theme()).unwrap();
            tampered["name"] = serde_json::Value::String("Tampered".to_string());
            tampered["background"] = serde_json::Value::String(bad.to_string());
            let (_, store) = store_with(Some(&tampered.to_string()));
            assert_eq!(store.get().name, "HackTheBox", "input: {bad}");

            let palette = Palette::from_theme(store.get());
            assert_eq!(palette.background_color, Color::Rgb(0x1a, 0x23, 0x32));
        }
    }
}
