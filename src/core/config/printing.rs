use crate::core::config::data::{Config, ReadFormat};

/// Keys accepted by `termblog config set/unset`.
pub const CONFIG_KEYS: &[&str] = &[
    "username",
    "hostname",
    "email",
    "repository",
    "sudo-url",
    "weather-url",
    "content-base",
    "read-format",
    "default-theme",
    "request-timeout-secs",
];

impl Config {
    pub fn print_all(&self) {
        println!("Current configuration:");
        for key in CONFIG_KEYS {
            match self.get_value(key) {
                Some(value) => println!("  {key}: {value}"),
                None => println!("  {key}: (unset)"),
            }
        }
    }

    pub fn get_value(&self, key: &str) -> Option<String> {
        match key {
            "username" => self.username.clone(),
            "hostname" => self.hostname.clone(),
            "email" => self.email.clone(),
            "repository" => self.repository.clone(),
            "sudo-url" => self.sudo_url.clone(),
            "weather-url" => self.weather_url.clone(),
            "content-base" => self.content_base.clone(),
            "read-format" => self.read_format.map(|f| f.as_str().to_string()),
            "default-theme" => self.default_theme.clone(),
            "request-timeout-secs" => self.request_timeout_secs.map(|s| s.to_string()),
            _ => None,
        }
    }

    /// Set a key from its string form. Returns a message describing what is
    /// wrong with the key or value.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), String> {
        let value = value.trim();
        if value.is_empty() {
            return Err(format!("A value is required for '{key}'"));
        }
        let owned = Some(value.to_string());
        match key {
            "username" => self.username = owned,
            "hostname" => self.hostname = owned,
            "email" => self.email = owned,
            "repository" => self.repository = owned,
            "sudo-url" => self.sudo_url = owned,
            "weather-url" => self.weather_url = owned,
            "content-base" => self.content_base = owned,
            "read-format" => {
                let format = ReadFormat::parse(value)
                    .ok_or_else(|| format!("Unknown read format '{value}' (markdown|plain)"))?;
                self.read_format = Some(format);
            }
            "default-theme" => {
                let theme = crate::core::theme::find_builtin_theme(value)
                    .ok_or_else(|| format!("Unknown theme '{value}'"))?;
                self.default_theme = Some(theme.name);
            }
            "request-timeout-secs" => {
                let secs = value
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or_else(|| format!("Invalid timeout '{value}'"))?;
                self.request_timeout_secs = Some(secs);
            }
            _ => return Err(format!("Unknown config key: {key}")),
        }
        Ok(())
    }

    pub fn unset_value(&mut self, key: &str) -> Result<(), String> {
        match key {
            "username" => self.username = None,
            "hostname" => self.hostname = None,
            "email" => self.email = None,
            "repository" => self.repository = None,
            "sudo-url" => self.sudo_url = None,
            "weather-url" => self.weather_url = None,
            "content-base" => self.content_base = None,
            "read-format" => self.read_format = None,
            "default-theme" => self.default_theme = None,
            "request-timeout-secs" => self.request_timeout_secs = None,
            _ => return Err(format!("Unknown config key: {key}")),
        }
        Ok(())
    }
}
