use super::Config;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Some(key) = first_set(&[
            "ELITE_EDITOR_API_KEY",
            "GEMINI_API_KEY",
            "GOOGLE_API_KEY",
            "API_KEY",
        ]) {
            self.api_key = Some(key);
        }

        if let Ok(model) = std::env::var("ELITE_EDITOR_MODEL")
            && !model.is_empty()
        {
            self.model = model;
        }

        if let Ok(path) = std::env::var("ELITE_EDITOR_HISTORY_PATH")
            && !path.is_empty()
        {
            self.history.path = Some(path);
        }
    }
}

fn first_set(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}
