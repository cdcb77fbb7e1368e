pub const THEME_KEY: &str = "preferred-theme";
pub const THEME_ATTRIBUTE: &str = "data-theme";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn icon_class(self) -> &'static str {
        match self {
            Self::Dark => "fa fa-moon-o",
            Self::Light => "fa fa-sun-o",
        }
    }

    pub fn toggle_label(self) -> String {
        let next = self.toggled().as_str();
        format!("Switch to {next} mode")
    }
}

/// Key/value storage for user preferences. Failures read as absent and
/// writes are best effort.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

pub fn resolve_theme(store: &impl PreferenceStore) -> Theme {
    store
        .get(THEME_KEY)
        .and_then(|value| Theme::from_str(&value))
        .unwrap_or(Theme::Dark)
}

pub fn persist_theme(store: &impl PreferenceStore, theme: Theme) {
    store.set(THEME_KEY, theme.as_str());
}
