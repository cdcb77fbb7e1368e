use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnhanceError {
    #[error("required element `{0}` not found")]
    MissingElement(&'static str),
    #[error("required value `{0}` is empty")]
    MissingValue(&'static str),
    #[error("dom operation failed: {0}")]
    Dom(String),
}

impl EnhanceError {
    /// Absent markup is an expected outcome on pages that skip a feature.
    pub fn is_absent_feature(&self) -> bool {
        matches!(self, Self::MissingElement(_) | Self::MissingValue(_))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for EnhanceError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Dom(
            value
                .as_string()
                .unwrap_or_else(|| format!("{value:?}")),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_markup_is_distinguished_from_dom_failures() {
        assert!(EnhanceError::MissingElement("#portfolioPreview").is_absent_feature());
        assert!(EnhanceError::MissingValue("hero text").is_absent_feature());
        assert!(!EnhanceError::Dom("detached".to_string()).is_absent_feature());
    }

    #[test]
    fn messages_name_the_selector() {
        let message = EnhanceError::MissingElement("#navbar").to_string();
        assert_eq!(message, "required element `#navbar` not found");
    }
}
