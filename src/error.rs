use thiserror::Error;

use crate::entries::EntryKind;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("no {kind} entry at index {index}")]
    EntryNotFound { kind: EntryKind, index: usize },

    #[error("{kind} entry is missing its {field}")]
    MissingField {
        kind: EntryKind,
        field: &'static str,
    },

    #[error("missing element: {0}")]
    MissingElement(String),

    #[error("browser rejected call: {0}")]
    Dom(String),

    #[error("invalid site config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SiteError>;

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for SiteError {
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
    fn messages_name_what_went_wrong() {
        let missing = SiteError::EntryNotFound {
            kind: EntryKind::Education,
            index: 4,
        };
        let field = SiteError::MissingField {
            kind: EntryKind::Experience,
            field: "date",
        };

        assert_eq!(missing.to_string(), "no education entry at index 4");
        assert_eq!(field.to_string(), "experience entry is missing its date");
        assert_eq!(
            SiteError::MissingElement("#langToggle".to_string()).to_string(),
            "missing element: #langToggle"
        );
        assert_eq!(
            SiteError::Dom("2d context unavailable".to_string()).to_string(),
            "browser rejected call: 2d context unavailable"
        );
    }
}
