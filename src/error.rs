use thiserror::Error;

/// Errors surfaced while wiring the site together.
///
/// None of these are fatal to the page: the browser layer logs them and
/// disables the affected feature.
#[derive(Debug, Error)]
pub enum PortfolioError {
    #[error("invalid project data: {0}")]
    ProjectData(#[source] serde_json::Error),

    #[error("invalid site config: {0}")]
    Config(#[source] serde_json::Error),

    #[error("element #{0} not found")]
    MissingElement(String),

    #[error("browser call failed: {0}")]
    Js(String),
}

pub type Result<T> = std::result::Result<T, PortfolioError>;

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for PortfolioError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<PortfolioError> for wasm_bindgen::JsValue {
    fn from(err: PortfolioError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
