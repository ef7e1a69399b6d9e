use std::fmt;

use gallery::GalleryError;
use runtime::timers::TimerError;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq)]
pub enum SiteError {
    /// A required element is not in the document.
    MissingElement(&'static str),
    /// The platform lacks a primitive and there is no fallback.
    Unsupported(&'static str),
    Js(String),
    Gallery(GalleryError),
    Timer(TimerError),
}

impl SiteError {
    /// Missing markup is expected on pages that omit a section.
    pub fn is_missing_element(&self) -> bool {
        matches!(self, SiteError::MissingElement(_))
    }
}

impl fmt::Display for SiteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteError::MissingElement(what) => write!(f, "missing element: {what}"),
            SiteError::Unsupported(what) => write!(f, "unsupported platform feature: {what}"),
            SiteError::Js(msg) => write!(f, "javascript error: {msg}"),
            SiteError::Gallery(err) => write!(f, "gallery: {err}"),
            SiteError::Timer(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for SiteError {}

impl From<JsValue> for SiteError {
    fn from(value: JsValue) -> Self {
        SiteError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<SiteError> for JsValue {
    fn from(err: SiteError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl From<GalleryError> for SiteError {
    fn from(err: GalleryError) -> Self {
        SiteError::Gallery(err)
    }
}

impl From<TimerError> for SiteError {
    fn from(err: TimerError) -> Self {
        SiteError::Timer(err)
    }
}

#[cfg(test)]
mod tests {
    use super::SiteError;
    use gallery::GalleryError;

    #[test]
    fn displays_missing_element() {
        let err = SiteError::MissingElement("#navbar");
        assert_eq!(err.to_string(), "missing element: #navbar");
        assert!(err.is_missing_element());
    }

    #[test]
    fn wraps_gallery_errors() {
        let err: SiteError = GalleryError::Empty.into();
        assert_eq!(err.to_string(), "gallery: gallery has no entries");
        assert!(!err.is_missing_element());
    }
}
