use std::fmt;

#[derive(Debug)]
pub enum OWMError {
    Http(String),
    Document(String),
    NotFound(String),
}

impl fmt::Display for OWMError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OWMError::Http(e) => write!(f, "OWMError::Http: {}", e),
            OWMError::Document(e) => write!(f, "OWMError::Document: {}", e),
            OWMError::NotFound(e) => write!(f, "OWMError::NotFound: {}", e),
        }
    }
}
impl From<reqwest::Error> for OWMError {
    fn from(e: reqwest::Error) -> Self {
        OWMError::Http(e.to_string())
    }
}
impl From<serde_json::Error> for OWMError {
    fn from(e: serde_json::Error) -> Self {
        OWMError::Document(e.to_string())
    }
}
