//! Status envelope
//!
//! `{"code": 200, "message": "Inserted"}` is the body of every mutation
//! acknowledgement and of every error response.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub code: u16,
    pub message: Cow<'static, str>,
}

impl Status {
    pub fn new(code: u16, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn inserted() -> Self {
        Self::new(200, "Inserted")
    }

    pub fn updated() -> Self {
        Self::new(200, "Updated")
    }

    pub fn deleted() -> Self {
        Self::new(200, "Deleted")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_keys_are_lowercase() {
        let json = serde_json::to_string(&Status::deleted()).unwrap();
        assert_eq!(json, r#"{"code":200,"message":"Deleted"}"#);
    }
}
