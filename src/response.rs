//! JSON envelope shared by every endpoint.

use serde::{Deserialize, Serialize};

/// `{ "success": bool, "data"?: T, "msg"?: string }`
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

impl<T> Envelope<T> {
    pub fn data(data: T) -> Self {
        Envelope {
            success: true,
            data: Some(data),
            msg: None,
        }
    }
}

impl Envelope<()> {
    /// Success without a payload.
    pub fn message(msg: impl Into<String>) -> Self {
        Envelope {
            success: true,
            data: None,
            msg: Some(msg.into()),
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Envelope {
            success: false,
            data: None,
            msg: Some(msg.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_members_are_omitted() {
        let body = serde_json::to_value(Envelope::error("User can't be found")).unwrap();
        assert_eq!(body, json!({ "success": false, "msg": "User can't be found" }));

        let body = serde_json::to_value(Envelope::data(vec![1, 2])).unwrap();
        assert_eq!(body, json!({ "success": true, "data": [1, 2] }));
    }
}
