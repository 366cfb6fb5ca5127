//! Object construction from API JSON.
//!
//! Services never build domain objects themselves; they hand the server's
//! JSON to an [`ObjectFactory`] together with the object's type tag.

use crate::errors::{ResponseError, WebexError, WebexResult};
use crate::types::WebexObject;
use serde_json::Value;

/// Builds typed objects from API JSON
pub trait ObjectFactory<T>: Send + Sync {
    /// Construct an object of the given type from a JSON document
    fn construct(&self, object_type: &str, json: Value) -> WebexResult<T>;
}

/// Factory that deserializes JSON into any [`WebexObject`] with serde
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultObjectFactory;

impl<T: WebexObject> ObjectFactory<T> for DefaultObjectFactory {
    fn construct(&self, object_type: &str, json: Value) -> WebexResult<T> {
        if object_type != T::OBJECT_TYPE {
            return Err(WebexError::Response(ResponseError::UnexpectedObjectType {
                expected: T::OBJECT_TYPE,
                actual: object_type.to_string(),
            }));
        }
        serde_json::from_value(json).map_err(|e| WebexError::Response(ResponseError::from(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Message;
    use serde_json::json;

    #[test]
    fn test_construct_message() {
        let message: Message = DefaultObjectFactory
            .construct("message", json!({"id": "M1", "text": "hi"}))
            .unwrap();
        assert_eq!(message.id, "M1");
        assert_eq!(message.text.as_deref(), Some("hi"));
    }

    #[test]
    fn test_wrong_type_tag() {
        let result: WebexResult<Message> =
            DefaultObjectFactory.construct("room", json!({"id": "R1"}));
        assert!(matches!(
            result,
            Err(WebexError::Response(ResponseError::UnexpectedObjectType {
                expected: "message",
                ..
            }))
        ));
    }

    #[test]
    fn test_malformed_json() {
        let result: WebexResult<Message> =
            DefaultObjectFactory.construct("message", json!({"text": "no id"}));
        assert!(matches!(
            result,
            Err(WebexError::Response(ResponseError::DeserializationError { .. }))
        ));
    }
}
