use serde::Deserialize;
use thiserror::Error;

/// Inbound payload that claims a known event type but is missing fields.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventError {
    #[error("{event_type} event is missing `{field}`")]
    MissingField {
        event_type: &'static str,
        field: &'static str,
    },
}

/// The space the bot was added to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Space {
    Room { display_name: String },
    Dm { user_name: String },
    /// Any other space type; the bot stays quiet
    Other(String),
}

/// A chat platform event, normalized at the webhook boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    SpaceAdded(Space),
    SpaceRemoved,
    Message { text: String },
    Unrecognized { event_type: String },
}

// Loose wire shape; every nested part is optional until the event type
// says which ones it needs.

#[derive(Debug, Deserialize)]
pub struct RawEvent {
    #[serde(rename = "type", default)]
    pub event_type: String,
    #[serde(default)]
    pub space: Option<RawSpace>,
    #[serde(default)]
    pub user: Option<RawUser>,
    #[serde(default)]
    pub message: Option<RawMessage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSpace {
    #[serde(rename = "type", default)]
    pub space_type: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUser {
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawMessage {
    #[serde(default)]
    pub text: Option<String>,
}

const ADDED_TO_SPACE: &str = "ADDED_TO_SPACE";
const REMOVED_FROM_SPACE: &str = "REMOVED_FROM_SPACE";
const MESSAGE: &str = "MESSAGE";

fn missing(event_type: &'static str, field: &'static str) -> EventError {
    EventError::MissingField { event_type, field }
}

impl TryFrom<RawEvent> for ChatEvent {
    type Error = EventError;

    fn try_from(raw: RawEvent) -> Result<Self, Self::Error> {
        match raw.event_type.as_str() {
            ADDED_TO_SPACE => {
                let space = raw.space.ok_or_else(|| missing(ADDED_TO_SPACE, "space"))?;
                let space_type = space
                    .space_type
                    .ok_or_else(|| missing(ADDED_TO_SPACE, "space.type"))?;
                let space = match space_type.as_str() {
                    "ROOM" => Space::Room {
                        display_name: space
                            .display_name
                            .ok_or_else(|| missing(ADDED_TO_SPACE, "space.displayName"))?,
                    },
                    "DM" => Space::Dm {
                        user_name: raw
                            .user
                            .and_then(|u| u.display_name)
                            .ok_or_else(|| missing(ADDED_TO_SPACE, "user.displayName"))?,
                    },
                    _ => Space::Other(space_type),
                };
                Ok(ChatEvent::SpaceAdded(space))
            }
            REMOVED_FROM_SPACE => Ok(ChatEvent::SpaceRemoved),
            MESSAGE => {
                let text = raw
                    .message
                    .and_then(|m| m.text)
                    .ok_or_else(|| missing(MESSAGE, "message.text"))?;
                Ok(ChatEvent::Message { text })
            }
            _ => Ok(ChatEvent::Unrecognized {
                event_type: raw.event_type,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn parse(value: Value) -> Result<ChatEvent, EventError> {
        let raw: RawEvent = serde_json::from_value(value).unwrap();
        ChatEvent::try_from(raw)
    }

    #[test]
    fn test_added_to_room() {
        let event = parse(json!({
            "type": "ADDED_TO_SPACE",
            "space": {"type": "ROOM", "displayName": "Eng"},
            "user": {"displayName": "Ada"}
        }))
        .unwrap();
        assert_eq!(
            event,
            ChatEvent::SpaceAdded(Space::Room {
                display_name: "Eng".to_string()
            })
        );
    }

    #[test]
    fn test_added_to_dm() {
        let event = parse(json!({
            "type": "ADDED_TO_SPACE",
            "space": {"type": "DM"},
            "user": {"displayName": "Ada"}
        }))
        .unwrap();
        assert_eq!(
            event,
            ChatEvent::SpaceAdded(Space::Dm {
                user_name: "Ada".to_string()
            })
        );
    }

    #[test]
    fn test_added_to_other_space_type() {
        let event = parse(json!({
            "type": "ADDED_TO_SPACE",
            "space": {"type": "SPACE", "displayName": "x"}
        }))
        .unwrap();
        assert_eq!(event, ChatEvent::SpaceAdded(Space::Other("SPACE".to_string())));
    }

    #[test]
    fn test_added_to_room_without_name() {
        let err = parse(json!({
            "type": "ADDED_TO_SPACE",
            "space": {"type": "ROOM"}
        }))
        .unwrap_err();
        assert_eq!(
            err,
            EventError::MissingField {
                event_type: "ADDED_TO_SPACE",
                field: "space.displayName"
            }
        );
    }

    #[test]
    fn test_removed() {
        let event = parse(json!({"type": "REMOVED_FROM_SPACE"})).unwrap();
        assert_eq!(event, ChatEvent::SpaceRemoved);
    }

    #[test]
    fn test_message() {
        let event = parse(json!({
            "type": "MESSAGE",
            "message": {"text": "latest", "argumentText": " latest"},
            "space": {"type": "ROOM", "displayName": "Eng"}
        }))
        .unwrap();
        assert_eq!(
            event,
            ChatEvent::Message {
                text: "latest".to_string()
            }
        );
    }

    #[test]
    fn test_message_without_text() {
        let err = parse(json!({"type": "MESSAGE", "message": {}})).unwrap_err();
        assert!(err.to_string().contains("message.text"));
    }

    #[test]
    fn test_unrecognized_type() {
        let event = parse(json!({"type": "CARD_CLICKED"})).unwrap();
        assert_eq!(
            event,
            ChatEvent::Unrecognized {
                event_type: "CARD_CLICKED".to_string()
            }
        );
    }

    #[test]
    fn test_missing_type_is_unrecognized() {
        let event = parse(json!({})).unwrap();
        assert_eq!(
            event,
            ChatEvent::Unrecognized {
                event_type: String::new()
            }
        );
    }
}
