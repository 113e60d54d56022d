use serde::{Deserialize, Serialize};

/// The author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// A single turn in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub text: String,
}

impl Message {
    pub fn user(text: &str) -> Message {
        Message {
            role: Role::User,
            text: text.to_string(),
        }
    }

    pub fn model(text: &str) -> Message {
        Message {
            role: Role::Model,
            text: text.to_string(),
        }
    }
}

/// A named, persisted conversation snapshot.
///
/// The messages are stored in conversation order and replayed verbatim on
/// load. The snapshot is taken at save time; later chat activity does not
/// update a previously saved copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedChat {
    pub name: String,
    pub messages: Vec<Message>,
}

impl SavedChat {
    pub fn new(name: &str, messages: Vec<Message>) -> SavedChat {
        SavedChat {
            name: name.to_string(),
            messages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&Role::Model).unwrap(), "\"model\"");
    }

    #[test]
    fn test_saved_chat_preserves_message_order() {
        let chat = SavedChat::new(
            "trip planning",
            vec![
                Message::user("Where should I go in May?"),
                Message::model("Consider Kyoto or Lisbon."),
                Message::user("Tell me more about Lisbon."),
            ],
        );

        let json = serde_json::to_string(&chat).unwrap();
        let back: SavedChat = serde_json::from_str(&json).unwrap();
        assert_eq!(back, chat);
        assert_eq!(back.messages[0].role, Role::User);
        assert_eq!(back.messages[1].role, Role::Model);
        assert_eq!(back.messages[2].text, "Tell me more about Lisbon.");
    }
}
