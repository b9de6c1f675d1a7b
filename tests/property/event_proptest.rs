//! Property-based tests for push events and request parsing

use mingle_push::backend::middleware::bearer_token;
use mingle_push::shared::{PushEvent, UserId};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_new_message_payload_names_sender(sender in "[A-Z][0-9]{1,6}") {
        let event = PushEvent::new_message(UserId::new(sender.clone()));
        prop_assert_eq!(event.name.as_str(), "newMessage");
        prop_assert_eq!(event.payload, format!("msg from {}", sender));
    }

    #[test]
    fn test_user_id_serializes_as_plain_string(code in "[A-Za-z0-9_-]{1,16}") {
        let json = serde_json::to_string(&UserId::new(code.clone())).unwrap();
        prop_assert_eq!(json, format!("\"{}\"", code));
    }

    #[test]
    fn test_bearer_token_extraction(token in "[A-Za-z0-9._-]{1,64}") {
        let header = format!("Bearer {}", token);
        prop_assert_eq!(bearer_token(&header), Some(token.as_str()));
        prop_assert_eq!(bearer_token(&token), None);
    }
}
