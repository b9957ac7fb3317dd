use salvo::http::{Method, StatusCode};
use salvo::oapi::{self, EndpointOutRegister, ToSchema};
use salvo::prelude::*;
use serde::Serialize;

use crate::core::entities::models::{ChatMessage, ChatRoom, Gym, SenderType, User};

/// Flat view of a chat room for the client: the two parties' display fields
/// plus a preview of the latest message when one exists.
#[derive(Debug, Serialize, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatRoomResponse {
    pub chat_room_id: i32,
    pub user_id: i32,
    pub gym_id: i32,
    pub user_name: String,
    pub user_image: Option<String>,
    pub gym_name: String,
    pub gym_image: Option<String>,
    pub content: Option<String>,
    pub sender_type: Option<SenderType>,
}

impl ChatRoomResponse {
    /// Copies the room, user and gym fields verbatim. `content` and
    /// `sender_type` are filled together from `last_message`, so they are
    /// either both present or both absent.
    pub fn project(
        room: &ChatRoom,
        user: &User,
        gym: &Gym,
        last_message: Option<&ChatMessage>,
    ) -> Self {
        Self {
            chat_room_id: room.id,
            user_id: user.id,
            gym_id: gym.id,
            user_name: user.name.clone(),
            user_image: user.image_url.clone(),
            gym_name: gym.name.clone(),
            gym_image: gym.image_url.clone(),
            content: last_message.map(|message| message.content.clone()),
            sender_type: last_message.map(|message| SenderType::from(message.sender_type)),
        }
    }
}

#[async_trait]
impl Writer for ChatRoomResponse {
    async fn write(self, req: &mut Request, _depot: &mut Depot, res: &mut Response) {
        if req.method() == Method::POST {
            res.status_code(StatusCode::CREATED);
            res.render(Json(self));
        } else {
            res.status_code(StatusCode::OK);
            res.render(Json(self));
        }
    }
}

impl EndpointOutRegister for ChatRoomResponse {
    fn register(components: &mut oapi::Components, operation: &mut oapi::Operation) {
        operation.responses.insert(
            StatusCode::OK.as_str(),
            oapi::Response::new("OK")
                .add_content("application/json", ChatRoomResponse::to_schema(components)),
        );
        operation.responses.insert(
            StatusCode::CREATED.as_str(),
            oapi::Response::new("Created")
                .add_content("application/json", ChatRoomResponse::to_schema(components)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entities::models::{MessageStatus, UserRole};
    use chrono::DateTime;

    fn sample_user() -> User {
        let now = DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        User {
            id: 10,
            name: "Alice".to_string(),
            image_url: Some("a.png".to_string()),
            role: UserRole::Member as i16,
            external_id: "ext-10".to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn sample_gym() -> Gym {
        let now = DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        Gym {
            id: 20,
            name: "GymX".to_string(),
            image_url: Some("g.png".to_string()),
            address: None,
            owner_id: 2,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn sample_room() -> ChatRoom {
        let now = DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        ChatRoom {
            id: 1,
            user_id: 10,
            gym_id: 20,
            latest_message_id: None,
            latest_message_created_at: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn sample_message(content: &str, sender_type: SenderType) -> ChatMessage {
        let now = DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        ChatMessage {
            id: 100,
            content: content.to_string(),
            sender_id: 10,
            sender_type: sender_type as i16,
            status: MessageStatus::Active as i16,
            chat_room_id: 1,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn projects_room_without_last_message() {
        let response = ChatRoomResponse::project(&sample_room(), &sample_user(), &sample_gym(), None);

        assert_eq!(response.chat_room_id, 1);
        assert_eq!(response.user_id, 10);
        assert_eq!(response.gym_id, 20);
        assert_eq!(response.user_name, "Alice");
        assert_eq!(response.user_image, Some("a.png".to_string()));
        assert_eq!(response.gym_name, "GymX");
        assert_eq!(response.gym_image, Some("g.png".to_string()));
        assert_eq!(response.content, None);
        assert_eq!(response.sender_type, None);
    }

    #[test]
    fn projects_room_with_last_message() {
        let message = sample_message("Hello", SenderType::User);
        let response = ChatRoomResponse::project(
            &sample_room(),
            &sample_user(),
            &sample_gym(),
            Some(&message),
        );

        let without_message =
            ChatRoomResponse::project(&sample_room(), &sample_user(), &sample_gym(), None);

        assert_eq!(response.content, Some("Hello".to_string()));
        assert_eq!(response.sender_type, Some(SenderType::User));
        // Everything except the message preview matches the no-message shape.
        assert_eq!(response.chat_room_id, without_message.chat_room_id);
        assert_eq!(response.user_id, without_message.user_id);
        assert_eq!(response.gym_id, without_message.gym_id);
        assert_eq!(response.user_name, without_message.user_name);
        assert_eq!(response.user_image, without_message.user_image);
        assert_eq!(response.gym_name, without_message.gym_name);
        assert_eq!(response.gym_image, without_message.gym_image);
    }

    #[test]
    fn preview_fields_are_present_or_absent_together() {
        let message = sample_message("Morning!", SenderType::Gym);

        let with_message = ChatRoomResponse::project(
            &sample_room(),
            &sample_user(),
            &sample_gym(),
            Some(&message),
        );
        assert!(with_message.content.is_some() && with_message.sender_type.is_some());
        assert_eq!(with_message.sender_type, Some(SenderType::Gym));

        let without_message =
            ChatRoomResponse::project(&sample_room(), &sample_user(), &sample_gym(), None);
        assert!(without_message.content.is_none() && without_message.sender_type.is_none());
    }

    #[test]
    fn projection_is_deterministic() {
        let message = sample_message("Hello", SenderType::User);
        let first = ChatRoomResponse::project(
            &sample_room(),
            &sample_user(),
            &sample_gym(),
            Some(&message),
        );
        let second = ChatRoomResponse::project(
            &sample_room(),
            &sample_user(),
            &sample_gym(),
            Some(&message),
        );
        assert_eq!(first, second);
    }

    #[test]
    fn handles_absent_image_urls() {
        let mut user = sample_user();
        user.image_url = None;
        let mut gym = sample_gym();
        gym.image_url = None;

        let response = ChatRoomResponse::project(&sample_room(), &user, &gym, None);
        assert_eq!(response.user_image, None);
        assert_eq!(response.gym_image, None);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let message = sample_message("Hello", SenderType::User);
        let response = ChatRoomResponse::project(
            &sample_room(),
            &sample_user(),
            &sample_gym(),
            Some(&message),
        );

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["chatRoomId"], 1);
        assert_eq!(json["userName"], "Alice");
        assert_eq!(json["gymImage"], "g.png");
        assert_eq!(json["content"], "Hello");
        assert_eq!(json["senderType"], "USER");
    }
}
