use chrono::{NaiveDateTime, Utc};
use salvo::async_trait;

use crate::{
    core::{
        entities::models::{ChatRoom, MessageStatus, NewChatMessage, NewChatRoom, SenderType, UserRole},
        types::{
            errors::chat_error::ChatError,
            responses::{
                chat_room_response::ChatRoomResponse, message_response::MessageResponse,
            },
        },
    },
    features::{gym::repository::GymRepository, user::repository::UserRepository},
};

use super::repository::{ChatRepository, ChatRoomRecord};

#[async_trait]
pub trait ChatService: Send + Sync {
    async fn create_or_get_room(
        &self,
        user_id: i32,
        gym_id: i32,
    ) -> Result<ChatRoomResponse, ChatError>;

    async fn get_rooms(
        &self,
        user_id: i32,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<ChatRoomResponse>, ChatError>;

    async fn get_room(&self, room_id: i32, user_id: i32) -> Result<ChatRoomResponse, ChatError>;

    async fn get_messages(
        &self,
        room_id: i32,
        user_id: i32,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<MessageResponse>, ChatError>;

    async fn send_message(
        &self,
        room_id: i32,
        user_id: i32,
        content: &str,
    ) -> Result<MessageResponse, ChatError>;
}

#[derive(Debug, Clone)]
pub struct ChatServiceImpl<C: ChatRepository, U: UserRepository, G: GymRepository> {
    chat_repository: C,
    user_repository: U,
    gym_repository: G,
}

impl<C: ChatRepository, U: UserRepository, G: GymRepository> ChatServiceImpl<C, U, G> {
    pub fn new(chat_repository: C, user_repository: U, gym_repository: G) -> Self {
        Self {
            chat_repository,
            user_repository,
            gym_repository,
        }
    }

    /// Only the room's user and the owner of the room's gym may read or
    /// write in a conversation.
    fn ensure_participant(record: &ChatRoomRecord, user_id: i32) -> Result<(), ChatError> {
        let (room, _, gym, _) = record;

        if room.user_id == user_id || gym.owner_id == user_id {
            Ok(())
        } else {
            Err(ChatError::Forbidden(
                "You are not a participant of this conversation".to_string(),
            ))
        }
    }

    async fn update_latest_message(&self, room: ChatRoom, now: NaiveDateTime, message_id: i32) {
        let mut room = room.clone();

        room.latest_message_id = Some(message_id);
        room.latest_message_created_at = Some(now);
        room.updated_at = now;

        let _ = self.chat_repository.update_room(room).await;
    }
}

#[async_trait]
impl<
    C: ChatRepository + Send + Sync,
    U: UserRepository + Send + Sync,
    G: GymRepository + Send + Sync,
> ChatService for ChatServiceImpl<C, U, G>
{
    async fn create_or_get_room(
        &self,
        user_id: i32,
        gym_id: i32,
    ) -> Result<ChatRoomResponse, ChatError> {
        let user = self
            .user_repository
            .get_user_by_id(user_id)
            .await
            .map_err(|_| ChatError::UserNotFound(user_id))?;

        if UserRole::from(user.role) == UserRole::Owner {
            return Err(ChatError::Forbidden(
                "Gym owners cannot start a conversation with a gym".to_string(),
            ));
        }

        let gym = self
            .gym_repository
            .get_gym_by_id(gym_id)
            .await
            .map_err(|_| ChatError::GymNotFound(gym_id))?;

        if let Some((room, user, gym, last_message)) = self
            .chat_repository
            .find_room_by_user_and_gym(user_id, gym_id)
            .await?
        {
            return Ok(ChatRoomResponse::project(
                &room,
                &user,
                &gym,
                last_message.as_ref(),
            ));
        }

        let now = Utc::now().naive_utc();

        let new_room = NewChatRoom {
            user_id: &user.id,
            gym_id: &gym.id,
            created_at: now,
            updated_at: now,
        };

        let (room, user, gym, last_message) = self.chat_repository.create_room(new_room).await?;

        Ok(ChatRoomResponse::project(
            &room,
            &user,
            &gym,
            last_message.as_ref(),
        ))
    }

    async fn get_rooms(
        &self,
        user_id: i32,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<ChatRoomResponse>, ChatError> {
        let records = self
            .chat_repository
            .find_rooms_by_user(user_id, skip, limit)
            .await?;

        let rooms = records
            .into_iter()
            .map(|(room, user, gym, last_message)| {
                ChatRoomResponse::project(&room, &user, &gym, last_message.as_ref())
            })
            .collect::<Vec<_>>();

        Ok(rooms)
    }

    async fn get_room(&self, room_id: i32, user_id: i32) -> Result<ChatRoomResponse, ChatError> {
        let record = self.chat_repository.find_room_by_id(room_id).await?;

        Self::ensure_participant(&record, user_id)?;

        let (room, user, gym, last_message) = record;

        Ok(ChatRoomResponse::project(
            &room,
            &user,
            &gym,
            last_message.as_ref(),
        ))
    }

    async fn get_messages(
        &self,
        room_id: i32,
        user_id: i32,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<MessageResponse>, ChatError> {
        let record = self.chat_repository.find_room_by_id(room_id).await?;

        Self::ensure_participant(&record, user_id)?;

        let (room, _, _, _) = record;

        let messages = self
            .chat_repository
            .get_messages_by_room(room_id, skip, limit)
            .await?;

        let messages = messages
            .into_iter()
            .map(|message| MessageResponse {
                message,
                room: Some(room.clone()),
            })
            .collect::<Vec<_>>();

        Ok(messages)
    }

    async fn send_message(
        &self,
        room_id: i32,
        user_id: i32,
        content: &str,
    ) -> Result<MessageResponse, ChatError> {
        let record = self.chat_repository.find_room_by_id(room_id).await?;
        let (room, _, gym, _) = record;

        let (sender_type, sender_id) = if room.user_id == user_id {
            (SenderType::User, user_id)
        } else if gym.owner_id == user_id {
            (SenderType::Gym, gym.id)
        } else {
            return Err(ChatError::Forbidden(
                "You are not a participant of this conversation".to_string(),
            ));
        };

        let now = Utc::now().naive_utc();

        let new_message = NewChatMessage {
            content,
            sender_id: &sender_id,
            sender_type: &sender_type.into(),
            status: &MessageStatus::Active.into(),
            chat_room_id: &room_id,
            created_at: now,
            updated_at: now,
        };

        let message = self.chat_repository.create_message(new_message).await?;

        self.update_latest_message(room.clone(), now, message.id)
            .await;

        Ok(MessageResponse {
            message,
            room: Some(room),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entities::models::*;
    use crate::core::types::errors::gym_error::GymError;
    use crate::core::types::errors::user_error::UserError;
    use chrono::DateTime;

    // --- Sample Data Helpers ---
    fn sample_user(id: i32, role: UserRole) -> User {
        let now = DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        User {
            id,
            name: "Alice".to_string(),
            image_url: Some("a.png".to_string()),
            role: role as i16,
            external_id: format!("ext-{id}"),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn sample_gym(id: i32, owner_id: i32) -> Gym {
        let now = DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        Gym {
            id,
            name: "GymX".to_string(),
            image_url: Some("g.png".to_string()),
            address: Some("123 Main St".to_string()),
            owner_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn sample_room(id: i32, user_id: i32, gym_id: i32) -> ChatRoom {
        let now = DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        ChatRoom {
            id,
            user_id,
            gym_id,
            latest_message_id: None,
            latest_message_created_at: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn sample_message(id: i32, room_id: i32, sender_id: i32, sender_type: SenderType) -> ChatMessage {
        let now = DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        ChatMessage {
            id,
            content: "Hello".to_string(),
            sender_id,
            sender_type: sender_type as i16,
            status: MessageStatus::Active as i16,
            chat_room_id: room_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn sample_record(room_id: i32) -> ChatRoomRecord {
        (
            sample_room(room_id, 10, 20),
            sample_user(10, UserRole::Member),
            sample_gym(20, 2),
            None,
        )
    }

    // --- Mock Repositories ---
    #[derive(Clone, Default)]
    struct MockChatRepository {
        pub rooms: Option<Vec<ChatRoomRecord>>,
        pub room: Option<ChatRoomRecord>,
        pub existing_room: Option<ChatRoomRecord>,
        pub created_room: Option<ChatRoomRecord>,
        pub messages: Option<Vec<ChatMessage>>,
        pub new_message: Option<ChatMessage>,
        pub fail: Option<ChatError>,
    }

    #[async_trait]
    impl ChatRepository for MockChatRepository {
        async fn find_rooms_by_user(
            &self,
            _user_id: i32,
            _skip: i64,
            _limit: i64,
        ) -> Result<Vec<ChatRoomRecord>, ChatError> {
            if let Some(ref err) = self.fail {
                return Err(err.clone());
            }
            Ok(self.rooms.clone().unwrap_or_default())
        }

        async fn find_room_by_id(&self, room_id: i32) -> Result<ChatRoomRecord, ChatError> {
            if let Some(ref err) = self.fail {
                return Err(err.clone());
            }
            self.room.clone().ok_or(ChatError::RoomNotFound(room_id))
        }

        async fn find_room_by_user_and_gym(
            &self,
            _user_id: i32,
            _gym_id: i32,
        ) -> Result<Option<ChatRoomRecord>, ChatError> {
            if let Some(ref err) = self.fail {
                return Err(err.clone());
            }
            Ok(self.existing_room.clone())
        }

        async fn create_room(&self, _room: NewChatRoom<'_>) -> Result<ChatRoomRecord, ChatError> {
            if let Some(ref err) = self.fail {
                return Err(err.clone());
            }
            self.created_room
                .clone()
                .ok_or(ChatError::UnexpectedError("fail create room".to_string()))
        }

        async fn update_room(&self, room: ChatRoom) -> Result<ChatRoom, ChatError> {
            Ok(room)
        }

        async fn get_messages_by_room(
            &self,
            _room_id: i32,
            _skip: i64,
            _limit: i64,
        ) -> Result<Vec<ChatMessage>, ChatError> {
            if let Some(ref err) = self.fail {
                return Err(err.clone());
            }
            Ok(self.messages.clone().unwrap_or_default())
        }

        async fn create_message(
            &self,
            _message: NewChatMessage<'_>,
        ) -> Result<ChatMessage, ChatError> {
            if let Some(ref err) = self.fail {
                return Err(err.clone());
            }
            self.new_message
                .clone()
                .ok_or(ChatError::UnexpectedError("fail create".to_string()))
        }
    }

    #[derive(Clone, Default)]
    struct MockUserRepository {
        pub user: Option<User>,
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn get_user_by_id(&self, user_id: i32) -> Result<User, UserError> {
            self.user.clone().ok_or(UserError::UserNotFound(user_id))
        }

        async fn update_user(&self, user: User) -> Result<User, UserError> {
            Ok(user)
        }
    }

    #[derive(Clone, Default)]
    struct MockGymRepository {
        pub gym: Option<Gym>,
    }

    #[async_trait]
    impl GymRepository for MockGymRepository {
        async fn get_gym_by_id(&self, gym_id: i32) -> Result<Gym, GymError> {
            self.gym.clone().ok_or(GymError::GymNotFound(gym_id))
        }

        async fn get_gyms_by_owner(&self, _owner_id: i32) -> Result<Vec<Gym>, GymError> {
            Ok(self.gym.clone().into_iter().collect())
        }

        async fn create_gym(&self, _gym: NewGym<'_>) -> Result<Gym, GymError> {
            self.gym
                .clone()
                .ok_or(GymError::UnexpectedError("fail create gym".to_string()))
        }
    }

    fn service_with(
        chat: MockChatRepository,
        user: MockUserRepository,
        gym: MockGymRepository,
    ) -> ChatServiceImpl<MockChatRepository, MockUserRepository, MockGymRepository> {
        ChatServiceImpl::new(chat, user, gym)
    }

    // --- Tests ---
    #[tokio::test]
    async fn create_or_get_room_returns_existing_room() {
        let chat_repo = MockChatRepository {
            existing_room: Some(sample_record(1)),
            ..Default::default()
        };
        let user_repo = MockUserRepository {
            user: Some(sample_user(10, UserRole::Member)),
        };
        let gym_repo = MockGymRepository {
            gym: Some(sample_gym(20, 2)),
        };

        let service = service_with(chat_repo, user_repo, gym_repo);
        let response = service.create_or_get_room(10, 20).await.unwrap();

        assert_eq!(response.chat_room_id, 1);
        assert_eq!(response.user_id, 10);
        assert_eq!(response.gym_id, 20);
        assert_eq!(response.content, None);
        assert_eq!(response.sender_type, None);
    }

    #[tokio::test]
    async fn create_or_get_room_creates_room_when_absent() {
        let chat_repo = MockChatRepository {
            existing_room: None,
            created_room: Some(sample_record(7)),
            ..Default::default()
        };
        let user_repo = MockUserRepository {
            user: Some(sample_user(10, UserRole::Member)),
        };
        let gym_repo = MockGymRepository {
            gym: Some(sample_gym(20, 2)),
        };

        let service = service_with(chat_repo, user_repo, gym_repo);
        let response = service.create_or_get_room(10, 20).await.unwrap();

        assert_eq!(response.chat_room_id, 7);
        assert_eq!(response.user_name, "Alice");
        assert_eq!(response.gym_name, "GymX");
    }

    #[tokio::test]
    async fn create_or_get_room_rejects_unknown_gym() {
        let chat_repo = MockChatRepository::default();
        let user_repo = MockUserRepository {
            user: Some(sample_user(10, UserRole::Member)),
        };
        let gym_repo = MockGymRepository { gym: None };

        let service = service_with(chat_repo, user_repo, gym_repo);
        let result = service.create_or_get_room(10, 99).await;

        assert!(matches!(result, Err(ChatError::GymNotFound(99))));
    }

    #[tokio::test]
    async fn create_or_get_room_rejects_owner_caller() {
        let chat_repo = MockChatRepository::default();
        let user_repo = MockUserRepository {
            user: Some(sample_user(2, UserRole::Owner)),
        };
        let gym_repo = MockGymRepository {
            gym: Some(sample_gym(20, 2)),
        };

        let service = service_with(chat_repo, user_repo, gym_repo);
        let result = service.create_or_get_room(2, 20).await;

        assert!(matches!(result, Err(ChatError::Forbidden(_))));
    }

    #[tokio::test]
    async fn get_rooms_projects_latest_message_preview() {
        let with_message = (
            sample_room(1, 10, 20),
            sample_user(10, UserRole::Member),
            sample_gym(20, 2),
            Some(sample_message(100, 1, 10, SenderType::User)),
        );
        let without_message = sample_record(2);

        let chat_repo = MockChatRepository {
            rooms: Some(vec![with_message, without_message]),
            ..Default::default()
        };

        let service = service_with(
            chat_repo,
            MockUserRepository::default(),
            MockGymRepository::default(),
        );
        let rooms = service.get_rooms(10, 0, 10).await.unwrap();

        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].content, Some("Hello".to_string()));
        assert_eq!(rooms[0].sender_type, Some(SenderType::User));
        assert_eq!(rooms[1].content, None);
        assert_eq!(rooms[1].sender_type, None);
    }

    #[tokio::test]
    async fn get_room_allows_gym_owner() {
        let chat_repo = MockChatRepository {
            room: Some(sample_record(1)),
            ..Default::default()
        };

        let service = service_with(
            chat_repo,
            MockUserRepository::default(),
            MockGymRepository::default(),
        );
        // owner of gym 20 is user 2
        let response = service.get_room(1, 2).await.unwrap();

        assert_eq!(response.chat_room_id, 1);
    }

    #[tokio::test]
    async fn get_room_rejects_stranger() {
        let chat_repo = MockChatRepository {
            room: Some(sample_record(1)),
            ..Default::default()
        };

        let service = service_with(
            chat_repo,
            MockUserRepository::default(),
            MockGymRepository::default(),
        );
        let result = service.get_room(1, 999).await;

        assert!(matches!(result, Err(ChatError::Forbidden(_))));
    }

    #[tokio::test]
    async fn get_room_not_found() {
        let service = service_with(
            MockChatRepository::default(),
            MockUserRepository::default(),
            MockGymRepository::default(),
        );
        let result = service.get_room(1, 10).await;

        assert!(matches!(result, Err(ChatError::RoomNotFound(1))));
    }

    #[tokio::test]
    async fn get_messages_attaches_room() {
        let chat_repo = MockChatRepository {
            room: Some(sample_record(1)),
            messages: Some(vec![sample_message(100, 1, 10, SenderType::User)]),
            ..Default::default()
        };

        let service = service_with(
            chat_repo,
            MockUserRepository::default(),
            MockGymRepository::default(),
        );
        let messages = service.get_messages(1, 10, 0, 10).await.unwrap();

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].message.content, "Hello");
        assert_eq!(messages[0].room.as_ref().unwrap().id, 1);
    }

    #[tokio::test]
    async fn get_messages_rejects_stranger() {
        let chat_repo = MockChatRepository {
            room: Some(sample_record(1)),
            messages: Some(vec![sample_message(100, 1, 10, SenderType::User)]),
            ..Default::default()
        };

        let service = service_with(
            chat_repo,
            MockUserRepository::default(),
            MockGymRepository::default(),
        );
        let result = service.get_messages(1, 999, 0, 10).await;

        assert!(matches!(result, Err(ChatError::Forbidden(_))));
    }

    #[tokio::test]
    async fn send_message_as_room_user() {
        let chat_repo = MockChatRepository {
            room: Some(sample_record(1)),
            new_message: Some(sample_message(100, 1, 10, SenderType::User)),
            ..Default::default()
        };

        let service = service_with(
            chat_repo,
            MockUserRepository::default(),
            MockGymRepository::default(),
        );
        let response = service.send_message(1, 10, "Hello").await.unwrap();

        assert_eq!(response.message.sender_id, 10);
        assert_eq!(
            SenderType::from(response.message.sender_type),
            SenderType::User
        );
        assert_eq!(response.room.as_ref().unwrap().id, 1);
    }

    #[tokio::test]
    async fn send_message_as_gym_owner() {
        let chat_repo = MockChatRepository {
            room: Some(sample_record(1)),
            new_message: Some(sample_message(101, 1, 20, SenderType::Gym)),
            ..Default::default()
        };

        let service = service_with(
            chat_repo,
            MockUserRepository::default(),
            MockGymRepository::default(),
        );
        // owner of gym 20 is user 2
        let response = service.send_message(1, 2, "Welcome!").await.unwrap();

        assert_eq!(response.message.sender_id, 20);
        assert_eq!(
            SenderType::from(response.message.sender_type),
            SenderType::Gym
        );
    }

    #[tokio::test]
    async fn send_message_rejects_stranger() {
        let chat_repo = MockChatRepository {
            room: Some(sample_record(1)),
            new_message: Some(sample_message(100, 1, 10, SenderType::User)),
            ..Default::default()
        };

        let service = service_with(
            chat_repo,
            MockUserRepository::default(),
            MockGymRepository::default(),
        );
        let result = service.send_message(1, 999, "Hello").await;

        assert!(matches!(result, Err(ChatError::Forbidden(_))));
    }

    #[tokio::test]
    async fn send_message_room_not_found() {
        let service = service_with(
            MockChatRepository::default(),
            MockUserRepository::default(),
            MockGymRepository::default(),
        );
        let result = service.send_message(1, 10, "Hello").await;

        assert!(matches!(result, Err(ChatError::RoomNotFound(1))));
    }
}
