use diesel::{
    BoolExpressionMethods, ExpressionMethods, JoinOnDsl, NullableExpressionMethods, PgConnection,
    QueryDsl, RunQueryDsl, SelectableHelper,
    dsl::{insert_into, update},
    r2d2::{ConnectionManager, Pool, PooledConnection},
};
use salvo::async_trait;

use crate::core::{
    database::schema::{chat_messages, chat_rooms, gyms, users},
    entities::models::{
        ChatMessage, ChatRoom, Gym, MessageStatus, NewChatMessage, NewChatRoom, User,
    },
    types::errors::{chat_error::ChatError, general::GeneralError},
};

/// A chat room row together with the associations the projection reads:
/// the owning user, the counterparty gym and the latest message if any.
pub type ChatRoomRecord = (ChatRoom, User, Gym, Option<ChatMessage>);

#[async_trait]
pub trait ChatRepository: Send + Sync {
    async fn find_rooms_by_user(
        &self,
        user_id: i32,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<ChatRoomRecord>, ChatError>;

    async fn find_room_by_id(&self, room_id: i32) -> Result<ChatRoomRecord, ChatError>;

    async fn find_room_by_user_and_gym(
        &self,
        user_id: i32,
        gym_id: i32,
    ) -> Result<Option<ChatRoomRecord>, ChatError>;

    async fn create_room(&self, room: NewChatRoom<'_>) -> Result<ChatRoomRecord, ChatError>;

    async fn update_room(&self, room: ChatRoom) -> Result<ChatRoom, ChatError>;

    async fn get_messages_by_room(
        &self,
        room_id: i32,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<ChatMessage>, ChatError>;

    async fn create_message(&self, message: NewChatMessage<'_>) -> Result<ChatMessage, ChatError>;
}

#[derive(Debug, Clone)]
pub struct ChatRepositoryImpl {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl ChatRepositoryImpl {
    pub fn new(pool: Pool<ConnectionManager<PgConnection>>) -> Self {
        Self { pool }
    }

    fn get_conn(&self) -> Result<PooledConnection<ConnectionManager<PgConnection>>, GeneralError> {
        self.pool.get().map_err(|_| GeneralError::DbConnectionError)
    }
}

#[async_trait]
impl ChatRepository for ChatRepositoryImpl {
    async fn find_rooms_by_user(
        &self,
        user_id: i32,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<ChatRoomRecord>, ChatError> {
        let mut conn = self.get_conn()?;

        let rooms = chat_rooms::table
            .inner_join(users::table.on(chat_rooms::user_id.eq(users::id)))
            .inner_join(gyms::table.on(chat_rooms::gym_id.eq(gyms::id)))
            .left_join(
                chat_messages::table
                    .on(chat_rooms::latest_message_id.eq(chat_messages::id.nullable())),
            )
            .filter(users::id.eq(user_id).or(gyms::owner_id.eq(user_id)))
            .filter(chat_rooms::deleted_at.is_null())
            .select((
                ChatRoom::as_select(),
                User::as_select(),
                Gym::as_select(),
                Option::<ChatMessage>::as_select(),
            ))
            .order(chat_rooms::latest_message_created_at.desc())
            .offset(skip)
            .limit(limit)
            .load::<ChatRoomRecord>(&mut conn)
            .map_err(|_| ChatError::UnexpectedError("Failed to find chat rooms".to_string()))?;

        Ok(rooms)
    }

    async fn find_room_by_id(&self, room_id: i32) -> Result<ChatRoomRecord, ChatError> {
        let mut conn = self.get_conn()?;

        let record = chat_rooms::table
            .inner_join(users::table.on(chat_rooms::user_id.eq(users::id)))
            .inner_join(gyms::table.on(chat_rooms::gym_id.eq(gyms::id)))
            .left_join(
                chat_messages::table
                    .on(chat_rooms::latest_message_id.eq(chat_messages::id.nullable())),
            )
            .filter(chat_rooms::id.eq(room_id))
            .select((
                ChatRoom::as_select(),
                User::as_select(),
                Gym::as_select(),
                Option::<ChatMessage>::as_select(),
            ))
            .first::<ChatRoomRecord>(&mut conn)
            .map_err(|err| match err {
                diesel::result::Error::NotFound => ChatError::RoomNotFound(room_id),
                _ => ChatError::UnexpectedError("Failed to get chat room".into()),
            })?;

        Ok(record)
    }

    async fn find_room_by_user_and_gym(
        &self,
        user_id: i32,
        gym_id: i32,
    ) -> Result<Option<ChatRoomRecord>, ChatError> {
        let mut conn = self.get_conn()?;

        let record = chat_rooms::table
            .inner_join(users::table.on(chat_rooms::user_id.eq(users::id)))
            .inner_join(gyms::table.on(chat_rooms::gym_id.eq(gyms::id)))
            .left_join(
                chat_messages::table
                    .on(chat_rooms::latest_message_id.eq(chat_messages::id.nullable())),
            )
            .filter(chat_rooms::user_id.eq(user_id))
            .filter(chat_rooms::gym_id.eq(gym_id))
            .filter(chat_rooms::deleted_at.is_null())
            .select((
                ChatRoom::as_select(),
                User::as_select(),
                Gym::as_select(),
                Option::<ChatMessage>::as_select(),
            ))
            .first::<ChatRoomRecord>(&mut conn);

        match record {
            Ok(record) => Ok(Some(record)),
            Err(diesel::result::Error::NotFound) => Ok(None),
            Err(_) => Err(ChatError::UnexpectedError(
                "Failed to look up chat room".to_string(),
            )),
        }
    }

    async fn create_room(&self, room: NewChatRoom<'_>) -> Result<ChatRoomRecord, ChatError> {
        let new_room = {
            let mut conn = self.get_conn()?;

            insert_into(chat_rooms::table)
                .values(&room)
                .returning(ChatRoom::as_select())
                .get_result::<ChatRoom>(&mut conn)
                .map_err(|_| {
                    ChatError::UnexpectedError("Failed to create chat room".to_string())
                })?
        };

        self.find_room_by_id(new_room.id).await
    }

    async fn update_room(&self, room: ChatRoom) -> Result<ChatRoom, ChatError> {
        let mut conn = self.get_conn()?;

        let updated_room = update(chat_rooms::table)
            .filter(chat_rooms::id.eq(room.id))
            .set((
                chat_rooms::latest_message_id.eq(room.latest_message_id),
                chat_rooms::latest_message_created_at.eq(room.latest_message_created_at),
                chat_rooms::updated_at.eq(room.updated_at),
            ))
            .returning(ChatRoom::as_select())
            .get_result(&mut conn);

        match updated_room {
            Ok(room) => Ok(room),
            Err(_) => Err(ChatError::UnexpectedError(
                "Failed to update chat room".to_string(),
            )),
        }
    }

    async fn get_messages_by_room(
        &self,
        room_id: i32,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<ChatMessage>, ChatError> {
        let mut conn = self.get_conn()?;

        let messages = chat_messages::table
            .filter(chat_messages::chat_room_id.eq(room_id))
            .filter(chat_messages::status.eq(MessageStatus::Active as i16))
            .order(chat_messages::created_at.desc())
            .offset(skip)
            .limit(limit)
            .select(ChatMessage::as_select())
            .load::<ChatMessage>(&mut conn)
            .map_err(|_| ChatError::UnexpectedError("Failed to get messages".to_string()))?;

        Ok(messages)
    }

    async fn create_message(&self, message: NewChatMessage<'_>) -> Result<ChatMessage, ChatError> {
        let mut conn = self.get_conn()?;

        let new_message = insert_into(chat_messages::table)
            .values(&message)
            .returning(ChatMessage::as_select())
            .get_result(&mut conn);

        match new_message {
            Ok(message) => Ok(message),
            Err(_) => Err(ChatError::UnexpectedError(
                "Failed to create new message".to_string(),
            )),
        }
    }
}
