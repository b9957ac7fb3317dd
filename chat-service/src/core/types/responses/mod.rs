pub mod auth_response;
pub mod chat_room_response;
pub mod failed_response;
pub mod gym_response;
pub mod list_chat_room_response;
pub mod list_message_response;
pub mod message_response;
pub mod user_response;
