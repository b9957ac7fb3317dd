pub mod create_chat_room_dto;
pub mod send_message_dto;
