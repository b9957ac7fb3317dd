use super::responses::message_response::MessageResponse;

pub enum AppEvent {
    MessageSent(MessageResponse),
}
