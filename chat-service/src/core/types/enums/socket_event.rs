#[derive(Debug)]
pub enum SocketEvent {
    ChatJoinCSS,
    ChatLeaveCSS,
    NewMessageSSC,
}

impl SocketEvent {
    pub fn to_str(&self) -> &str {
        match self {
            SocketEvent::ChatJoinCSS => "chat.join",
            SocketEvent::ChatLeaveCSS => "chat.leave",
            SocketEvent::NewMessageSSC => "chat.new_message",
        }
    }
}
