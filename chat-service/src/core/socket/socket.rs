use anyhow::anyhow;
use async_channel::Receiver;
use salvo::prelude::*;
use socketioxide::{
    SocketIo,
    adapter::Adapter,
    extract::{Data, Extension, SocketRef, State},
    handler::ConnectHandler,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::core::{
    dtos::socket::socket_dto::JoinChatRoomDto,
    types::{app_channel::AppEvent, enums::socket_event::SocketEvent},
    utils::jwt_utils::JwtUtils,
};

#[derive(Clone)]
pub struct UserId(pub String);

#[endpoint(tags("socket.io"))]
async fn version() -> &'static str {
    "[v1] Gym Chat Service written in Rust"
}

fn room_channel(chat_room_id: i32) -> String {
    format!("chat-{chat_room_id}")
}

pub async fn get_socket_router(
    jwt_utils: JwtUtils,
    message_receiver: Receiver<AppEvent>,
) -> Result<Router, Box<dyn std::error::Error>> {
    let (layer, io) = SocketIo::builder()
        .with_state(jwt_utils.clone())
        .build_layer();

    let layer = ServiceBuilder::new()
        .layer(CorsLayer::permissive())
        .layer(layer);

    io.ns("/", on_connect.with(authenticate_middleware));

    let layer = layer.compat();
    let router = Router::new().hoop(layer).path("/socket.io").goal(version);

    // Listener
    let io_clone = io.clone();
    tokio::spawn(handle_message_sent(io_clone, message_receiver));

    Ok(router)
}

pub async fn handle_message_sent(io: SocketIo, receiver: Receiver<AppEvent>) {
    while let Ok(event) = receiver.recv().await {
        match event {
            AppEvent::MessageSent(msg) => {
                let io = io.clone();
                let channel = room_channel(msg.message.chat_room_id);
                tokio::spawn(async move {
                    let _ = io
                        .broadcast()
                        .to(channel)
                        .emit(SocketEvent::NewMessageSSC.to_str(), &msg)
                        .await
                        .ok();
                });
            }
        }
    }
}

async fn authenticate_middleware<A: Adapter>(
    s: SocketRef<A>,
    State(jwt_utils): State<JwtUtils>,
) -> Result<(), anyhow::Error> {
    let auth_header = s
        .req_parts()
        .headers
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .ok_or(anyhow::anyhow!("Missing Authorization header"))?;

    let token = auth_header.trim_start_matches("Bearer ");

    match jwt_utils.decode_token(token) {
        Ok(claims) => {
            s.extensions.insert(UserId(claims.id));
            Ok(())
        }
        Err(err) => {
            warn!("decode token failed: {:?}", err);
            Err(anyhow!("Invalid token"))
        }
    }
}

async fn on_connect<A: Adapter>(socket: SocketRef<A>, user_id: Extension<UserId>) {
    info!("user {:?} connected", user_id.0.0);

    socket.on(SocketEvent::ChatJoinCSS.to_str(), handle_join_chat_room);
    socket.on(SocketEvent::ChatLeaveCSS.to_str(), handle_leave_chat_room);

    socket.on_disconnect(on_disconnect::<A>);
}

async fn handle_join_chat_room<A: Adapter>(
    socket: SocketRef<A>,
    Data(data): Data<JoinChatRoomDto>,
) {
    socket.join(room_channel(data.chat_room_id));
}

async fn handle_leave_chat_room<A: Adapter>(
    socket: SocketRef<A>,
    Data(data): Data<JoinChatRoomDto>,
) {
    socket.leave(room_channel(data.chat_room_id));
}

async fn on_disconnect<A: Adapter>(user_id: Extension<UserId>) {
    info!("user {:?} disconnected", user_id.0.0);
}
