use async_channel::Sender;
use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};

use crate::core::{
    dtos::{
        chat::{create_chat_room_dto::CreateChatRoomDto, send_message_dto::SendMessageDto},
        common::pagination_dto::PaginationDto,
    },
    types::{
        app_channel::AppEvent,
        errors::chat_error::ChatError,
        responses::{
            chat_room_response::ChatRoomResponse, list_chat_room_response::ListChatRoomResponse,
            list_message_response::ListMessageResponse, message_response::MessageResponse,
        },
    },
    utils::jwt_utils::JwtUtils,
};
use crate::features::{
    chat::repository::ChatRepositoryImpl, gym::repository::GymRepositoryImpl,
    user::repository::UserRepositoryImpl,
};

use super::service::{ChatService, ChatServiceImpl};

type ChatServices = ChatServiceImpl<ChatRepositoryImpl, UserRepositoryImpl, GymRepositoryImpl>;

pub fn get_chat_router(jwt_utils: JwtUtils) -> Router {
    Router::with_hoop(jwt_utils.auth_middleware())
        .path("chats")
        .push(
            Router::with_path("rooms")
                .post(create_or_get_room)
                .get(get_rooms),
        )
        .push(Router::with_path("rooms/{room_id}").get(get_room))
        .push(
            Router::with_path("rooms/{room_id}/messages")
                .get(get_messages)
                .post(send_message),
        )
}

/// Find or create the conversation between the caller and a gym
#[endpoint(tags("chats"), status_codes(200, 201, 400, 401, 403, 404, 500))]
async fn create_or_get_room(
    _res: &mut Response,
    data: JsonBody<CreateChatRoomDto>,
    depot: &mut Depot,
) -> Result<ChatRoomResponse, ChatError> {
    let chat_service = depot.obtain::<ChatServices>().unwrap();
    let user_id = depot.get::<String>("user_id").unwrap();
    let gym_id = data.0.gym_id;

    let room = chat_service
        .create_or_get_room(user_id.parse().unwrap(), gym_id)
        .await?;

    Ok(room)
}

/// List the caller's conversations with latest-message previews
#[endpoint(tags("chats"), status_codes(200, 400, 401, 500))]
async fn get_rooms(
    _res: &mut Response,
    pagination_dto: PaginationDto,
    depot: &mut Depot,
) -> Result<ListChatRoomResponse, ChatError> {
    let chat_service = depot.obtain::<ChatServices>().unwrap();
    let user_id = depot.get::<String>("user_id").unwrap();

    let pagination_dto = pagination_dto.clone();

    let chat_rooms = chat_service
        .get_rooms(
            user_id.parse().unwrap(),
            pagination_dto.skip,
            pagination_dto.limit,
        )
        .await?;

    Ok(ListChatRoomResponse { chat_rooms })
}

/// Get one conversation
#[endpoint(tags("chats"), status_codes(200, 400, 401, 403, 404, 500))]
async fn get_room(
    _res: &mut Response,
    room_id: PathParam<i32>,
    depot: &mut Depot,
) -> Result<ChatRoomResponse, ChatError> {
    let chat_service = depot.obtain::<ChatServices>().unwrap();
    let user_id = depot.get::<String>("user_id").unwrap();
    let room_id = room_id.into_inner();

    let room = chat_service
        .get_room(room_id, user_id.parse().unwrap())
        .await?;

    Ok(room)
}

/// Get messages of a conversation
#[endpoint(tags("chats"), status_codes(200, 400, 401, 403, 404, 500))]
async fn get_messages(
    _res: &mut Response,
    room_id: PathParam<i32>,
    pagination_dto: PaginationDto,
    depot: &mut Depot,
) -> Result<ListMessageResponse, ChatError> {
    let chat_service = depot.obtain::<ChatServices>().unwrap();
    let user_id = depot.get::<String>("user_id").unwrap();

    let pagination_dto = pagination_dto.clone();
    let room_id = room_id.into_inner();

    let messages = chat_service
        .get_messages(
            room_id,
            user_id.parse().unwrap(),
            pagination_dto.skip,
            pagination_dto.limit,
        )
        .await?;

    Ok(ListMessageResponse { messages })
}

/// Send a message
#[endpoint(tags("chats"), status_codes(201, 400, 401, 403, 404, 500))]
async fn send_message(
    _res: &mut Response,
    room_id: PathParam<i32>,
    data: JsonBody<SendMessageDto>,
    depot: &mut Depot,
) -> Result<MessageResponse, ChatError> {
    let chat_service = depot.obtain::<ChatServices>().unwrap();
    let app_channel_tx = depot.obtain::<Sender<AppEvent>>().unwrap();
    let user_id = depot.get::<String>("user_id").unwrap();
    let content = data.0.content;
    let room_id = room_id.into_inner();

    let message = chat_service
        .send_message(room_id, user_id.parse().unwrap(), &content)
        .await?;

    let _ = app_channel_tx
        .send(AppEvent::MessageSent(message.clone()))
        .await;

    Ok(message)
}
