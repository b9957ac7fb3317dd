use chrono::NaiveDateTime;
use diesel::prelude::*;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use crate::core::database::schema::{chat_messages, chat_rooms, gyms, users};
use crate::impl_i16_enum;

/// Which side of the conversation authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SenderType {
    User = 0,
    Gym = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum UserRole {
    Member = 0,
    Owner = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStatus {
    Active = 0,
    Inactive = 1,
}

impl_i16_enum!(SenderType { User = 0, Gym = 1 });
impl_i16_enum!(UserRole { Member = 0, Owner = 1 });
impl_i16_enum!(MessageStatus { Active = 0, Inactive = 1 });

#[derive(
    Debug, Clone, PartialEq, Queryable, Selectable, Identifiable, Serialize, Deserialize, ToSchema,
)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub name: String,
    pub image_url: Option<String>,
    pub role: i16,
    pub external_id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUser<'a> {
    pub name: &'a str,
    pub image_url: Option<&'a str>,
    pub role: &'a i16,
    pub external_id: &'a str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(
    Debug, Clone, PartialEq, Queryable, Selectable, Identifiable, Serialize, Deserialize, ToSchema,
)]
#[diesel(table_name = gyms)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Gym {
    pub id: i32,
    pub name: String,
    pub image_url: Option<String>,
    pub address: Option<String>,
    pub owner_id: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = gyms)]
pub struct NewGym<'a> {
    pub name: &'a str,
    pub image_url: Option<&'a str>,
    pub address: Option<&'a str>,
    pub owner_id: &'a i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(
    Debug, Clone, PartialEq, Queryable, Selectable, Identifiable, Serialize, Deserialize, ToSchema,
)]
#[diesel(table_name = chat_rooms)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct ChatRoom {
    pub id: i32,
    pub user_id: i32,
    pub gym_id: i32,
    pub latest_message_id: Option<i32>,
    pub latest_message_created_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = chat_rooms)]
pub struct NewChatRoom<'a> {
    pub user_id: &'a i32,
    pub gym_id: &'a i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(
    Debug, Clone, PartialEq, Queryable, Selectable, Identifiable, Serialize, Deserialize, ToSchema,
)]
#[diesel(table_name = chat_messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: i32,
    pub content: String,
    pub sender_id: i32,
    pub sender_type: i16,
    pub status: i16,
    pub chat_room_id: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = chat_messages)]
pub struct NewChatMessage<'a> {
    pub content: &'a str,
    pub sender_id: &'a i32,
    pub sender_type: &'a i16,
    pub status: &'a i16,
    pub chat_room_id: &'a i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
