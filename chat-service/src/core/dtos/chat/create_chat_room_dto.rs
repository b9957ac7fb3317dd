use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate, Clone)]
#[serde(rename_all = "camelCase")]
#[salvo(schema(example = json!({"gymId": 20})))]
pub struct CreateChatRoomDto {
    #[validate(range(min = 1))]
    pub gym_id: i32,
}
