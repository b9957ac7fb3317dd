use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate, Clone)]
#[serde(rename_all = "camelCase")]
#[salvo(schema(example = json!({"externalId": "kakao-123", "name": "Alice", "imageUrl": "https://example.com/a.png", "role": 0})))]
pub struct CreateTokenDto {
    #[validate(length(min = 1))]
    pub external_id: String,

    #[validate(length(min = 1))]
    pub name: String,

    pub image_url: Option<String>,

    /// 0 = member, 1 = gym owner. Defaults to member.
    pub role: Option<i16>,
}
