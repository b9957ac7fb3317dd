use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate, Clone)]
#[serde(rename_all = "camelCase")]
#[salvo(schema(example = json!({"name": "Alice", "imageUrl": "https://example.com/a.png"})))]
pub struct UpdateUserDto {
    #[validate(length(min = 1))]
    pub name: Option<String>,

    pub image_url: Option<String>,
}
