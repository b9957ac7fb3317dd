use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate, Clone)]
#[serde(rename_all = "camelCase")]
#[salvo(schema(example = json!({"name": "GymX", "imageUrl": "https://example.com/g.png", "address": "123 Main St"})))]
pub struct RegisterGymDto {
    #[validate(length(min = 2))]
    pub name: String,

    pub image_url: Option<String>,

    pub address: Option<String>,
}
