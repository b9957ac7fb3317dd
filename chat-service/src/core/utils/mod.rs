pub mod i16_enum;
pub mod jwt_utils;
