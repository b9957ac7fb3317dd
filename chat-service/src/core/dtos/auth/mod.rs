pub mod create_token_dto;
