pub mod register_gym_dto;
