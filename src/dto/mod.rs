pub mod interview_dto;
pub mod webhook_dto;
