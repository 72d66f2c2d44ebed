pub mod auth_gate;
pub mod auth_state;
pub mod interview_service;
pub mod interview_store;
