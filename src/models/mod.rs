pub mod interview;
pub mod menu;
pub mod route;
