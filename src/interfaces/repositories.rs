pub mod admin_user;
pub mod bot_info;
pub mod contact;
pub mod memory;
pub mod project;
pub mod sqlx_repo;
pub mod token;
pub mod update;
