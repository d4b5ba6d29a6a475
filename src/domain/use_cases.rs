pub mod auth;
pub mod bot_info;
pub mod contact;
pub mod extractors;
pub mod projects;
pub mod updates;
