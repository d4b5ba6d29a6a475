pub mod auth;
pub mod bot_info;
pub mod contact;
pub mod home;
pub mod projects;
pub mod system;
pub mod updates;
