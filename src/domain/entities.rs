pub mod admin_user;
pub mod bot_info;
pub mod contact_message;
pub mod option_fields;
pub mod project;
pub mod token;
pub mod update;
pub mod validation;
