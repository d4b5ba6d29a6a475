pub mod entities;
pub mod password;
pub mod publish;
pub mod slug;
pub mod use_cases;
