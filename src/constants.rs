use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Fixed key of the only BotInfo row that may ever exist.
pub const BOT_INFO_SINGLETON_KEY: &str = "flagship-bot";

pub const API_PREFIX: &str = "/api";
