use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    constants::BOT_INFO_SINGLETON_KEY,
    entities::bot_info::{BotInfo, BotInfoUpsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxBotInfoRepo,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BotInfoRepository: Send + Sync {
    async fn get_bot_info(&self) -> Result<BotInfo, AppError>;
    /// Updates the singleton in place, creating it on first use.
    async fn upsert_bot_info(&self, bot: &BotInfoUpsert) -> Result<BotInfo, AppError>;
    /// Creates the singleton only if it does not exist yet. Returns whether a
    /// row was written.
    async fn insert_bot_info_if_absent(&self, bot: &BotInfoUpsert) -> Result<bool, AppError>;
}

impl SqlxBotInfoRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxBotInfoRepo { pool }
    }
}

#[async_trait]
impl BotInfoRepository for SqlxBotInfoRepo {
    async fn get_bot_info(&self) -> Result<BotInfo, AppError> {
        sqlx::query_as::<_, BotInfo>(
            r#"
            SELECT id, name, tagline, description, demo_url, github_repo, screenshots, features
            FROM bot_info
            WHERE singleton_key = $1
            "#,
        )
        .bind(BOT_INFO_SINGLETON_KEY)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Bot info not found".into()))
    }

    async fn upsert_bot_info(&self, bot: &BotInfoUpsert) -> Result<BotInfo, AppError> {
        let info = sqlx::query_as::<_, BotInfo>(
            r#"
            INSERT INTO bot_info (
                id, singleton_key, name, tagline, description, demo_url, github_repo, screenshots, features
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, '{}'::text[]), COALESCE($9, '{}'::text[]))
            ON CONFLICT (singleton_key) DO UPDATE SET
                name = EXCLUDED.name,
                tagline = EXCLUDED.tagline,
                description = EXCLUDED.description,
                demo_url = EXCLUDED.demo_url,
                github_repo = EXCLUDED.github_repo,
                screenshots = COALESCE($8, bot_info.screenshots),
                features = COALESCE($9, bot_info.features),
                updated_at = NOW()
            RETURNING id, name, tagline, description, demo_url, github_repo, screenshots, features
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(BOT_INFO_SINGLETON_KEY)
        .bind(&bot.name)
        .bind(&bot.tagline)
        .bind(&bot.description)
        .bind(&bot.demo_url)
        .bind(&bot.github_repo)
        .bind(&bot.screenshots)
        .bind(&bot.features)
        .fetch_one(&self.pool)
        .await?;

        Ok(info)
    }

    async fn insert_bot_info_if_absent(&self, bot: &BotInfoUpsert) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO bot_info (
                id, singleton_key, name, tagline, description, demo_url, github_repo, screenshots, features
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, '{}'::text[]), COALESCE($9, '{}'::text[]))
            ON CONFLICT (singleton_key) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(BOT_INFO_SINGLETON_KEY)
        .bind(&bot.name)
        .bind(&bot.tagline)
        .bind(&bot.description)
        .bind(&bot.demo_url)
        .bind(&bot.github_repo)
        .bind(&bot.screenshots)
        .bind(&bot.features)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
