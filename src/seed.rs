//! Initial data: the dashboard admin and the flagship bot showcase.

use anyhow::{bail, Context};

use crate::{
    auth::password::hash_password,
    entities::{admin_user::AdminUserInsert, bot_info::BotInfoUpsert},
    errors::AppError,
    password::validate_password_strength,
    repositories::{admin_user::AdminUserRepository, bot_info::BotInfoRepository},
    settings::AppConfig,
    shared_repos::SharedRepositories,
};

/// Creates the configured admin unless an admin with that email exists.
pub async fn seed_admin(repo: &dyn AdminUserRepository, config: &AppConfig) -> anyhow::Result<()> {
    let Some(password) = config.admin_password.as_deref() else {
        tracing::warn!("APP_ADMIN_PASSWORD is not set; skipping admin seeding");
        return Ok(());
    };

    if repo
        .get_admin_by_email(&config.admin_email)
        .await
        .context("looking up seeded admin")?
        .is_some()
    {
        tracing::info!(email = %config.admin_email, "Admin user already exists; skipping");
        return Ok(());
    }

    if let Err(weakness) = validate_password_strength(password) {
        let reason = weakness
            .message
            .as_deref()
            .unwrap_or("password is too weak")
            .to_string();
        if config.is_production() {
            bail!("refusing to seed admin with a weak password: {}", reason);
        }
        tracing::warn!(reason = %reason, "Seeding admin with a weak password");
    }

    let password_hash = hash_password(password).context("hashing admin password")?;
    match repo
        .create_admin(&AdminUserInsert::new(&config.admin_email, password_hash))
        .await
    {
        Ok(admin) => {
            tracing::info!(admin_id = %admin.id, email = %admin.email, "Admin user created");
            Ok(())
        }
        Err(AppError::Conflict(_)) => {
            tracing::info!(email = %config.admin_email, "Admin user already exists; skipping");
            Ok(())
        }
        Err(e) => Err(e).context("creating admin user"),
    }
}

pub fn default_bot_info() -> BotInfoUpsert {
    BotInfoUpsert {
        name: "Amazing Bot".to_string(),
        tagline: "Your intelligent assistant for everything".to_string(),
        description: "A multi-purpose chat bot that answers questions, automates routine \
                      tasks and keeps communities engaged around the clock."
            .to_string(),
        demo_url: None,
        github_repo: "https://github.com/example/amazing-bot".to_string(),
        screenshots: Some(Vec::new()),
        features: Some(
            [
                "Natural language understanding",
                "Multi-platform support",
                "Custom command system",
                "Real-time analytics",
                "Scalable architecture",
                "Open source",
            ]
            .iter()
            .map(|f| f.to_string())
            .collect(),
        ),
    }
}

/// Creates the default bot showcase only when none exists.
pub async fn seed_bot_info(repo: &dyn BotInfoRepository) -> anyhow::Result<()> {
    let created = repo
        .insert_bot_info_if_absent(&default_bot_info())
        .await
        .context("seeding bot info")?;

    if created {
        tracing::info!("Default bot info created");
    } else {
        tracing::info!("Bot info already exists; skipping");
    }
    Ok(())
}

pub async fn seed_database(repos: &SharedRepositories, config: &AppConfig) -> anyhow::Result<()> {
    seed_admin(repos.admin_user_repo.as_ref(), config).await?;
    seed_bot_info(repos.bot_info_repo.as_ref()).await?;
    Ok(())
}
