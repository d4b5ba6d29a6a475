mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod seed;
pub mod shared_repos;

pub use domain::{entities, use_cases, password, publish, slug};
pub use interfaces::{handlers, repositories, middlewares, routes};
pub use infrastructure::{auth, db, limiter, utils};

use std::sync::Arc;

use auth::jwt::JwtService;
use limiter::rate_limiter::RateLimiterStore;
use repositories::{
    admin_user::AdminUserRepository, bot_info::BotInfoRepository, contact::ContactRepository,
    project::ProjectRepository, update::UpdateRepository,
};
use settings::{AppConfig, StorageBackend};
use shared_repos::SharedRepositories;
use use_cases::{
    auth::AuthHandler, bot_info::BotInfoHandler, contact::ContactHandler,
    projects::ProjectHandler, updates::UpdateHandler,
};

pub type AppAuthHandler = AuthHandler<dyn AdminUserRepository, JwtService>;

pub struct AppState {
    pub auth_handler: AppAuthHandler,
    pub project_handler: ProjectHandler<dyn ProjectRepository>,
    pub update_handler: UpdateHandler<dyn UpdateRepository>,
    pub bot_info_handler: BotInfoHandler<dyn BotInfoRepository>,
    pub contact_handler: ContactHandler<dyn ContactRepository>,
    pub contact_limiter: RateLimiterStore,
    pub storage: StorageBackend,
    pub trust_x_forwarded_for: bool,
}

impl AppState {
    pub fn new(config: &AppConfig, repos: SharedRepositories) -> Self {
        let jwt_service = JwtService::new(config);

        AppState {
            auth_handler: AuthHandler::new(repos.admin_user_repo, jwt_service),
            project_handler: ProjectHandler::new(repos.project_repo),
            update_handler: UpdateHandler::new(repos.update_repo),
            bot_info_handler: BotInfoHandler::new(repos.bot_info_repo),
            contact_handler: ContactHandler::new(repos.contact_repo),
            contact_limiter: RateLimiterStore::per_hour(config.contact_rate_limit_per_hour),
            storage: config.storage,
            trust_x_forwarded_for: config.trust_x_forwarded_for,
        }
    }

    pub fn admin_repo(&self) -> Arc<dyn AdminUserRepository> {
        Arc::clone(&self.auth_handler.admin_repo)
    }
}
