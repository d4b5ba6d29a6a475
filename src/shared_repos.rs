use std::sync::Arc;

use crate::repositories::{
    admin_user::AdminUserRepository,
    bot_info::BotInfoRepository,
    contact::ContactRepository,
    memory::MemoryStore,
    project::ProjectRepository,
    sqlx_repo::{SqlxAdminUserRepo, SqlxBotInfoRepo, SqlxContactRepo, SqlxProjectRepo, SqlxUpdateRepo},
    update::UpdateRepository,
};

/// One handle per entity kind, all backed by the same storage.
#[derive(Clone)]
pub struct SharedRepositories {
    pub admin_user_repo: Arc<dyn AdminUserRepository>,
    pub project_repo: Arc<dyn ProjectRepository>,
    pub update_repo: Arc<dyn UpdateRepository>,
    pub bot_info_repo: Arc<dyn BotInfoRepository>,
    pub contact_repo: Arc<dyn ContactRepository>,
}

impl SharedRepositories {
    pub fn postgres(pool: sqlx::PgPool) -> Self {
        SharedRepositories {
            admin_user_repo: Arc::new(SqlxAdminUserRepo::new(pool.clone())),
            project_repo: Arc::new(SqlxProjectRepo::new(pool.clone())),
            update_repo: Arc::new(SqlxUpdateRepo::new(pool.clone())),
            bot_info_repo: Arc::new(SqlxBotInfoRepo::new(pool.clone())),
            contact_repo: Arc::new(SqlxContactRepo::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());

        SharedRepositories {
            admin_user_repo: store.clone(),
            project_repo: store.clone(),
            update_repo: store.clone(),
            bot_info_repo: store.clone(),
            contact_repo: store,
        }
    }
}
