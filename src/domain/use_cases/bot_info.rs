use std::sync::Arc;

use validator::Validate;

use crate::{
    entities::bot_info::{BotInfo, BotInfoRequest, BotInfoUpsert},
    errors::AppError,
    repositories::bot_info::BotInfoRepository,
};

pub struct BotInfoHandler<R>
where
    R: BotInfoRepository + ?Sized,
{
    pub bot_info_repo: Arc<R>,
}

impl<R> BotInfoHandler<R>
where
    R: BotInfoRepository + ?Sized,
{
    pub fn new(bot_info_repo: Arc<R>) -> Self {
        BotInfoHandler { bot_info_repo }
    }

    pub async fn get_bot_info(&self) -> Result<BotInfo, AppError> {
        self.bot_info_repo.get_bot_info().await
    }

    pub async fn upsert_bot_info(&self, request: BotInfoRequest) -> Result<BotInfo, AppError> {
        request.validate()?;

        let upsert = BotInfoUpsert::from(request);
        self.bot_info_repo.upsert_bot_info(&upsert).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::bot_info::MockBotInfoRepository;
    use uuid::Uuid;

    #[actix_rt::test]
    async fn invalid_request_never_reaches_storage() {
        let mut repo = MockBotInfoRepository::new();
        repo.expect_upsert_bot_info().never();

        let handler = BotInfoHandler::new(Arc::new(repo));
        let request = BotInfoRequest {
            name: " ".into(),
            tagline: "t".into(),
            description: "d".into(),
            demo_url: None,
            github_repo: "https://github.com/me/bot".into(),
            screenshots: None,
            features: None,
        };
        let err = handler.upsert_bot_info(request).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[actix_rt::test]
    async fn blank_demo_url_is_stored_as_absent() {
        let mut repo = MockBotInfoRepository::new();
        repo.expect_upsert_bot_info()
            .withf(|bot| bot.demo_url.is_none())
            .times(1)
            .returning(|bot| Ok(bot.clone().into_new_record(Uuid::new_v4())));

        let handler = BotInfoHandler::new(Arc::new(repo));
        let request = BotInfoRequest {
            name: "Bot".into(),
            tagline: "t".into(),
            description: "d".into(),
            demo_url: Some("".into()),
            github_repo: "https://github.com/me/bot".into(),
            screenshots: Some(vec!["https://img.example.com/1.png".into()]),
            features: None,
        };
        let info = handler.upsert_bot_info(request).await.unwrap();
        assert!(info.features.is_empty());
        assert_eq!(info.screenshots.len(), 1);
    }
}
