use actix_web::web;

use crate::handlers::bot_info;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/bot")
            .route(web::get().to(bot_info::get_bot_info))
            .route(web::put().to(bot_info::upsert_bot_info))
    );
}
