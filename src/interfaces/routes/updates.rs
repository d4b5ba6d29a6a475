use actix_web::web;

use crate::handlers::updates;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/updates")
            .service(
                web::resource("")
                    .route(web::get().to(updates::list_updates))
                    .route(web::post().to(updates::create_update))
            )
            .service(
                web::resource("/{key}")
                    .route(web::get().to(updates::get_update))
                    .route(web::put().to(updates::update_update))
                    .route(web::delete().to(updates::delete_update))
            )
    );
}
