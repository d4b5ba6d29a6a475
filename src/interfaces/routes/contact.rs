use actix_web::web;

use crate::handlers::contact;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/contact")
            .service(
                web::resource("")
                    .route(web::get().to(contact::list_messages))
                    .route(web::post().to(contact::submit_message))
            )
            .service(
                web::resource("/{message_id}")
                    .route(web::patch().to(contact::set_message_status))
            )
    );
}
