use actix_web::web;

use crate::{constants::API_PREFIX, handlers::home::home};

mod auth;
mod bot_info;
mod contact;
mod json_error;
mod projects;
mod system;
mod updates;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.service(
        web::scope(API_PREFIX)
            .configure(system::config_routes)
            .configure(auth::config_routes)
            .configure(projects::config_routes)
            .configure(updates::config_routes)
            .configure(bot_info::config_routes)
            .configure(contact::config_routes)
    );

    cfg.configure(json_error::config_routes);
}
