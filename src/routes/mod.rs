pub mod basics;
pub mod meds;
pub mod reports;
pub mod tags;

use actix_web::web;

use crate::error::AppError;

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    // Malformed bodies get the same JSON error shape as every other failure
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .configure(basics::create_routes)
    .configure(meds::create_routes)
    .configure(tags::create_routes)
    .configure(reports::create_routes);
}

#[cfg(test)]
pub async fn test_state() -> web::Data<crate::AppState> {
    web::Data::new(crate::AppState {
        db: crate::db::test_database().await,
        config: crate::config::Config::default(),
    })
}
