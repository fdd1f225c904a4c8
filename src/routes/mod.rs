pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::auth::AuthGate;
use crate::error::AppError;

/// Registers every route. Expects `web::Data<UserDirectory>` and
/// `web::Data<TaskRepository>` to be present as app data.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .service(health::health)
        .service(
            web::scope("/todos")
                .wrap(AuthGate)
                .service(tasks::get_tasks)
                .service(tasks::create_task)
                .service(tasks::get_task)
                .service(tasks::update_task)
                .service(tasks::delete_task),
        )
        .service(
            web::scope("/users/me")
                .wrap(AuthGate)
                .service(auth::me)
                .service(auth::logout)
                .service(auth::change_password),
        )
        .service(auth::register)
        .service(auth::login);
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}
