use crate::configuration::Settings;
use crate::middleware;
use crate::routes;
use crate::services;
use actix_cors::Cors;
use actix_web::{dev::Server, error, http, web, App, HttpServer};
use sqlx::{Pool, Postgres};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub async fn run(
    listener: TcpListener,
    pg_pool: Pool<Postgres>,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    let email_service = services::EmailService::new(&settings.email);
    let email_service = web::Data::new(email_service);

    let settings = web::Data::new(settings);
    let pg_pool = web::Data::new(pg_pool);

    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let msg: String = match err {
            error::JsonPayloadError::Deserialize(err) => format!(
                "{{\"kind\":\"deserialize\",\"line\":{}, \"column\":{}, \"msg\":\"{}\"}}",
                err.line(),
                err.column(),
                err
            ),
            _ => format!("{{\"kind\":\"other\",\"msg\":\"{}\"}}", err),
        };
        error::InternalError::new(msg, http::StatusCode::BAD_REQUEST).into()
    });

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(middleware::authentication::Manager::new())
            .wrap(Cors::permissive())
            .service(web::scope("/health_check").service(routes::health_check))
            .service(
                web::scope("/products")
                    .service(routes::product::list_handler)
                    .service(routes::product::admin_list_handler)
                    .service(routes::product::promotional_handler)
                    .service(routes::product::recommendations_handler)
                    .service(routes::product::add_handler)
                    .service(routes::product::add_review_handler)
                    .service(routes::product::delete_all_reviews_handler)
                    .service(routes::product::delete_review_handler)
                    .service(routes::product::item_handler)
                    .service(routes::product::update_handler)
                    .service(routes::product::patch_handler)
                    .service(routes::product::delete_handler),
            )
            .service(
                web::scope("/categories")
                    .service(routes::category::list_handler)
                    .service(routes::category::add_handler)
                    .service(routes::category::item_handler)
                    .service(routes::category::update_handler)
                    .service(routes::category::delete_handler),
            )
            .service(
                web::scope("/users")
                    .service(routes::user::register_handler)
                    .service(routes::user::login_handler)
                    .service(routes::user::verify_handler)
                    .service(routes::user::profile_handler)
                    .service(routes::user::admin_add_handler)
                    .service(routes::user::list_handler)
                    .service(routes::user::item_handler)
                    .service(routes::user::update_handler)
                    .service(routes::user::delete_handler),
            )
            .service(web::scope("/recently-added").service(routes::recently_added::list_handler))
            .app_data(json_config.clone())
            .app_data(pg_pool.clone())
            .app_data(settings.clone())
            .app_data(email_service.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
