use actix_web::{
    self,
    middleware::{from_fn, Logger},
    web, App, HttpServer,
};
use std::sync::{Arc, LazyLock};

use crate::{
    api::success,
    configs::{connect_database, RedisCache},
    middlewares::{authentication, authorization},
    modules::{
        conversation::{handle::ConversationSvc, repository_pg::ConversationRepositoryPg},
        listings::{handle::ListingSvc, repository_pg::ListingRepositoryPg},
        media::{service::MediaService, storage::StorageClient},
        message::{handle::MessageSvc, repository_pg::MessageRepositoryPg},
        network::{handle::NetworkSvc, repository_pg::NetworkRepositoryPg},
        notification::{handle::NotificationSvc, repository_pg::NotificationRepositoryPg},
        profile::{repository_pg::ProfileRepositoryPg, service::ProfileService},
        wall::{handle::WallSvc, repository_pg::WallRepositoryPg},
    },
    utils::AuthRole,
};

mod api;
mod configs;
mod constants;
mod middlewares;
mod modules;
#[cfg(test)]
mod test;
mod utils;

pub static ENV: LazyLock<constants::Env> = LazyLock::new(|| {
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Environment variables loaded from .env file");
    constants::Env::default()
});

#[derive(Debug, Clone, serde::Serialize)]
struct RefreshIntervals {
    wall_secs: u64,
    chat_secs: u64,
    network_secs: u64,
}

impl RefreshIntervals {
    fn from_env(env: &constants::Env) -> Self {
        RefreshIntervals {
            wall_secs: env.wall_refresh_secs,
            chat_secs: env.chat_refresh_secs,
            network_secs: env.network_refresh_secs,
        }
    }
}

#[actix_web::get("/")]
async fn health_check() -> &'static str {
    "Server is running"
}

/// Polling periods clients use for each screen.
#[actix_web::get("/refresh-intervals")]
async fn refresh_intervals(
    intervals: web::Data<RefreshIntervals>,
) -> success::Success<RefreshIntervals> {
    success::Success::ok(Some(intervals.get_ref().clone()))
}

/// Routes that require a signed-in caller.
fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.configure(modules::profile::route::configure)
        .configure(modules::wall::route::configure)
        .configure(modules::conversation::route::configure)
        .configure(modules::network::route::configure)
        .configure(modules::notification::route::configure)
        .configure(modules::listings::route::configure);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let db_pool =
        connect_database().await.map_err(|_| std::io::Error::other("Database connection error"))?;

    let redis_pool =
        RedisCache::new().await.map_err(|_| std::io::Error::other("Redis connection error"))?;

    let profile_repo = Arc::new(ProfileRepositoryPg::new(db_pool.clone()));
    let notification_repo = Arc::new(NotificationRepositoryPg::new(db_pool.clone()));
    let network_repo = Arc::new(NetworkRepositoryPg::new(db_pool.clone()));
    let wall_repo = Arc::new(WallRepositoryPg::new(db_pool.clone()));
    let conversation_repo = Arc::new(ConversationRepositoryPg::new(db_pool.clone()));
    let message_repo = Arc::new(MessageRepositoryPg::new(db_pool.clone()));
    let listing_repo = Arc::new(ListingRepositoryPg::new(db_pool.clone()));

    let storage = StorageClient::new(&ENV.storage_url, &ENV.storage_key, &ENV.storage_bucket);
    let media_service = MediaService::with_defaults(Arc::new(storage));

    let profile_service =
        ProfileService::with_dependencies(profile_repo.clone(), Arc::new(redis_pool));
    let notification_service = NotificationSvc::with_dependencies(notification_repo);
    let network_service = NetworkSvc::with_dependencies(
        network_repo.clone(),
        profile_repo.clone(),
        notification_service.clone(),
    );
    let wall_service = WallSvc::with_dependencies(
        wall_repo,
        network_repo,
        profile_repo.clone(),
        media_service,
    );
    let conversation_service = ConversationSvc::with_dependencies(
        conversation_repo.clone(),
        message_repo.clone(),
        profile_repo.clone(),
    );
    let message_service = MessageSvc::with_dependencies(message_repo, conversation_repo);
    let listing_service = ListingSvc::with_dependencies(listing_repo, profile_repo);

    let profile_service = web::Data::new(profile_service);
    let notification_service = web::Data::new(notification_service);
    let network_service = web::Data::new(network_service);
    let wall_service = web::Data::new(wall_service);
    let conversation_service = web::Data::new(conversation_service);
    let message_service = web::Data::new(message_service);
    let listing_service = web::Data::new(listing_service);
    let intervals = web::Data::new(RefreshIntervals::from_env(&ENV));

    log::info!("Starting server at http://{}:{}", ENV.ip.as_str(), ENV.port);
    HttpServer::new(move || {
        let cors = actix_cors::Cors::default()
            .allowed_origin(&ENV.frontend_url)
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(profile_service.clone())
            .app_data(notification_service.clone())
            .app_data(network_service.clone())
            .app_data(wall_service.clone())
            .app_data(conversation_service.clone())
            .app_data(message_service.clone())
            .app_data(listing_service.clone())
            .app_data(intervals.clone())
            .service(health_check)
            .service(
                web::scope("/api").service(refresh_intervals).service(
                    web::scope("")
                        .wrap(from_fn(authorization(vec![AuthRole::Authenticated])))
                        .wrap(from_fn(authentication))
                        .configure(configure_api),
                ),
            )
    })
    .bind((ENV.ip.as_str(), ENV.port))?
    .workers(2)
    .run()
    .await
}
