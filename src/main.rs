use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use ems_backend::{
    config::Config,
    external::GeminiService,
    handlers,
    middlewares::{SessionMiddleware, create_cors},
    services::*,
    store::AppStore,
    swagger::swagger_config,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // 加载配置
    let config = Config::from_toml().expect("Failed to load configuration file");

    // 初始化内存态（含种子用户），无持久层
    let store = AppStore::new();
    log::info!(
        "In-memory store initialized with {} seed users",
        store.users.read().await.len()
    );

    // 外部图片编辑服务
    let gemini_service = GeminiService::new(config.gemini.clone());

    // 创建服务
    let auth_service = AuthService::new(store.clone());
    let user_service = UserService::new(store.clone());
    let catalog_service = CatalogService::new(store.clone());
    let cart_service = CartService::new(store.clone());
    let order_service = OrderService::new(store.clone());
    let membership_service = MembershipService::new(store.clone());
    let image_service = ImageService::new(gemini_service);

    // 启动HTTP服务器
    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .wrap(SessionMiddleware::new(store.clone()))
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(user_service.clone()))
            .app_data(web::Data::new(catalog_service.clone()))
            .app_data(web::Data::new(cart_service.clone()))
            .app_data(web::Data::new(order_service.clone()))
            .app_data(web::Data::new(membership_service.clone()))
            .app_data(web::Data::new(image_service.clone()))
            .configure(swagger_config)
            .service(
                web::scope("/api/v1")
                    .configure(handlers::auth_config)
                    .configure(handlers::user_config)
                    .configure(handlers::product_config)
                    .configure(handlers::cart_config)
                    .configure(handlers::order_config)
                    .configure(handlers::membership_config)
                    .configure(handlers::image_config),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
