use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result, middleware::Logger};
use serde::Serialize;

mod config;
mod console;
mod filename;
mod maker;
mod qr;

use config::Config;
use maker::{GenerateRequest, QrMakerService, QrResponse};

const INDEX_HTML: &str = include_str!("../static/index.html");

#[derive(Serialize)]
struct ServerInfo {
    message: String,
    status: String,
    version: String,
    endpoints: Vec<String>,
}

// Главная страница: веб-форма генератора
async fn index() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML))
}

// Информация о сервисе
async fn server_info() -> Result<HttpResponse> {
    let info = ServerInfo {
        message: "QR Code Maker Rust Server 🦀".to_string(),
        status: "running".to_string(),
        version: "1.0.0".to_string(),
        endpoints: vec![
            "/api/qr/create".to_string(),
            "/api/qr/download".to_string(),
        ],
    };
    Ok(HttpResponse::Ok().json(info))
}

// Сгенерировать QR код (ответ с data URL для предпросмотра)
async fn create_qr(
    maker: web::Data<QrMakerService>,
    req: web::Json<GenerateRequest>,
) -> Result<HttpResponse> {
    log::info!("Creating QR code for '{}'", req.url);

    match maker.generate(req.into_inner()) {
        Ok(generated) => Ok(HttpResponse::Ok().json(QrResponse {
            success: true,
            data: Some(generated),
            error: None,
        })),
        Err(e) => {
            log::error!("QR generation failed: {}", e);
            Ok(HttpResponse::BadRequest().json(QrResponse {
                success: false,
                data: None,
                error: Some(e.to_string()),
            }))
        }
    }
}

// Скачать QR код как PNG с предложенным именем файла
async fn download_qr(
    maker: web::Data<QrMakerService>,
    req: web::Json<GenerateRequest>,
) -> Result<HttpResponse> {
    log::info!("Download requested for '{}'", req.url);

    match maker.generate_png(req.into_inner()) {
        Ok((filename, png_bytes)) => Ok(HttpResponse::Ok()
            .content_type("image/png")
            .append_header((
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", filename),
            ))
            .body(png_bytes)),
        Err(e) => {
            log::error!("QR download failed: {}", e);
            Ok(HttpResponse::BadRequest().json(QrResponse {
                success: false,
                data: None,
                error: Some(e.to_string()),
            }))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::load().expect("Failed to load config");

    // `qr-code-maker cli` — консольный режим вместо сервера
    if std::env::args().nth(1).as_deref() == Some("cli") {
        return console::run(&config)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
    }

    println!("🦀 Starting QR Code Maker Server...");

    let maker = QrMakerService::new(config.clone());

    let host = config.server.host.clone();
    let port = config.server.port;

    println!("🚀 Server starting on http://{}:{}", host, port);
    println!("📱 QR defaults: box_size={}, border={}, colors {} on {}",
        config.qr.box_size, config.qr.border,
        config.qr.fill_color, config.qr.back_color);

    HttpServer::new(move || {
        let cors = Cors::default().allow_any_origin().allow_any_method().allow_any_header().max_age(3600);
        App::new()
            .app_data(web::Data::new(maker.clone()))
            .wrap(cors)
            .wrap(Logger::default())
            .route("/", web::get().to(index))
            .service(
                web::scope("/api")
                    .route("/info", web::get().to(server_info))
                    .route("/qr/create", web::post().to(create_qr))
                    .route("/qr/download", web::post().to(download_qr))
            )
    })
        .bind(format!("{}:{}", host, port))?
        .run()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;
    use crate::config::{QrConfig, ServerConfig};

    fn test_maker() -> QrMakerService {
        QrMakerService::new(Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3001,
            },
            qr: QrConfig {
                box_size: 10,
                border: 4,
                fill_color: "#000000".to_string(),
                back_color: "#FFFFFF".to_string(),
                output_dir: ".".to_string(),
            },
        })
    }

    #[actix_web::test]
    async fn index_serves_form_page() {
        let app = test::init_service(App::new().route("/", web::get().to(index))).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert!(resp.status().is_success());

        let body = test::read_body(resp).await;
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("QR Code Generator"));
    }

    #[actix_web::test]
    async fn create_returns_preview_and_filename() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_maker()))
                .route("/api/qr/create", web::post().to(create_qr)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/qr/create")
            .set_json(serde_json::json!({ "url": "https://www.google.com" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["filename"], "qr_code_httpswww.google.com.png");
        assert!(body["data"]["qr_code"]
            .as_str()
            .unwrap()
            .starts_with("data:image/png;base64,"));
    }

    #[actix_web::test]
    async fn create_rejects_empty_url() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_maker()))
                .route("/api/qr/create", web::post().to(create_qr)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/qr/create")
            .set_json(serde_json::json!({ "url": "   " }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("URL must not be empty"));
    }

    #[actix_web::test]
    async fn download_sets_suggested_filename_header() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_maker()))
                .route("/api/qr/download", web::post().to(download_qr)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/qr/download")
            .set_json(serde_json::json!({ "url": "https://www.google.com", "box_size": 5 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let content_type = resp.headers().get("Content-Type").unwrap().to_str().unwrap();
        assert_eq!(content_type, "image/png");
        let disposition = resp.headers().get("Content-Disposition").unwrap().to_str().unwrap();
        assert_eq!(
            disposition,
            "attachment; filename=\"qr_code_httpswww.google.com.png\""
        );

        let body = test::read_body(resp).await;
        assert_eq!(&body[..8], b"\x89PNG\r\n\x1a\n");
    }
}
