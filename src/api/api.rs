use crate::api::api_certificate::{api_service_certificate_reload, api_service_certificate_status};
use crate::api::structs::api_service_data::ApiServiceData;
use crate::api::structs::query_token::QueryToken;
use crate::config::structs::api_server_config::ApiServerConfig;
use actix_cors::Cors;
use actix_web::dev::ServerHandle;
use actix_web::http::header::ContentType;
use actix_web::web::{Data, ServiceConfig};
use actix_web::{http, web, App, HttpRequest, HttpResponse, HttpServer};
use log::{error, info};
use serde_json::json;
use std::future::Future;
use std::net::SocketAddr;
use std::process::exit;
use std::sync::Arc;
use std::time::Duration;

pub fn api_service_cors() -> Cors {
    Cors::default()
        .send_wildcard()
        .allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![http::header::X_FORWARDED_FOR, http::header::ACCEPT])
        .allowed_header(http::header::CONTENT_TYPE)
        .max_age(1)
}

pub fn api_service_routes(data: Arc<ApiServiceData>) -> Box<dyn Fn(&mut ServiceConfig)> {
    Box::new(move |cfg: &mut ServiceConfig| {
        cfg.app_data(Data::new(Arc::clone(&data)));
        cfg.default_service(web::route().to(api_service_not_found));
        cfg.service(web::resource("api/certificate/reload").route(web::post().to(api_service_certificate_reload)));
        cfg.service(web::resource("api/certificate/status").route(web::get().to(api_service_certificate_status)));
    })
}

#[tracing::instrument(level = "debug", skip(data))]
pub async fn api_service(
    addr: SocketAddr,
    data: Arc<ApiServiceData>,
) -> (ServerHandle, impl Future<Output = Result<(), std::io::Error>>) {
    let config = Arc::clone(&data.api_server_config);
    let keep_alive = config.keep_alive.unwrap_or(60);
    let request_timeout = config.request_timeout.unwrap_or(30);
    let threads = config.threads.unwrap_or(1).max(1);

    info!("[API] Starting server listener on {}", addr);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(api_service_cors())
            .configure(api_service_routes(Arc::clone(&data)))
    })
    .keep_alive(Duration::from_secs(keep_alive))
    .client_request_timeout(Duration::from_secs(request_timeout))
    .client_disconnect_timeout(Duration::from_secs(request_timeout))
    .workers(threads as usize)
    .bind((addr.ip(), addr.port()))
    .unwrap_or_else(|e| {
        error!("[API] Could not listen to the API port: {e}");
        exit(1);
    })
    .disable_signals()
    .run();

    (server.handle(), server)
}

/// Checks the `token` query parameter. Returns the response to send when the
/// request must be refused.
pub fn api_service_token(request: &HttpRequest, config: &ApiServerConfig) -> Option<HttpResponse> {
    let params = match web::Query::<QueryToken>::from_query(request.query_string()) {
        Ok(params) => params,
        Err(_) => {
            return Some(HttpResponse::BadRequest().content_type(ContentType::json()).json(json!({
                "status": "invalid query"
            })));
        }
    };
    match params.token.as_deref() {
        None | Some("") => Some(HttpResponse::Ok().content_type(ContentType::json()).json(json!({
            "status": "missing token"
        }))),
        Some(token_code) => {
            if Some(token_code) != config.api_key.as_deref() {
                return Some(HttpResponse::Ok().content_type(ContentType::json()).json(json!({
                    "status": "invalid token"
                })));
            }
            None
        }
    }
}

pub async fn api_service_not_found() -> HttpResponse {
    HttpResponse::NotFound().content_type(ContentType::json()).json(json!({
        "status": "not found"
    }))
}
