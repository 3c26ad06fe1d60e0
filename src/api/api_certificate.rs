use crate::api::api::api_service_token;
use crate::api::structs::api_certificate::{CertificateAliasItem, CertificateFailureItem, CertificateStatusItem};
use crate::api::structs::api_service_data::ApiServiceData;
use crate::ssl::structs::certificate::Certificate;
use actix_web::http::header::ContentType;
use actix_web::web::Data;
use actix_web::{HttpRequest, HttpResponse};
use log::info;
use serde_json::json;
use std::sync::Arc;

#[tracing::instrument(level = "debug", skip(data))]
pub async fn api_service_certificate_reload(request: HttpRequest, data: Data<Arc<ApiServiceData>>) -> HttpResponse {
    if let Some(response) = api_service_token(&request, &data.api_server_config) {
        return response;
    }
    info!("[API] Certificate reload requested");
    match data.reloader.request_reload().await {
        Ok(report) => {
            let failures: Vec<CertificateFailureItem> = report
                .failed
                .iter()
                .map(|(domain, error)| CertificateFailureItem {
                    domain: domain.clone(),
                    error: error.clone(),
                })
                .collect();
            HttpResponse::Ok().content_type(ContentType::json()).json(json!({
                "status": report.status(),
                "added": report.added,
                "updated": report.updated,
                "policy_updated": report.policy_updated,
                "unchanged": report.unchanged,
                "removed": report.removed,
                "retained": report.retained,
                "failed": failures,
                "aliases_added": report.aliases_added,
                "aliases_removed": report.aliases_removed
            }))
        }
        Err(error) => HttpResponse::Ok().content_type(ContentType::json()).json(json!({
            "status": "failed",
            "error": error
        })),
    }
}

#[tracing::instrument(level = "debug", skip(data))]
pub async fn api_service_certificate_status(request: HttpRequest, data: Data<Arc<ApiServiceData>>) -> HttpResponse {
    if let Some(response) = api_service_token(&request, &data.api_server_config) {
        return response;
    }
    let certificates: Vec<CertificateStatusItem> = data
        .store
        .all_certificates()
        .into_iter()
        .map(|(_, certificate)| certificate_status_item(&certificate))
        .collect();
    let aliases: Vec<CertificateAliasItem> = data
        .store
        .all_aliases()
        .into_iter()
        .map(|(alias, domain)| CertificateAliasItem { alias, domain })
        .collect();
    HttpResponse::Ok().content_type(ContentType::json()).json(json!({
        "status": "ok",
        "certificates": certificates,
        "aliases": aliases,
        "last_reload": data.reloader.last_report().map(|report| report.status())
    }))
}

fn certificate_status_item(certificate: &Certificate) -> CertificateStatusItem {
    let summary = certificate.summary();
    let policy = certificate.policy();
    CertificateStatusItem {
        domain: certificate.domain().to_string(),
        format: certificate.format().to_string(),
        source_hash: certificate.source_hash().to_string(),
        subject: summary.subject.clone(),
        issuer: summary.issuer.clone(),
        serial: summary.serial.clone(),
        dns_names: summary.dns_names.clone(),
        not_after: summary.expires_at().map(|expiry| expiry.to_rfc3339()),
        expired: summary.is_expired(),
        loaded_at: certificate.loaded_at().to_rfc3339(),
        state: certificate.state().to_string(),
        ref_count: certificate.ref_count(),
        protocols: policy.version_names(),
        cipher_suites: policy.cipher_suite_names(),
        client_auth: policy.requires_client_auth(),
        warnings: policy.warnings().to_vec(),
    }
}
