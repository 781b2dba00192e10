use actix_web::{
    http::StatusCode,
    web::{Data, Json},
    HttpResponse, Responder,
};
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use uuid::Uuid;

use crate::config::AppState;
use crate::response::json_error;
use crate::types::{HealthResponse, StrategicHintRequest};

/// Removes a leading `data:image/{png,jpeg,jpg};base64,` marker. Anything
/// else (raw base64, unknown schemes) passes through untouched.
pub(crate) fn strip_data_uri_prefix(raw: &str) -> &str {
    let Some(rest) = raw.strip_prefix("data:image/") else {
        return raw;
    };
    for mime in ["png", "jpeg", "jpg"] {
        if let Some(clean) = rest
            .strip_prefix(mime)
            .and_then(|tail| tail.strip_prefix(";base64,"))
        {
            return clean;
        }
    }
    raw
}

/// Returns the decoded byte count, or `(error_message, error_code)`.
pub(crate) fn validate_image_payload(
    clean_b64: &str,
    max_image_bytes: usize,
) -> Result<usize, (String, &'static str)> {
    if clean_b64.is_empty() {
        return Err(("image payload is empty".to_string(), "missing_image"));
    }
    let bytes = BASE64_STANDARD
        .decode(clean_b64)
        .map_err(|err| (format!("invalid image base64: {err}"), "invalid_image_b64"))?;
    if bytes.is_empty() {
        return Err(("image payload is empty".to_string(), "missing_image"));
    }
    if bytes.len() > max_image_bytes {
        return Err((
            format!(
                "image payload too large: {} bytes (max {max_image_bytes})",
                bytes.len()
            ),
            "image_too_large",
        ));
    }
    Ok(bytes.len())
}

pub(crate) async fn health(state: Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy",
        service: "bubble-hint-api",
        model: state.config.model.clone(),
        upstream_timeout_secs: state.config.upstream_timeout_secs,
        max_image_bytes: state.config.max_image_bytes,
    })
}

pub(crate) async fn method_not_allowed() -> impl Responder {
    json_error(
        StatusCode::METHOD_NOT_ALLOWED,
        "Method not allowed",
        "method_not_allowed",
    )
}

pub(crate) async fn strategic_hint(
    state: Data<AppState>,
    req: Json<StrategicHintRequest>,
) -> impl Responder {
    let request_id = Uuid::new_v4();

    let Some(image_base64) = req.image_base64.as_deref() else {
        return json_error(
            StatusCode::BAD_REQUEST,
            "imageBase64 is required",
            "missing_image",
        );
    };

    let clean = strip_data_uri_prefix(image_base64.trim());
    let image_bytes = match validate_image_payload(clean, state.config.max_image_bytes) {
        Ok(size) => size,
        Err((msg, code)) => return json_error(StatusCode::BAD_REQUEST, msg, code),
    };

    tracing::info!(request_id = %request_id, image_bytes, "relaying strategic-hint request");

    match state.upstream.strategic_hint(clean).await {
        Ok(strategy) => HttpResponse::Ok().json(strategy),
        Err((msg, code)) => {
            tracing::error!(request_id = %request_id, "strategic-hint relay failed: {msg}");
            let status = if code == "missing_api_key" {
                StatusCode::INTERNAL_SERVER_ERROR
            } else {
                StatusCode::BAD_GATEWAY
            };
            json_error(status, msg, code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ServerConfig, DEFAULT_MAX_IMAGE_BYTES};
    use crate::upstream::GeminiClient;
    use actix_web::{test as awtest, web, App};
    use serde_json::{json, Value};

    fn test_state() -> AppState {
        let config = ServerConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            json_limit_bytes: DEFAULT_MAX_IMAGE_BYTES * 4,
            upstream_timeout_secs: 1,
            api_base: "http://127.0.0.1:9".to_string(),
            model: "gemini-3-flash-preview".to_string(),
        };
        AppState {
            upstream: GeminiClient::new(&config),
            config,
        }
    }

    fn hint_resource() -> actix_web::Resource {
        web::resource("/api/strategic-hint")
            .route(web::post().to(strategic_hint))
            .route(web::route().to(method_not_allowed))
    }

    #[test]
    fn data_uri_prefixes_are_stripped() {
        assert_eq!(strip_data_uri_prefix("data:image/png;base64,AAAA"), "AAAA");
        assert_eq!(strip_data_uri_prefix("data:image/jpeg;base64,BBBB"), "BBBB");
        assert_eq!(strip_data_uri_prefix("data:image/jpg;base64,CCCC"), "CCCC");
    }

    #[test]
    fn raw_base64_and_unknown_schemes_pass_through() {
        assert_eq!(strip_data_uri_prefix("AAAA"), "AAAA");
        assert_eq!(
            strip_data_uri_prefix("data:image/gif;base64,DDDD"),
            "data:image/gif;base64,DDDD"
        );
        assert_eq!(
            strip_data_uri_prefix("data:video/mp4;base64,EEEE"),
            "data:video/mp4;base64,EEEE"
        );
    }

    #[test]
    fn image_payload_validation_checks_bounds() {
        assert_eq!(validate_image_payload("AAAA", 16), Ok(3));
        assert_eq!(
            validate_image_payload("", 16).unwrap_err().1,
            "missing_image"
        );
        assert_eq!(
            validate_image_payload("!!!", 16).unwrap_err().1,
            "invalid_image_b64"
        );
        assert_eq!(
            validate_image_payload("AAAAAAAA", 3).unwrap_err().1,
            "image_too_large"
        );
    }

    #[actix_web::test]
    async fn non_post_is_rejected_with_405() {
        let app = awtest::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .service(hint_resource()),
        )
        .await;

        let req = awtest::TestRequest::get()
            .uri("/api/strategic-hint")
            .to_request();
        let resp = awtest::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

        let body: Value = awtest::read_body_json(resp).await;
        assert_eq!(body["error_code"], "method_not_allowed");
    }

    #[actix_web::test]
    async fn missing_image_field_is_rejected_before_any_relay() {
        let app = awtest::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .service(hint_resource()),
        )
        .await;

        let req = awtest::TestRequest::post()
            .uri("/api/strategic-hint")
            .set_json(json!({ "dangerRow": 4 }))
            .to_request();
        let resp = awtest::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = awtest::read_body_json(resp).await;
        assert_eq!(body["error_code"], "missing_image");
    }

    #[actix_web::test]
    async fn undecodable_image_is_rejected() {
        let app = awtest::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .service(hint_resource()),
        )
        .await;

        let req = awtest::TestRequest::post()
            .uri("/api/strategic-hint")
            .set_json(json!({ "imageBase64": "data:image/png;base64,!!!not_base64!!!" }))
            .to_request();
        let resp = awtest::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = awtest::read_body_json(resp).await;
        assert_eq!(body["error_code"], "invalid_image_b64");
    }

    #[actix_web::test]
    async fn health_reports_config_without_credentials() {
        let app = awtest::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .route("/health", web::get().to(health)),
        )
        .await;

        let req = awtest::TestRequest::get().uri("/health").to_request();
        let resp = awtest::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = awtest::read_body_json(resp).await;
        assert_eq!(body["service"], "bubble-hint-api");
        assert!(body.get("api_key").is_none());
        assert!(body.get("key").is_none());
    }
}
