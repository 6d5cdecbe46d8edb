//! Unit and integration tests for inkpage-api

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use inkpage::{FontCatalog, FontSource, NoteRenderer};
use inkpage_api::{app, ErrorResponse, OptionsResponse, PageSizeInfo, RenderNoteRequest};
use serde_json::json;
use tower::util::ServiceExt;

/// "normal" renders with the block face, "cursive" points at a missing file
fn test_app() -> Router {
    let catalog = FontCatalog::with_font_dir("/nonexistent/inkpage-fonts")
        .register("normal", FontSource::Block);
    app(NoteRenderer::new(catalog))
}

async fn get(uri: &str) -> axum::response::Response {
    test_app()
        .oneshot(
            Request::builder()
                .uri(uri)
                .method("GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn post_json(uri: &str, body: serde_json::Value) -> axum::response::Response {
    test_app()
        .oneshot(
            Request::builder()
                .uri(uri)
                .method("POST")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

async fn error_message(response: axum::response::Response) -> String {
    let body = body_bytes(response).await;
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    error.error
}

fn png_dimensions(bytes: &[u8]) -> (u32, u32) {
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"), "not a PNG");
    // IHDR width and height follow the 8-byte signature and chunk header
    let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
    let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
    (width, height)
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_request_deserialization() {
        let json = json!({
            "page_size": "A4",
            "pen_color": "blue",
            "font_style": "normal",
            "text": "Hello"
        });

        let request: RenderNoteRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request.page_size, "A4");
        assert_eq!(request.pen_color, "blue");
        assert_eq!(request.font_style, "normal");
        assert_eq!(request.text, "Hello");
    }

    #[test]
    fn test_render_request_requires_all_fields() {
        let json = json!({ "page_size": "A4", "text": "Hello" });
        assert!(serde_json::from_value::<RenderNoteRequest>(json).is_err());
    }

    #[test]
    fn test_error_response_serialization() {
        let error = ErrorResponse {
            error: "Test error message".to_string(),
        };

        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["error"], "Test error message");
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_health_check_endpoint() {
        let response = get("/api/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_bytes(response).await;
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "inkpage API");
        assert!(json["version"].is_string());
    }

    #[tokio::test]
    async fn test_options_endpoint() {
        let response = get("/api/options").await;
        assert_eq!(response.status(), StatusCode::OK);

        let options: OptionsResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(
            options.page_sizes[0],
            PageSizeInfo {
                name: "A4".to_string(),
                width: 1240,
                height: 1754
            }
        );
        assert_eq!(options.page_sizes.len(), 3);
        assert_eq!(options.pen_colors, vec!["black", "red", "blue", "green"]);
        assert_eq!(options.font_styles, vec!["cursive", "normal", "sansita"]);
    }

    #[tokio::test]
    async fn test_create_route_returns_png() {
        let response = get("/create/A4/blue/normal/prompt=Hello%20world").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "image/png"
        );

        let body = body_bytes(response).await;
        assert_eq!(png_dimensions(&body), (1240, 1754));
    }

    #[tokio::test]
    async fn test_create_route_decodes_line_breaks() {
        for uri in [
            "/create/A5/red/normal/prompt=Line%20one%0ALine%20two",
            "/create/A5/red/normal/prompt=Line%20one%5CnLine%20two",
        ] {
            let response = get(uri).await;
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
            assert_eq!(png_dimensions(&body_bytes(response).await), (874, 1240));
        }
    }

    #[tokio::test]
    async fn test_create_route_requires_prompt_prefix() {
        let response = get("/create/A4/blue/normal/Hello").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(error_message(response).await.contains("prompt="));
    }

    #[tokio::test]
    async fn test_invalid_page_size() {
        let response = get("/create/A3/blue/normal/prompt=Hi").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(error_message(response).await.contains("Invalid page size"));
    }

    #[tokio::test]
    async fn test_invalid_pen_color() {
        let response = get("/create/A4/purple/normal/prompt=Hi").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let message = error_message(response).await;
        assert!(message.contains("Invalid pen color"));
        assert!(message.contains("purple"));
    }

    #[tokio::test]
    async fn test_invalid_font_style() {
        let response = get("/create/A4/black/gothic/prompt=Hi").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(error_message(response).await.contains("Invalid font style"));
    }

    #[tokio::test]
    async fn test_overflow_is_bad_request() {
        let text = vec!["paragraph"; 40].join("\n");
        let response = post_json(
            "/api/render",
            json!({
                "page_size": "A5",
                "pen_color": "black",
                "font_style": "normal",
                "text": text
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(error_message(response)
            .await
            .starts_with("Text exceeds page size"));
    }

    #[tokio::test]
    async fn test_unreadable_font_is_server_error() {
        let response = get("/create/A4/black/cursive/prompt=Hi").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(error_message(response)
            .await
            .contains("CedarvilleCursive-Regular.ttf"));
    }

    #[tokio::test]
    async fn test_render_endpoint_success() {
        let response = post_json(
            "/api/render",
            json!({
                "page_size": "Letter",
                "pen_color": "green",
                "font_style": "normal",
                "text": "Dear diary,\nToday was fine."
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "image/png"
        );
        assert_eq!(png_dimensions(&body_bytes(response).await), (1275, 1650));
    }

    #[tokio::test]
    async fn test_render_endpoint_is_deterministic() {
        let body = json!({
            "page_size": "A5",
            "pen_color": "blue",
            "font_style": "normal",
            "text": "same input, same pixels"
        });
        let first = body_bytes(post_json("/api/render", body.clone()).await).await;
        let second = body_bytes(post_json("/api/render", body).await).await;
        assert!(first == second);
    }

    #[tokio::test]
    async fn test_render_endpoint_empty_text() {
        let response = post_json(
            "/api/render",
            json!({
                "page_size": "A4",
                "pen_color": "black",
                "font_style": "normal",
                "text": ""
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    async fn post_raw(body: &'static str, content_type: Option<&str>) -> axum::response::Response {
        let mut request = Request::builder().uri("/api/render").method("POST");
        if let Some(content_type) = content_type {
            request = request.header("content-type", content_type);
        }
        test_app()
            .oneshot(request.body(Body::from(body)).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_render_endpoint_invalid_json() {
        let response = post_raw("{ not json", Some("application/json")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert!(error_message(response)
            .await
            .starts_with("Invalid request body"));
    }

    #[tokio::test]
    async fn test_render_endpoint_missing_field() {
        let response = post_raw(
            r#"{"page_size": "A4", "pen_color": "black", "text": "Hi"}"#,
            Some("application/json"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let message = error_message(response).await;
        assert!(message.starts_with("Invalid request body"));
        assert!(message.contains("font_style"), "message: {message}");
    }

    #[tokio::test]
    async fn test_render_endpoint_requires_json_content_type() {
        let response = post_raw(r#"{"text": "Hi"}"#, None).await;
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(error_message(response)
            .await
            .starts_with("Invalid request body"));
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let response = get("/api/missing").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
