//! Router construction.
//!
//! Builds the axum router with all routes and middleware. Responses carry
//! `X-Content-Type-Options` and `X-Frame-Options`; no `Content-Security-Policy`
//! is set because exported pages run an inline activation script.

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, header};
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{documents, export, render, responses, shortcodes};
use crate::state::AppState;

/// Create the application router.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let document_routes = Router::new()
        .route(
            "/api/documents",
            get(documents::list_documents).post(documents::create_document),
        )
        .route(
            "/api/documents/{id}",
            get(documents::get_document)
                .put(documents::update_document)
                .delete(documents::delete_document),
        )
        .route("/api/documents/{id}/render", get(render::render_document))
        .route("/api/documents/{id}/shortcodes", get(shortcodes::get_outline))
        .route("/api/documents/{id}/export.html", get(export::export_html))
        .route("/api/documents/{id}/export.mdx", get(export::export_mdx));

    let response_routes = Router::new()
        .route("/api/responses", post(responses::create_response))
        .route(
            "/api/responses/{document_id}/{question_id}/counts",
            get(responses::get_counts),
        );

    let render_routes = Router::new()
        .route("/api/render", post(render::render_preview))
        .route("/api/shortcodes", get(shortcodes::get_library));

    Router::new()
        .merge(document_routes)
        .merge(response_routes)
        .merge(render_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_FRAME_OPTIONS,
                    HeaderValue::from_static("SAMEORIGIN"),
                )),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode, header};
    use pollmark_renderer::RenderOptions;
    use pollmark_store::MemoryStore;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app() -> Router {
        let state = AppState::new(Arc::new(MemoryStore::seeded()), RenderOptions::default());
        create_router(Arc::new(state))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn send_json(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, bytes) = send(app, method, uri, body).await;
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    fn answer(question_id: &str, response: &str) -> Value {
        json!({
            "documentId": "default",
            "questionId": question_id,
            "response": response,
            "sessionId": "session-1",
        })
    }

    #[tokio::test]
    async fn test_list_documents_includes_seed() {
        let app = app();
        let (status, json) = send_json(&app, Method::GET, "/api/documents", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json[0]["id"], "default");
        assert_eq!(json[0]["title"], "Interactive MDX Showcase");
        assert!(json[0]["createdAt"].is_string());
    }

    #[tokio::test]
    async fn test_document_crud() {
        let app = app();

        let (status, created) = send_json(
            &app,
            Method::POST,
            "/api/documents",
            Some(json!({"title": "Notes", "content": "# Notes"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_str().unwrap().to_owned();

        let (status, fetched) = send_json(&app, Method::GET, &format!("/api/documents/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["content"], "# Notes");

        let (status, updated) = send_json(
            &app,
            Method::PUT,
            &format!("/api/documents/{id}"),
            Some(json!({"content": "# Changed"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["title"], "Notes");
        assert_eq!(updated["content"], "# Changed");

        let (status, _) = send(&app, Method::DELETE, &format!("/api/documents/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, json) = send_json(&app, Method::GET, &format!("/api/documents/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Document not found");
    }

    #[tokio::test]
    async fn test_delete_missing_document() {
        let app = app();
        let (status, json) = send_json(&app, Method::DELETE, "/api/documents/missing", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Document not found");
    }

    #[tokio::test]
    async fn test_update_missing_document() {
        let app = app();
        let (status, _) = send_json(
            &app,
            Method::PUT,
            "/api/documents/missing",
            Some(json!({"title": "x"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_document_invalid_body() {
        let app = app();
        let (status, json) = send_json(
            &app,
            Method::POST,
            "/api/documents",
            Some(json!({"title": "Missing content"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(
            json["message"]
                .as_str()
                .unwrap()
                .starts_with("Invalid document data")
        );
    }

    #[tokio::test]
    async fn test_record_response_and_counts() {
        let app = app();

        for (question, response) in [("q1", "yes"), ("q1", "no"), ("q1", "yes")] {
            let (status, json) =
                send_json(&app, Method::POST, "/api/responses", Some(answer(question, response))).await;
            assert_eq!(status, StatusCode::CREATED);
            assert_eq!(json["response"], response);
        }

        let (status, json) =
            send_json(&app, Method::GET, "/api/responses/default/q1/counts", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({"yes": 2, "no": 1}));
    }

    #[tokio::test]
    async fn test_counts_for_unanswered_question() {
        let app = app();
        let (status, json) =
            send_json(&app, Method::GET, "/api/responses/default/q7/counts", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({"yes": 0, "no": 0}));
    }

    #[tokio::test]
    async fn test_duplicate_responses_are_counted() {
        let app = app();
        for _ in 0..2 {
            send_json(&app, Method::POST, "/api/responses", Some(answer("q2", "no"))).await;
        }

        let (_, json) = send_json(&app, Method::GET, "/api/responses/default/q2/counts", None).await;
        assert_eq!(json, json!({"yes": 0, "no": 2}));
    }

    #[tokio::test]
    async fn test_response_invalid_answer() {
        let app = app();
        let (status, json) =
            send_json(&app, Method::POST, "/api/responses", Some(answer("q1", "maybe"))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(
            json["message"]
                .as_str()
                .unwrap()
                .starts_with("Invalid response data")
        );
    }

    #[tokio::test]
    async fn test_response_unknown_document() {
        let app = app();
        let body = json!({"documentId": "missing", "questionId": "q1", "response": "yes"});
        let (status, _) = send_json(&app, Method::POST, "/api/responses", Some(body)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_render_document() {
        let app = app();
        let (status, json) =
            send_json(&app, Method::GET, "/api/documents/default/render", None).await;

        assert_eq!(status, StatusCode::OK);
        let html = json["html"].as_str().unwrap();
        assert!(html.starts_with("<h1>Interactive MDX Showcase</h1>"));
        assert!(html.contains("data-testid=\"interactive-section\""));
        assert!(html.contains("data-testid=\"yesno-question-q1\""));
        assert!(html.contains("data-testid=\"yesno-question-q2\""));
        assert!(html.contains("<li><strong>Bold text</strong></li>"));
        assert_eq!(html.matches("<script").count(), 1);
        assert_eq!(json["needsActivationScript"], true);
        assert_eq!(json["shortcodes"].as_array().unwrap().len(), 3);
        assert_eq!(json["shortcodes"][1]["questionId"], "q1");
    }

    #[tokio::test]
    async fn test_render_missing_document() {
        let app = app();
        let (status, _) = send_json(&app, Method::GET, "/api/documents/missing/render", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_render_preview() {
        let app = app();
        let body = json!({"content": "# Draft\n\n[yesno-question question=\"Ok?\"]", "documentId": "draft-1"});
        let (status, json) = send_json(&app, Method::POST, "/api/render", Some(body)).await;

        assert_eq!(status, StatusCode::OK);
        let html = json["html"].as_str().unwrap();
        assert!(html.starts_with("<h1>Draft</h1>"));
        assert!(html.contains("data-document-id=\"draft-1\""));
    }

    #[tokio::test]
    async fn test_render_preview_invalid_document_id() {
        let app = app();
        let body = json!({"content": "text", "documentId": "a b"});
        let (status, json) = send_json(&app, Method::POST, "/api/render", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["message"].as_str().unwrap().contains("invalid document id"));
    }

    #[tokio::test]
    async fn test_render_preview_without_embedded_script() {
        let state = AppState::new(
            Arc::new(MemoryStore::new()),
            RenderOptions::default().with_activation_script(false),
        );
        let app = create_router(Arc::new(state));
        let body = json!({"content": "[yesno-question question=\"Ok?\"]", "documentId": "p"});
        let (_, json) = send_json(&app, Method::POST, "/api/render", Some(body)).await;

        assert_eq!(json["needsActivationScript"], true);
        assert!(!json["html"].as_str().unwrap().contains("<script"));
    }

    #[tokio::test]
    async fn test_export_html() {
        let app = app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/documents/default/export.html")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Interactive MDX Showcase.html\""
        );

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let page = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Interactive MDX Showcase</title>"));
        assert!(page.contains("data-pollmark-activation"));
    }

    #[tokio::test]
    async fn test_export_mdx() {
        let app = app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/documents/default/export.mdx")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Interactive MDX Showcase.mdx\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"# Interactive MDX Showcase"));
    }

    #[tokio::test]
    async fn test_document_outline() {
        let app = app();
        let (status, json) =
            send_json(&app, Method::GET, "/api/documents/default/shortcodes", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["counts"], json!({"questions": 2, "sections": 1}));
        assert_eq!(json["entries"][0]["kind"], "interactivesection");
        assert_eq!(json["entries"][0]["label"], "Try Our Interactive Features");
        assert_eq!(json["entries"][2]["questionId"], "q2");
    }

    #[tokio::test]
    async fn test_shortcode_library() {
        let app = app();
        let (status, json) = send_json(&app, Method::GET, "/api/shortcodes", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json[0]["key"], "yesno-question");
        assert_eq!(json[1]["key"], "interactivesection");
    }

    #[tokio::test]
    async fn test_delete_cascades_counts() {
        let app = app();
        send_json(&app, Method::POST, "/api/responses", Some(answer("q1", "yes"))).await;
        send(&app, Method::DELETE, "/api/documents/default", None).await;

        let (_, json) = send_json(&app, Method::GET, "/api/responses/default/q1/counts", None).await;
        assert_eq!(json, json!({"yes": 0, "no": 0}));
    }

    #[tokio::test]
    async fn test_security_headers() {
        let app = app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/shortcodes")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers()["x-content-type-options"], "nosniff");
        assert_eq!(response.headers()["x-frame-options"], "SAMEORIGIN");
    }
}
