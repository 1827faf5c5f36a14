pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::letter::handlers as letter;
use crate::state::AppState;

/// Headroom over the file limit for multipart boundaries and the text fields.
const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes.saturating_add(FORM_OVERHEAD_BYTES);

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/health", get(health::api_health_handler))
        .route("/api/templates", get(letter::handle_list_templates))
        // Analysis API
        .route("/api/analyze", post(analysis::handle_analyze))
        .route("/api/analyze-skills", post(analysis::handle_analyze_skills))
        .route("/api/analyze-job", post(analysis::handle_analyze_job))
        .route("/api/parse-resume", post(analysis::handle_parse_resume))
        // Letter API
        .route(
            "/api/generate-cover-letter",
            post(letter::handle_generate_cover_letter),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::taxonomy::SkillTaxonomy;
    use crate::config::Config;
    use crate::letter::writer::LetterWriter;
    use crate::llm_client::LlmError;

    const BOUNDARY: &str = "coverly-test-boundary";

    const RESUME: &str = "Jane Doe\njane.doe@example.com\n\nSummary\nData engineer with five years of experience building reliable pipelines.\n\nSkills\nPython, SQL, Git\n\nExperience\nData Engineer at Acme Corp, 2019 - present\n\nEducation\nB.Sc. Computer Science, State University\n";

    const JOB: &str = "Data Engineer\nCompany: Acme\n\nWe are looking for a candidate to join our platform team.\n\nRequirements\n- Python\n- SQL\n- AWS\n- Docker\n";

    struct CannedWriter;

    #[async_trait]
    impl LetterWriter for CannedWriter {
        async fn write_letter(&self, _prompt: &str, _system: &str) -> Result<String, LlmError> {
            Ok("Dear Hiring Manager at [Company Name],\n\nI would love to join.\n\n[Your Name]\n".to_string())
        }
    }

    struct FailingWriter;

    #[async_trait]
    impl LetterWriter for FailingWriter {
        async fn write_letter(&self, _prompt: &str, _system: &str) -> Result<String, LlmError> {
            Err(LlmError::EmptyContent)
        }
    }

    fn app_with(writer: Arc<dyn LetterWriter>, max_upload_bytes: usize) -> Router {
        let config = Config {
            anthropic_api_key: "sk-test".to_string(),
            port: 0,
            rust_log: "info".to_string(),
            max_upload_bytes,
            allowed_origins: vec!["*".to_string()],
            skill_taxonomy_path: None,
        };
        build_router(AppState {
            config,
            taxonomy: Arc::new(SkillTaxonomy::builtin().unwrap()),
            letter_writer: writer,
        })
    }

    fn app() -> Router {
        app_with(Arc::new(CannedWriter), 1024 * 1024)
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    /// `(name, Some(filename))` parts are file parts.
    fn multipart_request(uri: &str, parts: &[(&str, Option<&str>, &str)]) -> Request<Body> {
        let mut body = String::new();
        for (name, filename, value) in parts {
            body.push_str(&format!("--{BOUNDARY}\r\n"));
            match filename {
                Some(filename) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                )),
            }
            body.push_str(value);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));

        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_api_health_reports_taxonomy() {
        let response = app()
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["components"]["skill_taxonomy"], "ready");
        assert!(body["taxonomy_skills"].as_u64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_templates_catalog() {
        let response = app()
            .oneshot(Request::get("/api/templates").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(response).await;
        let templates = body["templates"].as_array().unwrap();
        assert_eq!(templates.len(), 4);
        assert_eq!(templates[3]["id"], "entry_level");
    }

    #[tokio::test]
    async fn test_analyze_scores_match() {
        let response = app()
            .oneshot(json_request(
                "/api/analyze",
                json!({ "resume_text": RESUME, "job_description": JOB }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["match_result"]["match_score"], 50);
        assert_eq!(body["match_result"]["missing_skills"], json!(["AWS", "Docker"]));
        assert_eq!(body["counts"]["required_skills_count"], 4);
        assert_eq!(body["job"]["company_name"], "Acme");
    }

    #[tokio::test]
    async fn test_analyze_rejects_short_job_description() {
        let response = app()
            .oneshot(json_request(
                "/api/analyze",
                json!({ "resume_text": RESUME, "job_description": "Python dev" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_analyze_skills_lists() {
        let response = app()
            .oneshot(json_request(
                "/api/analyze-skills",
                json!({
                    "resume_skills": ["python", "teamwork", "Cobol Wizardry"],
                    "job_requirements": ["Python", "Teamwork", "k8s", "Cobol Wizardry"]
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["match_score"], 75);
        assert_eq!(body["missing_skills"], json!(["Kubernetes"]));
        assert_eq!(body["technical_skills"], json!(["Python"]));
        assert_eq!(body["soft_skills"], json!(["Teamwork"]));
    }

    #[tokio::test]
    async fn test_analyze_job_ranks_priorities() {
        let posting = format!("{JOB}\nNice to have\n- Kubernetes\n");
        let response = app()
            .oneshot(json_request("/api/analyze-job", json!({ "job_description": posting })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["job_data"]["required_skills"].as_array().unwrap().len(), 4);
        assert_eq!(body["job_data"]["preferred_skills"], json!(["Kubernetes"]));

        let ranked: Vec<&str> = body["skill_priorities"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["skill"].as_str().unwrap())
            .collect();
        assert_eq!(ranked.len(), 4);
        assert!(!ranked.contains(&"Kubernetes"));
    }

    #[tokio::test]
    async fn test_parse_resume_upload() {
        let response = app()
            .oneshot(multipart_request(
                "/api/parse-resume",
                &[("resume", Some("jane.txt"), RESUME)],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["resume_data"]["skills"], json!(["Git", "Python", "SQL"]));
        assert_eq!(body["resume_data"]["contact"]["email"], "jane.doe@example.com");
    }

    #[tokio::test]
    async fn test_generate_cover_letter() {
        let response = app()
            .oneshot(multipart_request(
                "/api/generate-cover-letter",
                &[
                    ("resume", Some("jane.txt"), RESUME),
                    ("job_description", None, JOB),
                    ("template_style", None, "creative"),
                ],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let letter = body["cover_letter"].as_str().unwrap();
        assert!(letter.contains("at Acme,"));
        assert!(letter.ends_with("Jane Doe"));
        assert_eq!(body["metadata"]["template_used"], "creative");
        assert_eq!(body["analysis"]["match_result"]["match_score"], 50);
        assert!(body["request_id"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_generate_unknown_style_falls_back() {
        let response = app()
            .oneshot(multipart_request(
                "/api/generate-cover-letter",
                &[
                    ("resume", Some("jane.txt"), RESUME),
                    ("job_description", None, JOB),
                    ("template_style", None, "sonnet"),
                ],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["metadata"]["template_used"], "professional");
    }

    #[tokio::test]
    async fn test_generate_requires_resume() {
        let response = app()
            .oneshot(multipart_request(
                "/api/generate-cover-letter",
                &[("job_description", None, JOB)],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_generate_rejects_unsupported_file_type() {
        let response = app()
            .oneshot(multipart_request(
                "/api/generate-cover-letter",
                &[
                    ("resume", Some("jane.rtf"), RESUME),
                    ("job_description", None, JOB),
                ],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_generate_rejects_oversized_file() {
        let response = app_with(Arc::new(CannedWriter), 64)
            .oneshot(multipart_request(
                "/api/generate-cover-letter",
                &[
                    ("resume", Some("jane.txt"), RESUME),
                    ("job_description", None, JOB),
                ],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_generate_writer_failure_is_bad_gateway() {
        let response = app_with(Arc::new(FailingWriter), 1024 * 1024)
            .oneshot(multipart_request(
                "/api/generate-cover-letter",
                &[
                    ("resume", Some("jane.txt"), RESUME),
                    ("job_description", None, JOB),
                ],
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(body_json(response).await["error"]["code"], "LLM_ERROR");
    }
}
