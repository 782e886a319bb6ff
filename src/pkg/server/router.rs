use axum::routing::post;
use axum::{routing::get, Router};

use super::handlers;
use super::handlers::probes::{healthz, livez};
use super::state::AppState;
use crate::prelude::Result;

pub async fn build_routes() -> Result<Router> {
    let state = AppState::new().await?;
    let app = Router::new()
        .route("/extract-criteria", post(handlers::criteria::extract))
        .route("/score-resumes", post(handlers::resumes::score))
        .route("/healthz", get(healthz))
        .route("/livez", get(livez))
        .with_state(state);

    Ok(app)
}

#[cfg(test)]
mod tests {
    use reqwest::multipart::{Form, Part};
    use reqwest::StatusCode;
    use tracing_test::traced_test;

    use super::*;

    async fn serve() -> Result<String> {
        std::env::set_var("SERVICE_NAME", "resumerank");
        std::env::set_var("LISTEN_PORT", "8000");
        std::env::set_var("AI_ENDPOINT", "");
        std::env::set_var("AI_PROVIDER", "ollama");
        std::env::set_var("AI_MODEL", "");
        std::env::set_var("AI_KEY", "");
        let app = build_routes().await?;
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Ok(format!("http://{}", addr))
    }

    #[traced_test]
    #[tokio::test]
    async fn test_probes_respond() -> Result<()> {
        let base = serve().await?;
        let client = reqwest::Client::new();
        let res = client.get(format!("{}/livez", base)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let res = client.get(format!("{}/healthz", base)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        Ok(())
    }

    #[traced_test]
    #[tokio::test]
    async fn test_extract_criteria_rejects_txt_upload() -> Result<()> {
        let base = serve().await?;
        let part = Part::bytes(b"just some notes".to_vec())
            .file_name("notes.txt")
            .mime_str("text/plain")
            .unwrap();
        let form = Form::new().part("file", part);
        let res = reqwest::Client::new()
            .post(format!("{}/extract-criteria", base))
            .multipart(form)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[traced_test]
    #[tokio::test]
    async fn test_extract_criteria_requires_a_file() -> Result<()> {
        let base = serve().await?;
        let form = Form::new().text("something", "else");
        let res = reqwest::Client::new()
            .post(format!("{}/extract-criteria", base))
            .multipart(form)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[traced_test]
    #[tokio::test]
    async fn test_score_resumes_rejects_txt_upload() -> Result<()> {
        let base = serve().await?;
        let part = Part::bytes(b"plain resume".to_vec())
            .file_name("resume.txt")
            .mime_str("text/plain")
            .unwrap();
        let form = Form::new()
            .text("criteria", r#"["Python","SQL"]"#)
            .part("files", part);
        let res = reqwest::Client::new()
            .post(format!("{}/score-resumes", base))
            .multipart(form)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[traced_test]
    #[tokio::test]
    async fn test_score_resumes_rejects_malformed_criteria() -> Result<()> {
        let base = serve().await?;
        let form = Form::new().text("criteria", "Python, SQL");
        let res = reqwest::Client::new()
            .post(format!("{}/score-resumes", base))
            .multipart(form)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[traced_test]
    #[tokio::test]
    async fn test_score_resumes_empty_batch_yields_header_only_sheet() -> Result<()> {
        let base = serve().await?;
        let form = Form::new().text("criteria", r#"["Python","SQL"]"#);
        let res = reqwest::Client::new()
            .post(format!("{}/score-resumes", base))
            .multipart(form)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers().get("content-type").unwrap().to_str().unwrap(),
            "text/csv"
        );
        let disposition = res
            .headers()
            .get("content-disposition")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("evaluation_results.csv"));
        let body = res.text().await.unwrap();
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Candidate Name,"));
        assert!(lines[0].ends_with("Total Score"));
        Ok(())
    }
}
