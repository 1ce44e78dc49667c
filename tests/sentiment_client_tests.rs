// Integration tests for the sentiment client against an in-process server

#[cfg(test)]
mod sentiment_client_tests {
    use axum::routing::post;
    use axum::{Json, Router};
    use dynaform_lib::file_storage::SubmissionStore;
    use dynaform_lib::renderer::FormRenderer;
    use dynaform_lib::sentiment::SentimentClient;
    use dynaform_lib::server::{build_router, ServerState};
    use dynaform_lib::{FieldType, FormField, SentimentLabel};
    use serde_json::{json, Value};
    use tempfile::TempDir;

    /// Serve a router on an ephemeral port, returning its base URL
    async fn spawn(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn spawn_function_server() -> String {
        let base = spawn(build_router(ServerState::default())).await;
        format!("{}/functions/v1/analyze-sentiment", base)
    }

    #[tokio::test]
    async fn test_classify_recognized_labels() {
        let endpoint = spawn_function_server().await;
        let client = SentimentClient::new(endpoint);

        let label = client.classify("I am so happy with this").await.unwrap();
        assert_eq!(label, SentimentLabel::Positive);

        let label = client.classify("a truly bad experience").await.unwrap();
        assert_eq!(label, SentimentLabel::Negative);

        let label = client.classify("the meeting is at noon").await.unwrap();
        assert_eq!(label, SentimentLabel::Neutral);
    }

    #[tokio::test]
    async fn test_unrecognized_label_is_unknown_not_error() {
        // An endpoint that replies 200 with a label outside the known set
        let router = Router::new().route(
            "/classify",
            post(|| async { Json(json!({ "sentiment": "joyful" })) }),
        );
        let base = spawn(router).await;
        let client = SentimentClient::new(format!("{}/classify", base));

        let label = client.classify("whatever").await.unwrap();
        assert_eq!(label, SentimentLabel::Unknown);
    }

    #[tokio::test]
    async fn test_non_2xx_reply_is_an_error() {
        let router = Router::new().route(
            "/classify",
            post(|| async {
                (
                    axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "model overloaded" })),
                )
            }),
        );
        let base = spawn(router).await;
        let client = SentimentClient::new(format!("{}/classify", base));

        let err = client.classify("whatever").await.unwrap_err();
        assert!(err.contains("model overloaded"));
    }

    #[tokio::test]
    async fn test_transport_failure_is_an_error() {
        // Nothing listens on port 1
        let client = SentimentClient::new("http://127.0.0.1:1/classify".to_string());
        assert!(client.classify("whatever").await.is_err());
    }

    #[tokio::test]
    async fn test_sentiment_field_end_to_end() {
        let temp_dir = TempDir::new().unwrap();
        let submissions = SubmissionStore::new(temp_dir.path());
        let client = SentimentClient::new(spawn_function_server().await);

        let feedback = FormField::new("feedback", "Feedback", FieldType::SentimentText);
        let mut form =
            FormRenderer::new(vec![feedback], Some("Feedback Form".to_string()), None).unwrap();

        form.set_value("feedback", Value::String("what a great product".into()));
        let display = form.analyze_sentiment("feedback", &client).await.unwrap();
        assert_eq!(display, "positive");
        assert_eq!(form.sentiment("feedback"), Some("positive"));

        let record = form.submit(&submissions, |_| {}).unwrap();
        assert_eq!(record.data["feedback"], "what a great product");
        assert_eq!(record.data["feedback_sentiment"], "positive");

        let stored = submissions.list().unwrap();
        assert_eq!(stored[0].data["feedback_sentiment"], "positive");
    }

    #[tokio::test]
    async fn test_failed_analysis_displays_capitalized_error() {
        let client = SentimentClient::new("http://127.0.0.1:1/classify".to_string());

        let feedback = FormField::new("feedback", "Feedback", FieldType::SentimentText);
        let mut form = FormRenderer::new(vec![feedback], None, None).unwrap();
        form.set_value("feedback", Value::String("some text".into()));

        let display = form.analyze_sentiment("feedback", &client).await.unwrap();
        assert_eq!(display, "Error");
        assert_eq!(form.sentiment("feedback"), Some("Error"));
    }
}
