//! Integration tests for the timeline viewer HTTP server

#[cfg(feature = "server")]
mod server_tests {
    use dayline_viewer::config::Config;
    use dayline_viewer::dataset::Dataset;
    use dayline_viewer::server::{run, ServerConfig};
    use std::net::SocketAddr;
    use std::time::Duration;

    const TWO_PEOPLE_CSV: &str = "\
id,member,startTime,endTime,activityName
1,alice,2024-01-22 08:00:00,2024-01-22 08:30:00,Breakfast
1,alice,2024-01-22 09:00:00,2024-01-22 17:00:00,Work (office)
2,bob,2024-01-22 07:30:00,2024-01-22 08:00:00,Run
";

    async fn start(csv: &str) -> (SocketAddr, tokio::sync::oneshot::Sender<()>) {
        let dataset = Dataset::from_csv_str(csv).expect("test CSV is valid");
        let config = ServerConfig::new(0, Config::default());

        let (addr, shutdown_tx) = run(config, dataset).await.expect("Failed to start server");

        // Give server time to start
        tokio::time::sleep(Duration::from_millis(100)).await;

        (addr, shutdown_tx)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (addr, shutdown_tx) = start(TWO_PEOPLE_CSV).await;

        let client = reqwest::Client::new();
        let response = client
            .get(format!("http://{}/health", addr))
            .send()
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success());

        let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
        assert_eq!(body["status"], "ok");
        assert!(body["version"].as_str().is_some());
        assert_eq!(body["person_count"], 2);

        let _ = shutdown_tx.send(());
    }

    #[tokio::test]
    async fn test_people_endpoint_keeps_first_seen_order() {
        let (addr, shutdown_tx) = start(TWO_PEOPLE_CSV).await;

        let client = reqwest::Client::new();
        let body: serde_json::Value = client
            .get(format!("http://{}/api/people", addr))
            .send()
            .await
            .expect("Failed to send request")
            .json()
            .await
            .expect("Failed to parse JSON");

        assert_eq!(body["people"][0], "1-alice");
        assert_eq!(body["people"][1], "2-bob");
        assert!(body["dataset_id"].as_str().is_some());

        let _ = shutdown_tx.send(());
    }

    #[tokio::test]
    async fn test_timeline_endpoint_returns_segments_and_summary() {
        let (addr, shutdown_tx) = start(TWO_PEOPLE_CSV).await;

        let client = reqwest::Client::new();
        let body: serde_json::Value = client
            .get(format!("http://{}/api/timeline/1-alice", addr))
            .send()
            .await
            .expect("Failed to send request")
            .json()
            .await
            .expect("Failed to parse JSON");

        assert_eq!(body["person_id"], "1-alice");
        assert_eq!(body["window"]["start"], "2024-01-22T04:00:00");

        let segments = body["segments"].as_array().expect("segments array");
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0]["kind"], "busy");
        assert_eq!(segments[0]["label"], "Breakfast");
        assert_eq!(segments[1]["kind"], "gap");
        assert_eq!(segments[2]["label"], "Work");

        assert_eq!(body["summary"]["busy_count"], 2);
        assert_eq!(body["summary"]["gap_count"], 1);
        assert_eq!(body["summary"]["gap_minutes"], 30);

        let _ = shutdown_tx.send(());
    }

    #[tokio::test]
    async fn test_timeline_svg_is_served_as_svg() {
        let (addr, shutdown_tx) = start(TWO_PEOPLE_CSV).await;

        let client = reqwest::Client::new();
        let response = client
            .get(format!("http://{}/api/timeline/2-bob/svg", addr))
            .send()
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success());
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        assert!(content_type.starts_with("image/svg+xml"));

        let body = response.text().await.expect("Failed to read body");
        assert!(body.starts_with("<svg"));
        assert!(body.contains(">Run</text>"));

        let _ = shutdown_tx.send(());
    }

    #[tokio::test]
    async fn test_unknown_person_returns_404() {
        let (addr, shutdown_tx) = start(TWO_PEOPLE_CSV).await;

        let client = reqwest::Client::new();
        let response = client
            .get(format!("http://{}/api/timeline/nobody", addr))
            .send()
            .await
            .expect("Failed to send request");

        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);

        let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
        assert_eq!(body["code"], "UNKNOWN_PERSON");

        let _ = shutdown_tx.send(());
    }

    #[tokio::test]
    async fn test_overlapping_schedule_returns_422() {
        let csv = "\
person_id,startTime,endTime,activityName
p1,2024-01-22 08:00:00,2024-01-22 10:00:00,First
p1,2024-01-22 09:30:00,2024-01-22 11:00:00,Second
";
        let (addr, shutdown_tx) = start(csv).await;

        let client = reqwest::Client::new();
        let response = client
            .get(format!("http://{}/api/timeline/p1", addr))
            .send()
            .await
            .expect("Failed to send request");

        assert_eq!(response.status(), reqwest::StatusCode::UNPROCESSABLE_ENTITY);

        let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
        assert_eq!(body["code"], "INVALID_SCHEDULE");
        assert!(body["error"].as_str().unwrap_or("").contains("overlap"));

        let _ = shutdown_tx.send(());
    }

    #[tokio::test]
    async fn test_upload_swaps_dataset_and_bad_upload_keeps_it() {
        let (addr, shutdown_tx) = start(TWO_PEOPLE_CSV).await;
        let client = reqwest::Client::new();

        let old_id: String = client
            .get(format!("http://{}/api/people", addr))
            .send()
            .await
            .expect("Failed to send request")
            .json::<serde_json::Value>()
            .await
            .expect("Failed to parse JSON")["dataset_id"]
            .as_str()
            .expect("dataset id")
            .to_string();

        // Replace the dataset
        let replacement = "\
person_id,startTime,endTime,activityName
carol,2024-02-01 10:00:00,2024-02-01 11:00:00,Yoga
";
        let response = client
            .post(format!("http://{}/api/upload", addr))
            .header("Content-Type", "text/csv")
            .body(replacement)
            .send()
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success());
        let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
        assert_eq!(body["person_count"], 1);
        assert_eq!(body["record_count"], 1);
        assert_ne!(body["dataset_id"].as_str().expect("dataset id"), old_id);

        // A malformed upload is rejected and the replacement stays current
        let response = client
            .post(format!("http://{}/api/upload", addr))
            .header("Content-Type", "text/csv")
            .body("startTime,endTime\noops,rows\n")
            .send()
            .await
            .expect("Failed to send request");

        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
        assert_eq!(body["code"], "INVALID_CSV");

        let people: serde_json::Value = client
            .get(format!("http://{}/api/people", addr))
            .send()
            .await
            .expect("Failed to send request")
            .json()
            .await
            .expect("Failed to parse JSON");
        assert_eq!(people["people"][0], "carol");

        let _ = shutdown_tx.send(());
    }

    #[tokio::test]
    async fn test_index_serves_the_viewer_page() {
        let (addr, shutdown_tx) = start(TWO_PEOPLE_CSV).await;

        let client = reqwest::Client::new();
        let response = client
            .get(format!("http://{}/", addr))
            .send()
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success());
        let body = response.text().await.expect("Failed to read body");
        assert!(body.contains("<select id=\"person-select\""));
        assert!(body.contains("1-alice"));
        assert!(body.contains("2-bob"));

        let _ = shutdown_tx.send(());
    }

    #[tokio::test]
    async fn test_cors_headers() {
        let (addr, shutdown_tx) = start(TWO_PEOPLE_CSV).await;

        // Send OPTIONS request to check CORS
        let client = reqwest::Client::new();
        let response = client
            .request(
                reqwest::Method::OPTIONS,
                format!("http://{}/api/upload", addr),
            )
            .header("Origin", "http://localhost")
            .header("Access-Control-Request-Method", "POST")
            .send()
            .await
            .expect("Failed to send request");

        // CORS preflight should succeed
        assert!(
            response.status().is_success() || response.status() == reqwest::StatusCode::NO_CONTENT,
            "CORS preflight failed: {}",
            response.status()
        );

        let _ = shutdown_tx.send(());
    }
}
