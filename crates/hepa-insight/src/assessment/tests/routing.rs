use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn cholestasis_form() -> Value {
    serde_json::to_value(submission(&cholestasis_panel())).expect("form serializes")
}

#[tokio::test]
async fn assess_endpoint_returns_view() {
    let app = router_with(Arc::new(StaticModel::returning(verdict(true, 100.0))));

    let response = app
        .oneshot(post_json("/api/v1/assessments", cholestasis_form()))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["status"], json!("High risk — aligned"));
    assert_eq!(body["show_condition"], json!(true));
    assert_eq!(body["ml_result"], json!("Liver Disease Detected"));
    assert_eq!(body["fused_score"], json!(92.0));
    assert_eq!(body["lab_confidence"], json!("High"));
    assert_eq!(
        body["condition"]["display_name"],
        json!("Cholestasis / Bile Obstruction Pattern")
    );
    assert_eq!(body["scores"].as_array().map(Vec::len), Some(6));
}

#[tokio::test]
async fn assess_endpoint_rejects_invalid_input() {
    let app = router_with(Arc::new(StaticModel::returning(verdict(true, 100.0))));
    let mut form = cholestasis_form();
    form["Albumin"] = json!("");

    let response = app
        .oneshot(post_json("/api/v1/assessments", form))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], json!("Please fill in all fields"));
}

#[tokio::test]
async fn assess_endpoint_maps_model_failure_to_bad_gateway() {
    let app = router_with(Arc::new(FailingModel));

    let response = app
        .oneshot(post_json("/api/v1/assessments", cholestasis_form()))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .is_some_and(|message| message.contains("503")));
}

#[tokio::test]
async fn evaluate_endpoint_withholds_condition_when_model_sees_no_disease() {
    let model = Arc::new(StaticModel::default());
    let app = router_with(model.clone());
    let request = json!({
        "observation": serde_json::to_value(submission(&nafld_panel())).expect("form"),
        "prediction": { "result": "No Liver Disease", "probability": 80.0 }
    });

    let response = app
        .oneshot(post_json("/api/v1/assessments/evaluate", request))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(
        body["status"],
        json!("Mixed pattern — needs clinical evaluation")
    );
    assert_eq!(body["show_condition"], json!(false));
    assert!(body.get("condition").is_none());
    assert!(body.get("fused_score").is_none());
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn evaluate_endpoint_rejects_unknown_prediction_result() {
    let app = router_with(Arc::new(StaticModel::default()));
    let request = json!({
        "observation": cholestasis_form(),
        "prediction": { "result": "Maybe", "probability": 80.0 }
    });

    let response = app
        .oneshot(post_json("/api/v1/assessments/evaluate", request))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn conditions_endpoint_lists_catalog() {
    let app = router_with(Arc::new(StaticModel::default()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/conditions")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let entries = body.as_array().expect("array");
    assert_eq!(entries.len(), 6);
    assert_eq!(entries[0]["key"], json!("acuteViral"));
    assert_eq!(entries[5]["key"], json!("normal"));
}
