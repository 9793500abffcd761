/*
* Licensed to Elasticsearch B.V. under one or more contributor
* license agreements. See the NOTICE file distributed with
* this work for additional information regarding copyright
* ownership. Elasticsearch B.V. licenses this file to you under
* the Apache License, Version 2.0 (the "License"); you may
* not use this file except in compliance with the License.
* You may obtain a copy of the License at
*
*  http://www.apache.org/licenses/LICENSE-2.0
*
* Unless required by applicable law or agreed to in writing,
* software distributed under the License is distributed on an
* "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
* KIND, either express or implied.  See the License for the
* specific language governing permissions and limitations
* under the License.
*/

use serde_json::{json, Value};
use serve_disco::{rest_filters, ErrorResponse, ServerConfig, ServerState};
use warp::http::StatusCode;

fn plain_body(x: &str) -> Value {
    json!({
        "size_x": 3,
        "size_y": 2,
        "x": x,
        "y": "10 20",
        "px": "0.2 0.5 0.3",
        "py": "0.4 0.6"
    })
}

#[tokio::test]
async fn analyze_plain() {
    let api = rest_filters(ServerState::shared(&ServerConfig::default()));
    let resp = warp::test::request()
        .method("POST")
        .path("/analyze")
        .json(&plain_body("1 2 3"))
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = serde_json::from_slice(resp.body()).unwrap();
    assert_eq!(body["sums"]["cells"][0], json!([11.0, 21.0]));
    assert_eq!(body["joint_probabilities"]["columns"], 2);
    assert_eq!(body["sorted_difference"].as_array().unwrap().len(), 6);
    assert_eq!(body["stats_x"]["sigma"], 0.7);
}

#[tokio::test]
async fn analyze_power_rejects_out_of_range_exponent() {
    let api = rest_filters(ServerState::shared(&ServerConfig::default()));
    let mut body = plain_body("1 2 3");
    body["mode"] = json!({"type": "power", "exponent": 7});
    let resp = warp::test::request()
        .method("POST")
        .path("/analyze")
        .json(&body)
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = serde_json::from_slice(resp.body()).unwrap();
    assert_eq!(error.kind, "invalid_exponent");
}

#[tokio::test]
async fn analyze_rejects_overflowing_constant() {
    let api = rest_filters(ServerState::shared(&ServerConfig::default()));
    let mut body = plain_body("1e10 1 2");
    body["mode"] = json!({"type": "scaled", "cx": 1e300, "cy": 1});
    let resp = warp::test::request()
        .method("POST")
        .path("/analyze")
        .json(&body)
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = serde_json::from_slice(resp.body()).unwrap();
    assert_eq!(error.kind, "invalid_constant");
}

#[tokio::test]
async fn analyze_reports_length_mismatch() {
    let api = rest_filters(ServerState::shared(&ServerConfig::default()));
    let resp = warp::test::request()
        .method("POST")
        .path("/analyze")
        .json(&plain_body("1 2"))
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = serde_json::from_slice(resp.body()).unwrap();
    assert_eq!(error.kind, "length_mismatch");
    assert_eq!(error.error, "X has 2 elements but 3 were expected");
}

#[tokio::test]
async fn malformed_body() {
    let api = rest_filters(ServerState::shared(&ServerConfig::default()));
    let resp = warp::test::request()
        .method("POST")
        .path("/analyze")
        .header("content-type", "application/json")
        .body("{\"x\": 1")
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = serde_json::from_slice(resp.body()).unwrap();
    assert_eq!(error.kind, "malformed_body");
}

#[tokio::test]
async fn unknown_route() {
    let api = rest_filters(ServerState::shared(&ServerConfig::default()));
    let resp = warp::test::request().path("/nowhere").reply(&api).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn history_is_bounded_and_clearable() {
    let api = rest_filters(ServerState::shared(&ServerConfig::default()));
    for x in ["1 2 3", "2 3 4", "3 4 5", "4 5 6"].iter() {
        let resp = warp::test::request()
            .method("POST")
            .path("/analyze")
            .json(&plain_body(x))
            .reply(&api)
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
    // Rejected requests are not recorded.
    warp::test::request()
        .method("POST")
        .path("/analyze")
        .json(&plain_body("1"))
        .reply(&api)
        .await;

    let resp = warp::test::request().path("/history").reply(&api).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let entries: Value = serde_json::from_slice(resp.body()).unwrap();
    let xs: Vec<&str> = entries
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["request"]["x"].as_str().unwrap())
        .collect();
    assert_eq!(xs, vec!["4 5 6", "3 4 5", "2 3 4"]);

    let resp = warp::test::request()
        .method("DELETE")
        .path("/history")
        .reply(&api)
        .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let resp = warp::test::request().path("/history").reply(&api).await;
    assert_eq!(resp.body().as_ref(), b"[]");
}
