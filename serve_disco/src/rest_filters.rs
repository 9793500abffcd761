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

use crate::history::HistoryEntry;
use crate::{ErrorResponse, SharedState};
use disco::{validate, AnalysisRequest};
use log::{debug, info, warn};
use std::convert::Infallible;
use warp::http::StatusCode;
use warp::Filter;

/// Every route, with rejections turned into JSON [`ErrorResponse`]s.
pub fn rest_filters(
    state: SharedState,
) -> impl Filter<Extract = impl warp::Reply, Error = Infallible> + Clone {
    analysis(state.clone())
        .or(history_list(state.clone()))
        .or(history_clear(state))
        .recover(handlers::rejection)
}

/// POST /analyze with JSON body
pub fn analysis(
    state: SharedState,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::path!("analyze")
        .and(warp::post())
        .and(json_body())
        .and(with_state(state))
        .and_then(handlers::analyze)
}

/// GET /history
pub fn history_list(
    state: SharedState,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::path!("history")
        .and(warp::get())
        .and(with_state(state))
        .and_then(handlers::list_history)
}

/// DELETE /history
pub fn history_clear(
    state: SharedState,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::path!("history")
        .and(warp::delete())
        .and(with_state(state))
        .and_then(handlers::clear_history)
}

fn with_state(
    state: SharedState,
) -> impl Filter<Extract = (SharedState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

fn json_body() -> impl Filter<Extract = (AnalysisRequest,), Error = warp::Rejection> + Clone {
    // Form input is a handful of short strings.
    warp::body::content_length_limit(1024 * 16).and(warp::body::json())
}

mod handlers {
    use super::*;

    fn error_reply(
        error: String,
        kind: &str,
        status: StatusCode,
    ) -> warp::reply::WithStatus<warp::reply::Json> {
        let body = ErrorResponse {
            error,
            kind: kind.to_string(),
        };
        warp::reply::with_status(warp::reply::json(&body), status)
    }

    pub async fn analyze(
        request: AnalysisRequest,
        state: SharedState,
    ) -> Result<impl warp::Reply, Infallible> {
        match validate(&state.config, &request) {
            Ok(input) => {
                let result = disco::analyze(&input);
                debug!(
                    "Answered {:?} request with {} joint outcomes",
                    result.mode,
                    result.tables.sorted_sum.len()
                );
                let reply = warp::reply::json(&result);
                state
                    .history
                    .lock()
                    .await
                    .push(HistoryEntry { request, result });
                Ok(warp::reply::with_status(reply, StatusCode::OK))
            }
            Err(e) => {
                warn!("Rejected request: {}", e);
                Ok(error_reply(
                    e.to_string(),
                    e.kind(),
                    StatusCode::UNPROCESSABLE_ENTITY,
                ))
            }
        }
    }

    pub async fn list_history(state: SharedState) -> Result<impl warp::Reply, Infallible> {
        let entries = state.history.lock().await.to_vec();
        Ok(warp::reply::json(&entries))
    }

    pub async fn clear_history(state: SharedState) -> Result<impl warp::Reply, Infallible> {
        state.history.lock().await.clear();
        info!("History cleared");
        Ok(StatusCode::NO_CONTENT)
    }

    pub async fn rejection(err: warp::Rejection) -> Result<impl warp::Reply, Infallible> {
        if err.is_not_found() {
            return Ok(error_reply(
                "no such route".to_string(),
                "not_found",
                StatusCode::NOT_FOUND,
            ));
        }
        if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
            return Ok(error_reply(
                e.to_string(),
                "malformed_body",
                StatusCode::BAD_REQUEST,
            ));
        }
        if err.find::<warp::reject::PayloadTooLarge>().is_some() {
            return Ok(error_reply(
                "request body is too large".to_string(),
                "payload_too_large",
                StatusCode::PAYLOAD_TOO_LARGE,
            ));
        }
        if err.find::<warp::reject::MethodNotAllowed>().is_some() {
            return Ok(error_reply(
                "method not allowed".to_string(),
                "method_not_allowed",
                StatusCode::METHOD_NOT_ALLOWED,
            ));
        }
        warn!("Unhandled rejection: {:?}", err);
        Ok(error_reply(
            format!("{:?}", err),
            "internal",
            StatusCode::INTERNAL_SERVER_ERROR,
        ))
    }
}
