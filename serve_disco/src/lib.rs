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

//! # Serve Disco
//! A small HTTP front end for [`disco`]. Post a JSON [`disco::AnalysisRequest`] to `/analyze`
//! and get the [`disco::AnalysisResult`] back as JSON. The last few answers are kept in memory
//! and served from `/history`.
//!
//! | route            | answer |
//! |------------------|--------|
//! | `POST /analyze`  | `200` with the result, `422` with an [`ErrorResponse`] when validation fails |
//! | `GET /history`   | the most recent [`HistoryEntry`]s, newest first |
//! | `DELETE /history`| empties the history, `204` |

pub mod config;
pub mod history;
pub mod rest_filters;

pub use config::ServerConfig;
pub use history::{History, HistoryEntry};
pub use rest_filters::rest_filters;

use disco::DiscoConfig;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Body of every error answer.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ErrorResponse {
    /// Human readable message
    pub error: String,
    /// Machine readable kind, `length_mismatch`, `malformed_body` and so on.
    pub kind: String,
}

/// What the request handlers share.
#[derive(Debug)]
pub struct ServerState {
    pub config: DiscoConfig,
    pub history: Mutex<History>,
}

/// Handle to the state passed into each filter.
pub type SharedState = Arc<ServerState>;

impl ServerState {
    pub fn new(config: &ServerConfig) -> ServerState {
        ServerState {
            config: config.disco,
            history: Mutex::new(History::new(config.history_capacity)),
        }
    }

    pub fn shared(config: &ServerConfig) -> SharedState {
        Arc::new(ServerState::new(config))
    }
}
