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

use log::info;
use serve_disco::{rest_filters, ServerConfig, ServerState};

#[tokio::main]
pub async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    pretty_env_logger::init();
    let config = match std::env::args().nth(1) {
        Some(path) => ServerConfig::from_yaml(&path)?,
        None => ServerConfig::default(),
    };
    info!(
        "Validating with tolerance {} and exponent policy {:?}, keeping {} results",
        config.disco.probability_tolerance, config.disco.exponent_policy, config.history_capacity
    );

    let addr = config.socket_addr();
    let state = ServerState::shared(&config);
    println!("Listening on http://{}", addr);
    warp::serve(rest_filters(state)).run(addr).await;

    Ok(())
}
