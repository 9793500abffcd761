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

//! Server settings. They live in the same yaml file as the validation policy.
use disco::{DiscoConfig, DiscoError, DiscoResult};
use std::fs::read_to_string;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use yaml_rust::YamlLoader;

/// Where to listen, how much history to keep, and how strictly to validate.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    /// Number of answered requests kept for `GET /history`.
    pub history_capacity: usize,
    pub disco: DiscoConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3031,
            history_capacity: 3,
            disco: DiscoConfig::default(),
        }
    }
}

impl ServerConfig {
    /// ```yaml
    /// ---
    /// address: 127.0.0.1
    /// port: 3031
    /// history_capacity: 3
    /// probability_tolerance: 0.0001
    /// exponent_policy: range
    /// ```
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> DiscoResult<Self> {
        let config = read_to_string(&path)?;
        ServerConfig::from_yaml_str(&config)
    }

    pub fn from_yaml_str(config: &str) -> DiscoResult<Self> {
        let params_files = YamlLoader::load_from_str(config)?;
        let params = match params_files.get(0) {
            Some(params) => params,
            None => return Ok(ServerConfig::default()),
        };
        let mut server = ServerConfig {
            disco: DiscoConfig::from_yaml_doc(params)?,
            ..ServerConfig::default()
        };
        if let Some(address) = params["address"].as_str() {
            server.address = address
                .parse()
                .map_err(|e| DiscoError::config("address", format!("{}", e)))?;
        }
        if let Some(port) = params["port"].as_i64() {
            if port < 0 || port > u16::MAX as i64 {
                return Err(DiscoError::config("port", format!("{} is not a port", port)));
            }
            server.port = port as u16;
        }
        if let Some(capacity) = params["history_capacity"].as_i64() {
            if capacity < 0 {
                return Err(DiscoError::config(
                    "history_capacity",
                    format!("can not be negative, got {}", capacity),
                ));
            }
            server.history_capacity = capacity as usize;
        }
        Ok(server)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }
}
