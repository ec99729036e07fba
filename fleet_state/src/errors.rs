/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use thiserror::Error;

pub type Result<T> = std::result::Result<T,FleetStateError>;

#[derive(Error,Debug)]
pub enum FleetStateError {
    /// the message is dropped, vehicle state stays unchanged
    #[error("unparsable payload on {topic}: {reason}")]
    PayloadParse { topic: String, reason: String },

    #[error("bus error {0}")]
    BusError( #[from] fleet_bus::errors::FleetBusError),

    #[error("config error {0}")]
    ConfigError( #[from] fleet_common::errors::FleetCommonError),

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),
}

pub fn payload_parse (topic: &str, reason: impl ToString)->FleetStateError {
    FleetStateError::PayloadParse { topic: topic.to_string(), reason: reason.to_string() }
}
