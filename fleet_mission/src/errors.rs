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
use fleet_common::BoundingBox;

pub type Result<T> = std::result::Result<T,FleetMissionError>;

#[derive(Error,Debug)]
pub enum FleetMissionError {
    #[error("malformed mission for vehicle {vehicle}: {reason}")]
    MalformedMission { vehicle: String, reason: String },

    #[error("invalid waypoint at index {index} for vehicle {vehicle}")]
    InvalidWaypoint { vehicle: String, index: usize },

    #[error("base station coordinate entry cancelled")]
    ReferenceCaptureAborted,

    #[error("base station coordinates ({latitude},{longitude}) outside of {bounds:?}")]
    ReferenceOutOfBounds { latitude: f64, longitude: f64, bounds: BoundingBox },

    #[error("missing mission file for vehicle {0}")]
    MissingMissionFile(u32),

    #[error("invalid vehicle range {first} through {last}")]
    InvalidVehicleRange { first: u32, last: u32 },

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("JSON error {0}")]
    JsonError( #[from] serde_json::Error),

    #[error("bus error {0}")]
    BusError( #[from] fleet_bus::errors::FleetBusError),

    #[error("config error {0}")]
    ConfigError( #[from] fleet_common::errors::FleetCommonError),
}

pub fn malformed (vehicle: &str, reason: impl ToString)->FleetMissionError {
    FleetMissionError::MalformedMission { vehicle: vehicle.to_string(), reason: reason.to_string() }
}
