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

pub type Result<T> = std::result::Result<T,FleetGcsError>;

#[derive(Error,Debug)]
pub enum FleetGcsError {
    #[error("bus error {0}")]
    BusError( #[from] fleet_bus::errors::FleetBusError),

    #[error("relay error {0}")]
    RtcmError( #[from] fleet_rtcm::errors::FleetRtcmError),

    #[error("{0}")]
    MissionError( #[from] fleet_mission::errors::FleetMissionError),

    #[error("fleet state error {0}")]
    StateError( #[from] fleet_state::errors::FleetStateError),

    #[error("config error {0}")]
    ConfigError( #[from] fleet_common::errors::FleetCommonError),

    #[error("task failed {0}")]
    JoinError( #[from] tokio::task::JoinError),

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),
}
