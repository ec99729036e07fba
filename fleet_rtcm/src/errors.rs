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

use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T,FleetRtcmError>;

#[derive(Error,Debug)]
pub enum FleetRtcmError {
    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("serial port error {0}")]
    SerialError( #[from] tokio_serial::Error),

    #[error("bus error {0}")]
    BusError( #[from] fleet_bus::errors::FleetBusError),

    #[error("config error {0}")]
    ConfigError( #[from] fleet_common::errors::FleetCommonError),

    #[error("serial port not found {0}")]
    PortNotFound(String),

    /// not fatal - the parser waits for the remaining bytes of a frame that might never come
    #[error("framing stalled for {stalled:?} with {buffered} of {expected:?} frame bytes")]
    FramingStall { buffered: usize, expected: Option<usize>, stalled: Duration },
}
