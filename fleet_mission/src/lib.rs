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
#![allow(unused)]

//! mission preparation and upload.
//!
//! A mission upload reads one mission document per vehicle, converts its local waypoints into
//! geographic coordinates relative to a base station reference and sends the result to each vehicle as a
//! sequence of size bounded chunks. Vehicles are processed strictly one after the other with fixed
//! delays, there is no acknowledgment from the receiving side.

use std::{path::PathBuf, time::Duration};
use serde::{Serialize,Deserialize};
use fleet_common::{BoundingBox, datetime::{self, deserialize_duration, serialize_duration}};

pub mod errors;
pub mod chunks;
pub mod prepare;
pub mod reference;
pub mod source;
pub mod upload;

pub use chunks::{MissionChunk, encode, CHUNK_SIZE};
pub use prepare::{prepare, prepare_light_sequence, MissionPayload, GeoWaypoint};
pub use reference::{BaseStationReference, ReferenceProvider, FixedReference, PromptReference, capture_reference};
pub use source::{MissionSource, DirMissionSource, MemMissionSource};
pub use upload::{MissionUploader, UploadMode, UploadReport, VehicleUpload, upload_status};

#[derive(Deserialize,Serialize,Debug,Clone)]
#[serde(default)]
pub struct MissionConfig {
    pub chunk_size: usize,  // max chars of mission document per chunk

    #[serde(deserialize_with="deserialize_duration", serialize_with="serialize_duration")]
    pub chunk_delay: Duration,  // pause after each chunk

    #[serde(deserialize_with="deserialize_duration", serialize_with="serialize_duration")]
    pub vehicle_delay: Duration,  // pause after the last chunk of each vehicle

    pub reference_bounds: BoundingBox,  // where we accept base station coordinates
    pub mission_dir: PathBuf,  // default location of `<vehicle-id>.json` mission files
}

impl Default for MissionConfig {
    fn default()->Self {
        MissionConfig {
            chunk_size: CHUNK_SIZE,
            chunk_delay: datetime::millis(200),
            vehicle_delay: datetime::millis(1000),
            reference_bounds: BoundingBox::world(),
            mission_dir: PathBuf::from("missions"),
        }
    }
}
