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

//! paced multi-vehicle mission upload

use std::{fmt, sync::Arc};
use tokio::time::sleep;
use tracing::{info,warn,error};
use fleet_bus::{BusClient, publish_json, topics::FleetTopics};
use crate::{
    MissionConfig, chunks::{MissionChunk, encode}, prepare::{prepare, prepare_light_sequence},
    reference::{ReferenceProvider, capture_reference}, source::MissionSource, errors::Result
};

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum UploadMode {
    /// converted waypoints plus auxiliary data, requires a base station reference
    Full,
    /// only the light sequence of each mission
    LightSequenceOnly,
}

#[derive(Debug,Clone,PartialEq)]
pub struct VehicleUpload {
    pub vehicle_id: u32,
    pub chunks: usize,
    pub total_size: usize,
}

#[derive(Debug,Clone,PartialEq)]
pub struct UploadReport {
    pub first: u32,
    pub last: u32,
    pub mode: UploadMode,
    pub vehicles: Vec<VehicleUpload>,
}

impl fmt::Display for UploadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "Mission upload complete for vehicles {} through {}", self.first, self.last)
    }
}

/// the terminal status line of an upload operation
pub fn upload_status (res: &Result<UploadReport>)->String {
    match res {
        Ok(report) => report.to_string(),
        Err(e) => format!("Error: {}", e)
    }
}

/// sends missions for a contiguous range of vehicle ids, one vehicle after the other.
/// Any error aborts the whole operation. Vehicles that were already sent are not rolled back
pub struct MissionUploader {
    config: Arc<MissionConfig>,
    topics: FleetTopics,
    bus: Arc<dyn BusClient>,
}

impl MissionUploader {
    pub fn new (config: MissionConfig, topics: FleetTopics, bus: Arc<dyn BusClient>)->Self {
        MissionUploader{ config: Arc::new(config), topics, bus }
    }

    pub fn config (&self)->&MissionConfig { &self.config }

    pub async fn upload (&self, source: &dyn MissionSource, reference: &mut dyn ReferenceProvider,
                         first: u32, last: u32, mode: UploadMode)->Result<UploadReport>
    {
        // no network activity before we know we have everything
        source.check_range( first, last).await?;

        let reference = match mode {
            UploadMode::Full => Some( capture_reference( reference, &self.config.reference_bounds).await?),
            UploadMode::LightSequenceOnly => None
        };

        let mut vehicles = Vec::with_capacity( (last - first) as usize + 1);
        for vehicle_id in first..=last {
            let id = vehicle_id.to_string();
            let raw = source.read_mission( vehicle_id).await?;

            let payload = match &reference {
                Some(reference) => prepare( &raw, &id, reference)?,
                None => prepare_light_sequence( &raw, &id)?
            };
            let document = payload.to_document()?;

            let mut chunks = encode( &document, self.config.chunk_size);
            if mode == UploadMode::LightSequenceOnly {
                for c in &mut chunks { c.light_sequence_only = true }
            }
            info!("splitting mission for vehicle {} into {} chunks", vehicle_id, chunks.len());

            self.send_chunks( &id, &chunks).await?;
            vehicles.push( VehicleUpload{ vehicle_id, chunks: chunks.len(), total_size: document.len() });

            sleep( self.config.vehicle_delay).await;
        }

        let report = UploadReport{ first, last, mode, vehicles };
        info!("{}", report);
        Ok(report)
    }

    /// send chunks in index order, pausing after each one
    pub async fn send_chunks (&self, vehicle_id: &str, chunks: &[MissionChunk])->Result<()> {
        let topic = self.topics.mission( vehicle_id);

        for c in chunks {
            info!("uploading chunk {}/{} to {}", c.chunk + 1, c.total_chunks, topic);
            publish_json( self.bus.as_ref(), &topic, c).await?;
            sleep( self.config.chunk_delay).await;
        }
        Ok(())
    }
}
