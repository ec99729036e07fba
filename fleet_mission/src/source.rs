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

//! where mission documents come from

use std::{collections::BTreeMap, path::{Path,PathBuf}};
use async_trait::async_trait;
use tracing::debug;
use crate::errors::{FleetMissionError, Result};

/// provider of raw mission documents, keyed by numeric vehicle id
#[async_trait]
pub trait MissionSource: Send + Sync {
    /// the ids we have missions for, in ascending order
    async fn vehicle_ids (&self)->Result<Vec<u32>>;

    /// full text of the mission document for `vehicle_id`
    async fn read_mission (&self, vehicle_id: u32)->Result<String>;

    /// check that every id in `first..=last` has a mission document
    async fn check_range (&self, first: u32, last: u32)->Result<()> {
        if first > last { return Err( FleetMissionError::InvalidVehicleRange{ first, last }) }

        let ids = self.vehicle_ids().await?;
        for id in first..=last {
            if ids.binary_search( &id).is_err() { return Err( FleetMissionError::MissingMissionFile(id)) }
        }
        Ok(())
    }
}

/// a directory of `<vehicle-id>.json` files. Files whose stem is not a number are ignored
#[derive(Debug,Clone)]
pub struct DirMissionSource {
    dir: PathBuf,
}

impl DirMissionSource {
    pub fn new (dir: impl AsRef<Path>)->Self {
        DirMissionSource{ dir: dir.as_ref().to_path_buf() }
    }

    pub fn dir (&self)->&Path { self.dir.as_path() }

    async fn mission_files (&self)->Result<BTreeMap<u32,PathBuf>> {
        let mut files = BTreeMap::new();
        let mut entries = tokio::fs::read_dir( &self.dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then( |e| e.to_str()) != Some("json") { continue }

            if let Some(id) = path.file_stem().and_then( |s| s.to_str()).and_then( |s| s.parse::<u32>().ok()) {
                if entry.file_type().await?.is_file() {
                    files.insert( id, path);
                }
            } else {
                debug!("ignoring mission file {:?}", path);
            }
        }
        Ok(files)
    }
}

#[async_trait]
impl MissionSource for DirMissionSource {
    async fn vehicle_ids (&self)->Result<Vec<u32>> {
        Ok( self.mission_files().await?.into_keys().collect())
    }

    async fn read_mission (&self, vehicle_id: u32)->Result<String> {
        match self.mission_files().await?.get( &vehicle_id) {
            Some(path) => Ok( tokio::fs::read_to_string( path).await?),
            None => Err( FleetMissionError::MissingMissionFile( vehicle_id))
        }
    }
}

/// in-memory mission documents
#[derive(Debug,Clone,Default)]
pub struct MemMissionSource {
    missions: BTreeMap<u32,String>,
}

impl MemMissionSource {
    pub fn new ()->Self { MemMissionSource::default() }

    pub fn insert (&mut self, vehicle_id: u32, doc: impl ToString) {
        self.missions.insert( vehicle_id, doc.to_string());
    }

    pub fn with (mut self, vehicle_id: u32, doc: impl ToString)->Self {
        self.insert( vehicle_id, doc);
        self
    }
}

#[async_trait]
impl MissionSource for MemMissionSource {
    async fn vehicle_ids (&self)->Result<Vec<u32>> {
        Ok( self.missions.keys().copied().collect())
    }

    async fn read_mission (&self, vehicle_id: u32)->Result<String> {
        self.missions.get( &vehicle_id).cloned().ok_or( FleetMissionError::MissingMissionFile( vehicle_id))
    }
}
