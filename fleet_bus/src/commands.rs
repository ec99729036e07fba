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

//! fleet command payloads. Fleet wide commands go to `root/command`, single vehicle variants to `root/{id}/command`

use std::sync::Arc;
use serde::{Serialize,Deserialize};
use chrono::NaiveTime;
use tracing::info;
use fleet_common::datetime::{self, epoch_micros};
use crate::{BusClient, publish_json, topics::FleetTopics, errors::{FleetBusError,Result}};

pub const LAND_MODE: &'static str = "land";

#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
#[serde(tag="command", rename_all="snake_case")]
pub enum FleetCommand {
    Arm,
    Takeoff { altitude: f64 },
    ChangeMode { mode: String },
    StartMission {
        #[serde(rename="takeoffAltitude")] takeoff_altitude: f64,
        #[serde(rename="startTimeSeconds")] start_time_seconds: u32
    },
    CancelMission,
    /// onboard clock sync. Micros since epoch are sent as string since JSON consumers might not have 64bit ints
    TimeSync { timestamp: String },
}

impl FleetCommand {
    pub fn land ()->Self {
        FleetCommand::ChangeMode{ mode: LAND_MODE.to_string() }
    }

    pub fn change_mode (mode: impl ToString)->Self {
        FleetCommand::ChangeMode{ mode: mode.to_string() }
    }

    pub fn time_sync_at (epoch_micros: i64)->Self {
        FleetCommand::TimeSync{ timestamp: epoch_micros.to_string() }
    }

    pub fn time_sync_now ()->Self {
        FleetCommand::time_sync_at( epoch_micros())
    }

    /// start the mission at a local wall clock time (today), which is sent as seconds since UTC midnight
    pub fn start_mission_at (takeoff_altitude: f64, local_start: NaiveTime)->Result<Self> {
        let start_time_seconds = datetime::utc_secs_since_midnight( local_start)
            .ok_or_else( || FleetBusError::InvalidCommand( format!("start time {local_start} does not exist in local timezone")))?;
        Ok( FleetCommand::StartMission{ takeoff_altitude, start_time_seconds } )
    }

    /// parse a `HH:MM[:SS]` local start time
    pub fn start_mission_at_str (takeoff_altitude: f64, local_start: &str)->Result<Self> {
        let t = datetime::parse_local_time( local_start)
            .ok_or_else( || FleetBusError::InvalidCommand( format!("invalid start time {local_start}")))?;
        FleetCommand::start_mission_at( takeoff_altitude, t)
    }

    pub fn name (&self)->&'static str {
        match self {
            FleetCommand::Arm => "arm",
            FleetCommand::Takeoff{..} => "takeoff",
            FleetCommand::ChangeMode{..} => "change_mode",
            FleetCommand::StartMission{..} => "start_mission",
            FleetCommand::CancelMission => "cancel_mission",
            FleetCommand::TimeSync{..} => "time_sync",
        }
    }
}

/// send commands to the whole fleet or to single vehicles
pub struct CommandPublisher {
    topics: FleetTopics,
    bus: Arc<dyn BusClient>,
}

impl CommandPublisher {
    pub fn new (topics: FleetTopics, bus: Arc<dyn BusClient>)->Self {
        CommandPublisher{ topics, bus }
    }

    pub async fn send (&self, cmd: &FleetCommand)->Result<()> {
        let topic = self.topics.command();
        info!("sending {} to {}", cmd.name(), topic);
        publish_json( self.bus.as_ref(), &topic, cmd).await
    }

    pub async fn send_to (&self, vehicle_id: &str, cmd: &FleetCommand)->Result<()> {
        let topic = self.topics.vehicle_command( vehicle_id);
        info!("sending {} to {}", cmd.name(), topic);
        publish_json( self.bus.as_ref(), &topic, cmd).await
    }

    /// forced landing of a single vehicle
    pub async fn land_vehicle (&self, vehicle_id: &str)->Result<()> {
        self.send_to( vehicle_id, &FleetCommand::land()).await
    }
}
