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

use std::{collections::VecDeque, fmt};
use chrono::{DateTime, Utc};
use serde::Serialize;
use fleet_common::{collections::RingDeque, datetime};
use crate::{msg::{Telemetry, MISSION_UPLOADED, CONNECTED}, present};

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize)]
pub enum Connectivity {
    Unknown,
    Connected,
    Disconnected,
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Connectivity::Unknown => "unknown",
            Connectivity::Connected => "connected",
            Connectivity::Disconnected => "disconnected",
        };
        write!( f, "{}", s)
    }
}

/// what we know about one vehicle. Vehicle states are created on the first message for their id and
/// are only modified by the aggregator
#[derive(Debug,Clone,Serialize)]
pub struct VehicleState {
    id: String,
    connectivity: Connectivity,
    status: Option<String>,  // last reported status text
    last_telemetry: Option<Telemetry>,
    status_messages: VecDeque<String>,  // newest first
    max_status_messages: usize,
    mission_upload_acknowledged: bool,
    last_update: Option<DateTime<Utc>>,
}

impl VehicleState {
    pub fn new (id: impl ToString, max_status_messages: usize)->Self {
        VehicleState {
            id: id.to_string(),
            connectivity: Connectivity::Unknown,
            status: None,
            last_telemetry: None,
            status_messages: VecDeque::with_capacity( max_status_messages),
            max_status_messages,
            mission_upload_acknowledged: false,
            last_update: None,
        }
    }

    pub fn id (&self)->&str { self.id.as_str() }
    pub fn connectivity (&self)->Connectivity { self.connectivity }
    pub fn status (&self)->Option<&str> { self.status.as_deref() }
    pub fn last_telemetry (&self)->Option<&Telemetry> { self.last_telemetry.as_ref() }
    pub fn status_messages (&self)->&VecDeque<String> { &self.status_messages }
    pub fn mission_upload_acknowledged (&self)->bool { self.mission_upload_acknowledged }
    pub fn last_update (&self)->Option<DateTime<Utc>> { self.last_update }

    pub(crate) fn update_status (&mut self, status: Option<String>) {
        self.connectivity = if status.as_deref() == Some(CONNECTED) { Connectivity::Connected } else { Connectivity::Disconnected };
        if status.as_deref() == Some(MISSION_UPLOADED) {
            self.mission_upload_acknowledged = true; // never reset
        }
        self.status = status;
        self.touch();
    }

    pub(crate) fn update_telemetry (&mut self, telemetry: Telemetry) {
        self.connectivity = Connectivity::Connected;
        self.last_telemetry = Some(telemetry);
        self.touch();
    }

    pub(crate) fn push_status_message (&mut self, msg: String) {
        self.status_messages.push_front_to_ringbuffer( msg, self.max_status_messages);
        self.touch();
    }

    fn touch (&mut self) {
        self.last_update = Some( datetime::utc_now());
    }
}

impl fmt::Display for VehicleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "{}", present::vehicle_card( self))
    }
}
