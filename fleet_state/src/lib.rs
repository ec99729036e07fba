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

//! per-vehicle state of the fleet, aggregated from inbound status, telemetry and log messages

use std::collections::BTreeMap;
use serde::{Serialize,Deserialize};
use tokio::sync::watch;
use tracing::{debug,info,warn};
use fleet_common::collections::Snapshot;
use fleet_bus::{BusClient, Subscription, topics::FleetTopics};

pub mod errors;
use errors::Result;

pub mod msg;
pub use msg::{FleetMsg, Telemetry, Numeric, OnboardTimestamp};

pub mod vehicle;
pub use vehicle::{VehicleState, Connectivity};

pub mod present;

#[derive(Deserialize,Serialize,Debug,Clone)]
#[serde(default)]
pub struct FleetStateConfig {
    pub max_status_messages: usize,  // per vehicle
}

impl Default for FleetStateConfig {
    fn default()->Self {
        FleetStateConfig { max_status_messages: 100 }
    }
}

/// the outcome of a successfully applied message
#[derive(Debug,Clone,PartialEq)]
pub enum Applied {
    Vehicle(String),
    Ignored,
}

#[derive(Debug,Clone,Copy,Default,PartialEq)]
pub struct AggregatorStats {
    pub applied: u64,
    pub dropped: u64,  // unparsable payloads
    pub ignored: u64,  // unknown topics
}

/// the authoritative per-vehicle state map
#[derive(Debug)]
pub struct FleetStateAggregator {
    config: FleetStateConfig,
    vehicles: BTreeMap<String,VehicleState>,
    stats: AggregatorStats,
}

impl FleetStateAggregator {
    pub fn new (config: FleetStateConfig)->Self {
        FleetStateAggregator { config, vehicles: BTreeMap::new(), stats: AggregatorStats::default() }
    }

    pub fn vehicles (&self)->&BTreeMap<String,VehicleState> { &self.vehicles }
    pub fn vehicle (&self, id: &str)->Option<&VehicleState> { self.vehicles.get( id) }
    pub fn len (&self)->usize { self.vehicles.len() }
    pub fn is_empty (&self)->bool { self.vehicles.is_empty() }
    pub fn stats (&self)->AggregatorStats { self.stats }

    /// decode and apply one inbound message. Unparsable payloads are counted and returned as error, they do
    /// not change any state. Unknown topics are ignored
    pub fn apply (&mut self, topic: &str, payload: &str)->Result<Applied> {
        match FleetMsg::parse( topic, payload) {
            Ok(msg) => Ok( self.apply_msg( msg)),
            Err(e) => {
                self.stats.dropped += 1;
                Err(e)
            }
        }
    }

    pub fn apply_msg (&mut self, msg: FleetMsg)->Applied {
        let id = match msg {
            FleetMsg::Status{ vehicle_id, status } => {
                self.vehicle_mut( &vehicle_id).update_status( status);
                vehicle_id
            }
            FleetMsg::Telemetry{ vehicle_id, telemetry } => {
                self.vehicle_mut( &vehicle_id).update_telemetry( telemetry);
                vehicle_id
            }
            FleetMsg::Log{ vehicle_id, message } => {
                self.vehicle_mut( &vehicle_id).push_status_message( message);
                vehicle_id
            }
            FleetMsg::Unknown{ topic } => {
                debug!("ignoring message on unknown topic {}", topic);
                self.stats.ignored += 1;
                return Applied::Ignored
            }
        };

        self.stats.applied += 1;
        Applied::Vehicle(id)
    }

    // vehicle states are created on demand
    fn vehicle_mut (&mut self, id: &str)->&mut VehicleState {
        let max_status_messages = self.config.max_status_messages;
        self.vehicles.entry( id.to_string()).or_insert_with( || {
            info!("new vehicle {}", id);
            VehicleState::new( id, max_status_messages)
        })
    }

    /// apply, logging instead of returning errors
    pub fn handle (&mut self, topic: &str, payload: &str)->Option<String> {
        match self.apply( topic, payload) {
            Ok(Applied::Vehicle(id)) => Some(id),
            Ok(Applied::Ignored) => None,
            Err(e) => {
                warn!("dropped message: {}", e);
                None
            }
        }
    }

    /// cloned vehicle states in id order
    pub fn snapshot (&self)->Vec<VehicleState> {
        self.vehicles.snapshot().into_iter().map( |(_,v)| v).collect()
    }

    /// process messages until the bus closes, publishing a new snapshot after each applied update.
    /// Returns the aggregator so that callers can inspect the final state
    pub async fn run (mut self, mut sub: Subscription, tx: watch::Sender<Vec<VehicleState>>)->Self {
        while let Some(msg) = sub.recv().await {
            if self.handle( &msg.topic, &msg.payload).is_some() {
                tx.send_replace( self.snapshot());
            }
        }
        info!("fleet state aggregator terminated: {:?}", self.stats);
        self
    }
}

/// one subscription for all inbound vehicle topics
pub async fn subscribe_vehicle_topics (bus: &dyn BusClient, topics: &FleetTopics)->fleet_bus::errors::Result<Subscription> {
    bus.subscribe_any( &[ topics.status_pattern(), topics.telemetry_pattern(), topics.status_messages_pattern() ]).await
}
