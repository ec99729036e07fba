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

//! the ground control station: correction relay, fleet state, mission upload and commands over one bus.
//!
//! Everything runs on an in-process [`LocalBus`]. Inbound vehicle messages come in as `<topic> <payload>`
//! lines, everything we publish goes out in the same format, which connects the station to an external
//! broker through its command line clients.

use std::sync::{Arc, Mutex};
use serde::{Serialize,Deserialize};
use tokio::{io::{AsyncBufRead, AsyncRead, AsyncWrite}, sync::watch, task::JoinHandle};
use tracing::{info,warn};

use fleet_bus::{BusClient, BusConfig, LocalBus, Subscription, bridge, commands::CommandPublisher, topics::{FleetTopics, COMMAND, MISSION}};
use fleet_rtcm::{RtcmConfig, relay::{RtcmRelay, RelayStats}};
use fleet_mission::{MissionConfig, MissionUploader};
use fleet_state::{FleetStateAggregator, FleetStateConfig, VehicleState, subscribe_vehicle_topics};

pub mod errors;
use errors::Result;

/// all station settings, loadable from one RON file
#[derive(Deserialize,Serialize,Debug,Clone,Default)]
#[serde(default)]
pub struct GcsConfig {
    pub bus: BusConfig,
    pub rtcm: RtcmConfig,
    pub mission: MissionConfig,
    pub state: FleetStateConfig,
}

/// what a station run did
#[derive(Debug)]
pub struct StationReport {
    pub inbound: usize,   // lines fed into the bus
    pub outbound: usize,  // lines written out
    pub fleet: Vec<VehicleState>,
    pub relay: Option<Arc<RelayStats>>,
}

pub struct GroundStation {
    config: GcsConfig,
    topics: FleetTopics,
    bus: LocalBus,
    fleet_tx: Mutex<Option<watch::Sender<Vec<VehicleState>>>>,
    fleet_rx: watch::Receiver<Vec<VehicleState>>,
}

impl GroundStation {
    pub fn new (config: GcsConfig)->Self {
        let topics = FleetTopics::new( &config.bus);
        let bus = LocalBus::new( &config.bus);
        let (tx, fleet_rx) = watch::channel( Vec::new());

        GroundStation { config, topics, bus, fleet_tx: Mutex::new( Some(tx)), fleet_rx }
    }

    pub fn config (&self)->&GcsConfig { &self.config }
    pub fn topics (&self)->&FleetTopics { &self.topics }
    pub fn bus (&self)->&LocalBus { &self.bus }

    /// fleet snapshots, updated while the station runs
    pub fn fleet_updates (&self)->watch::Receiver<Vec<VehicleState>> { self.fleet_rx.clone() }

    /// the topics we publish to (and hence write out)
    pub fn outbound_patterns (&self)->Vec<String> {
        let root = self.topics.root();
        vec![
            self.topics.command(),
            format!("{}/+/{}", root, COMMAND),
            format!("{}/+/{}", root, MISSION),
            self.topics.correction().to_string(),
        ]
    }

    pub async fn outbound (&self)->Result<Subscription> {
        Ok( self.bus.subscribe_any( &self.outbound_patterns()).await? )
    }

    pub fn commands (&self)->CommandPublisher {
        CommandPublisher::new( self.topics.clone(), Arc::new( self.bus.clone()))
    }

    pub fn uploader (&self)->MissionUploader {
        MissionUploader::new( self.config.mission.clone(), self.topics.clone(), Arc::new( self.bus.clone()))
    }

    pub fn relay (&self)->RtcmRelay {
        RtcmRelay::new( self.config.rtcm.clone(), self.topics.correction(), Arc::new( self.bus.clone()))
    }

    /// start the fleet state aggregator. This can only be done once per station
    pub async fn spawn_aggregator (&self)->Result<Option<JoinHandle<FleetStateAggregator>>> {
        let Some(tx) = self.fleet_tx.lock().ok().and_then( |mut tx| tx.take()) else {
            warn!("fleet state aggregator already started");
            return Ok(None)
        };
        let sub = subscribe_vehicle_topics( &self.bus, &self.topics).await?;
        let aggregator = FleetStateAggregator::new( self.config.state.clone());
        Ok( Some( tokio::spawn( aggregator.run( sub, tx))))
    }

    /// run until `inbound` reaches EOF and the relay (if any) terminated. Outbound messages are written
    /// to `outbound` until the station is dropped at the end of the run
    pub async fn run<I,O,S> (self, inbound: I, outbound: O, relay: Option<(RtcmRelay,S)>)->Result<StationReport>
        where I: AsyncBufRead + Unpin, O: AsyncWrite + Unpin + Send + 'static, S: AsyncRead + Unpin
    {
        let writer = tokio::spawn( bridge::write_lines( self.outbound().await?, outbound));
        let aggregator = self.spawn_aggregator().await?;

        let relay_stats = relay.as_ref().map( |(relay,_)| relay.stats());

        let (inbound, relay_res) = match relay {
            Some((relay, serial)) => {
                let (inbound, res) = tokio::join!( bridge::feed_lines( inbound, &self.bus), relay.run( serial));
                (inbound, res)
            }
            None => (bridge::feed_lines( inbound, &self.bus).await, Ok(()))
        };
        info!("station input closed");

        drop( self); // closes the bus
        let outbound = writer.await??;
        let fleet = match aggregator {
            Some(handle) => handle.await?.snapshot(),
            None => Vec::new()
        };

        relay_res?;
        Ok( StationReport { inbound: inbound?, outbound, fleet, relay: relay_stats })
    }
}
