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

use std::{path::PathBuf, sync::Arc};
use anyhow::Result;
use tokio::io::BufReader;
use fleet_common::{define_cli, check_cli, config::load_config_or_default};
use fleet_bus::{BusClient, BusConfig, LocalBus, bridge, topics::FleetTopics};
use fleet_mission::{
    MissionConfig, MissionUploader, UploadMode, DirMissionSource, FixedReference, PromptReference, ReferenceProvider, upload_status
};

define_cli! { ARGS [about="upload mission files <id>.json for a range of vehicles as '<topic> <payload>' lines on stdout"] =
    config: Option<String> [help="pathname of mission config (RON)", long],
    bus_config: Option<String> [help="pathname of bus config (RON)", long],
    mission_dir: Option<PathBuf> [help="directory with mission files (overrides config)", long],
    lat: Option<f64> [help="base station latitude (prompted if not set)", long, allow_hyphen_values=true],
    lon: Option<f64> [help="base station longitude (prompted if not set)", long, allow_hyphen_values=true],
    light_sequence_only: bool [help="only upload light sequences", long],
    first: u32 [help="first vehicle id"],
    last: u32 [help="last vehicle id"]
}

#[tokio::main]
async fn main()->Result<()> {
    check_cli!(ARGS);
    tracing_subscriber::fmt().with_writer( std::io::stderr).init();

    let mut config: MissionConfig = load_config_or_default( ARGS.config.as_deref())?;
    if let Some(dir) = &ARGS.mission_dir { config.mission_dir = dir.clone() }
    let bus_config: BusConfig = load_config_or_default( ARGS.bus_config.as_deref())?;

    let topics = FleetTopics::new( &bus_config);
    let bus = LocalBus::new( &bus_config);
    let out = bus.subscribe( &format!("{}/+/mission", topics.root())).await?;
    let writer = tokio::spawn( bridge::write_lines( out, tokio::io::stdout()));

    let source = DirMissionSource::new( &config.mission_dir);
    let mut reference: Box<dyn ReferenceProvider> = match (ARGS.lat, ARGS.lon) {
        (Some(lat), Some(lon)) => Box::new( FixedReference::new( lat, lon)),
        _ => Box::new( PromptReference::new( BufReader::new( tokio::io::stdin()), tokio::io::stderr()))
    };
    let mode = if ARGS.light_sequence_only { UploadMode::LightSequenceOnly } else { UploadMode::Full };

    let uploader = MissionUploader::new( config, topics, Arc::new( bus));
    let res = uploader.upload( &source, reference.as_mut(), ARGS.first, ARGS.last, mode).await;

    drop( uploader); // closes the bus so that the writer terminates
    writer.await??;

    eprintln!("{}", upload_status( &res));
    if res.is_err() { std::process::exit(1) }
    Ok(())
}
