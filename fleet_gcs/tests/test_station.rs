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

use tokio::io::AsyncReadExt;
use fleet_common::config::load_config_path;
use fleet_bus::commands::FleetCommand;
use fleet_mission::{MemMissionSource, FixedReference, UploadMode};
use fleet_state::Connectivity;
use fleet_gcs::{GcsConfig, GroundStation};

// run with "cargo test --test test_station -- --nocapture"

#[test]
fn test_config_file() {
    let config: GcsConfig = load_config_path( "configs/fleet_gcs.ron").unwrap();
    println!("{:#?}", config);
    assert_eq!( config.bus.correction_topic, "fleet/correction-data");
    assert_eq!( config.rtcm.baud_rate, 57600);
    assert_eq!( config.mission.chunk_size, 512);
    assert_eq!( config.mission.chunk_delay.as_millis(), 200);
    assert_eq!( config.mission.vehicle_delay.as_millis(), 1000);
    assert_eq!( config.state.max_status_messages, 100);
}

#[test]
fn test_outbound_patterns() {
    let station = GroundStation::new( GcsConfig::default());
    assert_eq!( station.outbound_patterns(), vec![
        "fleet/command".to_string(),
        "fleet/+/command".to_string(),
        "fleet/+/mission".to_string(),
        "fleet/correction-data".to_string(),
    ]);
}

#[tokio::test]
async fn test_station_run() {
    let station = GroundStation::new( GcsConfig::default());
    let relay = station.relay();
    let frame: &[u8] = &[0xD3, 0x00, 0x02, 0x43, 0x50, 0xAA, 0xBB, 0xCC];

    let inbound: &[u8] = b"fleet/1/status {\"status\":\"connected\"}\n\
        fleet/1/telemetry {\"altitude\": 5.0, \"battery\": 12.2}\n\
        garbage\n\
        fleet/2/status_messages {\"message\":\"hello\"}\n";
    let (out_w, mut out_r) = tokio::io::duplex( 64 * 1024);

    let report = station.run( inbound, out_w, Some( (relay, frame))).await.unwrap();

    let mut out = String::new();
    out_r.read_to_string( &mut out).await.unwrap();
    println!("outbound:\n{}", out);
    assert_eq!( out, "fleet/correction-data {\"type\":\"rtcm\",\"data\":[211,0,2,67,80,170,187,204]}\n");

    assert_eq!( report.inbound, 3);
    assert_eq!( report.outbound, 1);
    assert_eq!( report.relay.as_ref().map( |s| s.frames_relayed()), Some(1));

    assert_eq!( report.fleet.len(), 2);
    for v in &report.fleet { println!("{}\n", v) }
    assert_eq!( report.fleet[0].connectivity(), Connectivity::Connected);
    assert!( report.fleet[0].last_telemetry().is_some());
    assert_eq!( report.fleet[1].status_messages().front().map( |s| s.as_str()), Some("hello"));
}

#[tokio::test]
async fn test_station_does_not_echo_inbound() {
    let station = GroundStation::new( GcsConfig::default());
    let inbound: &[u8] = b"fleet/command {\"command\":\"arm\"}\n\
        fleet/3/mission {\"chunk\":0}\n\
        fleet/correction-data {\"type\":\"rtcm\",\"data\":[]}\n";
    let (out_w, mut out_r) = tokio::io::duplex( 4096);

    let report = station.run( inbound, out_w, None::<(fleet_rtcm::relay::RtcmRelay,&[u8])>).await.unwrap();

    let mut out = String::new();
    out_r.read_to_string( &mut out).await.unwrap();
    println!("outbound: {:?}", out);
    assert_eq!( report.inbound, 3);
    assert_eq!( report.outbound, 0);
    assert!( out.is_empty());
    assert!( report.fleet.is_empty());
}

#[tokio::test]
async fn test_commands() {
    let station = GroundStation::new( GcsConfig::default());
    let mut out = station.outbound().await.unwrap();
    let commands = station.commands();

    commands.send( &FleetCommand::Arm).await.unwrap();
    commands.send( &FleetCommand::Takeoff{ altitude: 5.5 }).await.unwrap();
    commands.land_vehicle( "4").await.unwrap();
    commands.send( &FleetCommand::CancelMission).await.unwrap();

    let lines: Vec<String> = std::iter::from_fn( || out.try_recv()).map( |m| m.to_string()).collect();
    for l in &lines { println!("{}", l) }
    assert_eq!( lines, vec![
        r#"fleet/command {"command":"arm"}"#.to_string(),
        r#"fleet/command {"command":"takeoff","altitude":5.5}"#.to_string(),
        r#"fleet/4/command {"command":"change_mode","mode":"land"}"#.to_string(),
        r#"fleet/command {"command":"cancel_mission"}"#.to_string(),
    ]);
}

#[tokio::test(start_paused = true)]
async fn test_upload() {
    let station = GroundStation::new( GcsConfig::default());
    let mut out = station.outbound().await.unwrap();
    let source = MemMissionSource::new()
        .with( 1, r#"{"waypoints": [{"time": 0, "x": 1, "y": 2, "z": 3}]}"#)
        .with( 2, r#"{"waypoints": [{"time": 0, "x": -1, "y": -2, "z": 3}]}"#);

    let report = station.uploader().upload( &source, &mut FixedReference::new( 28.6, 77.2), 1, 2, UploadMode::Full).await.unwrap();
    println!("{}", report);

    let topics: Vec<String> = std::iter::from_fn( || out.try_recv()).map( |m| m.topic).collect();
    assert_eq!( topics, vec![ "fleet/1/mission".to_string(), "fleet/2/mission".to_string() ]);
}
