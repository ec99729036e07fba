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

use std::{path::PathBuf, sync::Arc, time::Duration};
use anyhow::Result;
use clap::{Parser, Subcommand};
use lazy_static::lazy_static;
use tokio::io::BufReader;
use fleet_common::config::{load_config_or_default, to_config_string};
use fleet_bus::{BusClient, bridge, commands::FleetCommand};
use fleet_rtcm::relay::{list_ports, open_configured_serial};
use fleet_mission::{DirMissionSource, FixedReference, PromptReference, ReferenceProvider, UploadMode, upload_status};
use fleet_state::VehicleState;
use fleet_gcs::{GcsConfig, GroundStation};

#[derive(Parser)]
#[command(about="fleet ground control station. Vehicle traffic is exchanged as '<topic> <payload>' lines (see mosquitto_sub -v)")]
struct CliOpts {
    #[arg(help="pathname of station config (RON)", long)]
    config: Option<String>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// list serial ports for the base station receiver
    Ports,
    /// print the default station config
    Config,
    /// relay corrections and monitor the fleet: inbound lines on stdin, outbound lines on stdout
    Station {
        #[arg(help="serial port of base station receiver", long)]
        port: Option<String>,
        #[arg(help="do not relay corrections", long)]
        no_relay: bool,
        #[arg(help="min seconds between fleet display updates (on stderr)", long, default_value="2")]
        interval: u64,
    },
    /// upload mission files <id>.json for vehicles first..=last
    Upload {
        first: u32,
        last: u32,
        #[arg(help="directory with mission files", long)]
        mission_dir: Option<PathBuf>,
        #[arg(help="base station latitude (prompted if not set)", long, allow_hyphen_values=true)]
        lat: Option<f64>,
        #[arg(help="base station longitude (prompted if not set)", long, allow_hyphen_values=true)]
        lon: Option<f64>,
        #[arg(help="only upload light sequences", long)]
        light_sequence_only: bool,
    },
    Arm,
    Takeoff { altitude: f64 },
    Mode { mode: String },
    /// land the fleet or a single vehicle
    Land {
        #[arg(long)]
        vehicle: Option<String>,
    },
    /// start missions at a local HH:MM[:SS] time
    Start { takeoff_altitude: f64, start_time: String },
    Cancel,
    TimeSync,
}

lazy_static! { static ref ARGS: CliOpts = CliOpts::parse(); }

#[tokio::main]
async fn main()->Result<()> {
    tracing_subscriber::fmt().with_writer( std::io::stderr).init();
    let config: GcsConfig = load_config_or_default( ARGS.config.as_deref())?;

    match &ARGS.cmd {
        Cmd::Ports => {
            for p in list_ports()? { println!("{:<20} {}", p.name, p.description) }
        }
        Cmd::Config => {
            println!("{}", to_config_string( &config)?);
        }
        Cmd::Station{ port, no_relay, interval } => run_station( config, port.clone(), *no_relay, *interval).await?,
        Cmd::Upload{ first, last, mission_dir, lat, lon, light_sequence_only } => {
            let mut config = config;
            if let Some(dir) = mission_dir { config.mission.mission_dir = dir.clone() }
            let mode = if *light_sequence_only { UploadMode::LightSequenceOnly } else { UploadMode::Full };
            let reference: Box<dyn ReferenceProvider> = match (lat, lon) {
                (Some(lat), Some(lon)) => Box::new( FixedReference::new( *lat, *lon)),
                _ => Box::new( PromptReference::new( BufReader::new( tokio::io::stdin()), tokio::io::stderr()))
            };
            upload( config, *first, *last, reference, mode).await?
        }
        cmd => send_command( config, cmd).await?
    }
    Ok(())
}

async fn run_station (mut config: GcsConfig, port: Option<String>, no_relay: bool, interval: u64)->Result<()> {
    if port.is_some() { config.rtcm.port = port }
    let station = GroundStation::new( config);

    let mut rx = station.fleet_updates();
    let interval = Duration::from_secs( interval);
    tokio::spawn( async move {
        while rx.changed().await.is_ok() {
            let fleet = rx.borrow_and_update().clone();
            for v in &fleet { eprintln!("{}\n", v) }
            tokio::time::sleep( interval).await;
        }
    });

    let relay = if no_relay {
        None
    } else {
        let serial = open_configured_serial( &station.config().rtcm)?;
        let relay = station.relay();
        let cancel = relay.cancel_token();
        tokio::spawn( async move {
            if tokio::signal::ctrl_c().await.is_ok() { cancel.cancel() }
        });
        Some( (relay, serial))
    };

    let report = station.run( BufReader::new( tokio::io::stdin()), tokio::io::stdout(), relay).await?;
    eprintln!("station terminated after {} inbound and {} outbound messages", report.inbound, report.outbound);
    if let Some(stats) = &report.relay {
        eprintln!("relayed {} correction frames ({} dropped)", stats.frames_relayed(), stats.frames_dropped());
    }
    Ok(())
}

async fn upload (config: GcsConfig, first: u32, last: u32, mut reference: Box<dyn ReferenceProvider>, mode: UploadMode)->Result<()> {
    let station = GroundStation::new( config);
    let writer = tokio::spawn( bridge::write_lines( station.outbound().await?, tokio::io::stdout()));

    let source = DirMissionSource::new( &station.config().mission.mission_dir);
    let uploader = station.uploader();
    let res = uploader.upload( &source, reference.as_mut(), first, last, mode).await;

    drop( uploader);
    drop( station);
    writer.await??;

    eprintln!("{}", upload_status( &res));
    if res.is_err() { std::process::exit(1) }
    Ok(())
}

async fn send_command (config: GcsConfig, cmd: &Cmd)->Result<()> {
    let station = GroundStation::new( config);
    let writer = tokio::spawn( bridge::write_lines( station.outbound().await?, tokio::io::stdout()));
    let commands = station.commands();

    match cmd {
        Cmd::Arm => commands.send( &FleetCommand::Arm).await?,
        Cmd::Takeoff{ altitude } => commands.send( &FleetCommand::Takeoff{ altitude: *altitude }).await?,
        Cmd::Mode{ mode } => commands.send( &FleetCommand::change_mode( mode)).await?,
        Cmd::Land{ vehicle: Some(id) } => commands.land_vehicle( id).await?,
        Cmd::Land{ vehicle: None } => commands.send( &FleetCommand::land()).await?,
        Cmd::Start{ takeoff_altitude, start_time } => commands.send( &FleetCommand::start_mission_at_str( *takeoff_altitude, start_time)?).await?,
        Cmd::Cancel => commands.send( &FleetCommand::CancelMission).await?,
        Cmd::TimeSync => commands.send( &FleetCommand::time_sync_now()).await?,
        _ => {}
    }

    drop( commands);
    drop( station);
    writer.await??;
    Ok(())
}
