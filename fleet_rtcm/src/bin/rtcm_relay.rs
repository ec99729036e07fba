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

use std::sync::Arc;
use anyhow::Result;
use fleet_common::{define_cli, check_cli, config::load_config_or_default};
use fleet_bus::{BusClient, BusConfig, LocalBus, bridge};
use fleet_rtcm::{RtcmConfig, relay::{RtcmRelay, open_configured_serial}};

define_cli! { ARGS [about="relay RTCM corrections from a serial base station receiver as '<topic> <payload>' lines on stdout"] =
    config: Option<String> [help="pathname of RTCM relay config (RON)", long],
    bus_config: Option<String> [help="pathname of bus config (RON)", long],
    baud_rate: Option<u32> [help="baud rate of receiver port", long],
    port: Option<String> [help="serial port of base station receiver (only port if not set)"]
}

#[tokio::main]
async fn main()->Result<()> {
    check_cli!(ARGS);
    tracing_subscriber::fmt().with_writer( std::io::stderr).init();

    let mut config: RtcmConfig = load_config_or_default( ARGS.config.as_deref())?;
    if let Some(port) = &ARGS.port { config.port = Some(port.clone()) }
    if let Some(baud_rate) = ARGS.baud_rate { config.baud_rate = baud_rate }
    let bus_config: BusConfig = load_config_or_default( ARGS.bus_config.as_deref())?;

    let bus = LocalBus::new( &bus_config);
    let out = bus.subscribe( &bus_config.correction_topic).await?;
    tokio::spawn( bridge::write_lines( out, tokio::io::stdout()));

    let serial = open_configured_serial( &config)?;
    let relay = RtcmRelay::new( config, &bus_config.correction_topic, Arc::new( bus.clone()));

    let cancel = relay.cancel_token();
    tokio::spawn( async move {
        if tokio::signal::ctrl_c().await.is_ok() { cancel.cancel() }
    });

    relay.run( serial).await?;

    let stats = relay.stats();
    eprintln!("relayed {} frames ({} dropped) from {} bytes", stats.frames_relayed(), stats.frames_dropped(), stats.bytes_received());
    Ok(())
}
