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

use std::time::Duration;
use anyhow::Result;
use tokio::{io::BufReader, sync::watch};
use fleet_common::{define_cli, check_cli, config::load_config_or_default};
use fleet_bus::{BusConfig, LocalBus, bridge, topics::FleetTopics};
use fleet_state::{FleetStateAggregator, FleetStateConfig, VehicleState, subscribe_vehicle_topics};

define_cli! { ARGS [about="show fleet state from '<topic> <payload>' lines on stdin (e.g. from 'mosquitto_sub -v -t fleet/#')"] =
    config: Option<String> [help="pathname of fleet state config (RON)", long],
    bus_config: Option<String> [help="pathname of bus config (RON)", long],
    interval: u64 [help="min seconds between fleet display updates", long, default_value="2"]
}

#[tokio::main]
async fn main()->Result<()> {
    check_cli!(ARGS);
    tracing_subscriber::fmt().with_writer( std::io::stderr).init();

    let config: FleetStateConfig = load_config_or_default( ARGS.config.as_deref())?;
    let bus_config: BusConfig = load_config_or_default( ARGS.bus_config.as_deref())?;
    let topics = FleetTopics::new( &bus_config);

    let bus = LocalBus::new( &bus_config);
    let sub = subscribe_vehicle_topics( &bus, &topics).await?;
    let (tx, mut rx) = watch::channel( Vec::<VehicleState>::new());
    let aggregator = tokio::spawn( FleetStateAggregator::new( config).run( sub, tx));

    let interval = Duration::from_secs( ARGS.interval);
    let display = tokio::spawn( async move {
        while rx.changed().await.is_ok() {
            let fleet = rx.borrow_and_update().clone();
            print_fleet( &fleet);
            tokio::time::sleep( interval).await;
        }
    });

    let n = bridge::feed_lines( BufReader::new( tokio::io::stdin()), &bus).await?;
    drop( bus); // terminates the aggregator

    let aggregator = aggregator.await?;
    display.await?;

    println!("---- final state after {} messages", n);
    print_fleet( &aggregator.snapshot());
    println!("{:?}", aggregator.stats());
    Ok(())
}

fn print_fleet (fleet: &[VehicleState]) {
    for v in fleet {
        println!("{}\n", v);
    }
}
