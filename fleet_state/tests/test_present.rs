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

use chrono::{DateTime, Local, Utc};
use serde_json::json;
use fleet_state::{
    FleetStateAggregator, FleetStateConfig, Numeric, OnboardTimestamp, Telemetry,
    present::{format_fixed, format_timestamp, telemetry_lines, vehicle_card, vehicle_title}
};

// run with "cargo test --test test_present -- --nocapture"

#[test]
fn test_format_timestamp() {
    let us: i64 = 1_700_000_000_000_042;
    let s = format_timestamp( &OnboardTimestamp::Micros(us));
    println!("{} -> {}", us, s);

    let expected = DateTime::<Utc>::from_timestamp( 1_700_000_000, 0).unwrap().with_timezone( &Local);
    assert_eq!( s, format!("{}.000042", expected.format("%d/%m/%Y, %H:%M:%S")));
    assert_eq!( s.len(), "dd/mm/yyyy, HH:MM:SS.uuuuuu".len());

    assert_eq!( format_timestamp( &OnboardTimestamp::Sentinel("sync_failed".to_string())), "sync_failed");
    assert_eq!( format_timestamp( &OnboardTimestamp::Sentinel("not_initialized".to_string())), "not_initialized");
    assert_eq!( format_timestamp( &OnboardTimestamp::Raw( json!(true))), "true");

    // out of calendar range
    assert_eq!( format_timestamp( &OnboardTimestamp::Micros(i64::MAX)), format!("Error formatting: {}", i64::MAX));
}

#[test]
fn test_format_numeric_timestamp_out_of_range() {
    let ts = OnboardTimestamp::from( json!(u64::MAX));
    let s = format_timestamp( &ts);
    println!("{:?} -> {}", ts, s);
    assert_eq!( s, format!("Error formatting: {}", u64::MAX));

    let ts = OnboardTimestamp::from( json!(1e300));
    let s = format_timestamp( &ts);
    println!("{:?} -> {}", ts, s);
    assert!( s.starts_with("Error formatting: "));
}

#[test]
fn test_format_fixed() {
    assert_eq!( format_fixed( Some( &Numeric::Num(12.345)), 2), "12.35");
    assert_eq!( format_fixed( Some( &Numeric::Num(3.0)), 2), "3.00");
    assert_eq!( format_fixed( Some( &Numeric::Raw( json!("n/a"))), 2), "Error formatting: \"n/a\"");
    assert_eq!( format_fixed( None, 2), "Error formatting: missing");
}

#[test]
fn test_telemetry_lines() {
    let t: Telemetry = serde_json::from_value( json!({
        "altitude": 10.0, "battery": 12.6, "gps_fix": "3D", "mode": "AUTO", "timestamp": "not_initialized"
    })).unwrap();
    let lines = telemetry_lines( &t);
    for l in &lines { println!("{}", l) }

    assert_eq!( lines, vec![
        "Altitude: 10.00 m".to_string(),
        "Battery: 12.60 V".to_string(),
        "GPS: 3D".to_string(),
        "Mode: AUTO".to_string(),
        "Onboard Time: not_initialized".to_string(),
    ]);

    let t: Telemetry = serde_json::from_value( json!({ "altitude": 1, "lat": 28.6, "lon": 77.2, "rtk_age": 1.25, "satellites": 12 })).unwrap();
    let lines = telemetry_lines( &t);
    for l in &lines { println!("{}", l) }
    assert!( lines.contains( &"Position: 28.6000000, 77.2000000".to_string()));
    assert!( lines.contains( &"Satellites: 12".to_string()));
    assert!( lines.iter().any( |l| l.starts_with("Correction Age: ")));
    assert!( lines.contains( &"GPS: -".to_string()));
}

#[test]
fn test_vehicle_card() {
    let mut agg = FleetStateAggregator::new( FleetStateConfig::default());
    agg.apply( "fleet/5/status", r#"{"status":"waypoint mission uploaded successfully"}"#).unwrap();
    agg.apply( "fleet/5/telemetry", r#"{"altitude": 2.5, "battery": 11.1, "gps_fix": "RTK", "mode": "LOITER", "timestamp": "sync_failed"}"#).unwrap();
    for i in 0..8 {
        agg.apply( "fleet/5/status_messages", &format!(r#"{{"message":"m{}"}}"#, i)).unwrap();
    }

    let v = agg.vehicle("5").unwrap();
    assert_eq!( vehicle_title( v), "Vehicle 5 (mission uploaded)");

    let card = vehicle_card( v);
    println!("{}", card);
    assert!( card.contains("Status: waypoint mission uploaded successfully (connected)"));
    assert!( card.contains("Altitude: 2.50 m"));
    assert!( card.contains("> m7"));
    assert!( !card.contains("> m2")); // only the newest ones
}
