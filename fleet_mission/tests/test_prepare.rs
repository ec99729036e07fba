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

use std::f64::consts::PI;
use serde_json::{json, Value};
use fleet_common::{BoundingBox, geo::GeoPoint};
use fleet_mission::{
    prepare, prepare_light_sequence, BaseStationReference, FixedReference, PromptReference, capture_reference,
    prepare::parse_float, errors::FleetMissionError
};

// run with "cargo test --test test_prepare -- --nocapture"

const R: f64 = 6378137.0;

fn reference ()->BaseStationReference {
    BaseStationReference::capture( 28.6, 77.2, &BoundingBox::world()).unwrap()
}

#[test]
fn test_prepare_converts_waypoints() {
    let raw = r#"{ "waypoints": [ {" Time ": 0, "X": "100", "y": 100, "Z ": 10}, {"time": "00:05", "x": 0, "y": 0, "z": 12.5} ] }"#;
    let payload = prepare( raw, "3", &reference()).unwrap();
    println!("{:?}", payload);

    assert_eq!( payload.vehicle_id, "3");
    let wps = payload.waypoints.as_ref().unwrap();
    assert_eq!( wps.len(), 2);

    let wp = &wps[0];
    assert_eq!( wp.time, Some( json!(0)));
    assert!( wp.lat > 28.6 && wp.lon > 77.2);
    assert!( (wp.lat - (28.6 + (100.0 / R) * (180.0 / PI))).abs() < 1e-12);
    assert!( (wp.lon - (77.2 + (100.0 / (R * (28.6f64 * PI / 180.0).cos())) * (180.0 / PI))).abs() < 1e-12);
    assert_eq!( wp.alt, Some(10.0));

    let wp = &wps[1];
    assert_eq!( wp.time, Some( json!("00:05")));
    assert_eq!( (wp.lat, wp.lon), (28.6, 77.2));
    assert_eq!( wp.alt, Some(12.5));
    assert!( payload.light_sequence.is_none());
}

#[test]
fn test_document_shape() {
    let raw = r#"{ "light_sequence": {"z": 1, "a": [1,2]}, "waypoints": [ {"time": 0, "x": 0, "y": 0, "z": 5} ] }"#;
    let doc = prepare( raw, "7", &reference()).unwrap().to_document().unwrap();
    println!("{}", doc);

    assert!( doc.starts_with( r#"{"drone_id":"7","waypoints":[{"time":0,"lat":28.6,"lon":77.2,"alt":5.0}]"#));
    assert!( doc.ends_with( r#""light_sequence":{"z":1,"a":[1,2]}}"#));
}

#[test]
fn test_missing_coordinates_propagate() {
    let raw = r#"{ "waypoints": [ {"y": 10} ] }"#;
    let payload = prepare( raw, "1", &reference()).unwrap();
    let wp = &payload.waypoints.as_ref().unwrap()[0];
    assert!( wp.lat > 28.6);
    assert!( wp.lon.is_nan());
    assert!( wp.time.is_none() && wp.alt.is_none());

    let doc = payload.to_document().unwrap();
    println!("{}", doc);
    assert!( doc.contains( r#""lon":null"#));
    assert!( !doc.contains( "alt"));
}

#[test]
fn test_malformed_missions() {
    for raw in [ "{}", r#"{"waypoints": 42}"#, r#"[1,2]"#, "not json" ] {
        match prepare( raw, "2", &reference()) {
            Err(FleetMissionError::MalformedMission{vehicle,reason}) => {
                println!("{raw} -> {reason}");
                assert_eq!( vehicle, "2");
            }
            other => panic!("expected MalformedMission for {raw}, got {:?}", other)
        }
    }
}

#[test]
fn test_invalid_waypoint_index() {
    let raw = r#"{ "waypoints": [ {"x": 1}, {"x": 2}, {"speed": 3}, {} ] }"#;
    match prepare( raw, "4", &reference()) {
        Err(FleetMissionError::InvalidWaypoint{vehicle,index}) => {
            assert_eq!( vehicle, "4");
            assert_eq!( index, 2);
        }
        other => panic!("expected InvalidWaypoint, got {:?}", other)
    }

    let raw = r#"{ "waypoints": [ "abc" ] }"#;
    assert!( matches!( prepare( raw, "4", &reference()), Err(FleetMissionError::InvalidWaypoint{index: 0, ..})));
}

#[test]
fn test_light_sequence_only() {
    let raw = r#"{ "waypoints": [ {} ], "light_sequence": [ {"t": 0, "rgb": [255,0,0]} ] }"#;
    let payload = prepare_light_sequence( raw, "5").unwrap();
    assert!( payload.waypoints.is_none());

    let doc = payload.to_document().unwrap();
    println!("{}", doc);
    assert_eq!( doc, r#"{"drone_id":"5","light_sequence":[{"t":0,"rgb":[255,0,0]}]}"#);

    assert!( matches!( prepare_light_sequence( r#"{"waypoints": []}"#, "5"), Err(FleetMissionError::MalformedMission{..})));
}

#[test]
fn test_parse_float() {
    assert_eq!( parse_float( &json!(1.5)), 1.5);
    assert_eq!( parse_float( &json!("12.5m")), 12.5);
    assert_eq!( parse_float( &json!("  -3e2x")), -300.0);
    assert_eq!( parse_float( &json!(".5")), 0.5);
    assert_eq!( parse_float( &json!("5.")), 5.0);
    assert_eq!( parse_float( &json!("1e")), 1.0);
    assert_eq!( parse_float( &json!("-Infinity")), f64::NEG_INFINITY);
    assert!( parse_float( &json!("abc")).is_nan());
    assert!( parse_float( &json!(".")).is_nan());
    assert!( parse_float( &json!(true)).is_nan());
    assert!( parse_float( &Value::Null).is_nan());
}

#[test]
fn test_reference_bounds() {
    let bounds = BoundingBox::new( 77.0, 28.0, 78.0, 29.0);
    assert!( BaseStationReference::capture( 28.6, 77.2, &bounds).is_ok());
    assert!( matches!( BaseStationReference::capture( 48.6, 77.2, &bounds), Err(FleetMissionError::ReferenceOutOfBounds{..})));
    assert!( matches!( BaseStationReference::capture( f64::NAN, 77.2, &bounds), Err(FleetMissionError::ReferenceOutOfBounds{..})));
}

#[tokio::test]
async fn test_reference_providers() {
    let bounds = BoundingBox::world();

    let mut fixed = FixedReference::new( 28.6, 77.2);
    let r = capture_reference( &mut fixed, &bounds).await.unwrap();
    assert_eq!( (r.latitude(), r.longitude()), (28.6, 77.2));

    let mut cancelled = FixedReference::cancelled();
    assert!( matches!( capture_reference( &mut cancelled, &bounds).await, Err(FleetMissionError::ReferenceCaptureAborted)));

    let input: &[u8] = b"north\n28.6\n\n77.2\n";
    let mut prompt = PromptReference::new( input, tokio::io::sink());
    let r = capture_reference( &mut prompt, &bounds).await.unwrap();
    println!("prompted reference: {}", r);
    assert_eq!( (r.latitude(), r.longitude()), (28.6, 77.2));

    let input: &[u8] = b"28.6\n";
    let mut prompt = PromptReference::new( input, tokio::io::sink());
    assert!( matches!( capture_reference( &mut prompt, &bounds).await, Err(FleetMissionError::ReferenceCaptureAborted)));
}
