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

//! turning raw mission documents into what we send to vehicles.
//!
//! Raw documents are JSON objects with a `waypoints` array of local positions (meters east/north/up of the
//! base station) and optional auxiliary data such as a `light_sequence`. Waypoint keys are matched
//! case insensitive and without surrounding whitespace, coordinate values can be numbers or numeric strings.

use serde::{Serialize,Deserialize};
use serde_json::{Map, Value};
use tracing::{debug,info};
use fleet_common::{is_none, geo::{GeoPoint, to_geo}};
use crate::{chunks::to_ascii_json, reference::BaseStationReference, errors::{FleetMissionError, Result, malformed}};

/// a waypoint after key normalization, still in local coordinates
#[derive(Debug,Clone,Default,PartialEq)]
pub struct Waypoint {
    pub time: Option<Value>,  // passed through verbatim
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
}

/// a converted waypoint. Missing or non-numeric local coordinates end up as NaN (serialized as null)
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct GeoWaypoint {
    #[serde(skip_serializing_if="is_none", default)]
    pub time: Option<Value>,
    pub lat: f64,
    pub lon: f64,
    #[serde(skip_serializing_if="is_none", default)]
    pub alt: Option<f64>,
}

/// the mission document for one vehicle
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct MissionPayload {
    #[serde(rename="drone_id")]
    pub vehicle_id: String,

    #[serde(skip_serializing_if="is_none", default)]
    pub waypoints: Option<Vec<GeoWaypoint>>,

    #[serde(skip_serializing_if="is_none", default)]
    pub light_sequence: Option<Value>,
}

impl MissionPayload {
    /// the serialized document that gets chunked
    pub fn to_document (&self)->Result<String> {
        to_ascii_json( self)
    }
}

/// validate and convert a raw mission document for `vehicle_id`, using the captured base station reference
pub fn prepare (raw: &str, vehicle_id: &str, reference: &BaseStationReference)->Result<MissionPayload> {
    let doc = parse_document( raw, vehicle_id)?;

    let raw_waypoints = match doc.get("waypoints") {
        Some(Value::Array(a)) => a,
        _ => return Err( malformed( vehicle_id, "expected waypoints array"))
    };

    let waypoints = raw_waypoints.iter().enumerate()
        .map( |(index,v)| normalize_waypoint( vehicle_id, index, v))
        .collect::<Result<Vec<Waypoint>>>()?;

    let origin = reference.as_geo_point();
    let waypoints: Vec<GeoWaypoint> = waypoints.into_iter().map( |wp| convert_waypoint( wp, &origin)).collect();
    info!("prepared mission for vehicle {} with {} waypoints", vehicle_id, waypoints.len());

    Ok( MissionPayload {
        vehicle_id: vehicle_id.to_string(),
        waypoints: Some(waypoints),
        light_sequence: doc.get("light_sequence").cloned()
    })
}

/// extract only the light sequence of a raw mission document. This does not need a reference
pub fn prepare_light_sequence (raw: &str, vehicle_id: &str)->Result<MissionPayload> {
    let doc = parse_document( raw, vehicle_id)?;

    match doc.get("light_sequence") {
        Some(ls) => Ok( MissionPayload{ vehicle_id: vehicle_id.to_string(), waypoints: None, light_sequence: Some(ls.clone()) }),
        None => Err( malformed( vehicle_id, "expected light_sequence"))
    }
}

fn parse_document (raw: &str, vehicle_id: &str)->Result<Value> {
    serde_json::from_str( raw).map_err( |e| malformed( vehicle_id, format!("invalid JSON ({e})")))
}

/// map the keys of a raw waypoint to time/x/y/z. A waypoint without any of them is invalid
pub fn normalize_waypoint (vehicle_id: &str, index: usize, v: &Value)->Result<Waypoint> {
    let invalid = || FleetMissionError::InvalidWaypoint{ vehicle: vehicle_id.to_string(), index };

    let obj = v.as_object().ok_or_else( invalid)?;
    let mut wp = Waypoint::default();
    let mut recognized = false;

    for (k,v) in obj {
        match k.trim().to_lowercase().as_str() {
            "time" => wp.time = Some(v.clone()),
            "x" => wp.x = Some( parse_float(v)),
            "y" => wp.y = Some( parse_float(v)),
            "z" => wp.z = Some( parse_float(v)),
            _ => continue
        }
        recognized = true;
    }

    if recognized { Ok(wp) } else { Err( invalid()) }
}

pub fn convert_waypoint (wp: Waypoint, origin: &GeoPoint)->GeoWaypoint {
    let pos = to_geo( wp.x.unwrap_or( f64::NAN), wp.y.unwrap_or( f64::NAN), origin);
    debug!("converted waypoint ({:?},{:?}) -> {}", wp.x, wp.y, pos);
    GeoWaypoint { time: wp.time, lat: pos.latitude, lon: pos.longitude, alt: wp.z }
}

/// lenient numeric coercion: numbers as is, strings by their longest numeric prefix, everything else NaN
pub fn parse_float (v: &Value)->f64 {
    match v {
        Value::Number(n) => n.as_f64().unwrap_or( f64::NAN),
        Value::String(s) => parse_float_prefix( s),
        _ => f64::NAN
    }
}

fn parse_float_prefix (s: &str)->f64 {
    let s = s.trim_start();
    let b = s.as_bytes();
    let mut i = 0;

    if i < b.len() && (b[i] == b'+' || b[i] == b'-') { i += 1 }
    if s[i..].starts_with("Infinity") {
        return if b[0] == b'-' { f64::NEG_INFINITY } else { f64::INFINITY }
    }

    let int_start = i;
    while i < b.len() && b[i].is_ascii_digit() { i += 1 }
    let mut n_digits = i - int_start;

    if i < b.len() && b[i] == b'.' {
        let mut k = i + 1;
        while k < b.len() && b[k].is_ascii_digit() { k += 1 }
        n_digits += k - (i + 1);
        if n_digits > 0 { i = k }
    }
    if n_digits == 0 { return f64::NAN }

    if i < b.len() && (b[i] == b'e' || b[i] == b'E') {
        let mut k = i + 1;
        if k < b.len() && (b[k] == b'+' || b[k] == b'-') { k += 1 }
        let exp_start = k;
        while k < b.len() && b[k].is_ascii_digit() { k += 1 }
        if k > exp_start { i = k }
    }

    s[..i].parse::<f64>().unwrap_or( f64::NAN)
}
