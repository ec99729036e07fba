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

//! inbound vehicle messages, decoded once at ingestion

use std::fmt;
use serde::{Serialize,Deserialize};
use serde_json::{Map, Value};
use fleet_bus::topics::{self, STATUS, TELEMETRY, STATUS_MESSAGES};
use crate::errors::{Result, payload_parse};

/// the status text that tells us the vehicle accepted its mission
pub const MISSION_UPLOADED: &'static str = "waypoint mission uploaded successfully";
pub const CONNECTED: &'static str = "connected";

/// a reported numeric value. Anything that is not a JSON number is kept as is so that it can be shown
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(from="Value", into="Value")]
pub enum Numeric {
    Num(f64),
    Raw(Value),
}

impl From<Value> for Numeric {
    fn from (v: Value)->Self {
        match v.as_f64() {
            Some(x) => Numeric::Num(x),
            None => Numeric::Raw(v)
        }
    }
}

impl From<Numeric> for Value {
    fn from (n: Numeric)->Self {
        match n {
            Numeric::Num(x) => Value::from(x),
            Numeric::Raw(v) => v
        }
    }
}

impl Numeric {
    pub fn as_f64 (&self)->Option<f64> {
        match self { Numeric::Num(x) => Some(*x), Numeric::Raw(_) => None }
    }
}

/// onboard clock reading: micros since epoch, or a sentinel such as "sync_failed" or "not_initialized"
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(from="Value", into="Value")]
pub enum OnboardTimestamp {
    Micros(i64),
    Sentinel(String),
    Raw(Value),
}

impl From<Value> for OnboardTimestamp {
    fn from (v: Value)->Self {
        if let Some(us) = v.as_i64() { return OnboardTimestamp::Micros(us) }

        if let Some(x) = v.as_f64() {
            return if x.is_finite() && x.abs() < i64::MAX as f64 {
                OnboardTimestamp::Micros( x.floor() as i64)
            } else {
                OnboardTimestamp::Raw(v)
            }
        }

        match v {
            Value::String(s) => OnboardTimestamp::Sentinel(s),
            other => OnboardTimestamp::Raw(other)
        }
    }
}

impl From<OnboardTimestamp> for Value {
    fn from (ts: OnboardTimestamp)->Self {
        match ts {
            OnboardTimestamp::Micros(us) => Value::from(us),
            OnboardTimestamp::Sentinel(s) => Value::from(s),
            OnboardTimestamp::Raw(v) => v
        }
    }
}

/// the last telemetry record of a vehicle. All fields are optional and lenient, format problems are
/// presentation issues. Fields are picked from the payload object by name and then by alias, the first
/// non-null match wins. Payloads that report both (e.g. `lat` and `latitude`) are therefore still accepted
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize,Default)]
#[serde(from="Map<String,Value>")]
pub struct Telemetry {
    pub altitude: Option<Numeric>,  // m
    pub battery: Option<Numeric>,   // V
    pub gps_fix: Option<Value>,
    pub mode: Option<Value>,
    pub timestamp: Option<OnboardTimestamp>,

    pub lat: Option<Numeric>,
    pub lon: Option<Numeric>,
    pub h_acc: Option<Numeric>,
    pub v_acc: Option<Numeric>,
    pub correction_age: Option<Numeric>,
    pub satellites: Option<Numeric>,
}

impl From<Map<String,Value>> for Telemetry {
    fn from (m: Map<String,Value>)->Self {
        Telemetry {
            altitude: pick( &m, &["altitude"]).map( Numeric::from),
            battery: pick( &m, &["battery"]).map( Numeric::from),
            gps_fix: pick( &m, &["gps_fix"]),
            mode: pick( &m, &["mode"]),
            timestamp: pick( &m, &["timestamp"]).map( OnboardTimestamp::from),

            lat: pick( &m, &["lat", "latitude"]).map( Numeric::from),
            lon: pick( &m, &["lon", "longitude"]).map( Numeric::from),
            h_acc: pick( &m, &["h_acc", "horizontal_accuracy"]).map( Numeric::from),
            v_acc: pick( &m, &["v_acc", "vertical_accuracy"]).map( Numeric::from),
            correction_age: pick( &m, &["correction_age", "rtk_age"]).map( Numeric::from),
            satellites: pick( &m, &["satellites", "satellites_visible"]).map( Numeric::from),
        }
    }
}

fn pick (m: &Map<String,Value>, names: &[&str])->Option<Value> {
    names.iter().filter_map( |name| m.get( *name)).find( |v| !v.is_null()).cloned()
}

#[derive(Debug,Clone,PartialEq)]
pub enum FleetMsg {
    Status { vehicle_id: String, status: Option<String> },
    Telemetry { vehicle_id: String, telemetry: Telemetry },
    Log { vehicle_id: String, message: String },
    /// not a vehicle topic we know about
    Unknown { topic: String },
}

impl FleetMsg {
    /// decode by the trailing topic segment. Unknown topics are not parsed at all, parse errors
    /// of known topics are reported as `PayloadParse`
    pub fn parse (topic: &str, payload: &str)->Result<FleetMsg> {
        let Some(vehicle_id) = topics::vehicle_id( topic).filter( |_| topic.split('/').count() >= 3) else {
            return Ok( FleetMsg::Unknown{ topic: topic.to_string() })
        };
        let vehicle_id = vehicle_id.to_string();

        match topics::category( topic) {
            STATUS => {
                let v = parse_object( topic, payload)?;
                let status = v.get("status").map( display_value);
                Ok( FleetMsg::Status{ vehicle_id, status })
            }
            TELEMETRY => {
                match parse_object( topic, payload)? {
                    Value::Object(m) => Ok( FleetMsg::Telemetry{ vehicle_id, telemetry: Telemetry::from(m) }),
                    _ => Err( payload_parse( topic, "not a JSON object"))
                }
            }
            STATUS_MESSAGES => {
                let v = parse_object( topic, payload)?;
                match v.get("message") {
                    Some(m) => Ok( FleetMsg::Log{ vehicle_id, message: display_value(m) }),
                    None => Err( payload_parse( topic, "no message"))
                }
            }
            _ => Ok( FleetMsg::Unknown{ topic: topic.to_string() })
        }
    }

    pub fn vehicle_id (&self)->Option<&str> {
        match self {
            FleetMsg::Status{vehicle_id,..} | FleetMsg::Telemetry{vehicle_id,..} | FleetMsg::Log{vehicle_id,..} => Some(vehicle_id.as_str()),
            FleetMsg::Unknown{..} => None
        }
    }
}

fn parse_object (topic: &str, payload: &str)->Result<Value> {
    let v: Value = serde_json::from_str( payload).map_err( |e| payload_parse( topic, e))?;
    if v.is_object() { Ok(v) } else { Err( payload_parse( topic, "not a JSON object")) }
}

/// text of a JSON value the way it is shown to users (strings without quotes)
pub fn display_value (v: &Value)->String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string()
    }
}
