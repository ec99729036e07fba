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

//! text presentation of vehicle state

use serde_json::Value;
use fleet_common::datetime::format_epoch_micros_local;
use crate::{msg::{Numeric, OnboardTimestamp, Telemetry, display_value}, vehicle::VehicleState};

pub const MISSING: &'static str = "-";
pub const CARD_MESSAGES: usize = 5; // status messages shown on a vehicle card

pub fn format_error (raw: &str)->String {
    format!("Error formatting: {}", raw)
}

/// local `dd/mm/yyyy, HH:MM:SS.uuuuuu` for onboard micros, non-numeric values as they are.
/// Numbers we can't map to a date are format errors
pub fn format_timestamp (ts: &OnboardTimestamp)->String {
    match ts {
        OnboardTimestamp::Micros(us) => format_epoch_micros_local( *us).unwrap_or_else( || format_error( &us.to_string())),
        OnboardTimestamp::Sentinel(s) => s.clone(),
        OnboardTimestamp::Raw(v) if v.is_number() => format_error( &v.to_string()),
        OnboardTimestamp::Raw(v) => display_value( v)
    }
}

/// fixed point with `decimals` digits. Values that are not finite numbers are format errors
pub fn format_fixed (v: Option<&Numeric>, decimals: usize)->String {
    match v {
        Some(Numeric::Num(x)) if x.is_finite() => format!("{:.*}", decimals, x),
        Some(Numeric::Num(x)) => format_error( &x.to_string()),
        Some(Numeric::Raw(raw)) => format_error( &raw.to_string()),
        None => format_error("missing")
    }
}

pub fn format_text (v: Option<&Value>)->String {
    v.map( display_value).unwrap_or_else( || MISSING.to_string())
}

/// the telemetry lines of a vehicle card. Position, accuracy, correction and satellite lines are only
/// included if the vehicle reports them
pub fn telemetry_lines (t: &Telemetry)->Vec<String> {
    let mut lines = vec![
        format!("Altitude: {} m", format_fixed( t.altitude.as_ref(), 2)),
        format!("Battery: {} V", format_fixed( t.battery.as_ref(), 2)),
        format!("GPS: {}", format_text( t.gps_fix.as_ref())),
        format!("Mode: {}", format_text( t.mode.as_ref())),
        format!("Onboard Time: {}", t.timestamp.as_ref().map( format_timestamp).unwrap_or_else( || MISSING.to_string())),
    ];

    if t.lat.is_some() || t.lon.is_some() {
        lines.push( format!("Position: {}, {}", format_fixed( t.lat.as_ref(), 7), format_fixed( t.lon.as_ref(), 7)));
    }
    if t.h_acc.is_some() || t.v_acc.is_some() {
        lines.push( format!("Accuracy: h {} m, v {} m", format_fixed( t.h_acc.as_ref(), 2), format_fixed( t.v_acc.as_ref(), 2)));
    }
    if let Some(age) = &t.correction_age {
        lines.push( format!("Correction Age: {} s", format_fixed( Some(age), 1)));
    }
    if let Some(n) = &t.satellites {
        lines.push( format!("Satellites: {}", format_fixed( Some(n), 0)));
    }
    lines
}

pub fn vehicle_title (v: &VehicleState)->String {
    if v.mission_upload_acknowledged() {
        format!("Vehicle {} (mission uploaded)", v.id())
    } else {
        format!("Vehicle {}", v.id())
    }
}

/// multi-line text summary of a vehicle with its newest status messages
pub fn vehicle_card (v: &VehicleState)->String {
    let mut s = vehicle_title( v);
    s.push_str( &format!("\n  Status: {} ({})", v.status().unwrap_or("Unknown"), v.connectivity()));

    if let Some(t) = v.last_telemetry() {
        for line in telemetry_lines( t) {
            s.push_str("\n  ");
            s.push_str( &line);
        }
    }
    for msg in v.status_messages().iter().take( CARD_MESSAGES) {
        s.push_str("\n  > ");
        s.push_str( msg);
    }
    s
}
