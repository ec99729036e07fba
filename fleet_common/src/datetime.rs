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

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};
use serde::{Serialize,Deserialize,Serializer,Deserializer,de::{Error as DeError}};
use std::time::Duration;
use parse_duration::parse;

pub const MICROS_PER_SEC: i64 = 1_000_000;

#[inline] pub fn millis (n: u64)->Duration { Duration::from_millis(n) }
#[inline] pub fn secs (n: u64)->Duration { Duration::from_secs(n) }

/// this should be used wherever we might have to use sim clock instead of wall clock
#[inline]
pub fn utc_now()->DateTime<Utc> {
    Utc::now()
}

#[inline]
pub fn local_now()->DateTime<Local> {
    Local::now()
}

/// microseconds since the unix epoch. This is what vehicles use for onboard clocks
#[inline]
pub fn epoch_micros ()->i64 {
    utc_now().timestamp_micros()
}

/// split epoch micros into (whole seconds, micros remainder). The remainder is always in 0..1_000_000
#[inline]
pub fn split_epoch_micros (us: i64)->(i64,u32) {
    (us.div_euclid(MICROS_PER_SEC), us.rem_euclid(MICROS_PER_SEC) as u32)
}

/// local display format of epoch micros: `dd/mm/yyyy, HH:MM:SS.uuuuuu` (24h, zero padded micros).
/// Returns None if the value can't be mapped to a calendar date
pub fn format_epoch_micros_local (us: i64)->Option<String> {
    let (secs, rem_us) = split_epoch_micros(us);
    let dt = DateTime::<Utc>::from_timestamp( secs, 0)?.with_timezone(&Local);
    Some( format!("{}.{:06}", dt.format("%d/%m/%Y, %H:%M:%S"), rem_us))
}

/// parse a wall clock time of the form `HH:MM:SS` or `HH:MM`
pub fn parse_local_time (s: &str)->Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str( s, "%H:%M:%S").or_else( |_| NaiveTime::parse_from_str( s, "%H:%M")).ok()
}

/// seconds since UTC midnight for a local wall clock time on the given local date.
/// This fails (None) for local times that fall into a DST gap
pub fn utc_secs_since_midnight_on (date: NaiveDate, local_time: NaiveTime)->Option<u32> {
    let ndt = NaiveDateTime::new( date, local_time);
    let ldt = Local.from_local_datetime(&ndt).earliest()?;
    Some( ldt.with_timezone(&Utc).num_seconds_from_midnight())
}

/// seconds since UTC midnight for a local wall clock time today
pub fn utc_secs_since_midnight (local_time: NaiveTime)->Option<u32> {
    utc_secs_since_midnight_on( local_now().date_naive(), local_time)
}

//--- support for serde

pub fn deserialize_duration <'a,D>(deserializer: D) -> Result<Duration,D::Error>
    where D: Deserializer<'a>
{
    String::deserialize(deserializer).and_then( |string| {
        parse(string.as_str())
            .map_err( |e| DeError::custom(format!("{:?}",e)))
    })
}

pub fn deserialize_optional_duration <'a,D>(deserializer: D) -> Result<Option<Duration>,D::Error>
    where D: Deserializer<'a>
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    if let Some(s) = s {
        let d =  parse(s.as_str()).map_err( |e| DeError::custom(format!("{:?}",e)))?;
        return Ok( Some(d) )
    }

    Ok(None)
}

pub fn serialize_duration<S: Serializer> (dur: &Duration, s: S) -> Result<S::Ok, S::Error>  {
    let dfm = format!("{:?}", dur);
    s.serialize_str(&dfm)
}

pub fn serialize_optional_duration<S>(dur: &Option<Duration>, s: S) -> Result<S::Ok, S::Error>
    where S: Serializer,
{
    if let Some(d) = dur {
        let dfm = format!("{:?}", d);
        return s.serialize_str(&dfm);
    }
    s.serialize_none()
}
