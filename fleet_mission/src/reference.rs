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

//! capture of the base station reference coordinate

use std::fmt;
use async_trait::async_trait;
use serde::{Serialize,Deserialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tracing::{info,warn};
use fleet_common::{BoundingBox, geo::GeoPoint};
use crate::errors::{FleetMissionError, Result};

/// the geographic origin of local mission coordinates. This is captured once per upload and not
/// changed afterwards (there are no mutators)
#[derive(Serialize,Debug,Clone,Copy,PartialEq)]
pub struct BaseStationReference {
    latitude: f64,
    longitude: f64,
}

impl BaseStationReference {
    /// accept the reference if it is within bounds. NaN coordinates are always rejected
    pub fn capture (latitude: f64, longitude: f64, bounds: &BoundingBox)->Result<Self> {
        if bounds.contains( longitude, latitude) {
            Ok( BaseStationReference{ latitude, longitude })
        } else {
            Err( FleetMissionError::ReferenceOutOfBounds{ latitude, longitude, bounds: *bounds })
        }
    }

    pub fn latitude (&self)->f64 { self.latitude }
    pub fn longitude (&self)->f64 { self.longitude }

    pub fn as_geo_point (&self)->GeoPoint {
        GeoPoint::from_lat_lon_degrees( self.latitude, self.longitude)
    }
}

impl fmt::Display for BaseStationReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "({:.7},{:.7})", self.latitude, self.longitude)
    }
}

/// where the reference coordinate comes from (usually the operator)
#[async_trait]
pub trait ReferenceProvider: Send {
    /// returns None if the operator cancelled the entry
    async fn request_reference (&mut self)->Result<Option<GeoPoint>>;
}

/// obtain and validate the reference for one upload operation
pub async fn capture_reference (provider: &mut dyn ReferenceProvider, bounds: &BoundingBox)->Result<BaseStationReference> {
    match provider.request_reference().await? {
        Some(pos) => {
            let reference = BaseStationReference::capture( pos.latitude, pos.longitude, bounds)?;
            info!("base station reference set to {}", reference);
            Ok(reference)
        }
        None => Err( FleetMissionError::ReferenceCaptureAborted)
    }
}

/// a reference that is known upfront (e.g. from the command line)
pub struct FixedReference(pub Option<GeoPoint>);

impl FixedReference {
    pub fn new (latitude: f64, longitude: f64)->Self {
        FixedReference( Some( GeoPoint::from_lat_lon_degrees( latitude, longitude)))
    }

    /// a provider that behaves like a cancelled entry
    pub fn cancelled ()->Self { FixedReference(None) }
}

#[async_trait]
impl ReferenceProvider for FixedReference {
    async fn request_reference (&mut self)->Result<Option<GeoPoint>> {
        Ok( self.0)
    }
}

/// interactive entry of latitude and longitude on a line based terminal. Entries that are not
/// numbers are asked for again, end of input cancels
pub struct PromptReference<R,W> {
    lines: Lines<R>,
    writer: W,
}

impl<R,W> PromptReference<R,W> where R: AsyncBufRead + Unpin + Send, W: AsyncWrite + Unpin + Send {
    pub fn new (reader: R, writer: W)->Self {
        PromptReference{ lines: reader.lines(), writer }
    }

    async fn prompt_value (&mut self, label: &str)->Result<Option<f64>> {
        loop {
            self.writer.write_all( format!("base station {}: ", label).as_bytes()).await?;
            self.writer.flush().await?;

            match self.lines.next_line().await? {
                Some(line) => match line.trim().parse::<f64>() {
                    Ok(v) if !v.is_nan() => return Ok(Some(v)),
                    _ => {
                        warn!("invalid base station {} '{}'", label, line.trim());
                        self.writer.write_all( b"please enter valid coordinates\n").await?;
                    }
                }
                None => return Ok(None)
            }
        }
    }
}

#[async_trait]
impl<R,W> ReferenceProvider for PromptReference<R,W> where R: AsyncBufRead + Unpin + Send, W: AsyncWrite + Unpin + Send {
    async fn request_reference (&mut self)->Result<Option<GeoPoint>> {
        let Some(latitude) = self.prompt_value( "latitude").await? else { return Ok(None) };
        let Some(longitude) = self.prompt_value( "longitude").await? else { return Ok(None) };
        Ok( Some( GeoPoint::from_lat_lon_degrees( latitude, longitude)))
    }
}
