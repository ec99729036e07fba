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

/// support for converting local planar offsets (as used in mission files) into geographic coordinates.
///
/// Mission waypoints are given in meters east (x) and north (y) of a reference point, which is
/// normally the position of the correction base station. The conversion is a flat earth
/// (equirectangular) approximation around that reference. It is only meaningful for offsets that
/// are small compared to the earth radius (a few tens of km) - accuracy degrades silently beyond
/// that, there is no range check. This is not a geodesic computation.

use std::fmt;
use serde::{Serialize,Deserialize};

use crate::{cos, deg, rad};
use crate::geo_constants::EQATORIAL_EARTH_RADIUS;

/// a geodetic position in degrees
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct GeoPoint {
    #[serde(alias="lat")]
    pub latitude: f64,
    #[serde(alias="lon", alias="long")]
    pub longitude: f64,
}

impl GeoPoint {
    pub fn from_lat_lon_degrees (latitude: f64, longitude: f64)->Self {
        GeoPoint{ latitude, longitude }
    }

    pub fn is_nan (&self)->bool { self.latitude.is_nan() || self.longitude.is_nan() }

    /// the point at given local east/north offset (in meters) of self
    pub fn offset_by (&self, x: f64, y: f64)->GeoPoint {
        to_geo( x, y, self)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.latitude, self.longitude)
    }
}

/// latitude change in degrees for a northward offset of `y` meters
#[inline]
pub fn latitude_delta (y: f64)->f64 {
    deg( y / EQATORIAL_EARTH_RADIUS)
}

/// longitude change in degrees for an eastward offset of `x` meters at given reference latitude (degrees).
/// This grows with 1/cos(lat) and is infinite at the poles
#[inline]
pub fn longitude_delta (x: f64, ref_lat: f64)->f64 {
    deg( x / (EQATORIAL_EARTH_RADIUS * cos( rad(ref_lat))))
}

/// convert a local east (`x`) / north (`y`) offset in meters into a geographic position relative to `reference`.
/// Non-numeric (NaN) input propagates into the result
pub fn to_geo (x: f64, y: f64, reference: &GeoPoint)->GeoPoint {
    GeoPoint {
        latitude: reference.latitude + latitude_delta(y),
        longitude: reference.longitude + longitude_delta(x, reference.latitude)
    }
}
