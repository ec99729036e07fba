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

use serde::{Serialize,Deserialize};

pub mod macros;
pub mod collections;
pub mod datetime;
pub mod geo_constants;
pub mod geo;
pub mod config;
pub mod errors;

// syntactic sugar - this is just more readable in many cases
#[inline(always)] pub fn cos(x:f64) -> f64 { x.cos() }
#[inline(always)] pub fn deg(x:f64)->f64 { x.to_degrees() }
#[inline(always)] pub fn rad(x:f64)->f64 { x.to_radians() }

// a global fn that can be used with serde(skip_serializing_if="fleet_common::is_none")
#[inline] pub fn is_none<T> (opt: &Option<T>)->bool { opt.is_none() }

/// a geographic bounding box in degrees
#[derive(Debug,Copy,Clone,Serialize,Deserialize,PartialEq)]
pub struct BoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64
}

impl BoundingBox {
    pub fn new (west: f64, south: f64, east: f64, north: f64)->Self {
        BoundingBox{ west, south, east, north }
    }

    pub fn from_wsen (wsen: &[f64;4])->Self {
        BoundingBox{ west: wsen[0], south: wsen[1], east: wsen[2], north: wsen[3] }
    }

    /// the whole WGS84 domain
    pub fn world ()->Self {
        BoundingBox{ west: -180.0, south: -90.0, east: 180.0, north: 90.0 }
    }

    /// inclusive on all edges. NaN coordinates are never contained
    pub fn contains (&self, lon: f64, lat: f64)->bool {
        lon >= self.west && lon <= self.east && lat >= self.south && lat <= self.north
    }
}

impl Default for BoundingBox {
    fn default()->Self { BoundingBox::world() }
}
