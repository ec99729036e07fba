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

//! fleet topic naming and MQTT style topic patterns (`+` matches one level, `#` all remaining levels)

use std::fmt;
use crate::{BusConfig, errors::{FleetBusError,Result}};

pub const STATUS: &'static str = "status";
pub const TELEMETRY: &'static str = "telemetry";
pub const STATUS_MESSAGES: &'static str = "status_messages";
pub const COMMAND: &'static str = "command";
pub const MISSION: &'static str = "mission";

#[derive(Debug,Clone,PartialEq)]
enum Level {
    Exact(String),
    Single,  // '+'
    Multi,   // '#'
}

#[derive(Debug,Clone,PartialEq)]
pub struct TopicPattern {
    src: String,
    levels: Vec<Level>,
}

impl TopicPattern {
    pub fn parse (pattern: &str)->Result<Self> {
        if pattern.is_empty() { return Err( FleetBusError::InvalidPattern( pattern.to_string())) }

        let mut levels = Vec::new();
        let mut it = pattern.split('/').peekable();
        while let Some(lvl) = it.next() {
            let level = match lvl {
                "+" => Level::Single,
                "#" => if it.peek().is_none() { Level::Multi } else { return Err( FleetBusError::InvalidPattern( pattern.to_string())) }
                s if s.contains('+') || s.contains('#') => return Err( FleetBusError::InvalidPattern( pattern.to_string())),
                s => Level::Exact( s.to_string())
            };
            levels.push( level);
        }

        Ok( TopicPattern{ src: pattern.to_string(), levels } )
    }

    pub fn as_str (&self)->&str { self.src.as_str() }

    pub fn matches (&self, topic: &str)->bool {
        let mut segs = topic.split('/');
        for level in &self.levels {
            match level {
                Level::Multi => return true,
                Level::Single => if segs.next().is_none() { return false },
                Level::Exact(s) => match segs.next() {
                    Some(seg) if seg == s.as_str() => {}
                    _ => return false
                }
            }
        }
        segs.next().is_none()
    }
}

impl fmt::Display for TopicPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "{}", self.src)
    }
}

/// the vehicle id of a `root/{id}/...` topic
pub fn vehicle_id (topic: &str)->Option<&str> {
    topic.split('/').nth(1).filter( |s| !s.is_empty())
}

/// the trailing segment of a topic, which determines the message category
pub fn category (topic: &str)->&str {
    topic.rsplit('/').next().unwrap_or(topic)
}

/// topic builder for a given topic root
#[derive(Debug,Clone)]
pub struct FleetTopics {
    root: String,
    correction: String,
}

impl FleetTopics {
    pub fn new (config: &BusConfig)->Self {
        FleetTopics{ root: config.topic_root.clone(), correction: config.correction_topic.clone() }
    }

    pub fn root (&self)->&str { self.root.as_str() }

    pub fn status_pattern (&self)->String { format!("{}/+/{}", self.root, STATUS) }
    pub fn telemetry_pattern (&self)->String { format!("{}/+/{}", self.root, TELEMETRY) }
    pub fn status_messages_pattern (&self)->String { format!("{}/+/{}", self.root, STATUS_MESSAGES) }

    /// everything vehicles report (and what we send to them)
    pub fn vehicle_pattern (&self)->String { format!("{}/+/+", self.root) }

    pub fn command (&self)->String { format!("{}/{}", self.root, COMMAND) }
    pub fn vehicle_command (&self, id: &str)->String { format!("{}/{}/{}", self.root, id, COMMAND) }
    pub fn mission (&self, id: &str)->String { format!("{}/{}/{}", self.root, id, MISSION) }

    pub fn correction (&self)->&str { self.correction.as_str() }
}

impl Default for FleetTopics {
    fn default()->Self { FleetTopics::new( &BusConfig::default()) }
}
