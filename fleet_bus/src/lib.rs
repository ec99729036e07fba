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

//! the message bus seam of fleet applications.
//!
//! The actual publish/subscribe transport (e.g. an MQTT broker connection) is provided by the environment and
//! only has to implement [`BusClient`]. We ship [`LocalBus`], an in-process implementation based on a tokio
//! broadcast channel that is used to wire components within one process (and in tests). It can be attached to
//! an external broker through the line [`bridge`].

use std::{fmt, sync::{Arc, atomic::{AtomicBool, Ordering}}};
use async_trait::async_trait;
use serde::{Serialize,Deserialize};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug,warn};

pub mod errors;
use errors::{FleetBusError,Result};

pub mod topics;
use topics::TopicPattern;

pub mod commands;
pub mod bridge;

/// where a bus message entered the process
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum Origin {
    Local,   // published by one of our components
    Remote,  // injected from an external transport
}

/// the published unit. Payloads are JSON text
#[derive(Debug,Clone,PartialEq)]
pub struct BusMsg {
    pub topic: String,
    pub payload: String,
    pub origin: Origin,
}

impl BusMsg {
    pub fn new (topic: impl ToString, payload: impl ToString)->Self {
        BusMsg{ topic: topic.to_string(), payload: payload.to_string(), origin: Origin::Local }
    }

    pub fn remote (topic: impl ToString, payload: impl ToString)->Self {
        BusMsg{ topic: topic.to_string(), payload: payload.to_string(), origin: Origin::Remote }
    }

    pub fn is_remote (&self)->bool { self.origin == Origin::Remote }
}

impl fmt::Display for BusMsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "{} {}", self.topic, self.payload)
    }
}

#[derive(Deserialize,Serialize,Debug,Clone)]
#[serde(default)]
pub struct BusConfig {
    pub topic_root: String,        // first segment of all fleet topics
    pub correction_topic: String,  // where RTCM frames are published
    pub capacity: usize,           // max number of queued messages per subscriber
}

impl Default for BusConfig {
    fn default()->Self {
        BusConfig {
            topic_root: "fleet".to_string(),
            correction_topic: "fleet/correction-data".to_string(),
            capacity: 1024,
        }
    }
}

/// the publish/subscribe client abstraction
#[async_trait]
pub trait BusClient: Send + Sync {
    fn is_connected (&self)->bool;

    async fn publish (&self, topic: &str, payload: String)->Result<()>;

    async fn subscribe (&self, pattern: &str)->Result<Subscription>;

    /// one subscription for several topic patterns
    async fn subscribe_any (&self, patterns: &[String])->Result<Subscription>;
}

/// serialize and publish
pub async fn publish_json<T> (bus: &dyn BusClient, topic: &str, payload: &T)->Result<()> where T: Serialize + ?Sized {
    let payload = serde_json::to_string( payload)?;
    bus.publish( topic, payload).await
}

/// a filtered receiver for bus messages. A message is received if it matches any of our patterns
pub struct Subscription {
    patterns: Vec<TopicPattern>,
    rx: broadcast::Receiver<BusMsg>,
}

impl Subscription {
    pub fn new (patterns: Vec<TopicPattern>, rx: broadcast::Receiver<BusMsg>)->Self {
        Subscription{ patterns, rx }
    }

    pub fn patterns (&self)->&[TopicPattern] { self.patterns.as_slice() }

    pub fn matches (&self, topic: &str)->bool {
        self.patterns.iter().any( |p| p.matches( topic))
    }

    /// wait for the next message that matches our pattern. Returns None if the bus was dropped.
    /// Lagging subscribers lose the oldest messages (which is reported but not an error)
    pub async fn recv (&mut self)->Option<BusMsg> {
        loop {
            match self.rx.recv().await {
                Ok(msg) => if self.matches( &msg.topic) { return Some(msg) },
                Err(RecvError::Lagged(n)) => warn!("subscription {:?} lagged, {} messages lost", self.patterns, n),
                Err(RecvError::Closed) => return None
            }
        }
    }

    /// non-blocking variant of recv
    pub fn try_recv (&mut self)->Option<BusMsg> {
        use broadcast::error::TryRecvError;
        loop {
            match self.rx.try_recv() {
                Ok(msg) => if self.matches( &msg.topic) { return Some(msg) },
                Err(TryRecvError::Lagged(n)) => warn!("subscription {:?} lagged, {} messages lost", self.patterns, n),
                Err(_) => return None
            }
        }
    }
}

/// in-process bus
#[derive(Clone)]
pub struct LocalBus {
    tx: broadcast::Sender<BusMsg>,
    connected: Arc<AtomicBool>,
}

impl LocalBus {
    pub fn new (config: &BusConfig)->Self {
        let (tx,_) = broadcast::channel( config.capacity.max(1));
        LocalBus{ tx, connected: Arc::new( AtomicBool::new(true)) }
    }

    pub fn connect (&self) { self.connected.store( true, Ordering::Relaxed) }
    pub fn disconnect (&self) { self.connected.store( false, Ordering::Relaxed) }

    /// deliver a message that came in from outside (e.g. through a bridge). This does not require connection state.
    /// Injected messages are always tagged as remote so that bridges do not send them back out
    pub fn inject (&self, mut msg: BusMsg) {
        msg.origin = Origin::Remote;
        if self.tx.send( msg).is_err() {
            debug!("no subscribers for injected message");
        }
    }
}

impl Default for LocalBus {
    fn default()->Self { LocalBus::new( &BusConfig::default()) }
}

#[async_trait]
impl BusClient for LocalBus {
    fn is_connected (&self)->bool {
        self.connected.load( Ordering::Relaxed)
    }

    async fn publish (&self, topic: &str, payload: String)->Result<()> {
        if !self.is_connected() { return Err( FleetBusError::NotConnected) }

        // no subscribers is not an error - publishing is fire-and-forget
        if self.tx.send( BusMsg{ topic: topic.to_string(), payload, origin: Origin::Local }).is_err() {
            debug!("no subscribers for {}", topic);
        }
        Ok(())
    }

    async fn subscribe (&self, pattern: &str)->Result<Subscription> {
        let pattern = TopicPattern::parse( pattern)?;
        Ok( Subscription::new( vec![pattern], self.tx.subscribe()))
    }

    async fn subscribe_any (&self, patterns: &[String])->Result<Subscription> {
        let patterns = patterns.iter().map( |p| TopicPattern::parse(p)).collect::<Result<Vec<_>>>()?;
        Ok( Subscription::new( patterns, self.tx.subscribe()))
    }
}
