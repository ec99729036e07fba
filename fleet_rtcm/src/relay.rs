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

//! relay of RTCM frames from a serial base station receiver to the fleet correction topic

use std::{sync::{Arc, atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering}}, time::Duration};
use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use tokio::{io::{AsyncRead, AsyncReadExt}, time::{Instant, timeout}};
use tokio_serial::{DataBits, FlowControl, Parity, SerialPortBuilderExt, SerialPortType, SerialStream, StopBits};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use fleet_bus::{BusClient, publish_json};
use crate::{RtcmConfig, RtcmFrame, RtcmFrameParser, errors::{FleetRtcmError, Result}};

/// what we publish for each frame
#[derive(Serialize,Debug)]
pub struct CorrectionMsg<'a> {
    #[serde(rename="type")]
    pub msg_type: &'static str,
    pub data: &'a [u8],
}

impl<'a> CorrectionMsg<'a> {
    pub fn rtcm (frame: &'a RtcmFrame)->Self {
        CorrectionMsg{ msg_type: "rtcm", data: frame.bytes() }
    }
}

/// relay diagnostics. This is shared with whoever displays relay state and only updated by the relay
#[derive(Debug,Default)]
pub struct RelayStats {
    connected: AtomicBool,
    bytes_received: AtomicU64,
    frames_relayed: AtomicU64,
    frames_dropped: AtomicU64,
    last_update: AtomicI64, // epoch millis of last relayed frame, 0 if none
}

impl RelayStats {
    pub fn new ()->Self { RelayStats::default() }

    pub fn is_connected (&self)->bool { self.connected.load(Ordering::Relaxed) }
    pub fn bytes_received (&self)->u64 { self.bytes_received.load(Ordering::Relaxed) }
    pub fn frames_relayed (&self)->u64 { self.frames_relayed.load(Ordering::Relaxed) }
    pub fn frames_dropped (&self)->u64 { self.frames_dropped.load(Ordering::Relaxed) }

    pub fn last_update (&self)->Option<DateTime<Local>> {
        match self.last_update.load(Ordering::Relaxed) {
            0 => None,
            millis => DateTime::<Utc>::from_timestamp_millis(millis).map( |dt| dt.with_timezone(&Local))
        }
    }

    fn set_connected (&self, is_connected: bool) { self.connected.store( is_connected, Ordering::Relaxed) }
    fn add_bytes (&self, n: usize) { self.bytes_received.fetch_add( n as u64, Ordering::Relaxed); }
    fn add_dropped (&self) { self.frames_dropped.fetch_add( 1, Ordering::Relaxed); }

    fn add_relayed (&self) {
        self.frames_relayed.fetch_add( 1, Ordering::Relaxed);
        self.last_update.store( Utc::now().timestamp_millis(), Ordering::Relaxed);
    }
}

/// keeps track of how long the current partial frame did not receive any bytes
#[derive(Debug,Default)]
struct StallMonitor {
    since: Option<Instant>,
    last_bytes: u64,
}

impl StallMonitor {
    /// returns the stall duration if the parser holds a partial frame that did not progress within `limit`.
    /// Each received byte counts as progress, it either extends the partial frame or completes it
    fn check (&mut self, parser: &RtcmFrameParser, now: Instant, limit: Duration)->Option<Duration> {
        let bytes = parser.bytes_received();
        let progressed = bytes != self.last_bytes;
        self.last_bytes = bytes;

        if parser.is_idle() {
            self.since = None;
            return None
        }

        if progressed || self.since.is_none() {
            self.since = Some(now);
            return None
        }

        let stalled = now.duration_since( self.since.unwrap_or(now));
        if stalled >= limit { Some(stalled) } else { None }
    }

    fn clear (&mut self) { self.since = None }
}

#[derive(Debug,Clone,PartialEq)]
pub struct PortInfo {
    pub name: String,
    pub description: String,
}

/// the serial ports we can open
pub fn list_ports ()->Result<Vec<PortInfo>> {
    let ports = tokio_serial::available_ports()?;
    Ok( ports.into_iter().map( |p| {
        let description = match &p.port_type {
            SerialPortType::UsbPort(usb) => format!("VID: {} PID: {}", usb.vid, usb.pid),
            SerialPortType::PciPort => "PCI".to_string(),
            SerialPortType::BluetoothPort => "Bluetooth".to_string(),
            SerialPortType::Unknown => "unknown".to_string(),
        };
        PortInfo{ name: p.port_name, description }
    }).collect())
}

/// open the receiver port (8N1, no flow control)
pub fn open_serial (port: &str, config: &RtcmConfig)->Result<SerialStream> {
    let stream = tokio_serial::new( port, config.baud_rate)
        .data_bits( DataBits::Eight)
        .stop_bits( StopBits::One)
        .parity( Parity::None)
        .flow_control( FlowControl::None)
        .open_native_async()?;
    info!("opened serial port {} at {} baud", port, config.baud_rate);
    Ok(stream)
}

/// open the configured port, or the only one we find if there is no configured port
pub fn open_configured_serial (config: &RtcmConfig)->Result<SerialStream> {
    let port = match &config.port {
        Some(port) => port.clone(),
        None => {
            let mut ports = list_ports()?;
            if ports.len() != 1 {
                return Err( FleetRtcmError::PortNotFound( format!("no unique serial port ({} available)", ports.len())))
            }
            ports.remove(0).name
        }
    };
    open_serial( &port, config)
}

/// reads a byte source, frames RTCM and publishes each frame on the correction topic.
/// The relay owns the source while it runs - it is dropped (releasing the port) on all exit paths
pub struct RtcmRelay {
    config: Arc<RtcmConfig>,
    topic: String,
    bus: Arc<dyn BusClient>,
    stats: Arc<RelayStats>,
    cancel: CancellationToken,
}

impl RtcmRelay {
    pub fn new (config: RtcmConfig, topic: impl ToString, bus: Arc<dyn BusClient>)->Self {
        RtcmRelay {
            config: Arc::new(config),
            topic: topic.to_string(),
            bus,
            stats: Arc::new( RelayStats::new()),
            cancel: CancellationToken::new()
        }
    }

    pub fn stats (&self)->Arc<RelayStats> { self.stats.clone() }

    /// the token to disconnect the relay. Cancelling it terminates a running `run`
    pub fn cancel_token (&self)->CancellationToken { self.cancel.clone() }

    pub fn disconnect (&self) { self.cancel.cancel() }

    /// run until the source reaches EOF, fails or we get disconnected. Read errors terminate the relay
    pub async fn run<R> (&self, mut source: R)->Result<()> where R: AsyncRead + Unpin {
        let mut parser = RtcmFrameParser::new();
        let mut monitor = StallMonitor::default();
        let mut buf = vec![0u8; self.config.read_buffer.max(1)];
        let mut stall_reported = false;

        self.stats.set_connected( true);
        info!("RTCM relay started, publishing to {}", self.topic);

        let result = loop {
            let read = tokio::select! {
                _ = self.cancel.cancelled() => {
                    info!("RTCM relay disconnected");
                    break Ok(())
                }
                res = timeout( self.config.stall_timeout, source.read( &mut buf)) => res
            };

            match read {
                Ok(Ok(0)) => {
                    info!("serial source closed");
                    break Ok(())
                }
                Ok(Ok(len)) => {
                    self.stats.add_bytes( len);
                    for frame in parser.feed( &buf[..len]) {
                        self.publish( &frame).await;
                    }
                }
                Ok(Err(e)) => {
                    error!("serial read failed: {}", e);
                    break Err( e.into())
                }
                Err(_) => {} // read timeout, just check for stalls
            }

            if let Some(stalled) = monitor.check( &parser, Instant::now(), self.config.stall_timeout) {
                if let Some(e) = parser.stall_error( stalled) {
                    if !stall_reported {
                        warn!("{}", e);
                        stall_reported = true;
                    }
                }
                if let Some(resync_after) = self.config.resync_after {
                    if stalled >= resync_after {
                        let n = parser.reset();
                        monitor.clear();
                        warn!("discarded {} bytes of stalled frame, resynchronizing", n);
                    }
                }
            } else {
                stall_reported = false;
            }
        };

        drop( source);
        self.stats.set_connected( false);
        info!("RTCM relay terminated after {} bytes, {} frames", parser.bytes_received(), parser.frames_emitted());
        result
    }

    async fn publish (&self, frame: &RtcmFrame) {
        if !self.bus.is_connected() {
            debug!("bus not connected, dropping {}", frame);
            self.stats.add_dropped();
            return
        }

        match publish_json( self.bus.as_ref(), &self.topic, &CorrectionMsg::rtcm( frame)).await {
            Ok(()) => {
                debug!("relayed {}", frame);
                self.stats.add_relayed();
            }
            Err(e) => {
                warn!("failed to publish {}: {}", frame, e);
                self.stats.add_dropped();
            }
        }
    }
}
