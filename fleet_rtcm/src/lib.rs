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

use std::{fmt, mem, time::Duration};
use serde::{Serialize,Deserialize};
use fleet_common::datetime::{self, deserialize_duration, serialize_duration, deserialize_optional_duration, serialize_optional_duration};

pub mod errors;
use errors::{FleetRtcmError,Result};

pub mod relay;

pub const RTCM_PREAMBLE: u8 = 0xD3;
pub const HEADER_LEN: usize = 3; // preamble + 6 reserved bits + 10 bit length
pub const CRC_LEN: usize = 3;
pub const LENGTH_MASK: u16 = 0x3FF;

#[derive(Deserialize,Serialize,Debug,Clone)]
#[serde(default)]
pub struct RtcmConfig {
    pub port: Option<String>,     // serial port of the base station receiver
    pub baud_rate: u32,
    pub read_buffer: usize,       // max bytes per serial read

    #[serde(deserialize_with="deserialize_duration", serialize_with="serialize_duration")]
    pub stall_timeout: Duration,  // report incomplete frames that did not progress for this long

    /// discard incomplete frames after they stalled for this long. None means we wait forever
    #[serde(deserialize_with="deserialize_optional_duration", serialize_with="serialize_optional_duration")]
    pub resync_after: Option<Duration>,
}

impl Default for RtcmConfig {
    fn default()->Self {
        RtcmConfig {
            port: None,
            baud_rate: 57600,
            read_buffer: 1024,
            stall_timeout: datetime::secs(5),
            resync_after: None,
        }
    }
}

/// the 10 bit body length of an RTCM v3 header
#[inline]
pub fn decode_length (b1: u8, b2: u8)->usize {
    ((((b1 as u16) << 8) | (b2 as u16)) & LENGTH_MASK) as usize
}

/// a complete, length delimited RTCM v3 frame (header, body and CRC trailer).
/// We do not verify the CRC - this is relayed as an opaque byte sequence
#[derive(Debug,Clone,PartialEq)]
pub struct RtcmFrame(Vec<u8>);

impl RtcmFrame {
    pub fn bytes (&self)->&[u8] { self.0.as_slice() }
    pub fn into_bytes (self)->Vec<u8> { self.0 }
    pub fn len (&self)->usize { self.0.len() }

    pub fn body_len (&self)->usize { decode_length( self.0[1], self.0[2]) }
    pub fn body (&self)->&[u8] { &self.0[HEADER_LEN..self.0.len()-CRC_LEN] }
    pub fn trailer (&self)->&[u8] { &self.0[self.0.len()-CRC_LEN..] }

    /// the 12 bit message number that starts each non-empty body (e.g. 1005 for station coordinates)
    pub fn message_type (&self)->Option<u16> {
        let body = self.body();
        if body.len() >= 2 {
            Some( ((body[0] as u16) << 4) | ((body[1] as u16) >> 4))
        } else {
            None
        }
    }
}

impl fmt::Display for RtcmFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "RtcmFrame( len: {}", self.len())?;
        if let Some(mt) = self.message_type() { write!( f, ", type: {}", mt)?; }
        write!( f, ")")
    }
}

#[derive(Debug,Clone,Copy,PartialEq)]
pub enum ParserState {
    Idle,          // scanning for preamble
    Accumulating,  // collecting frame bytes
}

/// incremental RTCM v3 frame demultiplexer.
///
/// Input can be fed in chunks of arbitrary size - all state (partial frame and its expected length) is kept
/// between calls. There is no resynchronization other than scanning for the preamble in `Idle` state, which
/// means a corrupted length field makes us wait for a frame of the wrong size. Callers can detect this through
/// [`RtcmFrameParser::stall_error`] and explicitly [`RtcmFrameParser::reset`]
#[derive(Debug)]
pub struct RtcmFrameParser {
    state: ParserState,
    buf: Vec<u8>,
    expected_len: Option<usize>, // known once we have the complete header

    bytes_received: u64,
    frames_emitted: u64,
    bytes_skipped: u64, // outside of frames
}

impl RtcmFrameParser {
    pub fn new ()->Self {
        RtcmFrameParser {
            state: ParserState::Idle,
            buf: Vec::with_capacity( HEADER_LEN + LENGTH_MASK as usize + CRC_LEN),
            expected_len: None,
            bytes_received: 0,
            frames_emitted: 0,
            bytes_skipped: 0,
        }
    }

    pub fn state (&self)->ParserState { self.state }
    pub fn is_idle (&self)->bool { self.state == ParserState::Idle }
    pub fn buffered (&self)->usize { self.buf.len() }
    pub fn expected_len (&self)->Option<usize> { self.expected_len }

    pub fn bytes_received (&self)->u64 { self.bytes_received }
    pub fn frames_emitted (&self)->u64 { self.frames_emitted }
    pub fn bytes_skipped (&self)->u64 { self.bytes_skipped }

    /// feed the next chunk of input and return all frames it completed (in input order)
    pub fn feed (&mut self, bytes: &[u8])->Vec<RtcmFrame> {
        let mut frames = Vec::new();
        self.feed_with( bytes, |frame| frames.push(frame));
        frames
    }

    /// feed the next chunk of input and call `f` for each completed frame
    pub fn feed_with<F> (&mut self, bytes: &[u8], mut f: F) where F: FnMut(RtcmFrame) {
        self.bytes_received += bytes.len() as u64;

        for b in bytes {
            if let Some(frame) = self.push_byte( *b) {
                f( frame)
            }
        }
    }

    fn push_byte (&mut self, b: u8)->Option<RtcmFrame> {
        match self.state {
            ParserState::Idle => {
                if b == RTCM_PREAMBLE {
                    self.buf.clear();
                    self.buf.push( b);
                    self.expected_len = None;
                    self.state = ParserState::Accumulating;
                } else {
                    self.bytes_skipped += 1;
                }
                None
            }
            ParserState::Accumulating => {
                self.buf.push( b);

                if self.buf.len() == HEADER_LEN {
                    self.expected_len = Some( decode_length( self.buf[1], self.buf[2]) + HEADER_LEN + CRC_LEN);
                }

                if Some(self.buf.len()) == self.expected_len {
                    self.state = ParserState::Idle;
                    self.expected_len = None;
                    self.frames_emitted += 1;

                    let frame = mem::replace( &mut self.buf, Vec::with_capacity( HEADER_LEN + LENGTH_MASK as usize + CRC_LEN));
                    Some( RtcmFrame(frame))
                } else {
                    None
                }
            }
        }
    }

    /// drop a partial frame and go back to preamble scanning. Returns the number of discarded bytes
    pub fn reset (&mut self)->usize {
        let n = self.buf.len();
        self.buf.clear();
        self.expected_len = None;
        self.state = ParserState::Idle;
        self.bytes_skipped += n as u64;
        n
    }

    /// the diagnostic error for a partial frame that did not progress for `stalled`
    pub fn stall_error (&self, stalled: Duration)->Option<FleetRtcmError> {
        if self.is_idle() {
            None
        } else {
            Some( FleetRtcmError::FramingStall{ buffered: self.buf.len(), expected: self.expected_len, stalled })
        }
    }
}

impl Default for RtcmFrameParser {
    fn default()->Self { RtcmFrameParser::new() }
}
