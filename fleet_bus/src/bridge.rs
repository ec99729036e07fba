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

//! line oriented bridge between a [`LocalBus`] and an external transport.
//! Each line is `<topic> <payload>`, which is the output format of `mosquitto_sub -v` and can be
//! turned into publications with a trivial shell loop on the other side

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug,warn};
use crate::{BusMsg, LocalBus, Subscription, errors::{FleetBusError,Result}};

pub fn parse_line (line: &str)->Result<BusMsg> {
    let line = line.trim();
    match line.split_once(' ') {
        Some((topic,payload)) if !topic.is_empty() => Ok( BusMsg::remote( topic, payload.trim_start()) ),
        _ => Err( FleetBusError::InvalidLine( line.to_string()))
    }
}

/// inject all lines of `reader` into the bus until EOF. Returns number of injected messages
pub async fn feed_lines<R> (reader: R, bus: &LocalBus)->Result<usize> where R: AsyncBufRead + Unpin {
    let mut lines = reader.lines();
    let mut n = 0;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() { continue }

        match parse_line( &line) {
            Ok(msg) => {
                debug!("bridge in: {}", msg.topic);
                bus.inject( msg);
                n += 1;
            }
            Err(e) => warn!("ignoring bridge input: {}", e)
        }
    }
    Ok(n)
}

/// write all locally published messages received by `sub` as lines to `writer` until the bus is closed.
/// Messages that came in through a bridge are skipped, otherwise a broker subscription that covers our
/// outbound topics would loop them back
pub async fn write_lines<W> (mut sub: Subscription, mut writer: W)->Result<usize> where W: AsyncWrite + Unpin {
    let mut n = 0;
    while let Some(msg) = sub.recv().await {
        if msg.is_remote() {
            debug!("not echoing remote message on {}", msg.topic);
            continue
        }
        let line = format!("{} {}\n", msg.topic, msg.payload);
        writer.write_all( line.as_bytes()).await?;
        writer.flush().await?;
        n += 1;
    }
    Ok(n)
}
