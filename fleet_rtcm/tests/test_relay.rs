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

use std::{sync::Arc, time::Duration};
use tokio::io::AsyncWriteExt;
use serde_json::Value;
use fleet_bus::{BusClient, LocalBus, Subscription};
use fleet_rtcm::{RtcmConfig, relay::RtcmRelay};

// run with "cargo test --test test_relay -- --nocapture"

const TOPIC: &'static str = "fleet/correction-data";

fn frame_bytes (body: &[u8])->Vec<u8> {
    let len = body.len();
    let mut v = vec![ 0xD3, ((len >> 8) & 0x03) as u8, (len & 0xff) as u8 ];
    v.extend_from_slice( body);
    v.extend_from_slice( &[0x01, 0x02, 0x03]);
    v
}

fn msg_data (payload: &str)->Vec<u8> {
    let v: Value = serde_json::from_str( payload).unwrap();
    assert_eq!( v["type"], "rtcm");
    v["data"].as_array().unwrap().iter().map( |b| b.as_u64().unwrap() as u8).collect()
}

#[tokio::test]
async fn test_relay_frames() {
    let bus = LocalBus::default();
    let mut sub = bus.subscribe( TOPIC).await.unwrap();

    let frames = vec![ frame_bytes( &[0x3E, 0xD0, 0xD3, 0x00]), frame_bytes( &[]), frame_bytes( &[0x43; 40]) ];
    let mut input: Vec<u8> = vec![0x42, 0x42];
    for f in &frames { input.extend(f) }

    let config = RtcmConfig{ read_buffer: 5, ..RtcmConfig::default() };
    let relay = RtcmRelay::new( config, TOPIC, Arc::new( bus.clone()));
    relay.run( input.as_slice()).await.unwrap();

    for f in &frames {
        let msg = sub.try_recv().unwrap();
        println!("{msg}");
        assert_eq!( msg.topic, TOPIC);
        assert_eq!( &msg_data( &msg.payload), f);
    }
    assert!( sub.try_recv().is_none());

    let stats = relay.stats();
    assert_eq!( stats.frames_relayed(), 3);
    assert_eq!( stats.frames_dropped(), 0);
    assert_eq!( stats.bytes_received(), input.len() as u64);
    assert!( stats.last_update().is_some());
    assert!( !stats.is_connected());
}

#[tokio::test]
async fn test_disconnected_bus_drops() {
    let bus = LocalBus::default();
    bus.disconnect();

    let input = frame_bytes( &[1,2,3]);
    let relay = RtcmRelay::new( RtcmConfig::default(), TOPIC, Arc::new( bus.clone()));
    relay.run( input.as_slice()).await.unwrap();

    assert_eq!( relay.stats().frames_relayed(), 0);
    assert_eq!( relay.stats().frames_dropped(), 1);
    assert!( relay.stats().last_update().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_disconnect_terminates() {
    let bus = LocalBus::default();
    let relay = RtcmRelay::new( RtcmConfig::default(), TOPIC, Arc::new( bus.clone()));
    let cancel = relay.cancel_token();
    let (tx, rx) = tokio::io::duplex( 64);

    let (res,_) = tokio::join!( relay.run( rx), async move {
        tokio::time::sleep( Duration::from_secs(12)).await;
        cancel.cancel();
    });

    assert!( res.is_ok());
    assert!( !relay.stats().is_connected());
    drop(tx);
}

#[tokio::test]
async fn test_read_error_terminates() {
    let bus = LocalBus::default();
    let relay = RtcmRelay::new( RtcmConfig::default(), TOPIC, Arc::new( bus.clone()));

    let reader = tokio_test_reader();
    assert!( relay.run( reader).await.is_err());
    assert!( !relay.stats().is_connected());
}

/// a reader that delivers one frame and then fails
fn tokio_test_reader ()->impl tokio::io::AsyncRead + Unpin {
    use tokio::io::AsyncReadExt;
    let ok_part: &'static [u8] = &[0xD3, 0x00, 0x00, 0x01, 0x02, 0x03];
    ok_part.chain( FailingReader)
}

struct FailingReader;

impl tokio::io::AsyncRead for FailingReader {
    fn poll_read (self: std::pin::Pin<&mut Self>, _cx: &mut std::task::Context<'_>, _buf: &mut tokio::io::ReadBuf<'_>)->std::task::Poll<std::io::Result<()>> {
        std::task::Poll::Ready( Err( std::io::Error::new( std::io::ErrorKind::BrokenPipe, "port unplugged")))
    }
}

#[tokio::test(start_paused = true)]
async fn test_resync_after_stall() {
    let bus = LocalBus::default();
    let mut sub = bus.subscribe( TOPIC).await.unwrap();

    let config = RtcmConfig{ stall_timeout: Duration::from_secs(5), resync_after: Some( Duration::from_secs(10)), ..RtcmConfig::default() };
    let relay = RtcmRelay::new( config, TOPIC, Arc::new( bus.clone()));
    let (mut tx, rx) = tokio::io::duplex( 4096);
    let good = frame_bytes( &[0x43, 0x50, 1, 2]);
    let good1 = good.clone();

    let (res,_) = tokio::join!( relay.run( rx), async move {
        tx.write_all( &[0xD3, 0x00, 100, 1, 2, 3]).await.unwrap(); // announces 100 bytes that never come
        tokio::time::sleep( Duration::from_secs(30)).await;
        tx.write_all( &good1).await.unwrap();
        drop(tx);
    });
    res.unwrap();

    let msg = sub.try_recv().unwrap();
    assert_eq!( msg_data( &msg.payload), good);
    assert!( sub.try_recv().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_stall_without_resync() {
    let bus = LocalBus::default();
    let mut sub = bus.subscribe( TOPIC).await.unwrap();

    let relay = RtcmRelay::new( RtcmConfig::default(), TOPIC, Arc::new( bus.clone()));
    let (mut tx, rx) = tokio::io::duplex( 4096);
    let good = frame_bytes( &[0x43, 0x50, 1, 2]);

    let (res,_) = tokio::join!( relay.run( rx), async move {
        tx.write_all( &[0xD3, 0x00, 100, 1, 2, 3]).await.unwrap();
        tokio::time::sleep( Duration::from_secs(30)).await;
        tx.write_all( &good).await.unwrap();
        drop(tx);
    });
    res.unwrap();

    // the good frame got swallowed by the stalled one
    assert!( sub.try_recv().is_none());
    assert_eq!( relay.stats().frames_relayed(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_slow_frame_is_not_stalled() {
    let bus = LocalBus::default();
    let mut sub = bus.subscribe( TOPIC).await.unwrap();

    let config = RtcmConfig{ stall_timeout: Duration::from_secs(5), resync_after: Some( Duration::from_secs(10)), ..RtcmConfig::default() };
    let relay = RtcmRelay::new( config, TOPIC, Arc::new( bus.clone()));
    let (mut tx, rx) = tokio::io::duplex( 4096);
    let frame = frame_bytes( &[0x43, 0x50, 1, 2, 3, 4, 5, 6, 7, 8]);
    let frame1 = frame.clone();

    // one byte every 4 sec takes much longer than resync_after, but the frame keeps growing
    let (res,_) = tokio::join!( relay.run( rx), async move {
        for b in &frame1 {
            tx.write_all( &[*b]).await.unwrap();
            tokio::time::sleep( Duration::from_secs(4)).await;
        }
        drop(tx);
    });
    res.unwrap();

    let msg = sub.try_recv().unwrap();
    println!("{msg}");
    assert_eq!( msg_data( &msg.payload), frame);
    assert_eq!( relay.stats().frames_relayed(), 1);
}
