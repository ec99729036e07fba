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

use serde_json::{json, Value};
use fleet_mission::chunks::{MissionChunk, encode, reassemble, to_ascii_json, CHUNK_SIZE};

// run with "cargo test --test test_chunks -- --nocapture"

fn doc_of_len (len: usize)->String {
    (0..len).map( |i| (b'a' + (i % 26) as u8) as char).collect()
}

#[test]
fn test_1300_bytes() {
    let doc = doc_of_len( 1300);
    let chunks = encode( &doc, CHUNK_SIZE);

    let lens: Vec<usize> = chunks.iter().map( |c| c.data.len()).collect();
    println!("chunk lengths: {:?}", lens);
    assert_eq!( lens, vec![512, 512, 276]);

    for (i,c) in chunks.iter().enumerate() {
        assert_eq!( c.chunk, i);
        assert_eq!( c.total_chunks, 3);
        assert_eq!( c.total_size, 1300);
        assert!( !c.light_sequence_only);
    }
    assert_eq!( reassemble( &chunks).as_deref(), Some( doc.as_str()));
}

#[test]
fn test_chunk_counts() {
    for len in [1, 511, 512, 513, 1024, 1025, 5000] {
        let doc = doc_of_len( len);
        let chunks = encode( &doc, CHUNK_SIZE);

        assert_eq!( chunks.len(), len.div_ceil( CHUNK_SIZE));
        let last_len = if len % CHUNK_SIZE == 0 { CHUNK_SIZE } else { len % CHUNK_SIZE };
        assert_eq!( chunks.last().unwrap().data.len(), last_len);

        let joined: String = chunks.iter().map( |c| c.data.as_str()).collect();
        assert_eq!( joined, doc);
    }
}

#[test]
fn test_empty_document() {
    let chunks = encode( "", CHUNK_SIZE);
    assert_eq!( chunks.len(), 1);
    assert_eq!( chunks[0].total_chunks, 1);
    assert_eq!( chunks[0].total_size, 0);
    assert!( chunks[0].data.is_empty());
}

#[test]
fn test_non_ascii_boundaries() {
    // 'é' is 2 bytes, so a 3 byte chunk size has to back off to char boundaries
    let doc = "éééé";
    let chunks = encode( doc, 3);
    for c in &chunks { println!("{:?}", c.data) }
    assert!( chunks.iter().all( |c| c.data.len() <= 3));
    assert_eq!( reassemble( &chunks).as_deref(), Some(doc));
}

#[test]
fn test_ascii_json() {
    let v = json!({ "name": "Überflug ✈", "n": 1 });
    let s = to_ascii_json( &v).unwrap();
    println!("{}", s);
    assert!( s.is_ascii());
    assert!( s.contains("\\u00dc"));

    let back: Value = serde_json::from_str( &s).unwrap();
    assert_eq!( back, v);
}

#[test]
fn test_chunk_wire_format() {
    let c = MissionChunk { chunk: 1, total_chunks: 3, total_size: 1300, data: "{\"a\"".to_string(), light_sequence_only: true };
    let s = serde_json::to_string( &c).unwrap();
    println!("{}", s);
    assert_eq!( s, r#"{"chunk":1,"totalChunks":3,"totalSize":1300,"data":"{\"a\"","lightSequenceOnly":true}"#);
}

#[test]
fn test_reassemble_rejects_gaps() {
    let doc = doc_of_len( 1300);
    let mut chunks = encode( &doc, CHUNK_SIZE);
    chunks.remove(1);
    assert!( reassemble( &chunks).is_none());
}
