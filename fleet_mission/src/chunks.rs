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

//! splitting serialized mission documents into bounded chunks

use serde::{Serialize,Deserialize};
use crate::errors::Result;

pub const CHUNK_SIZE: usize = 512;

/// one fragment of a mission document as it goes on the wire
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
#[serde(rename_all="camelCase")]
pub struct MissionChunk {
    pub chunk: usize,
    pub total_chunks: usize,
    pub total_size: usize,
    pub data: String,
    #[serde(default)]
    pub light_sequence_only: bool,
}

/// split `document` into contiguous fragments of at most `chunk_size` bytes, in document order.
/// Fragments always end on char boundaries, which only matters for non-ASCII documents (see
/// [`to_ascii_json`]). An empty document still yields one (empty) chunk
pub fn encode (document: &str, chunk_size: usize)->Vec<MissionChunk> {
    let chunk_size = chunk_size.max(1);
    let total_size = document.len();
    let mut fragments: Vec<&str> = Vec::with_capacity( total_size.div_ceil( chunk_size).max(1));

    let mut start = 0;
    while start < total_size {
        let mut end = (start + chunk_size).min( total_size);
        while !document.is_char_boundary( end) { end -= 1 }
        if end == start { // chunk_size smaller than the char at start
            end = start + 1;
            while !document.is_char_boundary( end) { end += 1 }
        }
        fragments.push( &document[start..end]);
        start = end;
    }
    if fragments.is_empty() { fragments.push( "") }

    let total_chunks = fragments.len();
    fragments.into_iter().enumerate().map( |(i,data)| {
        MissionChunk { chunk: i, total_chunks, total_size, data: data.to_string(), light_sequence_only: false }
    }).collect()
}

/// the inverse of [`encode`]. Returns None if chunks are missing, out of order or inconsistent
pub fn reassemble (chunks: &[MissionChunk])->Option<String> {
    let first = chunks.first()?;
    if chunks.len() != first.total_chunks { return None }

    let mut doc = String::with_capacity( first.total_size);
    for (i,c) in chunks.iter().enumerate() {
        if c.chunk != i || c.total_chunks != first.total_chunks || c.total_size != first.total_size { return None }
        doc.push_str( &c.data);
    }
    if doc.len() == first.total_size { Some(doc) } else { None }
}

/// serialize as JSON that only contains ASCII chars. Non-ASCII chars can only appear within JSON strings
/// and are replaced by `\uXXXX` escapes (surrogate pairs outside the BMP), which makes the byte length of
/// the document the same as its char count on the receiving side
pub fn to_ascii_json<T> (value: &T)->Result<String> where T: Serialize + ?Sized {
    let s = serde_json::to_string( value)?;
    if s.is_ascii() { return Ok(s) }

    let mut out = String::with_capacity( s.len() + 16);
    for c in s.chars() {
        if c.is_ascii() {
            out.push( c);
        } else {
            let mut buf = [0u16; 2];
            for u in c.encode_utf16( &mut buf) {
                out.push_str( &format!("\\u{:04x}", u));
            }
        }
    }
    Ok(out)
}
