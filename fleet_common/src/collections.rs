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

use std::collections::{BTreeMap,VecDeque};

/// trait to get a snapshot Vec of cloned entries of the receiver collection.
/// Useful to iterate over current entries of a mutable collection
pub trait Snapshot<E> {
    fn snapshot(&self)->Vec<E>;
}

impl<K,V> Snapshot<(K,V)> for BTreeMap<K,V> where K:Clone, V:Clone {
    fn snapshot(&self)->Vec<(K,V)> {
        self.iter().fold( Vec::with_capacity(self.len()), |mut acc,e| {
            acc.push( (e.0.clone(), e.1.clone()));
            acc
        })
    }
}

/// VecDeque extension to use it as a bounded ringbuffer.
/// Note we do not rely on `VecDeque::capacity()` since that is only a lower bound for what got allocated
pub trait RingDeque<T> {
    /// append at the back, evicting from the front if we would exceed `max_len`
    fn push_to_ringbuffer (&mut self, t: T, max_len: usize);

    /// insert at the front (newest first), evicting from the back if we would exceed `max_len`
    fn push_front_to_ringbuffer (&mut self, t: T, max_len: usize);
}

impl<T> RingDeque<T> for VecDeque<T> {
    fn push_to_ringbuffer (&mut self, t: T, max_len: usize) {
        push_to_ringbuffer( self, t, max_len)
    }

    fn push_front_to_ringbuffer (&mut self, t: T, max_len: usize) {
        push_front_to_ringbuffer( self, t, max_len)
    }
}

#[inline]
pub fn push_to_ringbuffer<T> (v: &mut VecDeque<T>, t: T, max_len: usize) {
    v.push_back(t);
    while v.len() > max_len {
        v.pop_front();
    }
}

#[inline]
pub fn push_front_to_ringbuffer<T> (v: &mut VecDeque<T>, t: T, max_len: usize) {
    v.push_front(t);
    v.truncate( max_len);
}
