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

use std::collections::VecDeque;
use fleet_common::collections::RingDeque;

#[test]
fn test_push_back() {
    println!("--- testing ringbuffer push_to_ringbuffer");
    let mut ring: VecDeque<usize> = VecDeque::with_capacity(5);
    for d in 0..9 {
        ring.push_to_ringbuffer(d, 5);
    }
    println!("{ring:?}");
    assert_eq!( vec![4,5,6,7,8], Vec::from(ring));
}

#[test]
fn test_push_front() {
    println!("--- testing ringbuffer push_front_to_ringbuffer");
    let mut ring: VecDeque<usize> = VecDeque::new();
    for d in 0..9 {
        ring.push_front_to_ringbuffer(d, 5);
    }
    println!("{ring:?}");
    assert_eq!( vec![8,7,6,5,4], Vec::from(ring));
}
