// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyface Inc.

//! Repeat-last-element broadcasting.
//!
//! Shorter parameter sequences are stretched to match a target length by
//! repeating their final element; sequences that are already long enough are
//! left alone (consumers zip, so extra entries are ignored). Repeating the
//! last element of an empty sequence is undefined, hence the error.

use thiserror::Error;

/// Broadcast failure: an input was empty where at least one element is needed
#[derive(Debug, Error)]
pub enum BroadcastError {
    #[error("cannot repeat the last element of the empty '{input}' sequence")]
    EmptyInput { input: &'static str },
}

/// Extend `values` to at least `count` entries by repeating the last one.
pub fn full_list<T: Clone>(
    values: &mut Vec<T>,
    count: usize,
    input: &'static str,
) -> Result<(), BroadcastError> {
    if values.len() >= count {
        return Ok(());
    }
    let last = values
        .last()
        .cloned()
        .ok_or(BroadcastError::EmptyInput { input })?;
    values.resize(count, last);
    Ok(())
}
