// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyface Inc.

//! Utility helpers

pub mod math;
