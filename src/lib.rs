// Copyright (c) 2025 Pocketsync Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod backup;
pub mod cli;
pub mod commands;
pub mod db;
pub mod models;
pub mod net;
pub mod status;
pub mod store;
pub mod sync;
pub mod utils;
