// Copyright (c) 2025 Pocketsync Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::net::NetworkError;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct State {
    offline: bool,
    consecutive_successes: u32,
    observed: bool,
}

/// Process-wide online/offline flag derived from request outcomes.
///
/// Only transport-level failures flip the flag to offline; application-level
/// HTTP errors (auth, not-found, rate-limit, 5xx) mean the server was
/// reachable and leave it alone. Going back online takes two consecutive
/// successes so a single lucky retry does not clear the flag.
///
/// Advisory only: nothing in the sync path is blocked by this flag.
#[derive(Debug, Clone, Default)]
pub struct NetworkStatus {
    state: Arc<Mutex<State>>,
}

impl NetworkStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report_success(&self) {
        let mut s = self.state.lock().unwrap_or_else(|e| e.into_inner());
        s.observed = true;
        if s.offline {
            s.consecutive_successes += 1;
            if s.consecutive_successes >= 2 {
                s.offline = false;
                s.consecutive_successes = 0;
                tracing::info!("connectivity restored");
            }
        }
    }

    pub fn report_failure(&self, err: &NetworkError) {
        let mut s = self.state.lock().unwrap_or_else(|e| e.into_inner());
        s.observed = true;
        // Any failure breaks the success streak, even a non-connectivity one.
        s.consecutive_successes = 0;
        if err.is_connectivity() && !s.offline {
            s.offline = true;
            tracing::warn!(error = %err, "connectivity lost, switching to offline mode");
        }
    }

    pub fn is_offline(&self) -> bool {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).offline
    }

    /// False until at least one request outcome has been reported. The flag
    /// is per-process state, so before the first report it says nothing
    /// about actual reachability.
    pub fn has_observations(&self) -> bool {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).observed
    }
}
