// Copyright (c) 2025 Pocketsync Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::Utc;
use pocketsync::cli;
use pocketsync::utils::period_from_bounds;

#[test]
fn account_show_parses_with_an_id() {
    let m = cli::build_cli()
        .try_get_matches_from(["pocketsync", "account", "show", "--id", "7"])
        .unwrap();
    let Some(("account", sub)) = m.subcommand() else {
        panic!("expected account subcommand");
    };
    let Some(("show", show)) = sub.subcommand() else {
        panic!("expected show subcommand");
    };
    assert_eq!(show.get_one::<String>("id").unwrap(), "7");
}

#[test]
fn tx_list_accepts_json_flags() {
    let m = cli::build_cli()
        .try_get_matches_from(["pocketsync", "tx", "list", "--jsonl"])
        .unwrap();
    let Some(("tx", sub)) = m.subcommand() else {
        panic!("expected tx subcommand");
    };
    let Some(("list", list)) = sub.subcommand() else {
        panic!("expected list subcommand");
    };
    assert!(list.get_flag("jsonl"));
    assert!(!list.get_flag("json"));
}

#[test]
fn period_bounds_cover_both_dates() {
    let period = period_from_bounds(Some("2025-07-01"), Some("2025-07-31")).unwrap();
    assert!(period.start < period.end);
    assert_eq!(
        period.end.signed_duration_since(period.start).num_days(),
        30
    );
}

#[test]
fn period_from_alone_runs_up_to_now() {
    let period = period_from_bounds(Some("2025-07-01"), None).unwrap();
    assert!(period.start < period.end);
    assert!(period.contains(period.end));
}

#[test]
fn period_without_bounds_is_today() {
    let period = period_from_bounds(None, None).unwrap();
    assert!(period.contains(Utc::now()));
}

#[test]
fn period_to_without_from_is_rejected() {
    assert!(period_from_bounds(None, Some("2025-07-31")).is_err());
}
