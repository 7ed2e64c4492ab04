// Copyright (c) 2025 Pocketsync Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{account, category, dec, instant, july, mem_conn, tx};
use pocketsync::models::{Direction, PendingOp, Period};
use pocketsync::{backup, store};

#[test]
fn account_roundtrip_and_overwrite() {
    let conn = mem_conn();
    let mut a = account(1, "500.00");
    store::upsert_account(&conn, &a).unwrap();
    a.balance = dec("400.00");
    store::upsert_account(&conn, &a).unwrap();

    let fetched = store::fetch_account(&conn, 1).unwrap().unwrap();
    assert_eq!(fetched.balance, dec("400.00"));
    assert_eq!(fetched.currency, "RUB");
    assert_eq!(store::fetch_accounts(&conn).unwrap().len(), 1);
}

#[test]
fn category_direction_survives_storage() {
    let conn = mem_conn();
    store::upsert_category(&conn, &category(1, Direction::Income)).unwrap();
    store::upsert_category(&conn, &category(2, Direction::Outcome)).unwrap();

    let cats = store::fetch_categories(&conn).unwrap();
    assert_eq!(cats[0].direction, Direction::Income);
    assert_eq!(cats[1].direction, Direction::Outcome);
}

#[test]
fn range_query_is_bounded_and_newest_first() {
    let conn = mem_conn();
    store::upsert_transaction(&conn, &tx(1, "10", instant(2025, 7, 5, 9))).unwrap();
    store::upsert_transaction(&conn, &tx(2, "20", instant(2025, 7, 20, 9))).unwrap();
    store::upsert_transaction(&conn, &tx(3, "30", instant(2025, 8, 1, 9))).unwrap();

    let in_july = store::fetch_transactions_in(&conn, &july()).unwrap();
    let ids: Vec<i64> = in_july.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![2, 1]);
}

#[test]
fn replace_range_mirrors_the_new_set_exactly() {
    let conn = mem_conn();
    // Stale in-range entry the server no longer knows about.
    store::upsert_transaction(&conn, &tx(1, "10", instant(2025, 7, 5, 9))).unwrap();
    // Out-of-range entry that must survive untouched.
    store::upsert_transaction(&conn, &tx(9, "90", instant(2025, 6, 1, 9))).unwrap();

    let fresh = vec![
        tx(2, "20", instant(2025, 7, 10, 9)),
        tx(3, "30", instant(2025, 7, 12, 9)),
    ];
    store::replace_transactions_in(&conn, &july(), &fresh).unwrap();

    let in_july = store::fetch_transactions_in(&conn, &july()).unwrap();
    let mut ids: Vec<i64> = in_july.iter().map(|t| t.id).collect();
    ids.sort();
    assert_eq!(ids, vec![2, 3]);
    assert!(store::fetch_transaction(&conn, 9).unwrap().is_some());
}

#[test]
fn replace_range_with_empty_set_clears_the_window() {
    let conn = mem_conn();
    store::upsert_transaction(&conn, &tx(1, "10", instant(2025, 7, 5, 9))).unwrap();
    store::replace_transactions_in(&conn, &july(), &[]).unwrap();
    assert!(store::fetch_transactions_in(&conn, &july()).unwrap().is_empty());
}

#[test]
fn enqueue_same_id_overwrites_prior_snapshot() {
    let conn = mem_conn();
    backup::enqueue(&conn, PendingOp::Update, &tx(7, "10", instant(2025, 7, 5, 9))).unwrap();
    backup::enqueue(&conn, PendingOp::Update, &tx(7, "25", instant(2025, 7, 5, 9))).unwrap();

    let all = backup::all(&conn).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].op, PendingOp::Update);
    assert_eq!(all[0].transaction.amount, dec("25"));
}

#[test]
fn editing_an_unconfirmed_create_keeps_the_create_tag() {
    let conn = mem_conn();
    backup::enqueue(&conn, PendingOp::Create, &tx(7, "10", instant(2025, 7, 5, 9))).unwrap();
    backup::enqueue(&conn, PendingOp::Update, &tx(7, "25", instant(2025, 7, 5, 9))).unwrap();

    // The server has never seen id 7, so replay must still issue a create.
    let all = backup::all(&conn).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].op, PendingOp::Create);
    assert_eq!(all[0].transaction.amount, dec("25"));
}

#[test]
fn deleting_an_unconfirmed_create_removes_the_entry() {
    let conn = mem_conn();
    backup::enqueue(&conn, PendingOp::Create, &tx(7, "10", instant(2025, 7, 5, 9))).unwrap();
    backup::enqueue(&conn, PendingOp::Delete, &tx(7, "10", instant(2025, 7, 5, 9))).unwrap();

    assert!(backup::all(&conn).unwrap().is_empty());
}

#[test]
fn clear_removes_only_the_given_ids() {
    let conn = mem_conn();
    backup::enqueue(&conn, PendingOp::Create, &tx(1, "10", instant(2025, 7, 5, 9))).unwrap();
    backup::enqueue(&conn, PendingOp::Create, &tx(2, "20", instant(2025, 7, 6, 9))).unwrap();
    backup::enqueue(&conn, PendingOp::Create, &tx(3, "30", instant(2025, 7, 7, 9))).unwrap();

    backup::clear(&conn, &[1, 3]).unwrap();
    let remaining = backup::all(&conn).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].transaction.id, 2);
}

#[test]
fn period_day_bounds_contain_the_whole_day() {
    let period = Period::day_of(instant(2025, 7, 16, 15));
    assert!(period.contains(instant(2025, 7, 16, 0)));
    assert!(period.contains(instant(2025, 7, 16, 23)));
    assert!(!period.contains(instant(2025, 7, 17, 0)));
    assert_eq!(period.start_param(), "2025-07-16");
    assert_eq!(period.end_param(), "2025-07-16");
}
