// Copyright (c) 2025 Pocketsync Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, command};

pub fn build_cli() -> Command {
    command!()
        .about("Offline-first personal finance sync engine")
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Initialize the local database"))
        .subcommand(
            Command::new("config")
                .about("API endpoint configuration")
                .subcommand(
                    Command::new("set-url")
                        .about("Set the API base URL")
                        .arg(Arg::new("url").required(true)),
                )
                .subcommand(
                    Command::new("set-token")
                        .about("Set the API bearer token")
                        .arg(Arg::new("token").required(true)),
                )
                .subcommand(Command::new("show").about("Show the current configuration")),
        )
        .subcommand(
            Command::new("account")
                .about("Accounts")
                .subcommand(Command::new("list").about("List accounts (server, cache fallback)"))
                .subcommand(
                    Command::new("show")
                        .about("Show one locally known account")
                        .arg(Arg::new("id").long("id").required(true)),
                )
                .subcommand(
                    Command::new("set")
                        .about("Update an account on the server")
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("balance").long("balance"))
                        .arg(Arg::new("currency").long("currency")),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Categories")
                .subcommand(Command::new("list").about("List categories (server, cache fallback)")),
        )
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand(
                    Command::new("add")
                        .about("Create a transaction")
                        .arg(Arg::new("account").long("account").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("comment").long("comment")),
                )
                .subcommand(
                    Command::new("list")
                        .about("List transactions for a period (today by default)")
                        .arg(Arg::new("from").long("from"))
                        .arg(Arg::new("to").long("to"))
                        .arg(Arg::new("json").long("json").action(ArgAction::SetTrue))
                        .arg(Arg::new("jsonl").long("jsonl").action(ArgAction::SetTrue)),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Update a transaction")
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("comment").long("comment")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(Arg::new("id").long("id").required(true)),
                ),
        )
        .subcommand(Command::new("sync").about("Replay unconfirmed writes against the server"))
        .subcommand(
            Command::new("status")
                .about("Connectivity and pending-queue status")
                .arg(
                    Arg::new("verbose")
                        .long("verbose")
                        .short('v')
                        .action(ArgAction::SetTrue),
                ),
        )
}
