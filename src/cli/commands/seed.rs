use crate::seed::{DEFAULT_HASH_CONCURRENCY, InvoicePolicy, SeedOptions};
use clap::{Arg, ArgAction, ArgMatches, Command};

pub const ARG_SKIP_EXISTING_INVOICES: &str = "skip-existing-invoices";
pub const ARG_HASH_CONCURRENCY: &str = "hash-concurrency";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_SKIP_EXISTING_INVOICES)
                .long(ARG_SKIP_EXISTING_INVOICES)
                .help("Do not insert fixture invoices that already exist")
                .long_help(
                    "Invoices have database-generated ids, so by default every seeding run adds the fixture invoices again. With this flag an invoice is only inserted when no row with the same customer, amount, status and date exists.",
                )
                .env("DASHBOARD_SKIP_EXISTING_INVOICES")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(ARG_HASH_CONCURRENCY)
                .long(ARG_HASH_CONCURRENCY)
                .help("Fixture passwords hashed in parallel")
                .default_value("4")
                .env("DASHBOARD_HASH_CONCURRENCY")
                .value_parser(clap::value_parser!(u16).range(1..=64)),
        )
}

#[must_use]
pub fn options(matches: &ArgMatches) -> SeedOptions {
    let policy = if matches.get_flag(ARG_SKIP_EXISTING_INVOICES) {
        InvoicePolicy::SkipExisting
    } else {
        InvoicePolicy::Accumulate
    };
    let concurrency = matches
        .get_one::<u16>(ARG_HASH_CONCURRENCY)
        .map_or(DEFAULT_HASH_CONCURRENCY, |&n| usize::from(n));

    SeedOptions::new()
        .with_invoice_policy(policy)
        .with_hash_concurrency(concurrency)
}
