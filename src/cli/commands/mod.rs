pub mod database;
pub mod logging;
pub mod seed;

use clap::{
    Arg, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

pub const CMD_SERVE: &str = "serve";
pub const CMD_SEED: &str = "seed";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let serve = Command::new(CMD_SERVE)
        .about("Start the HTTP server")
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("DASHBOARD_PORT")
                .value_parser(clap::value_parser!(u16)),
        );
    let serve = seed::with_args(database::with_args(serve));

    let seed_cmd = Command::new(CMD_SEED).about("Create the tables and load fixture rows, then exit");
    let seed_cmd = seed::with_args(database::with_args(seed_cmd));

    let command = Command::new("dashboard")
        .about("Invoice dashboard backend")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(serve)
        .subcommand(seed_cmd);

    logging::with_args(command)
}
