use clap::{
    arg,
    builder::{styling::AnsiColor, Styles},
    crate_description, crate_name, crate_version, Command,
};

fn env_no_color() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|x| !x.is_empty())
}

// Builds the application command line interface defining the commands, subcommands
// and arguments
pub fn build_app(interactive_output: bool) -> Command {
    let color_when = if interactive_output && !env_no_color() {
        clap::ColorChoice::Auto
    } else {
        clap::ColorChoice::Never
    };

    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default())
        .usage(AnsiColor::Green.on_default())
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default());

    Command::new(crate_name!())
        .styles(styles)
        .version(crate_version!())
        .about(crate_description!())
        .color(color_when)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            arg!(-s --set <VALUE> ... "Overrides a setting (key=value).")
                .long_help(
                    "Overrides the value of a setting from the configuration file by supplying \
                    its dotted key path and the new value in (key=value) format \
                    (e.g. status.details.enabled=false).",
                )
                .global(true),
        )
        .subcommand(build_render_command())
        .subcommand(build_config_command())
}

/// Builds the render command
///
/// # Returns
/// A `Command` object representing the render command.
fn build_render_command() -> Command {
    Command::new("render")
        .about("Builds the presence payload for an editor snapshot.")
        .long_about(
            "Reads the editor snapshot (JSON) and prints the resulting presence payload \
            as JSON on the standard output.",
        )
        .arg(
            arg!(--state <FILE> "Editor snapshot file ('-' reads the standard input)")
                .required(true),
        )
        .arg(
            arg!(--previous <FILE> "Payload produced by the previous run")
                .long_help(
                    "Payload produced by a previous run. Only its start timestamp is \
                    used, to keep the elapsed time counter running.",
                ),
        )
        .arg(arg!(--diagnostics <FILE> "Diagnostics of the workspace (JSON)"))
        .arg(arg!(--viewing "The active document is only being viewed"))
        .arg(arg!(--idling "The user is idle"))
        .arg(arg!(--pretty "Pretty prints the payload"))
}

/// Configure the config subcommands
fn build_config_command() -> Command {
    Command::new("config")
        .about("Inspect the presence configuration")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("show")
                .about("Displays the effective configuration.")
                .long_about(
                    "Displays the configuration file merged over the default settings, \
                    including the overrides supplied with --set.",
                ),
        )
        .subcommand(Command::new("path").about("Prints the location of the configuration file."))
        .subcommand(
            Command::new("edit")
                .about("Opens the configuration file.")
                .long_about(
                    "Opens the configuration file in the platform's default text editor, \
                    creating it with the default settings when missing.",
                ),
        )
}
