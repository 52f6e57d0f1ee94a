use clap::{Arg, ArgAction, Command};
use owo_colors::OwoColorize;
use std::path::Path;

use olio::templating::{self, RenderOptions};
use olio::{decorating::Decorator, refract};

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let matches = Command::new("olio")
        .version(VERSION)
        .propagate_version(true)
        .about("Renders API Blueprint documentation as styled HTML.")
        .disable_help_subcommand(true)
        .subcommand(
            Command::new("render")
                .about("Render a parse-result file into an HTML page")
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("Write the page to this file instead of standard output."),
                )
                .arg(
                    Arg::new("variables")
                        .long("variables")
                        .default_value("default")
                        .help("Color scheme name (default, flatly, slate)."),
                )
                .arg(
                    Arg::new("no-condense-nav")
                        .long("no-condense-nav")
                        .action(ArgAction::SetTrue)
                        .help("Show every resource in the navigation column."),
                )
                .arg(
                    Arg::new("full-width")
                        .long("full-width")
                        .action(ArgAction::SetTrue)
                        .help("Use the full window width."),
                )
                .arg(
                    Arg::new("verbose")
                        .long("verbose")
                        .action(ArgAction::SetTrue)
                        .help("Enable debug logging."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The parse-result JSON file produced by an API Blueprint parser."),
                ),
        )
        .subcommand(Command::new("config").about("Print the supported theme options as JSON"))
        .get_matches();

    match matches.subcommand() {
        Some(("render", submatches)) => {
            if submatches.get_flag("verbose") {
                tracing_subscriber::fmt()
                    .with_max_level(tracing::Level::DEBUG)
                    .init();
            }

            let filename = submatches
                .get_one::<String>("filename")
                .expect("filename is a required argument");
            let options = RenderOptions {
                variables: submatches
                    .get_one::<String>("variables")
                    .expect("variables has a default")
                    .clone(),
                condense_nav: !submatches.get_flag("no-condense-nav"),
                full_width: submatches.get_flag("full-width"),
            };

            let html = run_render(Path::new(filename), &options);
            match submatches.get_one::<String>("output") {
                Some(output) => {
                    if let Err(error) = std::fs::write(output, html) {
                        fail(&format!("{}: {}", output, error));
                    }
                }
                None => println!("{}", html),
            }
        }
        Some(("config", _)) => {
            let config = templating::config();
            println!(
                "{}",
                serde_json::to_string_pretty(&config).expect("config serialization is infallible")
            );
        }
        _ => {
            println!("usage: olio [COMMAND] ...");
            println!("Try '--help' for more information.");
        }
    }
}

fn run_render(filename: &Path, options: &RenderOptions) -> String {
    let content = match refract::load(filename) {
        Ok(content) => content,
        Err(error) => return fail(&error.to_string()),
    };

    let root = match refract::parse(filename, &content) {
        Ok(root) => root,
        Err(error) => return fail(&format!("{}\n{}", error, error.details)),
    };

    let api = match Decorator::new().decorate(&root) {
        Ok(api) => api,
        Err(error) => return fail(&error.to_string()),
    };

    match templating::render_page(&api, options) {
        Ok(html) => html,
        Err(error) => fail(&error.to_string()),
    }
}

fn fail(message: &str) -> String {
    eprintln!("{}: {}", "error".bright_red(), message);
    std::process::exit(1);
}
