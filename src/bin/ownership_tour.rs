use std::env;
use std::path::Path;
use std::process;

use colored::Colorize;
use cursor_ownership::{tour, TourConfig};

fn main() {
    pretty_env_logger::init();

    let config = match env::args().nth(1) {
        Some(path) => TourConfig::load(Path::new(&path)),
        None => Ok(TourConfig::default()),
    };

    let report = config.and_then(|config| tour::run(&config));
    match report {
        Ok(report) => print!("{}", report.render()),
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            process::exit(1);
        }
    }
}
