// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::{Path, PathBuf};
use std::process;

use clap::{value_t, App, Arg, ArgMatches};
use failure::{err_msg, Error};
use pnmcarve::pnm::{self, PnmFormat};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn is_seam_count(value: String) -> Result<(), String> {
    value
        .parse::<u32>()
        .map(|_| ())
        .map_err(|_| format!("{:?} is not a non-negative whole number", value))
}

fn init_logging(verbosity: u64) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pnmcarve={}", level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(matches: &ArgMatches) -> Result<PathBuf, Error> {
    let input = matches
        .value_of_os("image")
        .map(Path::new)
        .ok_or_else(|| err_msg("no image given"))?;
    let vertical = value_t!(matches, "vertical", u32)?;
    let horizontal = value_t!(matches, "horizontal", u32)?;

    let format = PnmFormat::from_path(input)?;
    let mut image = pnm::read_file(input)?;
    image.carve(vertical, horizontal)?;

    let output = matches
        .value_of_os("output")
        .map(PathBuf::from)
        .unwrap_or_else(|| pnm::processed_path(input, format, vertical, horizontal));
    pnm::write_file(&output, &image)?;
    info!(output = %output.display(), "wrote carved image");
    Ok(output)
}

fn main() {
    let matches = App::new("pnmcarve")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Seam carving for plain-text portable graymaps and pixmaps")
        .arg(
            Arg::with_name("image")
                .help("The .pgm or .ppm image to carve")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("vertical")
                .help("How many vertical seams to remove (narrows the image)")
                .required(true)
                .validator(is_seam_count)
                .index(2),
        )
        .arg(
            Arg::with_name("horizontal")
                .help("How many horizontal seams to remove (shortens the image)")
                .required(true)
                .validator(is_seam_count)
                .index(3),
        )
        .arg(
            Arg::with_name("output")
                .help("Where to write the result [default: <name>_processed_<V>_<H>.<ext>]")
                .short("o")
                .long("output")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .help("Log more; repeat for more detail")
                .short("v")
                .long("verbose")
                .multiple(true),
        )
        .get_matches();

    init_logging(matches.occurrences_of("verbose"));

    match run(&matches) {
        Ok(output) => println!("New image generated: {}", output.display()),
        Err(err) => {
            eprintln!("pnmcarve: {}", err);
            for cause in err.iter_causes() {
                eprintln!("  caused by: {}", cause);
            }
            process::exit(1);
        }
    }
}
