// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::{App, AppSettings, Arg, ArgMatches};
use log::{debug, info};
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;
use zfractals::{CompiledFunction, Fractal, FractalError, Options};

const CONFIG: &str = "config";
const FUNC: &str = "func";
const VARY: &str = "vary";
const AMIN: &str = "amin";
const AMAX: &str = "amax";
const BMIN: &str = "bmin";
const BMAX: &str = "bmax";
const MAXITERATIONS: &str = "maxiterations";
const ESCAPERADIUS: &str = "escaperadius";
const WIDTH: &str = "width";
const HEIGHT: &str = "height";
const FILENAME: &str = "filename";
const THREADS: &str = "threads";

const DEFAULT_CONFIG: &str = "config.json";

fn validate_number<T: FromStr>(s: &str, err: &str) -> Result<(), String> {
    match T::from_str(s) {
        Ok(_) => Ok(()),
        Err(_) => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

fn real_arg<'a>(name: &'a str, help: &'a str) -> Arg<'a, 'a> {
    Arg::with_name(name)
        .long(name)
        .takes_value(true)
        .allow_hyphen_values(true)
        .validator(|s| validate_number::<f64>(&s, "Could not parse number"))
        .help(help)
}

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("zfractals")
        .version("0.1.0")
        .about("Escape-time fractal generator")
        .setting(AppSettings::AllowNegativeNumbers)
        .arg(
            Arg::with_name(CONFIG)
                .long(CONFIG)
                .takes_value(true)
                .default_value(DEFAULT_CONFIG)
                .help("JSON file supplying any option not given on the command line"),
        )
        .arg(
            Arg::with_name(FUNC)
                .long(FUNC)
                .takes_value(true)
                .help(
                    "The function used to generate the fractal, over the variables z and c. \
                     Example: z^2 + c, or return z.square().add(c); (the Mandelbrot fractal)",
                ),
        )
        .arg(
            Arg::with_name(VARY)
                .long(VARY)
                .takes_value(true)
                .possible_values(&["z", "c"])
                .help("The variable the pixels vary"),
        )
        .arg(real_arg(AMIN, "Real part at the leftmost pixel"))
        .arg(real_arg(AMAX, "Real part at the right edge"))
        .arg(real_arg(BMIN, "Imaginary part at the first row"))
        .arg(real_arg(BMAX, "Imaginary part at the last edge"))
        .arg(
            Arg::with_name(MAXITERATIONS)
                .long(MAXITERATIONS)
                .takes_value(true)
                .validator(|s| {
                    validate_range::<u32>(
                        &s,
                        1,
                        std::u32::MAX,
                        "Could not parse iteration count",
                        "Iteration count must be at least 1",
                    )
                })
                .help("Iterations per point before it is counted as part of the set"),
        )
        .arg(real_arg(
            ESCAPERADIUS,
            "Distance from the origin at which a point has escaped",
        ))
        .arg(
            Arg::with_name(WIDTH)
                .long(WIDTH)
                .takes_value(true)
                .validator(|s| validate_number::<usize>(&s, "Could not parse image width"))
                .help("Width of the image in pixels"),
        )
        .arg(
            Arg::with_name(HEIGHT)
                .long(HEIGHT)
                .takes_value(true)
                .validator(|s| validate_number::<usize>(&s, "Could not parse image height"))
                .help("Height of the image in pixels"),
        )
        .arg(
            Arg::with_name(FILENAME)
                .long(FILENAME)
                .short("o")
                .takes_value(true)
                .help("Output file; .png is added if missing"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in the renderer"),
        )
        .get_matches()
}

/// Values have already been through clap's validators; a parse failure
/// here still surfaces as an error rather than a panic.
fn value<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<Option<T>, FractalError> {
    match matches.value_of(name) {
        None => Ok(None),
        Some(s) => T::from_str(s).map(Some).map_err(|_| {
            FractalError::InvalidConfiguration(format!("could not parse {} \"{}\"", name, s))
        }),
    }
}

fn command_line_options(matches: &ArgMatches) -> Result<Options, FractalError> {
    Ok(Options {
        func: value(matches, FUNC)?,
        vary: value(matches, VARY)?,
        amin: value(matches, AMIN)?,
        amax: value(matches, AMAX)?,
        bmin: value(matches, BMIN)?,
        bmax: value(matches, BMAX)?,
        maxiterations: value(matches, MAXITERATIONS)?,
        escaperadius: value(matches, ESCAPERADIUS)?,
        width: value(matches, WIDTH)?,
        height: value(matches, HEIGHT)?,
        filename: value(matches, FILENAME)?,
        threads: value(matches, THREADS)?,
    })
}

/// A missing default config file just means everything comes from the
/// command line; a missing file the user named is an error.
fn file_options(matches: &ArgMatches) -> Result<Options, FractalError> {
    let path = matches.value_of(CONFIG).unwrap_or(DEFAULT_CONFIG);
    if matches.occurrences_of(CONFIG) == 0 && !Path::new(path).exists() {
        debug!("no {} found, using command line options only", path);
        return Ok(Options::default());
    }
    debug!("reading options from {}", path);
    Options::from_file(path)
}

fn run(matches: &ArgMatches) -> Result<(), FractalError> {
    let settings = file_options(matches)?
        .merge(command_line_options(matches)?)
        .validate()?;
    let func = CompiledFunction::compile(&settings.func)?;
    let fractal = Fractal::new(settings.fractal, func);

    let start = Instant::now();
    let path = fractal.generate_image(&settings.filename, settings.threads)?;
    let duration = start.elapsed().as_secs_f64();

    info!("wrote {}", path.display());
    println!("Done! ({} s)", duration);
    Ok(())
}

fn main() {
    env_logger::init();
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
