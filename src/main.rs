//! # tzfind CLI
//!
//! Parses arguments and dispatches to the requested lookup function.

mod cli;

use std::path::PathBuf;

use tzfind::{Finder, FinderLight};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = cli::build_cli().get_matches();

    let lng = *matches.get_one::<f64>("LNG").expect("required");
    let lat = *matches.get_one::<f64>("LAT").expect("required");
    let data_dir = matches.get_one::<PathBuf>("data").expect("required");
    let function: &str = matches.get_one::<String>("function").expect("has a default");
    let verbose = matches.get_flag("verbose");
    let resident = matches.get_flag("resident");

    if verbose {
        println!("{}", "=".repeat(60));
        println!("TIMEZONEFINDER LOOKUP DETAILS");
        println!("{}", "-".repeat(60));
        println!("Coordinates: {lat:.6}°, {lng:.6}° (lat, lng)");
        println!("Function: {function}");
    }

    let tz = match function {
        "timezone_at" => Finder::open(data_dir, resident)?.timezone_at(lng, lat)?,
        "certain_timezone_at" => Finder::open(data_dir, resident)?.certain_timezone_at(lng, lat)?,
        "light.timezone_at" => FinderLight::open(data_dir)?.timezone_at(lng, lat)?,
        "light.timezone_at_land" => {
            let light = FinderLight::open(data_dir)?;
            light
                .timezone_at(lng, lat)?
                .filter(|name| !tzfind::finder::is_ocean_zone(name))
        }
        "timezone_at_land" => Finder::open(data_dir, resident)?.timezone_at_land(lng, lat)?,
        other => unreachable!("clap restricts --function to a known set, got {other}"),
    };

    if verbose {
        match &tz {
            Some(name) => println!("Result: Found timezone '{name}'"),
            None => println!("Result: No timezone found at this location"),
        }
        println!("{}", "=".repeat(60));
    } else {
        println!("{}", tz.unwrap_or_default());
    }

    Ok(())
}
