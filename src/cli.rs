//! # Command Line Interface
//!
//! Builds the `tzfind` argument parser. Dispatch lives in `main`.

use clap::{arg, crate_version, Command};

pub fn build_cli() -> Command {
    let long_help = "tzfind looks up the timezone at a longitude/latitude pair against an \
offline data directory built from timezone boundary shapefiles.
Set RUST_LOG to control logging verbosity (trace,debug,info,warn,error).

Examples:
---------
Exact lookup:            `tzfind -d ./data 13.4050 52.5200`
Approximate lookup:      `tzfind -d ./data -f light.timezone_at 13.4050 52.5200`
Land-only, exact:        `tzfind -d ./data -f timezone_at_land 13.4050 52.5200`";

    Command::new("tzfind")
        .about("Offline point-in-timezone lookup")
        .after_long_help(long_help)
        .version(crate_version!())
        .arg(arg!(<LNG> "longitude to query, in degrees").value_parser(clap::value_parser!(f64)))
        .arg(arg!(<LAT> "latitude to query, in degrees").value_parser(clap::value_parser!(f64)))
        .arg(
            arg!(-d --data <DIR> "path to the timezone data directory")
                .required(true)
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            arg!(-f --function <NAME> "function to call: \
timezone_at = Finder::timezone_at, certain_timezone_at = Finder::certain_timezone_at, \
light.timezone_at = FinderLight::timezone_at, light.timezone_at_land = FinderLight::timezone_at_land, \
timezone_at_land = Finder::timezone_at_land")
                .value_parser([
                    "timezone_at",
                    "certain_timezone_at",
                    "light.timezone_at",
                    "light.timezone_at_land",
                    "timezone_at_land",
                ])
                .default_value("timezone_at"),
        )
        .arg(arg!(-v --verbose "print lookup details in addition to the result").action(clap::ArgAction::SetTrue))
        .arg(
            arg!(-r --resident "fully decode boundary coordinates into memory instead of memory-mapping them")
                .action(clap::ArgAction::SetTrue),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_required_positional_and_data_dir() {
        let matches = build_cli()
            .try_get_matches_from(["tzfind", "-d", "./data", "13.405", "52.52"])
            .unwrap();
        assert_eq!(*matches.get_one::<f64>("LNG").unwrap(), 13.405);
        assert_eq!(*matches.get_one::<f64>("LAT").unwrap(), 52.52);
        assert_eq!(matches.get_one::<String>("function").unwrap(), "timezone_at");
    }

    #[test]
    fn rejects_unknown_function_id() {
        let result = build_cli().try_get_matches_from(["tzfind", "-d", "./data", "-f", "bogus", "0.0", "0.0"]);
        assert!(result.is_err());
    }

    #[test]
    fn missing_data_dir_is_an_error() {
        let result = build_cli().try_get_matches_from(["tzfind", "0.0", "0.0"]);
        assert!(result.is_err());
    }
}
