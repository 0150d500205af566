/***************************************/
/*        3rd party libraries          */
/***************************************/
use clap::Parser;
use serde::Deserialize;
use std::fs;

/***************************************/
/*             Constants               */
/***************************************/
const MIN_FLOORS_COUNT: u8 = 5;
const MAX_FLOORS_COUNT: u8 = 20;
const MIN_FLOOR_HEIGHT: f64 = 2.0;
const MAX_FLOOR_HEIGHT: f64 = 10.0;
const MIN_ELEVATOR_SPEED: f64 = 0.1;
const MAX_ELEVATOR_SPEED: f64 = 10.0;
const MIN_DOOR_OPEN_TIME: f64 = 0.5;
const MAX_DOOR_OPEN_TIME: f64 = 120.0;

/***************************************/
/*       Public data structures        */
/***************************************/
/// Validated engine configuration, timeouts already derived to whole
/// milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub n_floors: u8,
    /// Milliseconds to traverse one floor (floor height / elevator speed).
    pub floor_timeout: u64,
    /// Milliseconds the doors stay open.
    pub door_timeout: u64,
}

/// Raw startup parameters, from the command line or a TOML file.
#[derive(Deserialize, Debug, Clone, Copy)]
pub struct Params {
    pub floors_count: u8,
    pub floor_height: f64,
    pub elevator_speed: f64,
    pub doors_open_time: f64,
}

#[derive(Deserialize, Clone)]
struct FileConfig {
    elevator: Params,
}

#[derive(Parser)]
#[clap(name = "elevator-sim", version, about = "Single-car elevator control simulator")]
struct Cli {
    /// Number of floors; integer from 5 to 20.
    floors_count: Option<u8>,
    /// Floor height in meters; decimal from 2.0 to 10.0.
    floor_height: Option<f64>,
    /// Elevator speed in meters per second; decimal from 0.1 to 10.0.
    elevator_speed: Option<f64>,
    /// Time between opening the doors and closing them, in seconds;
    /// decimal from 0.5 to 120.0.
    doors_open_time: Option<f64>,
    /// Read the parameters from a TOML file ([elevator] table) instead of
    /// the command line.
    #[clap(long, value_name = "PATH")]
    config: Option<String>,
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn load_config() -> Result<Config, String> {
    params_from_cli(Cli::parse())?.validate()
}

impl Params {
    pub fn validate(&self) -> Result<Config, String> {
        if !(MIN_FLOORS_COUNT..=MAX_FLOORS_COUNT).contains(&self.floors_count) {
            return Err(format!(
                "invalid number of floors: {} (expected {} to {})",
                self.floors_count, MIN_FLOORS_COUNT, MAX_FLOORS_COUNT
            ));
        }
        if !(MIN_FLOOR_HEIGHT..=MAX_FLOOR_HEIGHT).contains(&self.floor_height) {
            return Err(format!(
                "invalid floor height: {} (expected {} to {})",
                self.floor_height, MIN_FLOOR_HEIGHT, MAX_FLOOR_HEIGHT
            ));
        }
        if !(MIN_ELEVATOR_SPEED..=MAX_ELEVATOR_SPEED).contains(&self.elevator_speed) {
            return Err(format!(
                "invalid elevator speed: {} (expected {} to {})",
                self.elevator_speed, MIN_ELEVATOR_SPEED, MAX_ELEVATOR_SPEED
            ));
        }
        if !(MIN_DOOR_OPEN_TIME..=MAX_DOOR_OPEN_TIME).contains(&self.doors_open_time) {
            return Err(format!(
                "invalid door open time: {} (expected {} to {})",
                self.doors_open_time, MIN_DOOR_OPEN_TIME, MAX_DOOR_OPEN_TIME
            ));
        }
        Ok(Config {
            n_floors: self.floors_count,
            floor_timeout: (self.floor_height * 1000.0 / self.elevator_speed).round() as u64,
            door_timeout: (self.doors_open_time * 1000.0).round() as u64,
        })
    }
}

/***************************************/
/*          Private functions          */
/***************************************/
fn params_from_cli(cli: Cli) -> Result<Params, String> {
    let positionals = (
        cli.floors_count,
        cli.floor_height,
        cli.elevator_speed,
        cli.doors_open_time,
    );
    if let Some(path) = cli.config {
        if positionals != (None, None, None, None) {
            return Err("positional parameters and --config are mutually exclusive".into());
        }
        let contents = fs::read_to_string(&path)
            .map_err(|e| format!("failed to read configuration file {}: {}", path, e))?;
        return params_from_toml(&contents);
    }
    match positionals {
        (Some(floors_count), Some(floor_height), Some(elevator_speed), Some(doors_open_time)) => {
            Ok(Params {
                floors_count,
                floor_height,
                elevator_speed,
                doors_open_time,
            })
        }
        _ => Err(
            "expected <floors_count> <floor_height> <elevator_speed> <doors_open_time> \
             or --config <PATH> (see --help)"
                .into(),
        ),
    }
}

fn params_from_toml(contents: &str) -> Result<Params, String> {
    toml::from_str::<FileConfig>(contents)
        .map(|file| file.elevator)
        .map_err(|e| format!("failed to parse configuration file: {}", e))
}

/***************************************/
/*             Unit tests              */
/***************************************/
