use crate::scheduler::{ProcessSpec, Workload};
use anyhow::{Context, Result};
use clap::{value_t, App, Arg, ErrorKind};
use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub processes: usize,
    pub quantum: Option<i64>,
    pub seed: Option<u64>,
    pub workload_path: Option<PathBuf>,
    pub export_path: PathBuf,
    pub json_path: Option<PathBuf>,
    pub log_path: PathBuf,
    pub reveal_interval: Duration,
    pub headless: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            processes: 5,
            quantum: None,
            seed: None,
            workload_path: None,
            export_path: PathBuf::from("scheduling_results.txt"),
            json_path: None,
            log_path: PathBuf::from("scheduler.log"),
            reveal_interval: Duration::from_millis(500),
            headless: false,
        }
    }
}

/// Shortest accepted delay between revealed results.
pub const MIN_REVEAL_MS: u64 = 20;

fn reveal_interval_in_range(value: String) -> Result<(), String> {
    match value.parse::<u64>() {
        Ok(ms) if ms >= MIN_REVEAL_MS => Ok(()),
        Ok(ms) => Err(format!("{ms}ms is below the minimum of {MIN_REVEAL_MS}ms")),
        Err(err) => Err(err.to_string()),
    }
}

fn app() -> App<'static, 'static> {
    App::new("scheduling-comparison")
        .about("Compares FIFO, SJF, STCF, RR and MLFQ on one workload")
        .arg(
            Arg::with_name("processes")
                .long("processes")
                .value_name("N")
                .takes_value(true)
                .default_value("5")
                .help("number of generated processes"),
        )
        .arg(
            Arg::with_name("quantum")
                .long("quantum")
                .value_name("Q")
                .takes_value(true)
                .allow_hyphen_values(true)
                .help("round robin quantum; 0 or less means the default of 3"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .value_name("S")
                .takes_value(true)
                .help("seed for workload generation"),
        )
        .arg(
            Arg::with_name("workload")
                .long("workload")
                .value_name("PATH")
                .takes_value(true)
                .help("read the workload from a JSON file instead of generating it"),
        )
        .arg(
            Arg::with_name("export")
                .long("export")
                .value_name("PATH")
                .takes_value(true)
                .default_value("scheduling_results.txt")
                .help("report file"),
        )
        .arg(
            Arg::with_name("json")
                .long("json")
                .value_name("PATH")
                .takes_value(true)
                .help("also write the results as JSON"),
        )
        .arg(
            Arg::with_name("log")
                .long("log")
                .value_name("PATH")
                .takes_value(true)
                .default_value("scheduler.log")
                .help("log file"),
        )
        .arg(
            Arg::with_name("reveal-ms")
                .long("reveal-ms")
                .value_name("MS")
                .takes_value(true)
                .default_value("500")
                .validator(reveal_interval_in_range)
                .help("delay between revealed results"),
        )
        .arg(
            Arg::with_name("headless")
                .long("headless")
                .help("run every algorithm and print the report"),
        )
}

impl Config {
    /// Parses a full command line, program name first. Help requests come
    /// back as an error of kind [`ErrorKind::HelpDisplayed`].
    pub fn from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = app().get_matches_from_safe(args)?;
        let path = |name: &str| matches.value_of_os(name).map(PathBuf::from);

        let config = Config {
            processes: value_t!(matches, "processes", usize)?,
            quantum: match matches.value_of("quantum") {
                Some(_) => Some(value_t!(matches, "quantum", i64)?),
                None => None,
            },
            seed: match matches.value_of("seed") {
                Some(_) => Some(value_t!(matches, "seed", u64)?),
                None => None,
            },
            workload_path: path("workload"),
            export_path: path("export").unwrap_or_default(),
            json_path: path("json"),
            log_path: path("log").unwrap_or_default(),
            reveal_interval: Duration::from_millis(value_t!(matches, "reveal-ms", u64)?),
            headless: matches.is_present("headless"),
        };

        if config.processes == 0 && config.workload_path.is_none() {
            return Err(clap::Error::with_description(
                "--processes must be at least 1",
                ErrorKind::ValueValidation,
            ));
        }

        Ok(config)
    }
}

/// Reads a workload from a JSON array of `{"id": .., "burstTime": ..}`.
pub fn load_workload(path: &Path) -> Result<Workload> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read workload from {}", path.display()))?;
    let specs: Vec<ProcessSpec> = serde_json::from_str(&json)
        .with_context(|| format!("{} is not a valid workload file", path.display()))?;
    let workload = Workload::from_specs(&specs)
        .with_context(|| format!("rejected workload from {}", path.display()))?;

    log::info!("loaded {} processes from {}", workload.len(), path.display());
    Ok(workload)
}
