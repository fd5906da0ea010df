pub mod config;
pub mod display;
pub mod export;
pub mod logger;
pub mod runner;
pub mod scheduler;

pub use config::Config;
pub use scheduler::{
    Algorithm, CompletionRecord, Process, ProcessGenerator, ProcessSpec, Quantum, ResultSet,
    Simulation, Workload, WorkloadError,
};
