use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use scheduling_comparison::{
    config,
    export, logger,
    runner::{ResultsRunner, RunnerOptions},
    Config, ProcessGenerator, Quantum, Simulation,
};
use std::io;

fn main() -> Result<()> {
    let config = Config::from_args(std::env::args_os()).unwrap_or_else(|err| err.exit());
    logger::init(&config.log_path)?;

    let mut generator = ProcessGenerator::new(config.seed);
    let workload = match &config.workload_path {
        Some(path) => config::load_workload(path)?,
        None => generator.generate(config.processes)?,
    };
    let quantum = Quantum::new(config.quantum);
    let mut simulation = Simulation::new(workload, quantum);

    if config.headless {
        if quantum.is_substituted() {
            eprintln!("note: round robin uses quantum {quantum}");
        }
        simulation.run_all();

        print!(
            "{}",
            export::render_report(simulation.results(), Some(simulation.workload()))
        );
        export::write_report(
            &config.export_path,
            simulation.results(),
            Some(simulation.workload()),
        )?;
        if let Some(json_path) = &config.json_path {
            export::write_json(json_path, simulation.results())?;
        }
        return Ok(());
    }

    execute!(io::stdout(), Clear(ClearType::All))?;

    let options = RunnerOptions {
        processes: config.processes.max(1),
        export_path: config.export_path,
        json_path: config.json_path,
        reveal_interval: config.reveal_interval,
    };
    let mut runner = ResultsRunner::new(simulation, generator, options)
        .context("failed to set up the terminal")?;

    while runner.run()? {}
    drop(runner);

    execute!(io::stdout(), Clear(ClearType::All))?;
    Ok(())
}
