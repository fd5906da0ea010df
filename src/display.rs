use crate::{
    runner::{Replay, RunnerEvent},
    scheduler::{Algorithm, Simulation},
};
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use std::{
    io::{self, Stdout},
    sync::mpsc::{self, Receiver, TrySendError},
    thread,
    time::{Duration, Instant},
};
use tui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{BarChart, Block, BorderType, Borders, Cell, Paragraph, Row, Table, Wrap},
    Terminal,
};

pub enum DisplayEvent {
    Input(KeyEvent),
    Tick,
}

const HELP: &str =
    "1-5 run FIFO/SJF/STCF/RR/MLFQ | a run all | g new workload | e export | p pause | r resume | s step | q quit";

/// Ticks that arrive while this many events are pending are dropped, so a key
/// press is never stuck behind a backlog of ticks.
const PENDING_EVENTS: usize = 8;

pub struct DisplayTerminal {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    input_rx: Receiver<DisplayEvent>,
}

impl DisplayTerminal {
    /// Sets up the terminal and an input thread that also emits a
    /// [`DisplayEvent::Tick`] every `tick_rate`.
    pub fn new(tick_rate: Duration) -> Result<Self, io::Error> {
        crossterm::terminal::enable_raw_mode()?;

        let (input_tx, input_rx) = mpsc::sync_channel(PENDING_EVENTS);
        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                match event::poll(timeout) {
                    Ok(true) => {
                        if let Ok(Event::Key(key)) = event::read() {
                            if input_tx.send(DisplayEvent::Input(key)).is_err() {
                                return;
                            }
                        }
                    }
                    Ok(false) => {}
                    Err(err) => {
                        log::error!("failed to poll terminal events: {err}");
                        return;
                    }
                }

                if last_tick.elapsed() >= tick_rate {
                    match input_tx.try_send(DisplayEvent::Tick) {
                        Ok(()) | Err(TrySendError::Full(_)) => {}
                        Err(TrySendError::Disconnected(_)) => return,
                    }
                    last_tick = Instant::now();
                }
            }
        });

        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;

        Ok(Self { terminal, input_rx })
    }

    pub fn draw(
        &mut self,
        simulation: &Simulation,
        replay: &Replay,
        paused: bool,
        status: &str,
    ) -> Result<(), io::Error> {
        let workload = simulation.workload();
        let results = simulation.results();

        self.terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(8),
                    Constraint::Length(4),
                ])
                .split(f.size());

            let header = Paragraph::new(format!(
                "Processes: {} | Total burst: {} | RR quantum: {} | {}",
                workload.len(),
                workload.total_burst(),
                simulation.quantum(),
                if paused { "Paused" } else { "Running" }
            ))
            .style(
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .fg(Color::LightBlue),
            )
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("CPU Scheduler - Multiple Algorithms")
                    .border_type(BorderType::Rounded),
            );
            f.render_widget(header, chunks[0]);

            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Length(20),
                    Constraint::Min(30),
                    Constraint::Length(34),
                ])
                .split(chunks[1]);

            let rows = workload.processes().iter().map(|process| {
                Row::new(vec![
                    Cell::from(format!("P{}", process.pid()))
                        .style(Style::default().add_modifier(Modifier::BOLD)),
                    Cell::from("|"),
                    Cell::from(process.burst_time().to_string()),
                ])
            });
            let table = Table::new(rows)
                .header(
                    Row::new(vec!["PID", "|", "Burst"])
                        .style(Style::default().add_modifier(Modifier::BOLD)),
                )
                .widths(&[
                    Constraint::Length(5),
                    Constraint::Length(1),
                    Constraint::Length(6),
                ])
                .block(
                    Block::default()
                        .title("Generated Processes")
                        .borders(Borders::ALL),
                )
                .style(Style::default().fg(Color::LightGreen))
                .column_spacing(1);
            f.render_widget(table, body[0]);

            let algorithms: Vec<Algorithm> = results.algorithms().collect();
            if algorithms.is_empty() {
                let empty = Paragraph::new("No results available.").block(
                    Block::default()
                        .title("Scheduling Results")
                        .borders(Borders::ALL),
                );
                f.render_widget(empty, body[1]);
            } else {
                let constraints: Vec<Constraint> = algorithms
                    .iter()
                    .map(|_| Constraint::Ratio(1, algorithms.len() as u32))
                    .collect();
                let chart_areas = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints(constraints)
                    .split(body[1]);

                for (algorithm, area) in algorithms.iter().zip(chart_areas) {
                    let labelled: Vec<(String, u64)> = replay
                        .visible(results, *algorithm)
                        .iter()
                        .map(|record| (format!("P{}", record.process_id), record.completion_time))
                        .collect();
                    let data: Vec<(&str, u64)> = labelled
                        .iter()
                        .map(|(label, value)| (label.as_str(), *value))
                        .collect();

                    let chart = BarChart::default()
                        .block(
                            Block::default()
                                .title(algorithm.name())
                                .borders(Borders::ALL),
                        )
                        .data(&data)
                        .bar_width(4)
                        .bar_gap(1)
                        .bar_style(Style::default().fg(Color::LightMagenta))
                        .value_style(
                            Style::default()
                                .fg(Color::Black)
                                .bg(Color::LightMagenta)
                                .add_modifier(Modifier::BOLD),
                        )
                        .label_style(Style::default().fg(Color::White));
                    f.render_widget(chart, area);
                }
            }

            let mut listing = String::new();
            for algorithm in &algorithms {
                listing.push_str(&format!("{algorithm} Scheduling Results\n"));
                for record in replay.visible(results, *algorithm) {
                    listing.push_str(&format!(
                        "  Process {}: Completion Time = {}\n",
                        record.process_id, record.completion_time
                    ));
                }
                if replay.is_complete(results, *algorithm) {
                    if let Some(average) = results.average_completion_time(*algorithm) {
                        listing.push_str(&format!("  Average = {average:.2}\n"));
                    }
                }
            }
            let list = Paragraph::new(listing)
                .style(Style::default().fg(Color::LightGreen))
                .block(Block::default().title("Results").borders(Borders::ALL));
            f.render_widget(list, body[2]);

            let footer = Paragraph::new(format!("{status}\n{HELP}"))
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::TOP));
            f.render_widget(footer, chunks[2]);
        })?;

        Ok(())
    }

    /// Blocks until the next key press or tick.
    pub fn get_input(&self) -> RunnerEvent {
        let event = match self.input_rx.recv() {
            Ok(event) => event,
            // The input thread is gone, so no further input can arrive.
            Err(_) => return RunnerEvent::Quit,
        };

        match event {
            DisplayEvent::Input(key) if key.modifiers.is_empty() => match key.code {
                KeyCode::Char('q') => RunnerEvent::Quit,
                KeyCode::Char('p') => RunnerEvent::Pause,
                KeyCode::Char('r') => RunnerEvent::Resume,
                KeyCode::Char('s') => RunnerEvent::Step,
                KeyCode::Char('a') => RunnerEvent::RunAll,
                KeyCode::Char('g') => RunnerEvent::Generate,
                KeyCode::Char('e') => RunnerEvent::Export,
                KeyCode::Char(digit @ '1'..='5') => {
                    let index = digit as usize - '1' as usize;
                    RunnerEvent::Run(Algorithm::ALL[index])
                }
                _ => RunnerEvent::None,
            },
            DisplayEvent::Input(_) => RunnerEvent::None,
            DisplayEvent::Tick => RunnerEvent::Tick,
        }
    }
}

impl Drop for DisplayTerminal {
    fn drop(&mut self) {
        if let Err(err) = crossterm::terminal::disable_raw_mode() {
            log::error!("failed to restore terminal mode: {err}");
        }
    }
}
