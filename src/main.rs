//! Peg Drop entry point
//!
//! Headless native runner: drives the simulation on a fixed-delay loop,
//! renders each frame to the log and reports which section the ball lands
//! in. Key names typed on stdin (one per line) are fed to the simulation as
//! commands.
//!
//! Usage: `peg-drop [settings.json] [label ...]`

use std::io::BufRead;
use std::sync::mpsc;
use std::time::Duration;

use peg_drop::platform::{MonotonicClock, command_for_key};
use peg_drop::renderer::{LogRenderer, draw_scene};
use peg_drop::sim::{SimEvent, SimState, TickInput, tick};
use peg_drop::{Settings, SimError, Tally};

/// Drops before the runner exits
const RUNS: u32 = 3;
/// Give up on a drop that has not landed after this long (simulated)
const MAX_RUN_DURATION: Duration = Duration::from_secs(60);

const DEFAULT_LABELS: [&str; 5] = ["A", "B", "C", "D", "E"];

/// Simulation plus everything the host loop owns
struct Runner {
    state: SimState,
    renderer: LogRenderer,
    clock: MonotonicClock,
    input: TickInput,
    tally: Tally,
}

impl Runner {
    fn new(settings: Settings, labels: Vec<String>) -> Result<Self, SimError> {
        Ok(Self {
            state: SimState::new(settings, labels)?,
            renderer: LogRenderer::default(),
            clock: MonotonicClock::start(),
            input: TickInput::default(),
            tally: Tally::new(),
        })
    }

    /// Run one tick and draw it; returns the label landed in, if any
    fn step(&mut self) -> Option<String> {
        let input = std::mem::take(&mut self.input);
        tick(&mut self.state, &input, self.clock.now());
        draw_scene(&self.state, &mut self.renderer);

        self.state.events.iter().find_map(|event| match event {
            SimEvent::Landed { label, .. } => Some(label.clone()),
            _ => None,
        })
    }

    fn run(&mut self, commands: &mpsc::Receiver<String>) {
        let interval = self.state.settings.tick_interval();
        let max_ticks = (MAX_RUN_DURATION.as_millis() / interval.as_millis().max(1)) as u64;

        for run in 0..RUNS {
            if run > 0 {
                self.input.rerun = true;
            }

            loop {
                while let Ok(key) = commands.try_recv() {
                    match command_for_key(key.trim()) {
                        Some(command) => self.input.apply(command),
                        None => log::warn!("Unbound key: {:?}", key.trim()),
                    }
                }

                if let Some(label) = self.step() {
                    let count = self.tally.record(&label, self.state.run);
                    println!("Run {}: landed in {} ({} so far)", run + 1, label, count);
                    break;
                }
                if self.state.time_ticks >= max_ticks {
                    log::warn!("Run {} did not land within {:?}", run + 1, MAX_RUN_DURATION);
                    break;
                }

                std::thread::sleep(interval);
            }
        }
    }
}

/// Split arguments into an optional settings file and the labels
fn parse_args(args: &[String]) -> Result<(Settings, Vec<String>), SimError> {
    let (settings, labels) = match args.first() {
        Some(path) if path.ends_with(".json") => (Settings::load_from(path)?, &args[1..]),
        _ => (Settings::default(), args),
    };

    let labels = if labels.is_empty() {
        DEFAULT_LABELS.iter().map(|s| s.to_string()).collect()
    } else {
        labels.to_vec()
    };

    Ok((settings, labels))
}

/// Forward stdin lines to the main loop
fn spawn_key_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn main() {
    env_logger::init();
    log::info!("Peg Drop starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut runner = match parse_args(&args).and_then(|(s, l)| Runner::new(s, l)) {
        Ok(runner) => runner,
        Err(e) => {
            log::error!("Setup failed: {}", e);
            eprintln!("peg-drop: {e}");
            std::process::exit(1);
        }
    };

    let commands = spawn_key_reader();
    runner.run(&commands);

    log::info!("Rendered {} frames", runner.renderer.frames);
    match serde_json::to_string_pretty(&runner.tally) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to write tally: {}", e),
    }
}
