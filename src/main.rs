//! Space Invaders headless runner
//!
//! Drives the simulation with a seeded autopilot instead of a keyboard and
//! reports what happened. Rendering goes to an in-memory draw list and audio
//! to the log.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use space_invaders::Settings;
use space_invaders::audio::{AudioService, LogAudio, SoundLog, SoundType};
use space_invaders::platform::{DrawList, FixedTimestep, FrameClock, InputState};
use space_invaders::sim::Gameplay;

#[derive(Parser, Debug)]
#[command(name = "space-invaders")]
#[command(about = "Run the Space Invaders simulation headless with an autopilot")]
struct Cli {
    /// Balance file (JSON); built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of frames to simulate
    #[arg(long, default_value_t = 3600)]
    frames: u64,
    /// Seed for enemy spawns and the autopilot
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Frame delta in seconds
    #[arg(long, default_value_t = 1.0 / 60.0, value_parser = parse_dt)]
    dt: f32,
    /// Pace frames against the wall clock instead of a fixed delta
    #[arg(long)]
    realtime: bool,
    /// Print the effective settings as JSON and exit
    #[arg(long)]
    print_settings: bool,
}

/// Frame delta must be a finite, non-negative number of seconds
fn parse_dt(s: &str) -> Result<f32, String> {
    let dt: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if !dt.is_finite() || dt < 0.0 {
        return Err(format!("expected a finite delta >= 0, got {s}"));
    }
    Ok(dt)
}

/// Fans each sound out to the log and a tally
struct TeeAudio {
    log: LogAudio,
    tally: SoundLog,
}

impl AudioService for TeeAudio {
    fn play_sound(&mut self, sound: SoundType) {
        self.log.play_sound(sound);
        self.tally.play_sound(sound);
    }
}

/// Wanders left and right, holding fire most of the time
struct Autopilot {
    rng: Pcg32,
    input: InputState,
    hold: u32,
}

impl Autopilot {
    fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed ^ 0xA5A5_A5A5),
            input: InputState::NONE,
            hold: 0,
        }
    }

    fn next_input(&mut self) -> InputState {
        if self.hold == 0 {
            let heading = self.rng.random_range(0..3);
            self.input = InputState {
                left: heading == 0,
                right: heading == 1,
                fire: self.rng.random_bool(0.8),
            };
            self.hold = self.rng.random_range(10..60);
        }
        self.hold -= 1;
        self.input
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };

    if cli.print_settings {
        println!("{}", serde_json::to_string_pretty(&settings)?);
        return Ok(());
    }

    log::info!(
        "Space Invaders starting: {} frames, dt {}, seed {}",
        cli.frames,
        cli.dt,
        cli.seed
    );

    let mut gameplay = Gameplay::new(settings, cli.seed);
    gameplay.initialize();

    let time = FixedTimestep(cli.dt);
    let mut clock = FrameClock::default();
    let mut audio = TeeAudio {
        log: LogAudio,
        tally: SoundLog::new(),
    };
    let mut autopilot = Autopilot::new(cli.seed);
    let mut draw_list = DrawList::new();
    let mut best_score = 0;

    for _ in 0..cli.frames {
        let input = autopilot.next_input();
        let restarts = gameplay.restarts();
        let score = gameplay.player_score();
        if cli.realtime {
            std::thread::sleep(Duration::try_from_secs_f32(cli.dt).unwrap_or(Duration::ZERO));
            clock.tick();
            gameplay.update(&clock, &input, &mut audio);
        } else {
            gameplay.update(&time, &input, &mut audio);
        }
        if gameplay.restarts() > restarts {
            best_score = best_score.max(score);
        }

        draw_list.clear();
        gameplay.render(&mut draw_list);
    }
    best_score = best_score.max(gameplay.player_score());

    log::info!("Simulated {} frames", gameplay.frame());
    println!("frames:      {}", gameplay.frame());
    println!("score:       {}", gameplay.player_score());
    println!("best score:  {}", best_score);
    println!("restarts:    {}", gameplay.restarts());
    println!("on screen:   {} drawables", draw_list.drawables.len());
    for sound in [
        SoundType::BulletFire,
        SoundType::Explosion,
        SoundType::PowerupEnabled,
        SoundType::PowerupDisabled,
    ] {
        println!("{:<12} {}", format!("{:?}:", sound), audio.tally.count(sound));
    }

    Ok(())
}
