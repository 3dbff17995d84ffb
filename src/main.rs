//! Ball Buster headless driver
//!
//! Runs the simulation without a window: an autopilot holds the arrow keys
//! to chase the ball and presses Space whenever the ball is parked. Frames
//! go to a `LogPresenter`, so `RUST_LOG=info` shows the session as it plays.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use ball_buster::sim::{GameState, InputEvent, Key, SessionState};
use ball_buster::{Frame, LogPresenter, Presenter, Settings, SpeedPolicy};

#[derive(Parser, Debug)]
#[command(name = "ball-buster", about = "Run a headless Ball Buster session")]
struct Args {
    /// Number of ticks to simulate
    #[arg(long, default_value_t = 20_000)]
    ticks: u64,

    /// Seed for the autopilot's aim jitter
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Maximum aim error in field units
    #[arg(long, default_value_t = 40.0)]
    jitter: f32,

    /// JSON settings file; missing fields keep their defaults
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Speed policy override: `normalize` or `cap_only`
    #[arg(long)]
    policy: Option<String>,

    /// Print the final frame as JSON
    #[arg(long)]
    dump: bool,
}

/// Steers the paddle toward the ball with a seeded aim error
struct Autopilot {
    rng: Pcg32,
    jitter: f32,
    /// Aim error for the current descent
    aim: Option<f32>,
    left: bool,
    right: bool,
}

impl Autopilot {
    fn new(seed: u64, jitter: f32) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            jitter: jitter.abs(),
            aim: None,
            left: false,
            right: false,
        }
    }

    /// Key transitions to send before the next tick
    fn plan(&mut self, frame: &Frame, paddle_speed: f32) -> Vec<InputEvent> {
        let mut events = Vec::new();

        if frame.phase == SessionState::AwaitingLaunch {
            events.push(InputEvent::KeyDown(Key::Space));
            events.push(InputEvent::KeyUp(Key::Space));
        }

        // Pick a new aim error each time the ball starts falling
        let aim = if frame.ball.vel.y < 0.0 {
            let jitter = self.jitter;
            let rng = &mut self.rng;
            *self.aim.get_or_insert_with(|| rng.random_range(-jitter..=jitter))
        } else {
            self.aim = None;
            0.0
        };

        let target = frame.ball.pos.x + aim;
        let want_left = frame.paddle.x - target > paddle_speed;
        let want_right = target - frame.paddle.x > paddle_speed;

        if want_left != self.left {
            self.left = want_left;
            events.push(if want_left {
                InputEvent::KeyDown(Key::Left)
            } else {
                InputEvent::KeyUp(Key::Left)
            });
        }
        if want_right != self.right {
            self.right = want_right;
            events.push(if want_right {
                InputEvent::KeyDown(Key::Right)
            } else {
                InputEvent::KeyUp(Key::Right)
            });
        }
        events
    }
}

fn load_settings(path: Option<&PathBuf>) -> Result<Settings> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading settings from {}", path.display()))?;
    let settings = Settings::from_json(&json)
        .with_context(|| format!("loading settings from {}", path.display()))?;
    log::info!("Loaded settings from {}", path.display());
    Ok(settings)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    log::info!("Ball Buster (headless) starting...");

    let mut settings = load_settings(args.settings.as_ref())?;
    if let Some(name) = &args.policy {
        settings.speed_policy =
            SpeedPolicy::from_str(name).ok_or_else(|| anyhow!("unknown speed policy {name:?}"))?;
    }
    log::info!("Speed policy: {}", settings.speed_policy.as_str());
    let paddle_speed = settings.paddle_speed;
    let mut state = GameState::new(settings);
    let mut presenter = LogPresenter::new();
    let mut autopilot = Autopilot::new(args.seed, args.jitter);

    let mut frame = Frame::capture(&mut state);
    presenter.present(&frame);

    let mut launches = 0u64;
    for _ in 0..args.ticks {
        for event in autopilot.plan(&frame, paddle_speed) {
            if event == InputEvent::KeyDown(Key::Space) {
                launches += 1;
            }
            state.handle_input(event);
        }
        frame = state.advance();
        presenter.present(&frame);
    }

    log::info!(
        "Finished {} ticks: {} launches, {} bricks destroyed, {} remaining",
        state.tick_count,
        launches,
        presenter.bricks_hidden,
        state.bricks.count()
    );

    if args.dump {
        let json = serde_json::to_string_pretty(&frame).context("serializing final frame")?;
        println!("{json}");
    }

    Ok(())
}
