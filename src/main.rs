//! Snowball Showdown headless runner
//!
//! Plays a session with a wandering autopilot at 60 frames per second and
//! logs what happens. Usage: `snowball-showdown [seconds] [tuning.json]`.
//! `RUST_LOG=debug` shows spawns and pickups.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use snowball_showdown::sim::{GameEvent, Key};
    use snowball_showdown::{ProceduralLevels, Session, SessionStatus, SoundCue, Tuning};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const STEER_EVERY_MS: f64 = 1500.0;
    const ROUTE: [Key; 4] = [Key::Left, Key::Up, Key::Right, Key::Down];

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seconds: f64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(120.0);
    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(t) => t,
            Err(err) => {
                log::warn!("Ignoring tuning file {path}: {err}");
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    let seed = 0x5a0b_a11;
    log::info!("Snowball Showdown (headless) starting, {seconds}s, seed {seed:#x}");

    let mut session = Session::new(ProceduralLevels::new(seed), tuning, seed);
    session.start(0.0);

    let mut now = 0.0;
    let mut heading = 0;
    let mut throws = 0u32;
    let mut pickups = 0u32;

    while now < seconds * 1000.0 {
        now += FRAME_MS;

        // Level loads clear held keys, so the heading is pressed every frame
        let engine = session.engine_mut();
        if now % STEER_EVERY_MS < FRAME_MS {
            engine.key_up(ROUTE[heading]);
            heading = (heading + 1) % ROUTE.len();
        }
        engine.key_down(ROUTE[heading]);

        for event in session.frame(now) {
            match event {
                GameEvent::Sound(SoundCue::Throw) => throws += 1,
                GameEvent::PowerUpGranted { kind } => {
                    pickups += 1;
                    log::info!("Picked up {}", kind.as_str());
                }
                GameEvent::LevelComplete { score } => log::info!("Cleared with {score} points"),
                _ => {}
            }
        }

        match session.status() {
            SessionStatus::GameOver { can_continue: true, .. } => {
                session.continue_game(now);
            }
            SessionStatus::GameOver { qualifies, .. } => {
                if qualifies {
                    session.submit_score("Autopilot", now);
                }
                break;
            }
            _ => {}
        }
    }

    println!(
        "Reached level {} with {} points, {} lives left, {} throws, {} pickups",
        session.level(),
        session.score(),
        session.lives(),
        throws,
        pickups
    );
    if let Some(msg) = session.game_over_message() {
        println!("{msg}");
    }
    for (i, entry) in session.leaderboard().entries.iter().enumerate() {
        println!("{}. {} {} (level {})", i + 1, entry.name, entry.score, entry.level);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is the embeddable part; there is no browser shell here
}
