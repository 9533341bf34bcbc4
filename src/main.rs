//! Poriball entry point
//!
//! Headless driver for the simulation core. Reads from stdin:
//! 1. one key per line for each player's left, right and jump binding
//! 2. a key-event script, `<seconds> down|up <key>` per line
//!
//! The script is replayed through the fixed-timestep loop on a manual
//! clock, and every rendered frame is written to stdout as one JSON line.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Poriball starting...");

    if let Err(e) = native::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No display backend on wasm yet
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::collections::VecDeque;
    use std::io::{self, BufRead, BufWriter, Write};

    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use poriball::config::{CONFIG_PATH, Config};
    use poriball::consts::RENDER_HZ;
    use poriball::platform::{Clock, KeyBindings, KeyEvent, ManualClock, prompt_bindings};
    use poriball::renderer::build_frame;
    use poriball::sim::{Intent, Key, Simulation, World};

    /// One line of the replay script
    struct ScriptEvent {
        at: f64,
        event: KeyEvent,
    }

    fn parse_event(line: &str) -> Option<ScriptEvent> {
        let mut parts = line.split_whitespace();
        let at: f64 = parts.next()?.parse().ok()?;
        let edge = parts.next()?;
        let key = Key::parse(parts.next()?)?;
        let event = match edge {
            "down" => KeyEvent::down(key),
            "up" => KeyEvent::up(key),
            _ => return None,
        };
        Some(ScriptEvent { at, event })
    }

    pub fn run() -> io::Result<()> {
        let path = std::env::args().nth(1).unwrap_or_else(|| CONFIG_PATH.to_string());
        let config = Config::load(&path);
        log::debug!("Effective config:\n{}", config.to_json());

        let mut world = World::new(&config);
        log::info!("{} players on a {}x{} court", world.pnum(), config.screenwidth, config.screenheight);

        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();
        let mut read_error = None;

        let bound = prompt_bindings(&mut world, || -> Option<Key> {
            loop {
                let line = match lines.next()? {
                    Ok(line) => line,
                    Err(e) => {
                        read_error = Some(e);
                        return None;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }
                match Key::parse(&line) {
                    Some(key) => return Some(key),
                    None => log::warn!("Not a key: '{}'", line.trim()),
                }
            }
        });
        if let Some(e) = read_error {
            return Err(e);
        }
        if !bound {
            log::warn!("Input ended before every key was bound");
            return Ok(());
        }
        let bindings = KeyBindings::from_world(&world, Key(config.quitkey));

        let mut script = Vec::new();
        for line in lines {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match parse_event(&line) {
                Some(ev) => script.push(ev),
                None => log::warn!("Skipping script line '{}'", line.trim()),
            }
        }
        script.sort_by(|a, b| a.at.total_cmp(&b.at));
        let end = script.last().map_or(0.0, |ev| ev.at);

        let seed: u64 = rand::random();
        let mut rng = Pcg32::seed_from_u64(seed);
        log::info!("Game initialized with seed: {}", seed);

        let mut sim = Simulation::new(world);
        let mut clock = ManualClock::new();
        let mut queue: VecDeque<Intent> = VecDeque::new();
        let mut next = 0;
        let frame_dt = 1.0 / f64::from(RENDER_HZ);
        let mut out = BufWriter::new(io::stdout().lock());

        while sim.running() && clock.now() <= end {
            clock.advance(frame_dt);
            while let Some(ev) = script.get(next).filter(|ev| ev.at <= clock.now()) {
                queue.extend(bindings.translate(ev.event));
                next += 1;
            }
            sim.advance(clock.now(), &mut queue, &mut rng);

            let frame = build_frame(&sim.world.snapshot(), &config);
            serde_json::to_writer(&mut out, &frame).map_err(io::Error::other)?;
            writeln!(out)?;
        }
        out.flush()?;

        log::info!("Stopped after {} physics ticks ({:.2}s)", sim.ticks, clock.now());
        Ok(())
    }
}
