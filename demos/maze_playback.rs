//! Multi-agent maze playback demo.
//!
//! Three agents start on random walkable cells of a small maze and walk to
//! a shared target, one cell per frame. The frame counter then rewinds to
//! the first frame, which resets the session and re-places every agent.
//!
//! Run: RUST_LOG=debug cargo run --bin maze-playback

use log::info;
use waypath_agents::{AgentSpec, Session, SessionConfig};
use waypath_core::Position;
use waypath_paths::GridMap;

const MAZE: [[u8; 7]; 5] = [
    [1, 0, 1, 1, 1, 0, 1],
    [1, 0, 1, 0, 1, 0, 1],
    [1, 1, 1, 0, 1, 1, 1],
    [0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1],
];

const SEED: u64 = 42;
const FRAMES: i64 = 16;
const RUNS: usize = 2;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let grid = GridMap::from_rows(&MAZE)?;
    let target = Position::new(4, 4);
    let roster: Vec<_> = (1..=3)
        .map(|i| AgentSpec::new(format!("npc_{i}"), target))
        .collect();

    let config = SessionConfig::default().with_seed(SEED);
    let mut session = Session::from_config(config.clone());
    info!(
        "{}x{} maze, {} walkable cells, target {target}",
        grid.rows(),
        grid.cols(),
        grid.walkable_count()
    );

    for run in 1..=RUNS {
        for frame in config.first_frame..config.first_frame + FRAMES {
            if session.is_initial_frame(frame) {
                session.reset();
            }
            let placements = session.query(&grid, frame, &roster)?;
            let line: Vec<String> = placements
                .iter()
                .map(|p| {
                    let mark = if p.arrived { "*" } else { "" };
                    format!("{}={}{mark}", p.id, p.position)
                })
                .collect();
            println!("run {run} frame {frame:>2}: {}", line.join("  "));
        }
        for (id, entry) in session.cache().iter() {
            match entry.result.steps() {
                Some(steps) => info!("{id}: {} -> {} in {steps} steps", entry.start, entry.target),
                None => info!("{id}: no path from {} to {}", entry.start, entry.target),
            }
        }
    }
    Ok(())
}
