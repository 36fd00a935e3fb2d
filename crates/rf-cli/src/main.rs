//! roomforge: generate platformer tile rooms from the command line.
//!
//! Picks random perimeter exits for each requested room, runs a round of
//! concurrent generator attempts, and prints the winning room as text or
//! JSON.

use std::process::ExitCode;

use clap::Parser;
use log::info;
use serde::Serialize;

use rf_core::GenRng;
use rf_core::level::{DesignOutcome, LevelDesigner, Point2D, Room, RoomError};

mod render;

/// Procedural platformer-room generator
#[derive(Parser, Debug)]
#[command(name = "roomforge")]
#[command(author, version, about = "Generate tile rooms from interlocking build pieces", long_about = None)]
struct Args {
    /// Room width in cells
    #[arg(short = 'W', long = "width", default_value_t = 12)]
    width: usize,

    /// Room height in cells
    #[arg(short = 'H', long = "height", default_value_t = 8)]
    height: usize,

    /// RNG seed (random when omitted)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Concurrent generation attempts per room
    #[arg(short = 'a', long = "attempts", default_value_t = 4)]
    attempts: usize,

    /// Number of rooms to generate
    #[arg(short = 'c', long = "count", default_value_t = 1)]
    count: usize,

    /// Emit the finished rooms as JSON instead of text
    #[arg(long = "json")]
    json: bool,
}

#[derive(Serialize)]
struct RoomReport {
    width: usize,
    height: usize,
    seed: u64,
    exits: Vec<Point2D>,
    rows: Vec<String>,
}

/// Pick perimeter exits for a fresh room: one on the left wall, one on the
/// top, one on the bottom, kept two cells clear of the corners when the room
/// is large enough.
fn random_room(width: usize, height: usize, rng: &mut GenRng) -> Result<Room, RoomError> {
    let side_y = |rng: &mut GenRng| {
        if height >= 5 {
            2 + rng.rn2(height as u32 - 4) as i32
        } else {
            (height / 2) as i32
        }
    };
    let top_x = |rng: &mut GenRng| {
        if width >= 5 {
            2 + rng.rn2(width as u32 - 4) as i32
        } else {
            (width / 2) as i32
        }
    };

    let picks = [
        Point2D::new(0, side_y(rng)),
        Point2D::new(top_x(rng), 0),
        Point2D::new(top_x(rng), height as i32 - 1),
    ];
    let mut exits = Vec::new();
    for exit in picks {
        if !exits.contains(&exit) {
            exits.push(exit);
        }
    }
    Room::new(width, height, exits)
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(|| GenRng::from_entropy().seed());
    let designer = LevelDesigner::new(args.attempts);

    for round in 0..args.count {
        let round_seed = GenRng::derive_seed(seed, round as u64);
        let mut rng = GenRng::new(round_seed);
        let room = match random_room(args.width, args.height, &mut rng) {
            Ok(room) => room,
            Err(err) => {
                eprintln!("roomforge: bad room request: {err}");
                return ExitCode::FAILURE;
            }
        };
        info!(
            "round {round}: {}x{} room, exits {:?}, seed {round_seed}",
            room.width(),
            room.height(),
            room.exits()
        );

        match designer.design(&room, round_seed) {
            Ok(DesignOutcome::Solved { base, mut solution }) => {
                let grid = solution.current_grid(&base);
                if args.json {
                    let report = RoomReport {
                        width: room.width(),
                        height: room.height(),
                        seed: round_seed,
                        exits: room.exits().to_vec(),
                        rows: grid.glyph_rows(),
                    };
                    let out = serde_json::to_string_pretty(&report)
                        .expect("room report serializes");
                    println!("{out}");
                } else {
                    render::print_room(grid, room.exits(), round_seed);
                }
            }
            Ok(DesignOutcome::Exhausted) => {
                eprintln!(
                    "roomforge: no solution found for seed {round_seed}; retry with another seed"
                );
            }
            Err(err) => {
                eprintln!("roomforge: configuration error: {err}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
