// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
#![warn(clippy::all)]

use std::process;
use std::thread;
use std::time::Duration;

use clap::{App, Arg, ArgGroup};
use log::debug;

use sokoban_search::config::{Heuristic, Strategy};
use sokoban_search::level::Level;
use sokoban_search::moves::Moves;
use sokoban_search::{LoadLevel, Solve};

fn main() {
    env_logger::init();

    let matches = App::new("sokoban-search")
        .author("Martin Taibr <taibr.martin@gmail.com>")
        .about("Solves sokoban levels using uninformed or heuristic search")
        .arg(
            Arg::with_name("dfs")
                .long("--dfs")
                .help("Use depth-first search"),
        ).arg(
            Arg::with_name("astar")
                .long("--astar")
                .help("Use A* search (default)"),
        ).arg(
            Arg::with_name("ida")
                .long("--ida")
                .help("Use iterative deepening A* search"),
        ).group(ArgGroup::with_name("strategy").args(&["dfs", "astar", "ida"]))
        .arg(
            Arg::with_name("heuristic")
                .long("--heuristic")
                .takes_value(true)
                .value_name("NAME")
                .help("Distance estimate for A* and IDA*: manhattan (default) or euclidean"),
        ).arg(
            Arg::with_name("verbose")
                .short("-v")
                .long("--verbose")
                .help("Print stats every time the search reaches a new depth"),
        ).arg(
            Arg::with_name("play")
                .short("-p")
                .long("--play")
                .help("Replay the solution step by step in the terminal"),
        ).arg(
            Arg::with_name("delay")
                .long("--delay")
                .takes_value(true)
                .value_name("MS")
                .default_value("100")
                .help("Milliseconds between frames when replaying"),
        ).arg(
            Arg::with_name("no-clear")
                .long("--no-clear")
                .requires("play")
                .help("Don't clear the terminal between frames"),
        ).arg(Arg::with_name("file").required(true))
        .get_matches();

    let strategy = if matches.is_present("dfs") {
        Strategy::DepthFirst
    } else if matches.is_present("ida") {
        Strategy::IterativeDeepening
    } else {
        Strategy::BestFirst
    };

    let heuristic = match matches.value_of("heuristic") {
        None => Heuristic::default(),
        Some(name) => name.parse::<Heuristic>().unwrap_or_else(|err| {
            eprintln!("{}", err);
            process::exit(1);
        }),
    };

    let delay = matches
        .value_of("delay")
        .unwrap_or("100")
        .parse::<u64>()
        .unwrap_or_else(|err| {
            eprintln!("Invalid delay: {}", err);
            process::exit(1);
        });

    // clap guarantees it's present
    let path = matches.value_of("file").unwrap();
    let level = path.load_level().unwrap_or_else(|err| {
        eprintln!("Can't load level {}: {}", path, err);
        process::exit(1);
    });
    debug!("Loaded level {}:\n{}", path, level);

    println!("Solving {}...", path);
    let solver_ok = level.solve(strategy, heuristic, matches.is_present("verbose"));
    println!("{}", solver_ok.stats);
    match solver_ok.moves {
        Some(ref moves) => {
            println!("Found solution:");
            if matches.is_present("play") {
                play(&level, moves, delay, !matches.is_present("no-clear"));
            }
            println!("{}", moves);
            println!("Moves: {}", moves.move_cnt());
            println!("Pushes: {}", moves.push_cnt());
        }
        None => println!("Solution not found"),
    }
}

fn play(level: &Level, moves: &Moves, delay_ms: u64, clear: bool) {
    for frame in level.playback(moves).frames() {
        if clear {
            print!("\x1b[2J\x1b[H");
        }
        println!("{}", frame);
        thread::sleep(Duration::from_millis(delay_ms));
    }
}
