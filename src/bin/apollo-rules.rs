// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate clap;

use std::fs;
use std::process;
use std::time::Instant;

use apollo_rules::policy::play_out;
use apollo_rules::{divide, perft, Game, GameRecord, Material, Position, RandomPolicy, START_FEN};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};

fn main() {
    env_logger::init();
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("perft")
                .about("PERFT analysis of board positions")
                .arg(
                    Arg::with_name("FEN")
                        .help("FEN string for a board position")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::with_name("depth")
                        .help("Depth of move tree to search")
                        .value_name("DEPTH")
                        .short("d")
                        .long("depth")
                        .default_value("3")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("divide")
                        .help("Print the leaf count below each root move")
                        .long("divide"),
                ),
        )
        .subcommand(
            SubCommand::with_name("moves")
                .about("List the legal moves in a position")
                .arg(
                    Arg::with_name("FEN")
                        .help("FEN string for a board position")
                        .index(1),
                ),
        )
        .subcommand(
            SubCommand::with_name("play")
                .about("Play a sequence of moves and print the resulting game")
                .arg(
                    Arg::with_name("fen")
                        .help("FEN string of the starting position")
                        .value_name("FEN")
                        .long("fen")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("json")
                        .help("Print the game as a JSON record")
                        .long("json"),
                )
                .arg(
                    Arg::with_name("MOVE")
                        .help("Moves in algebraic or UCI notation")
                        .multiple(true)
                        .index(1),
                ),
        )
        .subcommand(
            SubCommand::with_name("replay")
                .about("Replay and verify a JSON game record")
                .arg(
                    Arg::with_name("FILE")
                        .help("Game record to load")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            SubCommand::with_name("selfplay")
                .about("Play a game of random legal moves")
                .arg(
                    Arg::with_name("seed")
                        .help("Seed for the move chooser")
                        .value_name("SEED")
                        .long("seed")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("plies")
                        .help("Maximum number of moves to play")
                        .value_name("PLIES")
                        .long("plies")
                        .default_value("200")
                        .takes_value(true),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        ("perft", Some(matches)) => run_perft(matches),
        ("moves", Some(matches)) => run_moves(matches),
        ("play", Some(matches)) => run_play(matches),
        ("replay", Some(matches)) => run_replay(matches),
        ("selfplay", Some(matches)) => run_selfplay(matches),
        _ => unreachable!(),
    }
}

fn fail<E: std::fmt::Display>(err: E) -> ! {
    eprintln!("error: {}", err);
    process::exit(1);
}

fn run_perft(matches: &ArgMatches) -> ! {
    let fen = matches.value_of("FEN").unwrap();
    let depth = value_t_or_exit!(matches, "depth", u32);
    let pos = Position::from_fen(fen).unwrap_or_else(|e| fail(e));

    println!("fen:   {}", fen);
    println!("depth: {}", depth);
    println!();
    println!("{}", pos);
    println!();
    if matches.is_present("divide") {
        let mut total = 0;
        for (mov, count) in divide(&pos, depth) {
            println!("{}: {}", mov, count);
            total += count;
        }
        println!();
        println!("total: {}", total);
        process::exit(0);
    }

    for i in 1..depth + 1 {
        let start = Instant::now();
        let results = perft(&pos, i);
        let duration = start.elapsed();
        println!("perft({}) = {} ({} ms)", i, results, duration.as_millis());
    }

    process::exit(0);
}

fn run_moves(matches: &ArgMatches) -> ! {
    let fen = matches.value_of("FEN").unwrap_or(START_FEN);
    let game = Game::from_fen(fen).unwrap_or_else(|e| fail(e));

    println!("{}", game.position());
    println!();
    println!("status: {}", game.status());
    println!("moves:  {}", game.legal_moves().len());
    for &mov in game.legal_moves() {
        // Play each move on a copy to see it written the way the game would.
        let mut copy = game.clone();
        let text = match copy.apply_move(mov) {
            Ok(_) => copy.notation_history()[0].clone(),
            Err(e) => fail(e),
        };
        println!("  {:6} {}", mov, text);
    }

    process::exit(0);
}

fn print_game(game: &Game) {
    println!("{}", game.position());
    println!();
    let mut line = String::new();
    for (ply, text) in game.notation_history().iter().enumerate() {
        if ply % 2 == 0 {
            line.push_str(&format!("{}. ", ply / 2 + 1));
        }
        line.push_str(text);
        line.push(' ');
    }
    println!("moves:    {}", line.trim_end());
    println!("status:   {}", game.status());
    println!("material: {}", Material::count(game.position()));
    println!("fen:      {}", game.fen());
}

fn run_play(matches: &ArgMatches) -> ! {
    let fen = matches.value_of("fen").unwrap_or(START_FEN);
    let mut game = Game::from_fen(fen).unwrap_or_else(|e| fail(e));
    for text in matches.values_of("MOVE").into_iter().flatten() {
        if let Err(e) = game.apply_text(text) {
            fail(e);
        }
    }

    if matches.is_present("json") {
        match game.to_record().to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => fail(e),
        }
    } else {
        print_game(&game);
    }

    process::exit(0);
}

fn run_replay(matches: &ArgMatches) -> ! {
    let path = matches.value_of("FILE").unwrap();
    let contents = fs::read_to_string(path).unwrap_or_else(|e| fail(e));
    let record = GameRecord::from_json(&contents).unwrap_or_else(|e| fail(e));
    let game = Game::from_record(&record).unwrap_or_else(|e| fail(e));
    print_game(&game);
    process::exit(0);
}

fn run_selfplay(matches: &ArgMatches) -> ! {
    let plies = value_t_or_exit!(matches, "plies", usize);
    let mut policy = if matches.is_present("seed") {
        RandomPolicy::with_seed(value_t_or_exit!(matches, "seed", u64))
    } else {
        RandomPolicy::new()
    };

    let mut game = Game::new();
    if let Err(e) = play_out(&mut game, &mut policy, plies) {
        fail(e);
    }

    print_game(&game);
    process::exit(0);
}
