//! Validator CLI: reads PGN movetext from a file and replays every game it
//! contains through the rules engine, reporting the first move in each game
//! that fails to resolve or apply.

use std::env;
use std::fs;
use std::process::ExitCode;

use chess_core::pgn::{validate, MoveParser};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let Some(path) = args.get(1) else {
        eprintln!("usage: validate <game.pgn>");
        return ExitCode::FAILURE;
    };

    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("failed to read {path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut parser = MoveParser::new(&text);
    let mut game_number = 0;
    let mut all_ok = true;

    loop {
        match parser.next_game() {
            Ok(None) => break,
            Ok(Some(moves)) => {
                game_number += 1;
                match validate(&moves) {
                    Ok(()) => println!("game {game_number}: ok ({} moves)", moves.len()),
                    Err(err) => {
                        println!("game {game_number}: {err}");
                        all_ok = false;
                    }
                }
            }
            Err(err) => {
                eprintln!("game {}: {err}", game_number + 1);
                all_ok = false;
                break;
            }
        }
    }

    if all_ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
