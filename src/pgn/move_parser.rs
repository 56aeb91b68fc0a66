//! Drives a [`Lexer`] and assembles its SAN/termination events into games,
//! discarding anything nested inside an alternative variation
//! (`spec.md` §4.5, grounded on the original's `MoveParser::next_game`).

use crate::error::PgnError;

use super::lexer::Lexer;
use super::tokens::{Event, SanMove, TerminationMarker};

pub struct MoveParser<'a> {
    lexer: Lexer<'a>,
    alternative_depth: u32,
    current_move: Option<SanMove>,
    last_termination: Option<TerminationMarker>,
}

impl<'a> MoveParser<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> MoveParser<'a> {
        MoveParser {
            lexer: Lexer::new(text),
            alternative_depth: 0,
            current_move: None,
            last_termination: None,
        }
    }

    fn visit(&mut self, event: Event) {
        if self.alternative_depth > 0 {
            match event {
                Event::AlternativeOpen => self.alternative_depth += 1,
                Event::AlternativeClose => self.alternative_depth -= 1,
                _ => {}
            }
            return;
        }

        match event {
            Event::San(san) => self.current_move = Some(san),
            Event::Termination(marker) => self.last_termination = Some(marker),
            Event::AlternativeOpen => self.alternative_depth += 1,
            Event::AlternativeClose => self.alternative_depth -= 1,
            _ => {}
        }
    }

    /// Drive the lexer until a game's termination marker is observed
    /// (`Ok(Some(moves))`), EOF occurs cleanly before any game starts
    /// (`Ok(None)`), or EOF occurs mid-game (`Err(IncompleteGame)`).
    pub fn next_game(&mut self) -> Result<Option<Vec<SanMove>>, PgnError> {
        let Some(first) = self.lexer.next() else { return Ok(None) };
        self.visit(first);

        let mut game = Vec::new();
        loop {
            if self.alternative_depth == 0 {
                if let Some(san) = self.current_move.take() {
                    game.push(san);
                }
                if self.last_termination.take().is_some() {
                    return Ok(Some(game));
                }
            }

            match self.lexer.next() {
                Some(Event::SyntaxError) => {
                    return Err(PgnError::Syntax { near: self.lexer.context().to_string() })
                }
                Some(event) => self.visit(event),
                None => return Err(PgnError::IncompleteGame),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square::SquareKind;

    #[test]
    fn parses_a_short_game() {
        let mut parser = MoveParser::new("1. e4 e5 2. Nf3 Nc6 1-0");
        let game = parser.next_game().unwrap().unwrap();
        assert_eq!(game.len(), 4);
        assert_eq!(game[0].dest_file, Some(4));
        assert_eq!(game[2].piece_kind, SquareKind::Knight);
    }

    #[test]
    fn drops_moves_inside_alternatives() {
        let mut parser = MoveParser::new("1. e4 (1. d4 d5) e5 1-0");
        let game = parser.next_game().unwrap().unwrap();
        assert_eq!(game.len(), 2);
    }

    #[test]
    fn nested_alternatives_track_depth() {
        let mut parser = MoveParser::new("1. e4 (1. d4 (1. c4) d5) e5 1-0");
        let game = parser.next_game().unwrap().unwrap();
        assert_eq!(game.len(), 2);
    }

    #[test]
    fn clean_eof_between_games_returns_none() {
        let mut parser = MoveParser::new("   ");
        assert_eq!(parser.next_game().unwrap(), None);
    }

    #[test]
    fn eof_mid_game_is_incomplete() {
        let mut parser = MoveParser::new("1. e4 e5 2. Nf3");
        assert_eq!(parser.next_game(), Err(PgnError::IncompleteGame));
    }

    #[test]
    fn two_games_from_one_stream() {
        let mut parser = MoveParser::new("1. e4 e5 1-0 1. d4 d5 0-1");
        let first = parser.next_game().unwrap().unwrap();
        assert_eq!(first.len(), 2);
        let second = parser.next_game().unwrap().unwrap();
        assert_eq!(second.len(), 2);
        assert_eq!(second[0].dest_file, Some(3));
    }
}
