//! The PGN lexer: an explicit state machine over a character stream,
//! producing one [`Event`] per call to [`Lexer::next`] (`spec.md` §4.4).
//!
//! Comments and numeric annotation glyphs are consumed and discarded
//! in-line rather than surfaced as events, matching the "consumed and
//! discarded" wording of the grammar; `next` loops internally past them.

use std::iter::Peekable;
use std::str::Chars;

use crate::square::Color;

use super::tokens::{Event, SanMove, TerminationMarker};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ExpectTagOpenOrMovetext,
    ExpectTagName,
    ExpectTagValue,
    ExpectTagClose,
    ExpectColourIndicator,
    ExpectMovetext,
    Error,
    Done,
}

enum Step {
    Event(Event),
    Error,
    Continue,
}

pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    state: State,
    context: String,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Lexer<'a> {
        Lexer { chars: text.chars().peekable(), state: State::ExpectTagOpenOrMovetext, context: String::new() }
    }

    /// The text fragment being processed when the most recent event was
    /// produced, for error reporting.
    #[must_use]
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Produce the next lexical event, or `None` once the stream is
    /// exhausted or the lexer has entered its terminal error state.
    pub fn next(&mut self) -> Option<Event> {
        loop {
            if matches!(self.state, State::Error | State::Done) {
                return None;
            }
            self.skip_whitespace();
            if self.chars.peek().is_none() {
                if matches!(self.state, State::ExpectColourIndicator) {
                    self.state = State::Error;
                    #[cfg(feature = "logging")]
                    log::warn!("pgn lexer: EOF mid move-number indicator");
                    return Some(Event::SyntaxError);
                }
                self.state = State::Done;
                return None;
            }

            let step = match self.state {
                State::ExpectTagOpenOrMovetext => self.consume_tag_open_or_movetext(),
                State::ExpectTagName => self.consume_tag_name(),
                State::ExpectTagValue => self.consume_tag_value(),
                State::ExpectTagClose => self.consume_tag_close(),
                State::ExpectMovetext => self.consume_movetext(),
                State::ExpectColourIndicator => self.consume_colour_indicator(),
                State::Error | State::Done => unreachable!("handled above"),
            };

            match step {
                Step::Event(event) => {
                    if matches!(event, Event::Termination(_)) {
                        self.state = State::ExpectTagOpenOrMovetext;
                    }
                    return Some(event);
                }
                Step::Error => {
                    self.state = State::Error;
                    #[cfg(feature = "logging")]
                    log::warn!("pgn lexer: syntax error near {:?}", self.context);
                    return Some(Event::SyntaxError);
                }
                Step::Continue => continue,
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.chars.peek(), Some(c) if c.is_whitespace()) {
            self.chars.next();
        }
    }

    fn consume_tag_open_or_movetext(&mut self) -> Step {
        if self.chars.peek() == Some(&'[') {
            self.chars.next();
            self.state = State::ExpectTagName;
            Step::Event(Event::TagPairOpen)
        } else {
            self.consume_movetext()
        }
    }

    fn consume_tag_name(&mut self) -> Step {
        let mut name = String::new();
        while matches!(self.chars.peek(), Some(c) if c.is_alphanumeric() || *c == '_') {
            name.push(self.chars.next().unwrap());
        }
        self.context = name.clone();
        self.state = State::ExpectTagValue;
        Step::Event(Event::TagPairName(name))
    }

    fn consume_tag_value(&mut self) -> Step {
        if self.chars.next() != Some('"') {
            return Step::Error;
        }
        let mut value = String::new();
        loop {
            match self.chars.next() {
                None | Some(']') | Some('\n') => return Step::Error,
                Some('"') => break,
                Some('\\') => match self.chars.next() {
                    Some(c @ ('"' | '\\')) => value.push(c),
                    _ => return Step::Error,
                },
                Some(c) => value.push(c),
            }
        }
        self.context = value.clone();
        self.state = State::ExpectTagClose;
        Step::Event(Event::TagPairValue(value))
    }

    fn consume_tag_close(&mut self) -> Step {
        if self.chars.next() == Some(']') {
            self.state = State::ExpectTagOpenOrMovetext;
            Step::Event(Event::TagPairClose)
        } else {
            Step::Error
        }
    }

    fn consume_colour_indicator(&mut self) -> Step {
        let mut count = 0u32;
        while self.chars.peek() == Some(&'.') {
            self.chars.next();
            count += 1;
        }
        let colour = match count {
            1 => Color::White,
            3 => Color::Black,
            _ => return Step::Error,
        };
        self.state = State::ExpectMovetext;
        Step::Event(Event::ColourIndicator(colour))
    }

    fn consume_movetext(&mut self) -> Step {
        match self.chars.peek() {
            Some('$') => self.consume_dollar_indicator(),
            Some('{') => self.consume_comment(),
            Some('(') => {
                self.chars.next();
                Step::Event(Event::AlternativeOpen)
            }
            Some(')') => {
                self.chars.next();
                Step::Event(Event::AlternativeClose)
            }
            _ => self.consume_token(),
        }
    }

    fn consume_dollar_indicator(&mut self) -> Step {
        self.chars.next(); // '$'
        if !matches!(self.chars.peek(), Some(c) if c.is_ascii_digit()) {
            return Step::Error;
        }
        while matches!(self.chars.peek(), Some(c) if c.is_ascii_digit()) {
            self.chars.next();
        }
        Step::Continue
    }

    fn consume_comment(&mut self) -> Step {
        self.chars.next(); // '{'
        loop {
            match self.chars.next() {
                Some('}') => return Step::Continue,
                Some(_) => continue,
                None => return Step::Error,
            }
        }
    }

    fn consume_token(&mut self) -> Step {
        let mut text = String::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_whitespace() || c == '.' || c == '(' || c == ')' {
                break;
            }
            text.push(c);
            self.chars.next();
        }
        self.context = text.clone();

        let is_san_like = text.chars().any(|c| is_file(c) || c == 'O' || c == '-' || c == '*');
        if is_san_like {
            self.state = State::ExpectMovetext;
            san_from_text(text)
        } else {
            match text.parse::<u32>() {
                Ok(number) => {
                    self.state = State::ExpectColourIndicator;
                    Step::Event(Event::MoveNumber(number))
                }
                Err(_) => Step::Error,
            }
        }
    }
}

fn is_file(c: char) -> bool {
    ('a'..='h').contains(&c)
}

fn is_rank(c: char) -> bool {
    ('1'..='8').contains(&c)
}

fn translate_piece_symbol(c: char) -> Option<crate::square::SquareKind> {
    use crate::square::SquareKind::*;
    match c {
        'R' => Some(Rook),
        'B' => Some(Bishop),
        'N' => Some(Knight),
        'Q' => Some(Queen),
        'K' => Some(King),
        'P' => Some(Pawn),
        _ => None,
    }
}

/// Decode a movetext run into a SAN move, termination marker, or syntax
/// error, per the right-to-left order in `spec.md` §4.4.
fn san_from_text(mut text: String) -> Step {
    if let Some(marker) = TerminationMarker::from_text(&text) {
        return Step::Event(Event::Termination(marker));
    }

    let mut san = SanMove { original_text: text.clone(), ..SanMove::default() };

    if text.ends_with('+') {
        san.check = true;
        text.pop();
    }
    if text.ends_with('#') {
        san.checkmate = true;
        text.pop();
    }

    if let Some(last) = text.chars().last() {
        if let Some(kind) = translate_piece_symbol(last) {
            if text.len() >= 2 && text.as_bytes()[text.len() - 2] == b'=' {
                san.promotion = Some(kind);
                text.pop();
                text.pop();
            }
        }
    }

    if text == "O-O" {
        san.king_side_castle = true;
        return Step::Event(Event::San(san));
    }
    if text == "O-O-O" {
        san.queen_side_castle = true;
        return Step::Event(Event::San(san));
    }

    match text.pop() {
        Some(c) if is_rank(c) => san.dest_rank = Some(c as i8 - b'1' as i8),
        _ => return Step::Error,
    }
    match text.pop() {
        Some(c) if is_file(c) => san.dest_file = Some(c as i8 - b'a' as i8),
        _ => return Step::Error,
    }

    if text.is_empty() {
        return Step::Event(Event::San(san));
    }

    if text.ends_with('x') {
        san.capture = true;
        text.pop();
    }

    if text.is_empty() {
        return Step::Event(Event::San(san));
    }

    match text.chars().last() {
        Some(c) if is_file(c) => {
            san.src_file = Some(c as i8 - b'a' as i8);
            text.pop();
        }
        Some(c) if is_rank(c) => {
            san.src_rank = Some(c as i8 - b'1' as i8);
            text.pop();
        }
        _ => {}
    }

    if text.is_empty() {
        return Step::Event(Event::San(san));
    }

    if let Some(c) = text.chars().last() {
        if is_file(c) {
            san.src_file = Some(c as i8 - b'a' as i8);
            text.pop();
        }
    }

    if !text.is_empty() {
        if let Some(kind) = translate_piece_symbol(text.remove(0)) {
            san.piece_kind = kind;
        }
    }

    Step::Event(Event::San(san))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexes_minimal_tag_pair() {
        let mut lexer = Lexer::new(r#"[Event "Test"]"#);
        assert_eq!(lexer.next(), Some(Event::TagPairOpen));
        assert_eq!(lexer.next(), Some(Event::TagPairName("Event".into())));
        assert_eq!(lexer.next(), Some(Event::TagPairValue("Test".into())));
        assert_eq!(lexer.next(), Some(Event::TagPairClose));
        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn lexes_move_number_and_colour_indicator() {
        let mut lexer = Lexer::new("1. e4");
        assert_eq!(lexer.next(), Some(Event::MoveNumber(1)));
        assert_eq!(lexer.next(), Some(Event::ColourIndicator(Color::White)));
        match lexer.next() {
            Some(Event::San(san)) => {
                assert_eq!(san.dest_file, Some(4));
                assert_eq!(san.dest_rank, Some(3));
            }
            other => panic!("expected SAN event, got {other:?}"),
        }
    }

    #[test]
    fn lexes_black_colour_indicator() {
        let mut lexer = Lexer::new("1... Nf6");
        lexer.next();
        assert_eq!(lexer.next(), Some(Event::ColourIndicator(Color::Black)));
    }

    #[test]
    fn skips_comments_without_emitting_an_event() {
        let mut lexer = Lexer::new("e4 {good move} e5");
        let first = lexer.next();
        assert!(matches!(first, Some(Event::San(_))));
        let second = lexer.next();
        assert!(matches!(second, Some(Event::San(_))));
    }

    #[test]
    fn unterminated_comment_is_a_syntax_error() {
        let mut lexer = Lexer::new("e4 {oops");
        lexer.next();
        assert_eq!(lexer.next(), Some(Event::SyntaxError));
        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn decodes_disambiguated_capture_with_check() {
        let mut lexer = Lexer::new("Nbxd5+");
        match lexer.next() {
            Some(Event::San(san)) => {
                assert_eq!(san.piece_kind, crate::square::SquareKind::Knight);
                assert!(san.capture);
                assert!(san.check);
                assert_eq!(san.src_file, Some(1));
                assert_eq!(san.dest_file, Some(3));
                assert_eq!(san.dest_rank, Some(4));
            }
            other => panic!("expected SAN event, got {other:?}"),
        }
    }

    #[test]
    fn decodes_promotion() {
        let mut lexer = Lexer::new("e8=Q");
        match lexer.next() {
            Some(Event::San(san)) => {
                assert_eq!(san.promotion, Some(crate::square::SquareKind::Queen));
                assert_eq!(san.dest_rank, Some(7));
            }
            other => panic!("expected SAN event, got {other:?}"),
        }
    }

    #[test]
    fn decodes_castling() {
        let mut lexer = Lexer::new("O-O O-O-O");
        assert!(matches!(lexer.next(), Some(Event::San(ref s)) if s.king_side_castle));
        assert!(matches!(lexer.next(), Some(Event::San(ref s)) if s.queen_side_castle));
    }

    #[test]
    fn termination_marker_resets_stream_for_next_game() {
        let mut lexer = Lexer::new("1-0 [Event \"Next\"]");
        assert_eq!(lexer.next(), Some(Event::Termination(TerminationMarker::WhiteWin)));
        assert_eq!(lexer.next(), Some(Event::TagPairOpen));
    }

    #[test]
    fn whitespace_insensitivity() {
        let mut a = Lexer::new("1.e4 e5");
        let mut b = Lexer::new("1.   e4\n\te5");
        loop {
            let (ea, eb) = (a.next(), b.next());
            assert_eq!(ea, eb);
            if ea.is_none() {
                break;
            }
        }
    }
}
