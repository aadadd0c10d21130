//! Interactive console front end: the turn-driving collaborator sitting on
//! top of [`crate::game`].
//!
//! [`run`] is the "main loop" of the program: it reads half-moves from the
//! input stream, feeds them to the engine and renders the results until the
//! game ends or the input is exhausted. All state lives in the engine; this
//! module only parses tokens and prints.

use std::io::{BufRead, Write};

use crate::chess::core::{PieceKind, Player, Square};
use crate::chess::status::GameStatus;
use crate::game::{Game, MoveOutcome};

fn piece_code(owner: Player, kind: PieceKind) -> String {
    let prefix = match owner {
        Player::White => 'w',
        Player::Black => 'b',
    };
    format!("{prefix}{kind}")
}

/// Drives one game over the given streams until a terminal condition
/// (resignation, accepted draw, checkmate, stalemate, king capture) or end
/// of input.
///
/// Expected input per line: `<from> <to> [extra]`, e.g. `e2 e4`, `e7 e8 N`
/// for a promotion choice, `g1 f3 draw?` to offer a draw, or the commands
/// `resign` and `draw` (the latter only accepts a pending offer). Malformed
/// or rejected input re-prompts with a reason and mutates nothing.
pub fn run(input: &mut impl BufRead, output: &mut impl Write) -> anyhow::Result<()> {
    let mut game = Game::new();
    let mut draw_offered = false;
    writeln!(output, "{}", game.board())?;

    loop {
        let mover = game.side_to_move();
        write!(output, "{mover}'s move: ")?;
        output.flush()?;

        let mut line = String::new();
        // EOF reached.
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();

        match tokens.as_slice() {
            ["resign"] => {
                writeln!(output, "{mover} resigns. {} wins.", mover.opponent())?;
                return Ok(());
            },
            ["draw"] if draw_offered => {
                writeln!(output, "Draw")?;
                return Ok(());
            },
            _ => {},
        }
        draw_offered = false;

        let (from, to, extra) = match tokens.as_slice() {
            [from, to] => (*from, *to, None),
            [from, to, extra] => (*from, *to, Some(*extra)),
            _ => {
                writeln!(output, "Invalid input, try again")?;
                continue;
            },
        };
        let (Ok(from), Ok(to)) = (Square::try_from(from), Square::try_from(to)) else {
            writeln!(output, "Invalid input, try again")?;
            continue;
        };

        let promotion_request = extra.filter(|&token| token != "draw?");
        let outcome = game.attempt_move(from, to, promotion_request);
        match outcome {
            MoveOutcome::Rejected(reason) => {
                writeln!(output, "{reason}")?;
                continue;
            },
            MoveOutcome::MovedAndCaptured(kind) => {
                writeln!(output, "Captured {}", piece_code(mover.opponent(), kind))?;
            },
            MoveOutcome::EnPassantCaptured(kind) => {
                writeln!(
                    output,
                    "Enpassant: Captured {}",
                    piece_code(mover.opponent(), kind)
                )?;
            },
            MoveOutcome::Moved | MoveOutcome::Castled | MoveOutcome::Promoted(_) => {},
        }
        if extra == Some("draw?") {
            draw_offered = true;
        }

        writeln!(output)?;
        writeln!(output, "{}", game.board())?;

        if outcome == MoveOutcome::MovedAndCaptured(PieceKind::King) {
            writeln!(output, "{mover} wins")?;
            return Ok(());
        }
        match game.status(game.side_to_move()) {
            status @ (GameStatus::Checkmate | GameStatus::Stalemate) => {
                writeln!(output, "{status}")?;
                return Ok(());
            },
            status @ GameStatus::Check => writeln!(output, "{status}")?,
            GameStatus::Normal => {},
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn transcript(script: &str) -> String {
        let mut input = script.as_bytes();
        let mut output = Vec::new();
        run(&mut input, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn prompts_alternate() {
        let transcript = transcript("e2 e4\ne7 e5\n");
        assert!(transcript.contains("White's move: "));
        assert!(transcript.contains("Black's move: "));
    }

    #[test]
    fn resignation_ends_the_game() {
        let transcript = transcript("resign\n");
        assert!(transcript.contains("White resigns. Black wins."));
    }

    #[test]
    fn draw_needs_a_pending_offer() {
        // A bare "draw" with no offer is just malformed input.
        let transcript = transcript("draw\ne2 e4\n");
        assert!(transcript.contains("Invalid input, try again"));

        let transcript = self::transcript("e2 e4 draw?\ndraw\n");
        assert!(transcript.trim_end().ends_with("Draw"));
    }

    #[test]
    fn captures_are_announced() {
        let transcript = transcript("e2 e4\nd7 d5\ne4 d5\n");
        assert!(transcript.contains("Captured bp"));
    }

    #[test]
    fn rejections_reprompt() {
        let transcript = transcript("e2 e5\ne2 e4\n");
        assert!(transcript.contains("Illegal move, try again"));
    }

    #[test]
    fn checkmate_ends_the_game() {
        let transcript = transcript("f2 f3\ne7 e5\ng2 g4\nd8 h4\n");
        assert!(transcript.trim_end().ends_with("Checkmate"));
    }
}
