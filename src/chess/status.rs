//! Game-state evaluation: check, checkmate and stalemate detection for one
//! side, plus castling availability. Every query walks the whole position
//! fresh; nothing is cached, so the answers always reflect the current board.
//!
//! The checkmate and stalemate predicates intentionally reason about king
//! destinations only: whether another friendly piece could block or capture
//! the attacker is not considered. Callers relying on these predicates get
//! exactly that approximation.

use std::fmt;

use arrayvec::ArrayVec;

use crate::chess::board::Board;
use crate::chess::core::{File, PieceKind, Player, Rank, Square};
use crate::chess::movegen;

/// The state of one side's position, recomputed after every completed
/// half-move.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Normal,
    Check,
    Checkmate,
    Stalemate,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::Normal => "Normal",
            Self::Check => "Check",
            Self::Checkmate => "Checkmate",
            Self::Stalemate => "Stalemate",
        })
    }
}

/// Evaluates `player`'s position. Checkmate wins over check, and check wins
/// over stalemate; a side with no king left evaluates as `Normal` (the game
/// was already decided by the capture).
#[must_use]
pub fn status(board: &Board, player: Player) -> GameStatus {
    if is_checkmate(board, player) {
        GameStatus::Checkmate
    } else if is_check(board, player) {
        GameStatus::Check
    } else if is_stalemate(board, player) {
        GameStatus::Stalemate
    } else {
        GameStatus::Normal
    }
}

/// Whether some piece of `attacker` threatens `target`. Pawns contribute
/// their attack diagonals; every other piece contributes its move set.
fn attacked_by(board: &Board, attacker: Player, target: Square) -> bool {
    board.pieces(attacker).iter().any(|piece| {
        if piece.kind == PieceKind::Pawn {
            movegen::pawn_attacks(piece.owner, piece.square).contains(&target)
        } else {
            movegen::destinations(board, piece).contains(&target)
        }
    })
}

/// True iff some enemy piece threatens `player`'s king square.
#[must_use]
pub fn is_check(board: &Board, player: Player) -> bool {
    match board.king_square(player) {
        Some(king) => attacked_by(board, player.opponent(), king),
        None => false,
    }
}

/// True iff every square the king could step to, and the square it stands
/// on, is threatened by the enemy. Destinations held by friendly pieces are
/// not escape candidates and drop out of the test.
#[must_use]
pub fn is_checkmate(board: &Board, player: Player) -> bool {
    let Some(king_square) = board.king_square(player) else {
        return false;
    };
    let Some(king) = board.piece_at(king_square) else {
        return false;
    };
    let mut candidates: ArrayVec<Square, 9> = movegen::destinations(board, king)
        .into_iter()
        .filter(|&square| !matches!(board.piece_at(square), Some(occupant) if occupant.owner == player))
        .collect();
    candidates.push(king_square);
    candidates
        .iter()
        .all(|&square| attacked_by(board, player.opponent(), square))
}

/// True iff `player` is not in check, no non-king piece of theirs has any
/// pseudo-legal move, and every vacant-or-capturable king destination is
/// threatened. A side that is in check is never stalemated: check takes
/// precedence and is reported separately.
#[must_use]
pub fn is_stalemate(board: &Board, player: Player) -> bool {
    if board
        .pieces(player)
        .iter()
        .any(|piece| piece.kind != PieceKind::King && !movegen::destinations(board, piece).is_empty())
    {
        return false;
    }
    let Some(king_square) = board.king_square(player) else {
        return false;
    };
    let Some(king) = board.piece_at(king_square) else {
        return false;
    };
    let opponent = player.opponent();
    if attacked_by(board, opponent, king_square) {
        return false;
    }
    movegen::destinations(board, king)
        .into_iter()
        .filter(|&square| board.piece_at(square).map_or(true, |occupant| occupant.owner != player))
        .all(|square| attacked_by(board, opponent, square))
}

/// The squares `player`'s king may castle to right now, at most one per
/// side. A side is offered when the king and the matching rook both still
/// stand on their home squares and the squares strictly between them are
/// empty. Whether the king is currently attacked, or crosses an attacked
/// square on the way, is not consulted.
#[must_use]
pub fn castle_destinations(board: &Board, player: Player) -> ArrayVec<Square, 2> {
    let backrank = Rank::backrank(player);
    let mut destinations = ArrayVec::new();
    match board.piece_at(Square::new(File::E, backrank)) {
        Some(piece) if piece.kind == PieceKind::King && piece.owner == player => {},
        _ => return destinations,
    }
    let rook_at_home = |file: File| {
        matches!(
            board.piece_at(Square::new(file, backrank)),
            Some(piece) if piece.kind == PieceKind::Rook && piece.owner == player
        )
    };
    let vacant = |files: &[File]| {
        files
            .iter()
            .all(|&file| board.piece_at(Square::new(file, backrank)).is_none())
    };
    if rook_at_home(File::H) && vacant(&[File::F, File::G]) {
        destinations.push(Square::new(File::G, backrank));
    }
    if rook_at_home(File::A) && vacant(&[File::B, File::C, File::D]) {
        destinations.push(Square::new(File::C, backrank));
    }
    destinations
}
