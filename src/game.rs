//! The boundary between the rules engine and a turn-driving caller.
//!
//! Coordinates arrive here already split into (file, rank) pairs; raw input
//! parsing stays with the caller. [`Game::attempt_move`] validates a
//! half-move against the mover's pseudo-legal set, executes it (dispatching
//! the castling, en passant and promotion families) and reports what
//! happened. Rejections never mutate any state, so the caller can simply
//! re-prompt.

use std::fmt;

use crate::chess::board::Board;
use crate::chess::core::{PieceKind, Player, Promotion, Rank, Square};
use crate::chess::movegen::{self, SquareSet};
use crate::chess::status::{self, GameStatus};

/// Why a half-move was turned down. Out-of-bounds coordinates have no
/// representation here: they can not be constructed as [`Square`] values in
/// the first place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// The origin square holds no piece.
    VacantSquare,
    /// The origin square holds the opponent's piece; the payload names whose
    /// turn it is.
    OpponentPiece(Player),
    /// The destination is not in the mover's pseudo-legal set.
    IllegalDestination,
    /// The destination holds a piece of the mover's own color.
    FriendlyOccupied,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::VacantSquare => write!(f, "Illegal move, try again (Cannot retrieve piece)"),
            Self::OpponentPiece(player) => {
                write!(f, "Illegal move, try again (Must pick {player} piece)")
            },
            Self::IllegalDestination => write!(f, "Illegal move, try again"),
            Self::FriendlyOccupied => {
                write!(f, "Illegal move, try again (Destination already occupied)")
            },
        }
    }
}

/// What a completed (or refused) half-move amounted to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// A quiet relocation.
    Moved,
    /// The destination held an enemy piece of the reported kind. A captured
    /// king ends the game; acting on that is the caller's job.
    MovedAndCaptured(PieceKind),
    /// King and rook were relocated in one step.
    Castled,
    /// An en passant capture removed the reported kind (always a pawn) from
    /// beside the mover.
    EnPassantCaptured(PieceKind),
    /// The pawn reached its farthest rank and was replaced by the reported
    /// kind. A capture on the promotion square is folded into this variant.
    Promoted(PieceKind),
    /// Nothing happened; the payload says why.
    Rejected(Rejection),
}

/// One session of chess: the board plus the side to move. Owns the board
/// exclusively for the duration of the game; there is no undo.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    side_to_move: Player,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Starts a game from the standard setup, White to move.
    #[must_use]
    pub fn new() -> Self {
        Self {
            board: Board::starting(),
            side_to_move: Player::White,
        }
    }

    /// Starts a game from an arbitrary position.
    #[must_use]
    pub const fn from_position(board: Board, side_to_move: Player) -> Self {
        Self {
            board,
            side_to_move,
        }
    }

    /// Read access to the position.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Whose turn it is.
    #[must_use]
    pub const fn side_to_move(&self) -> Player {
        self.side_to_move
    }

    /// Pseudo-legal destinations of the piece standing on `from`, or `None`
    /// when the square is vacant.
    #[must_use]
    pub fn query_moves(&self, from: Square) -> Option<SquareSet> {
        self.board
            .piece_at(from)
            .map(|piece| movegen::destinations(&self.board, piece))
    }

    /// Evaluates check/checkmate/stalemate for `player`. Derived fresh on
    /// every call: querying twice without an intervening move returns the
    /// same answer.
    #[must_use]
    pub fn status(&self, player: Player) -> GameStatus {
        status::status(&self.board, player)
    }

    /// Validates and executes one half-move for the side to move. On
    /// success the turn passes to the opponent; on rejection nothing
    /// changes, including the side to move.
    ///
    /// `promotion_request` is consulted only when a pawn reaches its
    /// farthest rank; an absent or unrecognized request promotes to a queen.
    pub fn attempt_move(
        &mut self,
        from: Square,
        to: Square,
        promotion_request: Option<&str>,
    ) -> MoveOutcome {
        let piece = match self.board.piece_at(from) {
            Some(piece) => piece.clone(),
            None => return MoveOutcome::Rejected(Rejection::VacantSquare),
        };
        if piece.owner != self.side_to_move {
            return MoveOutcome::Rejected(Rejection::OpponentPiece(self.side_to_move));
        }
        let reachable = movegen::destinations(&self.board, &piece);
        if !reachable.contains(&to) {
            // A castling king slides two files, which the per-piece
            // generator never offers; the evaluator decides availability.
            if piece.kind == PieceKind::King
                && status::castle_destinations(&self.board, piece.owner).contains(&to)
            {
                self.board.castle(piece.owner, to);
                self.side_to_move = self.side_to_move.opponent();
                return MoveOutcome::Castled;
            }
            return MoveOutcome::Rejected(Rejection::IllegalDestination);
        }
        match self.board.piece_at(to) {
            Some(occupant) if occupant.owner == piece.owner => {
                return MoveOutcome::Rejected(Rejection::FriendlyOccupied);
            },
            _ => {},
        }

        let takes_en_passant = piece.kind == PieceKind::Pawn
            && self.board.piece_at(to).is_none()
            && movegen::en_passant_targets(&self.board, &piece).contains(&to);
        let captured = self.board.move_piece(from, to);

        let outcome = if takes_en_passant {
            match self.board.execute_en_passant(to) {
                Some(kind) => MoveOutcome::EnPassantCaptured(kind),
                None => MoveOutcome::Moved,
            }
        } else if piece.kind == PieceKind::Pawn && to.rank() == Rank::promotion(piece.owner) {
            let promotion = Promotion::from_request(promotion_request);
            match self.board.promote(to, promotion) {
                Some(kind) => MoveOutcome::Promoted(kind),
                None => MoveOutcome::Moved,
            }
        } else {
            match captured {
                Some(kind) => MoveOutcome::MovedAndCaptured(kind),
                None => MoveOutcome::Moved,
            }
        };
        self.side_to_move = self.side_to_move.opponent();
        outcome
    }
}
