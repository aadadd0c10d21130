//! Authoritative board state: one collection of live pieces per player, plus
//! the mutations a game is made of (moves, captures, castling, en passant and
//! promotion).
//!
//! The board never rejects anything on its own: legality is decided upstream
//! (see [`crate::chess::movegen`] and [`crate::game`]). Mutations here are
//! whole-step and non-interruptible; captured pieces are removed outright,
//! never soft-deleted.

use std::fmt;

use strum::IntoEnumIterator;

use crate::chess::core::{File, Piece, PieceKind, Player, Promotion, Rank, Square};

/// Piece-list representation of a chess position.
///
/// Invariants: no two pieces (of either color) share a square, and each
/// player has at most one king.
#[derive(Clone, Debug)]
pub struct Board {
    white: Vec<Piece>,
    black: Vec<Piece>,
}

impl Board {
    /// Creates the starting position of the standard chess variant: 16 pieces
    /// per player on their first two ranks.
    #[must_use]
    pub fn starting() -> Self {
        let mut board = Self::empty();
        for player in [Player::White, Player::Black] {
            for file in File::iter() {
                let kind = match file {
                    File::A | File::H => PieceKind::Rook,
                    File::B | File::G => PieceKind::Knight,
                    File::C | File::F => PieceKind::Bishop,
                    File::D => PieceKind::Queen,
                    File::E => PieceKind::King,
                };
                board.place(Piece::new(
                    player,
                    kind,
                    Square::new(file, Rank::backrank(player)),
                ));
                board.place(Piece::new(
                    player,
                    PieceKind::Pawn,
                    Square::new(file, Rank::pawns_starting(player)),
                ));
            }
        }
        board
    }

    /// Creates a board with no pieces, to be filled with [`Board::place`].
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            white: Vec::new(),
            black: Vec::new(),
        }
    }

    /// Puts a piece on the board. The target square must be vacant.
    pub fn place(&mut self, piece: Piece) {
        debug_assert!(
            self.piece_at(piece.square).is_none(),
            "two pieces can not share {}",
            piece.square
        );
        self.pieces_mut(piece.owner).push(piece);
    }

    /// All live pieces of one player, in no particular order.
    #[must_use]
    pub fn pieces(&self, player: Player) -> &[Piece] {
        match player {
            Player::White => &self.white,
            Player::Black => &self.black,
        }
    }

    fn pieces_mut(&mut self, player: Player) -> &mut Vec<Piece> {
        match player {
            Player::White => &mut self.white,
            Player::Black => &mut self.black,
        }
    }

    /// Looks up the piece standing on `square`, if any.
    #[must_use]
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.white
            .iter()
            .chain(self.black.iter())
            .find(|piece| piece.square == square)
    }

    /// The square of a player's king. `None` only once the king has been
    /// captured, which ends the game.
    #[must_use]
    pub fn king_square(&self, player: Player) -> Option<Square> {
        self.pieces(player)
            .iter()
            .find(|piece| piece.kind == PieceKind::King)
            .map(|piece| piece.square)
    }

    fn remove(&mut self, player: Player, square: Square) -> Option<PieceKind> {
        let pieces = self.pieces_mut(player);
        let index = pieces.iter().position(|piece| piece.square == square)?;
        Some(pieces.remove(index).kind)
    }

    /// Relocates the piece standing on `from` to `to`, removing any opposing
    /// occupant of `to` and returning its kind.
    ///
    /// A pawn advancing two ranks gets its double-step marker set; any other
    /// move of that same pawn clears it. Other pieces' markers are untouched.
    pub fn move_piece(&mut self, from: Square, to: Square) -> Option<PieceKind> {
        let owner = self.piece_at(from)?.owner;
        let captured = self.remove(owner.opponent(), to);
        if let Some(piece) = self
            .pieces_mut(owner)
            .iter_mut()
            .find(|piece| piece.square == from)
        {
            piece.square = to;
            if piece.kind == PieceKind::Pawn {
                let advance = (to.rank() as i8 - from.rank() as i8).abs();
                piece.just_double_stepped = advance == 2;
            }
        }
        captured
    }

    /// Removes the pawn captured by an en passant move that already placed
    /// its capturer on `mover`. The victim stands beside the capturer (one
    /// rank behind the destination), not on the destination square itself.
    pub fn execute_en_passant(&mut self, mover: Square) -> Option<PieceKind> {
        let owner = self.piece_at(mover)?.owner;
        let victim = mover.offset_by(0, -owner.pawn_step())?;
        self.remove(owner.opponent(), victim)
    }

    /// Replaces a pawn that reached its farthest rank with a piece of the
    /// chosen kind on the same square. Returns the kind of the replacement,
    /// or `None` when `square` does not hold such a pawn.
    pub fn promote(&mut self, square: Square, promotion: Promotion) -> Option<PieceKind> {
        let piece = self.piece_at(square)?;
        if piece.kind != PieceKind::Pawn || square.rank() != Rank::promotion(piece.owner) {
            return None;
        }
        let owner = piece.owner;
        let _ = self.remove(owner, square);
        let kind = PieceKind::from(promotion);
        self.place(Piece::new(owner, kind, square));
        Some(kind)
    }

    /// Relocates king and rook in one step. `king_to` selects the side from a
    /// fixed table: g-file means the h-rook comes to the f-file, c-file means
    /// the a-rook comes to the d-file. Legality is the caller's concern (see
    /// [`crate::chess::status::castle_destinations`]).
    pub fn castle(&mut self, player: Player, king_to: Square) {
        let backrank = Rank::backrank(player);
        let (rook_from, rook_to) = match king_to.file() {
            File::G => (
                Square::new(File::H, backrank),
                Square::new(File::F, backrank),
            ),
            File::C => (
                Square::new(File::A, backrank),
                Square::new(File::D, backrank),
            ),
            _ => return,
        };
        let _ = self.move_piece(Square::new(File::E, backrank), king_to);
        let _ = self.move_piece(rook_from, rook_to);
    }
}

impl fmt::Display for Board {
    /// Renders the checkered ASCII grid: two-letter piece codes, `##` for
    /// vacant dark squares, rank labels on the right and file labels along
    /// the bottom.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rank in Rank::iter().rev() {
            for file in File::iter() {
                match self.piece_at(Square::new(file, rank)) {
                    Some(piece) => write!(f, "{piece} ")?,
                    None if (file as u8 + rank as u8) % 2 == 0 => write!(f, "## ")?,
                    None => write!(f, "   ")?,
                }
            }
            writeln!(f, "{rank}")?;
        }
        for file in File::iter() {
            write!(f, " {file} ")?;
        }
        writeln!(f)
    }
}
