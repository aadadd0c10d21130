//! Pseudo-legal move generation: piece-movement geometry and occupancy rules,
//! deliberately blind to king safety (see [`crate::chess::status`] for the
//! latter).
//!
//! One generator per [`PieceKind`], selected by a `match` in
//! [`destinations`]. Two quirks of the generated sets are relied upon by the
//! game-state evaluator and must not be "fixed" here:
//!
//! - knight and king sets are bounds-checked only, so they include squares
//!   occupied by friendly pieces (which is how those pieces "defend" their
//!   neighbors), while sliding sets stop short of friendly occupants;
//! - pawns expose a separate bounds-only attack set, because a pawn threatens
//!   its capture diagonals even while they are empty.

use arrayvec::ArrayVec;

use crate::chess::board::Board;
use crate::chess::core::{Piece, PieceKind, Player, Rank, Square};

/// Bounded set of destination squares for a single piece. A queen in the
/// center of an open board tops out at 27 destinations.
pub type SquareSet = ArrayVec<Square, 28>;

const ORTHOGONAL_RAYS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL_RAYS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (-1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, 1),
    (-2, -1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (0, -1),
    (-1, 0),
    (1, 0),
    (1, 1),
    (-1, 1),
    (-1, -1),
    (1, -1),
];

/// Produces the set of squares `piece` could move to, ignoring whether the
/// move would leave its own king in check. The order of the set is
/// unspecified.
#[must_use]
pub fn destinations(board: &Board, piece: &Piece) -> SquareSet {
    match piece.kind {
        PieceKind::Pawn => pawn_destinations(board, piece),
        PieceKind::Knight => stepping(piece.square, &KNIGHT_OFFSETS),
        PieceKind::Bishop => sliding(board, piece, &DIAGONAL_RAYS),
        PieceKind::Rook => sliding(board, piece, &ORTHOGONAL_RAYS),
        PieceKind::Queen => {
            let mut moves = sliding(board, piece, &ORTHOGONAL_RAYS);
            moves.extend(sliding(board, piece, &DIAGONAL_RAYS));
            moves
        },
        PieceKind::King => stepping(piece.square, &KING_OFFSETS),
    }
}

/// Walks each ray one square at a time: the ray ends at the board edge, stops
/// short of a friendly occupant and stops at (including) an enemy occupant.
fn sliding(board: &Board, piece: &Piece, rays: &[(i8, i8)]) -> SquareSet {
    let mut moves = SquareSet::new();
    for &(file_step, rank_step) in rays {
        let mut current = piece.square;
        while let Some(next) = current.offset_by(file_step, rank_step) {
            match board.piece_at(next) {
                Some(occupant) => {
                    if occupant.owner != piece.owner {
                        moves.push(next);
                    }
                    break;
                },
                None => {
                    moves.push(next);
                    current = next;
                },
            }
        }
    }
    moves
}

/// Fixed offset sets for knight and king, filtered to the board only.
fn stepping(from: Square, offsets: &[(i8, i8)]) -> SquareSet {
    offsets
        .iter()
        .filter_map(|&(file_step, rank_step)| from.offset_by(file_step, rank_step))
        .collect()
}

/// The two capture diagonals a pawn of `player` threatens from `square`,
/// bounds-checked only. Used for king-safety queries, where a pawn threatens
/// these squares regardless of what stands on them.
#[must_use]
pub fn pawn_attacks(player: Player, square: Square) -> ArrayVec<Square, 2> {
    let step = player.pawn_step();
    [(-1, step), (1, step)]
        .iter()
        .filter_map(|&(file_step, rank_step)| square.offset_by(file_step, rank_step))
        .collect()
}

fn pawn_destinations(board: &Board, piece: &Piece) -> SquareSet {
    let mut moves = SquareSet::new();
    let step = piece.owner.pawn_step();
    // Quiet advances: one square forward, two from the home rank when both
    // squares are empty.
    if let Some(one_ahead) = piece.square.offset_by(0, step) {
        if board.piece_at(one_ahead).is_none() {
            moves.push(one_ahead);
            if piece.square.rank() == Rank::pawns_starting(piece.owner) {
                if let Some(two_ahead) = one_ahead.offset_by(0, step) {
                    if board.piece_at(two_ahead).is_none() {
                        moves.push(two_ahead);
                    }
                }
            }
        }
    }
    // Captures need an enemy occupant, unlike the attack set.
    for target in pawn_attacks(piece.owner, piece.square) {
        if let Some(occupant) = board.piece_at(target) {
            if occupant.owner != piece.owner {
                moves.push(target);
            }
        }
    }
    moves.extend(en_passant_targets(board, piece));
    moves
}

/// En passant destinations for `piece`: a pawn on its fifth relative rank may
/// capture diagonally into an empty square when the adjacent file holds an
/// enemy pawn that just advanced two squares. The victim is the pawn beside
/// the mover, not anything on the destination square.
#[must_use]
pub fn en_passant_targets(board: &Board, piece: &Piece) -> ArrayVec<Square, 2> {
    let mut targets = ArrayVec::new();
    if piece.kind != PieceKind::Pawn || piece.square.rank() != Rank::en_passant(piece.owner) {
        return targets;
    }
    let step = piece.owner.pawn_step();
    for side in [1i8, -1] {
        let Some(beside) = piece.square.offset_by(side, 0) else {
            continue;
        };
        let Some(neighbor) = board.piece_at(beside) else {
            continue;
        };
        if neighbor.owner == piece.owner
            || neighbor.kind != PieceKind::Pawn
            || !neighbor.just_double_stepped
        {
            continue;
        }
        if let Some(destination) = beside.offset_by(0, step) {
            if board.piece_at(destination).is_none() {
                targets.push(destination);
            }
        }
    }
    targets
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::chess::core::Player;

    fn square(coordinate: &str) -> Square {
        Square::try_from(coordinate).unwrap()
    }

    fn squares(coordinates: &[&str]) -> Vec<Square> {
        let mut parsed: Vec<Square> = coordinates.iter().map(|s| square(s)).collect();
        parsed.sort_unstable();
        parsed
    }

    fn sorted(set: SquareSet) -> Vec<Square> {
        let mut moves: Vec<Square> = set.into_iter().collect();
        moves.sort_unstable();
        moves
    }

    #[test]
    fn rook_rays_stop_at_occupants() {
        let mut board = Board::empty();
        let rook = Piece::new(Player::White, PieceKind::Rook, square("d4"));
        board.place(rook.clone());
        // Friendly blocker up the file, enemy blocker along the rank.
        board.place(Piece::new(Player::White, PieceKind::Pawn, square("d6")));
        board.place(Piece::new(Player::Black, PieceKind::Knight, square("f4")));

        assert_eq!(
            sorted(destinations(&board, &rook)),
            squares(&["d5", "d3", "d2", "d1", "e4", "f4", "c4", "b4", "a4"])
        );
    }

    #[test]
    fn bishop_sweeps_open_diagonals() {
        let mut board = Board::empty();
        let bishop = Piece::new(Player::Black, PieceKind::Bishop, square("c6"));
        board.place(bishop.clone());
        board.place(Piece::new(Player::White, PieceKind::Pawn, square("e4")));

        assert_eq!(
            sorted(destinations(&board, &bishop)),
            squares(&["b7", "a8", "d7", "e8", "b5", "a4", "d5", "e4"])
        );
    }

    #[test]
    fn queen_covers_both_ray_families() {
        let mut board = Board::empty();
        let queen = Piece::new(Player::White, PieceKind::Queen, square("d4"));
        board.place(queen.clone());
        assert_eq!(destinations(&board, &queen).len(), 27);
    }

    #[test]
    fn knight_ignores_occupancy() {
        let mut board = Board::starting();
        // Knights can move over the pawn wall from the initial setup.
        let knight = board.piece_at(square("g1")).unwrap().clone();
        assert_eq!(
            sorted(destinations(&board, &knight)),
            squares(&["e2", "f3", "h3"])
        );
        // e2 holds a friendly pawn and is still listed: stepping sets are
        // bounds-checked only, which is how a knight defends its neighbors.
        let _ = board.move_piece(square("b8"), square("c6"));
        let defender = board.piece_at(square("c6")).unwrap().clone();
        assert!(destinations(&board, &defender).contains(&square("e7")));
    }

    #[test]
    fn knight_in_the_corner() {
        let mut board = Board::empty();
        let knight = Piece::new(Player::White, PieceKind::Knight, square("a1"));
        board.place(knight.clone());
        assert_eq!(
            sorted(destinations(&board, &knight)),
            squares(&["b3", "c2"])
        );
    }

    #[test]
    fn king_steps_one_square() {
        let mut board = Board::empty();
        let king = Piece::new(Player::Black, PieceKind::King, square("h8"));
        board.place(king.clone());
        assert_eq!(
            sorted(destinations(&board, &king)),
            squares(&["g8", "g7", "h7"])
        );
    }

    #[test]
    fn pawn_advances() {
        let board = Board::starting();
        let pawn = board.piece_at(square("e2")).unwrap();
        assert_eq!(sorted(destinations(&board, pawn)), squares(&["e3", "e4"]));
    }

    #[test]
    fn pawn_double_step_needs_both_squares_empty() {
        let mut board = Board::starting();
        // A blocker two squares ahead leaves only the single step.
        board.place(Piece::new(Player::Black, PieceKind::Knight, square("e4")));
        let pawn = board.piece_at(square("e2")).unwrap();
        assert_eq!(sorted(destinations(&board, pawn)), squares(&["e3"]));
        // A blocker directly ahead stops the pawn entirely.
        let mut board = Board::starting();
        board.place(Piece::new(Player::Black, PieceKind::Knight, square("e3")));
        let pawn = board.piece_at(square("e2")).unwrap();
        assert!(destinations(&board, pawn).is_empty());
    }

    #[test]
    fn pawn_captures_diagonally() {
        let mut board = Board::empty();
        let pawn = Piece::new(Player::White, PieceKind::Pawn, square("d4"));
        board.place(pawn.clone());
        board.place(Piece::new(Player::Black, PieceKind::Pawn, square("c5")));
        board.place(Piece::new(Player::White, PieceKind::Pawn, square("e5")));

        // Friendly piece on e5 is neither capturable nor steppable-over.
        assert_eq!(
            sorted(destinations(&board, &pawn)),
            squares(&["c5", "d5"])
        );
    }

    #[test]
    fn pawn_attack_set_ignores_occupancy() {
        let pawn = Piece::new(Player::White, PieceKind::Pawn, square("d4"));
        let mut attacks: Vec<Square> = pawn_attacks(pawn.owner, pawn.square).into_iter().collect();
        attacks.sort_unstable();
        assert_eq!(attacks, squares(&["c5", "e5"]));

        let edge = Piece::new(Player::Black, PieceKind::Pawn, square("a4"));
        assert_eq!(
            pawn_attacks(edge.owner, edge.square).as_slice(),
            &[square("b3")]
        );
    }

    #[test]
    fn en_passant_window() {
        let mut board = Board::empty();
        let pawn = Piece::new(Player::White, PieceKind::Pawn, square("d5"));
        board.place(pawn.clone());
        let mut victim = Piece::new(Player::Black, PieceKind::Pawn, square("e5"));
        victim.just_double_stepped = true;
        board.place(victim);

        assert_eq!(
            en_passant_targets(&board, &pawn).as_slice(),
            &[square("e6")]
        );
        assert!(destinations(&board, &pawn).contains(&square("e6")));

        // Without the double-step marker the capture is not offered.
        let mut board = Board::empty();
        board.place(pawn.clone());
        board.place(Piece::new(Player::Black, PieceKind::Pawn, square("e5")));
        assert!(en_passant_targets(&board, &pawn).is_empty());
    }

    #[test]
    fn en_passant_requires_fifth_relative_rank() {
        let mut board = Board::empty();
        let pawn = Piece::new(Player::White, PieceKind::Pawn, square("d4"));
        board.place(pawn.clone());
        let mut neighbor = Piece::new(Player::Black, PieceKind::Pawn, square("e4"));
        neighbor.just_double_stepped = true;
        board.place(neighbor);
        assert!(en_passant_targets(&board, &pawn).is_empty());
    }
}
