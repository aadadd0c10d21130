//! Chess primitives commonly used within [`crate::chess`].

use std::fmt::{self, Write};
use std::mem;

use anyhow::bail;
use itertools::Itertools;

#[allow(missing_docs)]
pub const BOARD_WIDTH: u8 = 8;

/// Represents a column (vertical row) of the chessboard. In chess notation, it
/// is normally represented with a lowercase letter.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::EnumIter)]
#[allow(missing_docs)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl TryFrom<char> for File {
    type Error = anyhow::Error;

    fn try_from(file: char) -> anyhow::Result<Self> {
        match file {
            'a'..='h' => Ok(unsafe { mem::transmute::<u8, Self>(file as u8 - b'a') }),
            _ => bail!("file should be within 'a'..='h', got '{file}'"),
        }
    }
}

impl TryFrom<u8> for File {
    type Error = anyhow::Error;

    fn try_from(column: u8) -> anyhow::Result<Self> {
        match column {
            0..=7 => Ok(unsafe { mem::transmute::<u8, Self>(column) }),
            _ => bail!("file should be within 0..BOARD_WIDTH, got {column}"),
        }
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", (b'a' + *self as u8) as char)
    }
}

/// Represents a horizontal row of the chessboard. In chess notation, it is
/// represented with a number. The implementation assumes zero-based values
/// (i.e. rank 1 would be 0).
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::EnumIter)]
#[allow(missing_docs)]
pub enum Rank {
    One = 0,
    Two = 1,
    Three = 2,
    Four = 3,
    Five = 4,
    Six = 5,
    Seven = 6,
    Eight = 7,
}

impl Rank {
    /// The rank a player's king and rooks start on: both must still sit there
    /// for castling to be available.
    #[must_use]
    pub const fn backrank(player: Player) -> Self {
        match player {
            Player::White => Self::One,
            Player::Black => Self::Eight,
        }
    }

    /// The rank a player's pawns start on, from which a two-square advance is
    /// permitted.
    #[must_use]
    pub const fn pawns_starting(player: Player) -> Self {
        match player {
            Player::White => Self::Two,
            Player::Black => Self::Seven,
        }
    }

    /// The farthest rank for a player's pawns: reaching it triggers
    /// promotion.
    #[must_use]
    pub const fn promotion(player: Player) -> Self {
        match player {
            Player::White => Self::Eight,
            Player::Black => Self::One,
        }
    }

    /// The rank a player's pawn must stand on to capture en passant (its
    /// fifth relative rank).
    #[must_use]
    pub const fn en_passant(player: Player) -> Self {
        match player {
            Player::White => Self::Five,
            Player::Black => Self::Four,
        }
    }
}

impl TryFrom<char> for Rank {
    type Error = anyhow::Error;

    fn try_from(rank: char) -> anyhow::Result<Self> {
        match rank {
            '1'..='8' => Ok(unsafe { mem::transmute::<u8, Self>(rank as u8 - b'1') }),
            _ => bail!("rank should be within '1'..='8', got '{rank}'"),
        }
    }
}

impl TryFrom<u8> for Rank {
    type Error = anyhow::Error;

    fn try_from(row: u8) -> anyhow::Result<Self> {
        match row {
            0..=7 => Ok(unsafe { mem::transmute::<u8, Self>(row) }),
            _ => bail!("rank should be within 0..BOARD_WIDTH, got {row}"),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", *self as u8 + 1)
    }
}

/// A board coordinate: a file paired with a rank. Off-board coordinates are
/// not representable; every constructed square is on the board.
///
/// ```
/// use tabia::chess::core::{File, Rank, Square};
///
/// let square = Square::try_from("e2").unwrap();
/// assert_eq!(square.file(), File::E);
/// assert_eq!(square.rank(), Rank::Two);
/// assert_eq!(square.to_string(), "e2");
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square {
    file: File,
    rank: Rank,
}

impl Square {
    /// Connects file (column) and rank (row) to form a full square.
    #[must_use]
    pub const fn new(file: File, rank: Rank) -> Self {
        Self { file, rank }
    }

    /// Returns file (column) on which the square is located.
    #[must_use]
    pub const fn file(self) -> File {
        self.file
    }

    /// Returns rank (row) on which the square is located.
    #[must_use]
    pub const fn rank(self) -> Rank {
        self.rank
    }

    /// Steps `file_delta` files and `rank_delta` ranks away, returning `None`
    /// when the step leaves the board.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn offset_by(self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let file = i16::from(self.file as u8) + i16::from(file_delta);
        let rank = i16::from(self.rank as u8) + i16::from(rank_delta);
        let range = 0..i16::from(BOARD_WIDTH);
        if !range.contains(&file) || !range.contains(&rank) {
            return None;
        }
        match (File::try_from(file as u8), Rank::try_from(rank as u8)) {
            (Ok(file), Ok(rank)) => Some(Self::new(file, rank)),
            _ => None,
        }
    }
}

impl TryFrom<&str> for Square {
    type Error = anyhow::Error;

    fn try_from(square: &str) -> anyhow::Result<Self> {
        let (file, rank) = match square.chars().collect_tuple() {
            Some((file, rank)) => (file, rank),
            None => bail!(
                "square should be two-char, got {square} with {} chars",
                square.chars().count()
            ),
        };
        Ok(Self::new(file.try_into()?, rank.try_into()?))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

/// A standard game of chess is played between two players: White (having the
/// advantage of the first turn) and Black.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Player {
    White,
    Black,
}

impl Player {
    /// "Flips" the color.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Rank increment of this player's pawn advance.
    #[must_use]
    pub const fn pawn_step(self) -> i8 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match &self {
                Self::White => "White",
                Self::Black => "Black",
            }
        )
    }
}

/// Standard [chess pieces].
///
/// [chess pieces]: https://en.wikipedia.org/wiki/Chess_piece
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub(crate) const fn letter(self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Rook => 'R',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.letter())
    }
}

/// A pawn can be promoted to a queen, rook, bishop or a knight.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Promotion {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl Promotion {
    /// Resolves a raw promotion request. An empty or unrecognized request
    /// falls back to the queen rather than surfacing an error: the ambiguity
    /// is resolved here, never reported back to the caller.
    #[must_use]
    pub fn from_request(request: Option<&str>) -> Self {
        match request {
            Some("Q") => Self::Queen,
            Some("R") => Self::Rook,
            Some("B") => Self::Bishop,
            Some("N") => Self::Knight,
            _ => Self::Queen,
        }
    }
}

impl From<Promotion> for PieceKind {
    fn from(promotion: Promotion) -> Self {
        match promotion {
            Promotion::Queen => Self::Queen,
            Promotion::Rook => Self::Rook,
            Promotion::Bishop => Self::Bishop,
            Promotion::Knight => Self::Knight,
        }
    }
}

/// A specific piece owned by a player, standing on a square.
///
/// `just_double_stepped` is meaningful only for pawns: it is set by a
/// two-square advance and cleared the next time that same pawn moves (or the
/// pawn is captured en passant before that happens). Moves by other pieces
/// leave it untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    #[allow(missing_docs)]
    pub owner: Player,
    #[allow(missing_docs)]
    pub kind: PieceKind,
    #[allow(missing_docs)]
    pub square: Square,
    #[allow(missing_docs)]
    pub just_double_stepped: bool,
}

impl Piece {
    /// Creates a piece with a clear double-step marker.
    #[must_use]
    pub const fn new(owner: Player, kind: PieceKind, square: Square) -> Self {
        Self {
            owner,
            kind,
            square,
            just_double_stepped: false,
        }
    }
}

impl fmt::Display for Piece {
    /// Two-letter piece code: color prefix and kind letter, e.g. `wp` for a
    /// white pawn and `bK` for the black king.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(match self.owner {
            Player::White => 'w',
            Player::Black => 'b',
        })?;
        f.write_char(self.kind.letter())
    }
}
