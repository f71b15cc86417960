// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Core value types: squares, files, ranks, colors, pieces and castling
//! rights, along with the compact integer "piece code" used when a piece
//! needs to travel as a single number.
use num_traits::{FromPrimitive, ToPrimitive};
use std::convert::TryFrom;
use std::fmt::{self, Display, Write};

// TableIndex is a trait for all types that can serve as an index into a table.
// It is common to use these types as indices into tables, so this trait allows
// any type implementing To and FromPrimitive to be used as table indices.
pub trait TableIndex {
    fn as_index(self) -> usize;
    fn from_index(idx: usize) -> Self;
}

impl<T> TableIndex for T
where
    T: FromPrimitive + ToPrimitive,
{
    fn as_index(self) -> usize {
        self.to_u32().unwrap() as usize
    }

    fn from_index(idx: usize) -> T {
        <T as FromPrimitive>::from_u64(idx as u64).unwrap()
    }
}

#[rustfmt::skip]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, FromPrimitive, ToPrimitive)]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

impl Square {
    pub fn of(rank: Rank, file: File) -> Square {
        Square::from_index(rank.as_index() * 8 + file.as_index())
    }

    pub fn rank(self) -> Rank {
        Rank::from_index(self.as_index() >> 3)
    }

    pub fn file(self) -> File {
        File::from_index(self.as_index() & 7)
    }

    /// Offsets this square by a raw index delta. The caller is responsible for
    /// staying on the board; consult `geometry::edge_distance` first.
    pub fn plus(self, offset: i32) -> Square {
        let prim = self.as_index() as i32 + offset;
        debug_assert!(prim >= 0 && prim < 64, "square offset left the board");
        Square::from_index(prim as usize)
    }

    pub fn towards(self, dir: Direction) -> Square {
        self.plus(dir.as_vector())
    }

    /// Iterates over all 64 squares in index order, A1 first.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square::from_index)
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl TryFrom<&str> for Square {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let mut chars = value.chars();
        let file = File::try_from(chars.next().ok_or(())?)?;
        let rank = Rank::try_from(chars.next().ok_or(())?)?;
        if chars.next().is_some() {
            return Err(());
        }

        Ok(Square::of(rank, file))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum Rank {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
}

impl Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char((b'1' + self.as_index() as u8) as char)
    }
}

impl TryFrom<char> for Rank {
    type Error = ();

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '1'..='8' => Ok(Rank::from_index(value as usize - '1' as usize)),
            _ => Err(()),
        }
    }
}

pub static RANKS: [Rank; 8] = [
    Rank::One,
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum File {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl Display for File {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char((b'a' + self.as_index() as u8) as char)
    }
}

impl TryFrom<char> for File {
    type Error = ();

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'a'..='h' => Ok(File::from_index(value as usize - 'a' as usize)),
            _ => Err(()),
        }
    }
}

pub static FILES: [File; 8] = [
    File::A,
    File::B,
    File::C,
    File::D,
    File::E,
    File::F,
    File::G,
    File::H,
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn toggle(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// The rank a pawn of this color starts on.
    pub fn pawn_rank(self) -> Rank {
        match self {
            Color::White => Rank::Two,
            Color::Black => Rank::Seven,
        }
    }

    /// The rank a pawn of this color promotes on.
    pub fn promotion_rank(self) -> Rank {
        match self {
            Color::White => Rank::Eight,
            Color::Black => Rank::One,
        }
    }

    /// The direction this color's pawns advance in.
    pub fn forward(self) -> Direction {
        match self {
            Color::White => Direction::North,
            Color::Black => Direction::South,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self {
            Color::White => 'w',
            Color::Black => 'b',
        };
        f.write_char(chr)
    }
}

pub static COLORS: [Color; 2] = [Color::White, Color::Black];

/// Kinds of chess pieces. The discriminants are the kind ordinals of the
/// piece code.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum PieceKind {
    King = 1,
    Pawn = 2,
    Knight = 3,
    Bishop = 4,
    Rook = 5,
    Queen = 6,
}

impl PieceKind {
    /// The uppercase letter used for this kind in algebraic notation.
    pub fn letter(self) -> char {
        match self {
            PieceKind::King => 'K',
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
        }
    }

    pub fn from_letter(c: char) -> Option<PieceKind> {
        PIECE_KINDS
            .iter()
            .copied()
            .find(|kind| kind.letter() == c.to_ascii_uppercase())
    }
}

impl Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(self.letter().to_ascii_lowercase())
    }
}

pub static PIECE_KINDS: [PieceKind; 6] = [
    PieceKind::King,
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
];

/// The kinds a pawn may promote to.
pub static PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
];

/// The eight compass directions, as raw square index deltas.
#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum Direction {
    North,
    South,
    West,
    East,
    NorthWest,
    SouthEast,
    NorthEast,
    SouthWest,
}

impl Direction {
    pub fn as_vector(self) -> i32 {
        match self {
            Direction::North => 8,
            Direction::South => -8,
            Direction::West => -1,
            Direction::East => 1,
            Direction::NorthWest => 7,
            Direction::SouthEast => -7,
            Direction::NorthEast => 9,
            Direction::SouthWest => -9,
        }
    }
}

pub static DIRECTIONS: [Direction; 8] = [
    Direction::North,
    Direction::South,
    Direction::West,
    Direction::East,
    Direction::NorthWest,
    Direction::SouthEast,
    Direction::NorthEast,
    Direction::SouthWest,
];

pub static ORTHOGONALS: [Direction; 4] = [
    Direction::North,
    Direction::South,
    Direction::West,
    Direction::East,
];

pub static DIAGONALS: [Direction; 4] = [
    Direction::NorthWest,
    Direction::SouthEast,
    Direction::NorthEast,
    Direction::SouthWest,
];

bitflags! {
    pub struct CastleStatus: u8 {
        const NONE = 0;
        const WHITE_KINGSIDE = 0b0000_0001;
        const WHITE_QUEENSIDE = 0b0000_0010;
        const WHITE = Self::WHITE_KINGSIDE.bits | Self::WHITE_QUEENSIDE.bits;
        const BLACK_KINGSIDE = 0b0000_0100;
        const BLACK_QUEENSIDE = 0b0000_1000;
        const BLACK = Self::BLACK_KINGSIDE.bits | Self::BLACK_QUEENSIDE.bits;
    }
}

/// Which side of the board a castle happens on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    pub fn mask(self, color: Color) -> CastleStatus {
        match (color, self) {
            (Color::White, CastleSide::Kingside) => CastleStatus::WHITE_KINGSIDE,
            (Color::White, CastleSide::Queenside) => CastleStatus::WHITE_QUEENSIDE,
            (Color::Black, CastleSide::Kingside) => CastleStatus::BLACK_KINGSIDE,
            (Color::Black, CastleSide::Queenside) => CastleStatus::BLACK_QUEENSIDE,
        }
    }

    /// The square the rook on this side starts the game on.
    pub fn rook_home(self, color: Color) -> Square {
        match (color, self) {
            (Color::White, CastleSide::Kingside) => Square::H1,
            (Color::White, CastleSide::Queenside) => Square::A1,
            (Color::Black, CastleSide::Kingside) => Square::H8,
            (Color::Black, CastleSide::Queenside) => Square::A8,
        }
    }

    /// The direction the king travels when castling on this side.
    pub fn direction(self) -> Direction {
        match self {
            CastleSide::Kingside => Direction::East,
            CastleSide::Queenside => Direction::West,
        }
    }
}

pub static CASTLE_SIDES: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];

/// The square a king of the given color starts the game on.
pub fn king_home(color: Color) -> Square {
    match color {
        Color::White => Square::E1,
        Color::Black => Square::E8,
    }
}

//
// Piece codes
//
// A piece code packs a color bit (white = 8, black = 16) together with the
// kind ordinal (king = 1 through queen = 6). Zero is an empty square.
//

const WHITE_BIT: u8 = 8;
const BLACK_BIT: u8 = 16;
const KIND_MASK: u8 = 7;

pub fn encode(color: Color, kind: PieceKind) -> u8 {
    let color_bit = match color {
        Color::White => WHITE_BIT,
        Color::Black => BLACK_BIT,
    };
    color_bit | kind as u8
}

pub fn decode_color(code: u8) -> Option<Color> {
    match code & (WHITE_BIT | BLACK_BIT) {
        WHITE_BIT => Some(Color::White),
        BLACK_BIT => Some(Color::Black),
        _ => None,
    }
}

pub fn decode_kind(code: u8) -> Option<PieceKind> {
    PieceKind::from_u8(code & KIND_MASK)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Piece {
        Piece { kind, color }
    }

    pub fn code(self) -> u8 {
        encode(self.color, self.kind)
    }

    /// Decodes a piece code. Returns None for the empty code, or for any code
    /// whose color or kind does not decode.
    pub fn from_code(code: u8) -> Option<Piece> {
        let color = decode_color(code)?;
        let kind = decode_kind(code)?;
        Some(Piece::new(kind, color))
    }

    pub fn from_fen(c: char) -> Option<Piece> {
        let kind = match c.to_ascii_lowercase() {
            'k' => PieceKind::King,
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            _ => return None,
        };
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(kind, color))
    }

    pub fn to_fen(self) -> char {
        match self.color {
            Color::White => self.kind.letter(),
            Color::Black => self.kind.letter().to_ascii_lowercase(),
        }
    }
}

impl TryFrom<char> for Piece {
    type Error = ();

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Piece::from_fen(c).ok_or(())
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(self.to_fen())
    }
}
