use std::fmt;

use crate::common::{PhysicsError, Result};
use crate::shapes::Shape;

pub const BOARD_SIZE: usize = 8;

const BACK_RANK: [PieceKind; BOARD_SIZE] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }

    fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Collision footprint for a square of edge `cell`. Every footprint stays
    /// strictly inside half a cell so neighbours never touch at rest.
    pub fn shape(self, cell: f64) -> Shape {
        match self {
            PieceKind::Pawn => Shape::circle(0.30 * cell),
            PieceKind::Knight => Shape::circle(0.38 * cell),
            PieceKind::Bishop => Shape::rect(0.28 * cell, 0.42 * cell),
            PieceKind::Rook => Shape::rect(0.38 * cell, 0.38 * cell),
            PieceKind::Queen => Shape::rect(0.32 * cell, 0.45 * cell),
            PieceKind::King => Shape::rect(0.34 * cell, 0.47 * cell),
        }
    }

    /// Relative weight; heavier pieces shrug off a shake a little better.
    pub fn mass(self) -> f64 {
        match self {
            PieceKind::Pawn => 1.0,
            PieceKind::Knight | PieceKind::Bishop => 3.0,
            PieceKind::Rook => 5.0,
            PieceKind::Queen => 9.0,
            PieceKind::King => 4.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub side: Side,
    pub kind: PieceKind,
}

impl Piece {
    /// Decodes one layout character: `Some(None)` is an empty square, `None`
    /// an unknown code.
    pub fn from_code(code: char) -> Option<Option<Piece>> {
        if code == '.' {
            return Some(None);
        }
        let side = if code.is_ascii_uppercase() { Side::White } else { Side::Black };
        let kind = PieceKind::from_letter(code.to_ascii_lowercase())?;
        Some(Some(Piece { side, kind }))
    }

    pub fn code(self) -> char {
        let letter = self.kind.letter();
        match self.side {
            Side::White => letter.to_ascii_uppercase(),
            Side::Black => letter,
        }
    }
}

/// Board coordinates: `file` 0..8 is a..h from the left, `rank` 0..8 counts
/// up from the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    pub file: u8,
    pub rank: u8,
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, self.rank + 1)
    }
}

/// An 8x8 arrangement of pieces. Text row 0 is the top rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    rows: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Layout {
    /// The usual starting position, white at the bottom.
    pub fn standard() -> Self {
        let mut layout = Self::empty();
        for (file, kind) in BACK_RANK.into_iter().enumerate() {
            let pawn = PieceKind::Pawn;
            layout.rows[0][file] = Some(Piece { side: Side::Black, kind });
            layout.rows[1][file] = Some(Piece { side: Side::Black, kind: pawn });
            layout.rows[BOARD_SIZE - 2][file] = Some(Piece { side: Side::White, kind: pawn });
            layout.rows[BOARD_SIZE - 1][file] = Some(Piece { side: Side::White, kind });
        }
        layout
    }

    pub fn empty() -> Self {
        Self {
            rows: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Parses eight rows of eight codes each: `pnbrqk` for black, `PNBRQK`
    /// for white, `.` for an empty square.
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        if rows.len() != BOARD_SIZE {
            return Err(PhysicsError::InvalidLayout(format!(
                "expected {} rows, got {}",
                BOARD_SIZE,
                rows.len()
            )));
        }

        let mut layout = Self::empty();
        for (row, text) in rows.iter().enumerate() {
            let text = text.as_ref();
            let width = text.chars().count();
            if width != BOARD_SIZE {
                return Err(PhysicsError::InvalidLayout(format!(
                    "row {} has {} squares, expected {}",
                    row, width, BOARD_SIZE
                )));
            }
            for (col, code) in text.chars().enumerate() {
                layout.rows[row][col] = Piece::from_code(code).ok_or_else(|| {
                    PhysicsError::InvalidLayout(format!("unknown code '{}' at row {}, column {}", code, row, col))
                })?;
            }
        }
        Ok(layout)
    }

    pub fn get(&self, square: Square) -> Option<Piece> {
        let (file, rank) = (square.file as usize, square.rank as usize);
        if file >= BOARD_SIZE || rank >= BOARD_SIZE {
            return None;
        }
        self.rows[BOARD_SIZE - 1 - rank][file]
    }

    /// Occupied squares in text order: top row first, left to right.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().filter_map(move |(col, cell)| {
                cell.map(|piece| {
                    let square = Square {
                        file: col as u8,
                        rank: (BOARD_SIZE - 1 - row) as u8,
                    };
                    (square, piece)
                })
            })
        })
    }

    pub fn piece_count(&self) -> usize {
        self.pieces().count()
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.map_or('.', Piece::code))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STANDARD_ROWS: [&str; BOARD_SIZE] = [
        "rnbqkbnr", "pppppppp", "........", "........", "........", "........", "PPPPPPPP", "RNBQKBNR",
    ];

    #[test]
    fn test_standard_layout() {
        let layout = Layout::standard();
        assert_eq!(layout.piece_count(), 32);

        let white_king = layout.get(Square { file: 4, rank: 0 }).unwrap();
        assert_eq!(white_king, Piece { side: Side::White, kind: PieceKind::King });
        let black_queen = layout.get(Square { file: 3, rank: 7 }).unwrap();
        assert_eq!(black_queen, Piece { side: Side::Black, kind: PieceKind::Queen });
        assert!(layout.get(Square { file: 4, rank: 3 }).is_none());

        let white = layout.pieces().filter(|(_, p)| p.side == Side::White).count();
        assert_eq!(white, 16);
    }

    #[test]
    fn test_display_round_trips() {
        let text = Layout::standard().to_string();
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows, STANDARD_ROWS.to_vec());
        assert_eq!(Layout::parse(&rows).unwrap(), Layout::standard());
    }

    #[test]
    fn test_parse_rejects_malformed_rows() {
        let short = ["rnbqkbnr"; 7];
        assert!(matches!(Layout::parse(&short), Err(PhysicsError::InvalidLayout(_))));

        let mut rows = STANDARD_ROWS;
        rows[2] = "...";
        assert!(matches!(Layout::parse(&rows), Err(PhysicsError::InvalidLayout(_))));

        rows[2] = "...x....";
        let err = Layout::parse(&rows).unwrap_err();
        assert_eq!(
            err,
            PhysicsError::InvalidLayout("unknown code 'x' at row 2, column 3".to_string())
        );
    }

    #[test]
    fn test_pieces_in_text_order() {
        let rows = ["k.......", "........", "........", "........", "........", "........", "........", ".......K"];
        let layout = Layout::parse(&rows).unwrap();
        let pieces: Vec<_> = layout.pieces().collect();
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[0].0, Square { file: 0, rank: 7 });
        assert_eq!(pieces[0].1.side, Side::Black);
        assert_eq!(pieces[1].0, Square { file: 7, rank: 0 });
        assert_eq!(pieces[1].0.to_string(), "h1");
    }

    #[test]
    fn test_piece_shapes_fit_their_square() {
        let kinds = [
            PieceKind::Pawn,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Rook,
            PieceKind::Queen,
            PieceKind::King,
        ];
        for kind in kinds {
            let fits = match kind.shape(1.0) {
                Shape::Circle(c) => c.radius < 0.5,
                Shape::Box(r) => r.half_width < 0.5 && r.half_height < 0.5,
            };
            assert!(fits, "{:?} overflows its square", kind);
            assert!(kind.mass() > 0.0);
        }
    }
}
