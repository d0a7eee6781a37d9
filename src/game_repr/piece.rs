#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    /// Magnitude of the compact signed code (3..=8).
    pub fn code(&self) -> i8 {
        match self {
            Self::Pawn => 3,
            Self::Rook => 4,
            Self::Knight => 5,
            Self::Bishop => 6,
            Self::Queen => 7,
            Self::King => 8,
        }
    }

    pub fn from_code(magnitude: i8) -> Option<Self> {
        match magnitude {
            3 => Some(Self::Pawn),
            4 => Some(Self::Rook),
            5 => Some(Self::Knight),
            6 => Some(Self::Bishop),
            7 => Some(Self::Queen),
            8 => Some(Self::King),
            _ => None,
        }
    }

    /// Lowercase FEN letter.
    pub fn letter(&self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Rook => 'r',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Pawn => "pawn",
            Self::Rook => "rook",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Parses a FEN piece letter; uppercase is white.
    pub fn from_char(c: char) -> Option<Self> {
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
        Some(Self { color, kind })
    }

    pub fn to_char(&self) -> char {
        match self.color {
            Color::White => self.kind.letter().to_ascii_uppercase(),
            Color::Black => self.kind.letter(),
        }
    }
}

/// Compact code of a wall cell in the padded grid.
pub const WALL_CODE: i8 = 0;
/// Compact code of a playable empty square.
pub const EMPTY_CODE: i8 = 1;

/// One cell of the padded backing grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Wall,
    Empty,
    Piece(Piece),
}

impl Cell {
    pub fn piece(&self) -> Option<Piece> {
        match self {
            Cell::Piece(p) => Some(*p),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Pieces of `upper` are negative, pieces of the other color positive.
    pub fn code(&self, upper: Color) -> i8 {
        match self {
            Cell::Wall => WALL_CODE,
            Cell::Empty => EMPTY_CODE,
            Cell::Piece(p) if p.color == upper => -p.kind.code(),
            Cell::Piece(p) => p.kind.code(),
        }
    }

    pub fn from_code(code: i8, upper: Color) -> Option<Self> {
        match code {
            WALL_CODE => Some(Cell::Wall),
            EMPTY_CODE => Some(Cell::Empty),
            _ => {
                let kind = PieceKind::from_code(code.checked_abs()?)?;
                let color = if code < 0 { upper } else { upper.opposite() };
                Some(Cell::Piece(Piece { color, kind }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_sign_follows_upper_color() {
        let white_queen = Cell::Piece(Piece::new(Color::White, PieceKind::Queen));
        assert_eq!(white_queen.code(Color::Black), 7);
        assert_eq!(white_queen.code(Color::White), -7);
        assert_eq!(Cell::from_code(-7, Color::White), Some(white_queen));
        assert_eq!(Cell::from_code(7, Color::Black), Some(white_queen));
    }

    #[test]
    fn test_special_codes() {
        assert_eq!(Cell::Empty.code(Color::Black), EMPTY_CODE);
        assert_eq!(Cell::Wall.code(Color::White), WALL_CODE);
        assert_eq!(Cell::from_code(2, Color::Black), None);
        assert_eq!(Cell::from_code(9, Color::Black), None);
    }

    #[test]
    fn test_fen_letters() {
        let p = Piece::from_char('N').unwrap();
        assert_eq!(p, Piece::new(Color::White, PieceKind::Knight));
        assert_eq!(p.to_char(), 'N');
        assert_eq!(Piece::from_char('k').unwrap().to_char(), 'k');
        assert!(Piece::from_char('x').is_none());
    }
}
