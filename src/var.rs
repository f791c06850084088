use std::fmt::{Display, Formatter};
use std::ops::Not;
use std::str::FromStr;

use itertools::Itertools;
use thiserror::Error;

use crate::location::Location;
use crate::puzzle::ColorId;

/// A Boolean variable of the Numberlink encoding.
///
/// The derived ordering sorts by kind first (horizontal, vertical, color), then by location, then by color.
/// Its text form is `h.<x>.<y>`, `v.<x>.<y>` or `c.<x>.<y>.<k>`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum VarKey {
    /// The cell at `location` is linked to the cell to its right.
    Horizontal {
        /// Left cell of the pair.
        location: Location,
    },
    /// The cell at `location` is linked to the cell below it.
    Vertical {
        /// Upper cell of the pair.
        location: Location,
    },
    /// The cell at `location` holds `color`.
    Color {
        /// The colored cell.
        location: Location,
        /// Numbered from 1.
        color: ColorId,
    },
}

impl VarKey {
    /// `h.x.y`
    pub fn horizontal(x: usize, y: usize) -> Self {
        Self::Horizontal { location: Location(x, y) }
    }

    /// `v.x.y`
    pub fn vertical(x: usize, y: usize) -> Self {
        Self::Vertical { location: Location(x, y) }
    }

    /// `c.x.y.k`
    pub fn color(x: usize, y: usize, color: ColorId) -> Self {
        Self::Color { location: Location(x, y), color }
    }

    /// The cell this variable is anchored at; for edges, the upper or left of the two cells.
    pub fn location(&self) -> Location {
        match self {
            Self::Horizontal { location } | Self::Vertical { location } | Self::Color { location, .. } => *location,
        }
    }

    /// Both cells joined by an edge variable, or `None` for a color variable.
    pub fn link(&self) -> Option<(Location, Location)> {
        match *self {
            Self::Horizontal { location } => Some((location, location.offset_by((1, 0)))),
            Self::Vertical { location } => Some((location, location.offset_by((0, 1)))),
            Self::Color { .. } => None,
        }
    }

    /// This variable, negated unless `positive`.
    #[inline]
    pub fn lit(self, positive: bool) -> Literal {
        Literal { key: self, positive }
    }

    /// Shorthand for `lit(true)`.
    #[inline]
    pub fn positive(self) -> Literal {
        self.lit(true)
    }

    /// Shorthand for `lit(false)`.
    #[inline]
    pub fn negative(self) -> Literal {
        self.lit(false)
    }
}

/// A [`VarKey`] or its negation.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Literal {
    /// The underlying variable.
    pub key: VarKey,
    /// `false` for a negated literal.
    pub positive: bool,
}

impl Literal {
    #[inline]
    #[allow(missing_docs)]
    pub fn is_positive(&self) -> bool {
        self.positive
    }

    #[inline]
    #[allow(missing_docs)]
    pub fn is_negative(&self) -> bool {
        !self.positive
    }
}

impl Not for Literal {
    type Output = Literal;

    fn not(self) -> Self::Output {
        self.key.lit(!self.positive)
    }
}

/// A disjunction of literals.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Clause(pub Vec<Literal>);

impl Clause {
    /// The literals, in the order they were emitted.
    pub fn literals(&self) -> &[Literal] {
        &self.0
    }
}

impl From<Vec<Literal>> for Clause {
    fn from(value: Vec<Literal>) -> Self {
        Self(value)
    }
}

impl Display for VarKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Horizontal { location } => write!(f, "h.{}.{}", location.0, location.1),
            Self::Vertical { location } => write!(f, "v.{}.{}", location.0, location.1),
            Self::Color { location, color } => write!(f, "c.{}.{}.{}", location.0, location.1, color),
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_negative() {
            write!(f, "-")?;
        }
        write!(f, "{}", self.key)
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join(" "))
    }
}

/// Reasons clause or record text fails to parse.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The token does not start with a known variable kind.
    #[error("unknown variable kind in `{0}`")]
    UnknownKind(String),
    /// The token has the wrong number of numeric fields for its kind.
    #[error("wrong number of fields in `{0}`")]
    FieldCount(String),
    /// A field is not a non-negative integer.
    #[error("bad number in `{0}`")]
    BadNumber(String),
    /// A line holds no tokens.
    #[error("empty clause")]
    Empty,
    /// A record does not start with a positive color variable.
    #[error("record must start with a color variable, got `{0}`")]
    NotAColor(String),
}

impl FromStr for VarKey {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('.');
        let kind = parts.next().unwrap_or_default();
        let fields = parts
            .map(|field| field.parse::<usize>().map_err(|_| ParseError::BadNumber(s.to_owned())))
            .collect::<Result<Vec<_>, _>>()?;

        match (kind, fields.as_slice()) {
            ("h", &[x, y]) => Ok(Self::horizontal(x, y)),
            ("v", &[x, y]) => Ok(Self::vertical(x, y)),
            ("c", &[x, y, k]) => Ok(Self::color(x, y, k)),
            ("h" | "v" | "c", _) => Err(ParseError::FieldCount(s.to_owned())),
            _ => Err(ParseError::UnknownKind(s.to_owned())),
        }
    }
}

impl FromStr for Literal {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix('-') {
            Some(bare) => Ok(bare.parse::<VarKey>()?.negative()),
            None => Ok(s.parse::<VarKey>()?.positive()),
        }
    }
}

impl FromStr for Clause {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let literals = s.split_whitespace()
            .map(str::parse::<Literal>)
            .collect::<Result<Vec<_>, _>>()?;

        if literals.is_empty() {
            return Err(ParseError::Empty);
        }

        Ok(Self(literals))
    }
}
