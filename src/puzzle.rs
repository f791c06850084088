use std::collections::HashSet;

use log::debug;
use thiserror::Error;

use crate::backend::{Backend, VarisatBackend};
use crate::encoder::encode;
use crate::grid::{decode, ConnectivityGrid};
use crate::location::{Dimension, Location};
use crate::solver::{solve_clauses, SolverFailure};

/// Colors are numbered from 1; the endpoints at indices `2i` and `2i + 1` belong to color `i + 1`.
pub type ColorId = usize;

/// Reasons a puzzle description is rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleError {
    /// The endpoint list has an odd length, so the last endpoint has no partner.
    #[error("endpoints must come in pairs, got {0}")]
    UnpairedEndpoint(usize),
    /// No endpoints were given at all.
    #[error("a puzzle needs at least one color")]
    NoColors,
    /// More colors than `floor(width * height / 2)`.
    #[error("{colors} colors do not fit on a grid of {cells} cells")]
    TooManyColors {
        /// Colors requested.
        colors: usize,
        /// Cells on the grid.
        cells: usize,
    },
    /// `width * height` does not fit in a `usize`.
    #[error("a {width}x{height} grid has too many cells")]
    GridTooLarge {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },
    /// An endpoint lies outside the grid.
    #[error("location {0} is outside the grid")]
    OutOfBounds(Location),
    /// Two endpoints share a cell.
    #[error("location {0} holds more than one endpoint")]
    RepeatedLocation(Location),
}

/// An immutable, validated Numberlink puzzle: grid dimensions plus an ordered list of endpoint pairs.
///
/// Build one with [`Puzzle::new`] or incrementally with a [`PuzzleBuilder`](crate::builder::PuzzleBuilder).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Puzzle {
    dims: (Dimension, Dimension),
    endpoints: Vec<Location>,
}

impl Puzzle {
    /// Construct a puzzle of `dims` (`(width, height)`) from `endpoints`, where consecutive pairs share a color.
    ///
    /// Returns the first [`PuzzleError`] found if the description is inconsistent.
    pub fn new(dims: (Dimension, Dimension), endpoints: Vec<Location>) -> Result<Self, PuzzleError> {
        match Self::defects(dims, &endpoints).into_iter().next() {
            Some(reason) => Err(reason),
            None => Ok(Self { dims, endpoints }),
        }
    }

    /// Every reason `endpoints` cannot form a puzzle on a grid of `dims`, in the order they are found.
    pub(crate) fn defects(dims: (Dimension, Dimension), endpoints: &[Location]) -> Vec<PuzzleError> {
        let mut reasons = Vec::new();

        if endpoints.is_empty() {
            reasons.push(PuzzleError::NoColors);
        }
        if endpoints.len() % 2 != 0 {
            reasons.push(PuzzleError::UnpairedEndpoint(endpoints.len()));
        }

        let colors = endpoints.len() / 2;
        match dims.0.get().checked_mul(dims.1.get()) {
            Some(cells) if colors > cells / 2 => reasons.push(PuzzleError::TooManyColors { colors, cells }),
            Some(_) => {}
            None => reasons.push(PuzzleError::GridTooLarge { width: dims.0.get(), height: dims.1.get() }),
        }

        let mut seen = HashSet::with_capacity(endpoints.len());
        for location in endpoints {
            if !location.within(dims) {
                reasons.push(PuzzleError::OutOfBounds(*location));
            } else if !seen.insert(*location) {
                reasons.push(PuzzleError::RepeatedLocation(*location));
            }
        }

        reasons
    }

    /// `(width, height)`.
    pub fn dims(&self) -> (Dimension, Dimension) {
        self.dims
    }

    /// Cells per row.
    #[inline]
    pub fn width(&self) -> usize {
        self.dims.0.get()
    }

    /// Rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.dims.1.get()
    }

    /// Number of colors, i.e. half the number of endpoints.
    pub fn color_count(&self) -> usize {
        self.endpoints.len() / 2
    }

    /// The raw endpoint list, in input order.
    pub fn endpoints(&self) -> &[Location] {
        &self.endpoints
    }

    /// Each color paired with its two endpoints, in color order.
    pub fn termini(&self) -> impl Iterator<Item = (ColorId, (Location, Location))> + '_ {
        self.endpoints.chunks_exact(2)
            .enumerate()
            .map(|(i, pair)| (i + 1, (pair[0], pair[1])))
    }

    /// The color of the endpoint at `location`, if there is one.
    pub fn terminus_at(&self, location: Location) -> Option<ColorId> {
        self.endpoints.iter()
            .position(|l| *l == location)
            .map(|i| i / 2 + 1)
    }

    /// Solve with the default [`varisat`] backend.
    pub fn solve(&self) -> Result<ConnectivityGrid, SolverFailure> {
        self.solve_with(VarisatBackend::default())
    }

    /// Encode this puzzle, hand the clauses to `backend`, and decode the result.
    ///
    /// The backend call is the only step that may take long; no time limit is applied.
    pub fn solve_with<B: Backend>(&self, backend: B) -> Result<ConnectivityGrid, SolverFailure> {
        let clauses = encode(self);
        debug!("encoded {}x{} puzzle with {} colors into {} clauses",
            self.width(), self.height(), self.color_count(), clauses.len());

        let records = solve_clauses(&clauses, backend)?;
        Ok(decode(self.dims, &records))
    }
}
