use crate::location::{Dimension, Location};
use crate::puzzle::{Puzzle, PuzzleError};

/// Incremental construction of a [`Puzzle`], for collaborators that collect endpoints one pair at a time.
///
/// The builder mutates itself while building but can be [`Clone`]d to save its state at some point.
/// Problems with individual endpoints are recorded as they are added; problems with the puzzle as a whole
/// (such as having no colors) surface from [`Self::build`].
#[derive(Clone, Debug)]
pub struct PuzzleBuilder {
    // width, height
    dims: (Dimension, Dimension),
    endpoints: Vec<Location>,
    invalid_reasons: Vec<PuzzleError>,
}

impl PuzzleBuilder {
    /// Construct a new [`Self`] with the specified dimensions, specified in `(x, y)` order.
    pub fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            dims,
            endpoints: Default::default(),
            invalid_reasons: Default::default(),
        }
    }

    /// Add a pair of endpoints for the next color. Colors are numbered in the order they are added, from 1.
    ///
    /// May cause the builder to enter an invalid state if either location is out of bounds, already holds an endpoint,
    /// or if the grid has no room for another color.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_termini(&mut self, locations: (Location, Location)) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        let mut candidate = self.endpoints.clone();
        candidate.extend([locations.0, locations.1]);

        let reasons = Puzzle::defects(self.dims, &candidate);
        if reasons.is_empty() {
            self.endpoints = candidate;
        } else {
            self.invalid_reasons.extend(reasons);
        }

        self
    }

    /// Remove the most recently added pair of endpoints.
    ///
    /// If the builder is in an invalid state or no endpoints are present, this function does nothing.
    pub fn pop_termini(&mut self) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        let len = self.endpoints.len();
        self.endpoints.truncate(len.saturating_sub(2));

        self
    }

    /// Number of colors added so far.
    pub fn color_count(&self) -> usize {
        self.endpoints.len() / 2
    }

    /// Check the validity of this builder.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<PuzzleError>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<PuzzleError>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`Puzzle`].
    /// If the builder is invalid for any reason, the returned [`Vec`] of [`PuzzleError`] will indicate why.
    pub fn build(&self) -> Result<Puzzle, Vec<PuzzleError>> {
        if !self.invalid_reasons.is_empty() {
            return Err(self.invalid_reasons.clone());
        }

        Puzzle::new(self.dims, self.endpoints.clone()).map_err(|reason| vec![reason])
    }
}
