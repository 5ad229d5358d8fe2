use waypath_core::Position;

/// Outcome of a path search.
///
/// A `Found` path runs start → target inclusive, and every consecutive pair
/// is one orthogonal step between walkable cells. `NotFound` is an ordinary
/// outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathResult {
    Found(Vec<Position>),
    NotFound,
}

impl PathResult {
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The path positions, if one was found.
    #[inline]
    pub fn path(&self) -> Option<&[Position]> {
        match self {
            Self::Found(path) => Some(path),
            Self::NotFound => None,
        }
    }

    /// Number of steps (edges) in the path.
    pub fn steps(&self) -> Option<usize> {
        self.path().map(|p| p.len().saturating_sub(1))
    }

    /// Final position of the path.
    pub fn last(&self) -> Option<Position> {
        self.path().and_then(|p| p.last().copied())
    }

    pub fn into_path(self) -> Option<Vec<Position>> {
        match self {
            Self::Found(path) => Some(path),
            Self::NotFound => None,
        }
    }
}

impl From<Option<Vec<Position>>> for PathResult {
    fn from(path: Option<Vec<Position>>) -> Self {
        path.map_or(Self::NotFound, Self::Found)
    }
}
