use crate::geom::Location;
use crate::lot::{superpath_length, Path};

/// Owned, ordered route segments. Independent of the `Lot` it was derived from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Superpath {
    pub segments: Vec<Path>,
}

impl Superpath {
    #[inline]
    pub fn new(segments: Vec<Path>) -> Self {
        Self { segments }
    }

    /// Total Euclidean length of all segments.
    #[inline]
    pub fn length(&self) -> f64 {
        superpath_length(&self.segments)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn start(&self) -> Option<Location> {
        self.segments.first().map(|p| p.start)
    }

    pub fn end(&self) -> Option<Location> {
        self.segments.last().map(Path::endpoint)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Path> {
        self.segments.iter()
    }

    pub fn into_segments(self) -> Vec<Path> {
        self.segments
    }
}

impl From<Vec<Path>> for Superpath {
    fn from(segments: Vec<Path>) -> Self {
        Self { segments }
    }
}

impl<'a> IntoIterator for &'a Superpath {
    type Item = &'a Path;
    type IntoIter = std::slice::Iter<'a, Path>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
