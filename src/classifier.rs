use thiserror::Error;

use crate::colour::{Colour, ShiftCategory};
use crate::reference_table::ReferenceTable;

/// Distances closer than this count as equal when looking for ties.
pub(crate) const TIE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("tolerance must be a non-negative number, got {0}")]
pub struct InvalidTolerance(pub f64);

/// How far an observed colour may sit from its reference colour and still
/// match. Always finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Tolerance(f64);

impl Tolerance {
    pub const EXACT: Tolerance = Tolerance(0.0);

    pub fn new(value: f64) -> Result<Self, InvalidTolerance> {
        if value.is_finite() && value >= 0.0 {
            Ok(Tolerance(value))
        } else {
            Err(InvalidTolerance(value))
        }
    }

    pub fn get(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Tolerance {
    type Error = InvalidTolerance;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Tolerance::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassifyError {
    #[error("colour {colour} is equally close to {candidates:?}")]
    AmbiguousColour {
        colour: Colour,
        candidates: Vec<ShiftCategory>,
    },
    #[error("colour {colour} matches no category (nearest is {nearest} at {distance:.4})")]
    UnrecognizedColour {
        colour: Colour,
        nearest: ShiftCategory,
        distance: f64,
    },
}

/// Nearest-match classification of cell colours against a [`ReferenceTable`].
#[derive(Debug, Clone)]
pub struct ColourClassifier {
    table: ReferenceTable,
    tolerance: Tolerance,
}

impl ColourClassifier {
    /// A classifier that only accepts exact matches.
    pub fn new(table: ReferenceTable) -> Self {
        Self::with_tolerance(table, Tolerance::EXACT)
    }

    pub fn with_tolerance(table: ReferenceTable, tolerance: Tolerance) -> Self {
        Self { table, tolerance }
    }

    pub fn table(&self) -> &ReferenceTable {
        &self.table
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    pub fn classify(&self, colour: Colour) -> Result<ShiftCategory, ClassifyError> {
        classify(colour, &self.table, self.tolerance)
    }
}

impl Default for ColourClassifier {
    fn default() -> Self {
        Self::new(ReferenceTable::default())
    }
}

/// Ties are reported before the tolerance is checked, so a colour halfway
/// between two references is ambiguous however far away it is.
pub fn classify(
    colour: Colour,
    table: &ReferenceTable,
    tolerance: Tolerance,
) -> Result<ShiftCategory, ClassifyError> {
    let distances: Vec<(ShiftCategory, f64)> = table
        .iter()
        .map(|(category, reference)| (category, colour.distance(&reference)))
        .collect();

    // A ReferenceTable is never empty.
    let Some((nearest, min_distance)) = distances
        .iter()
        .copied()
        .min_by(|a, b| a.1.total_cmp(&b.1))
    else {
        unreachable!("reference table is empty");
    };

    let candidates: Vec<ShiftCategory> = distances
        .iter()
        .filter(|(_, distance)| distance - min_distance <= TIE_EPSILON)
        .map(|(category, _)| *category)
        .collect();
    if candidates.len() > 1 {
        return Err(ClassifyError::AmbiguousColour { colour, candidates });
    }

    if min_distance > tolerance.get() {
        return Err(ClassifyError::UnrecognizedColour {
            colour,
            nearest,
            distance: min_distance,
        });
    }

    Ok(nearest)
}
