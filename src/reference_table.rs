use std::collections::BTreeMap;

use thiserror::Error;

use crate::classifier::TIE_EPSILON;
use crate::colour::{Colour, ShiftCategory};

// Colours used in the usher timetable, correct as of February 2024.
pub const UNASSIGNED_GREY: Colour = Colour::rgb(0.8, 0.8, 0.8);
pub const SCREEN_1_YELLOW: Colour = Colour::rgb(1.0, 0.8509804, 0.4);
pub const SCREEN_2_BLUE: Colour = Colour::rgb(0.2901961, 0.5254902, 0.9098039);
pub const SCREEN_3_MAGENTA: Colour = Colour::rgb(1.0, 0.0, 1.0);

#[derive(Debug, Error, PartialEq)]
pub enum ReferenceTableError {
    #[error("a reference table needs at least one colour")]
    Empty,
    #[error("{first} and {second} share the reference colour {colour}")]
    DuplicateColour {
        first: ShiftCategory,
        second: ShiftCategory,
        colour: Colour,
    },
}

/// The canonical colour of each shift category. Built once at startup and
/// never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTable {
    colours: BTreeMap<ShiftCategory, Colour>,
}

impl ReferenceTable {
    /// Builds a table from `(category, colour)` pairs. A category given more
    /// than once keeps its last colour. Two categories whose colours cannot be
    /// told apart are rejected, since neither could ever be classified.
    pub fn new(
        entries: impl IntoIterator<Item = (ShiftCategory, Colour)>,
    ) -> Result<Self, ReferenceTableError> {
        let colours: BTreeMap<_, _> = entries.into_iter().collect();
        if colours.is_empty() {
            return Err(ReferenceTableError::Empty);
        }
        for (i, (first, colour)) in colours.iter().enumerate() {
            for (second, other) in colours.iter().skip(i + 1) {
                if colour.distance(other) <= TIE_EPSILON {
                    return Err(ReferenceTableError::DuplicateColour {
                        first: *first,
                        second: *second,
                        colour: *colour,
                    });
                }
            }
        }
        Ok(Self { colours })
    }

    pub fn get(&self, category: ShiftCategory) -> Option<Colour> {
        self.colours.get(&category).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShiftCategory, Colour)> + '_ {
        self.colours.iter().map(|(category, colour)| (*category, *colour))
    }

    pub fn len(&self) -> usize {
        self.colours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }
}

impl Default for ReferenceTable {
    fn default() -> Self {
        Self {
            colours: BTreeMap::from([
                (ShiftCategory::Unassigned, UNASSIGNED_GREY),
                (ShiftCategory::Screen1, SCREEN_1_YELLOW),
                (ShiftCategory::Screen2, SCREEN_2_BLUE),
                (ShiftCategory::Screen3, SCREEN_3_MAGENTA),
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_table_is_rejected() {
        assert_eq!(
            ReferenceTable::new(Vec::new()),
            Err(ReferenceTableError::Empty)
        );
    }

    #[test]
    fn shared_colour_is_rejected() {
        assert_eq!(
            ReferenceTable::new([
                (ShiftCategory::Unassigned, UNASSIGNED_GREY),
                (ShiftCategory::Screen1, UNASSIGNED_GREY),
            ]),
            Err(ReferenceTableError::DuplicateColour {
                first: ShiftCategory::Unassigned,
                second: ShiftCategory::Screen1,
                colour: UNASSIGNED_GREY,
            })
        );
    }

    #[test]
    fn indistinguishable_colours_are_rejected() {
        let nearly_grey = Colour::rgb(0.8, 0.8, 0.8 + 1e-12);
        assert!(matches!(
            ReferenceTable::new([
                (ShiftCategory::Screen2, UNASSIGNED_GREY),
                (ShiftCategory::Screen3, nearly_grey),
            ]),
            Err(ReferenceTableError::DuplicateColour { .. })
        ));
    }

    #[test]
    fn every_reference_colour_classifies_to_its_category() {
        let table = ReferenceTable::new([
            (ShiftCategory::Unassigned, UNASSIGNED_GREY),
            (ShiftCategory::Screen1, Colour::rgb(0.8, 0.8, 0.81)),
        ])
        .unwrap();
        for (category, colour) in table.iter() {
            assert_eq!(
                crate::classify(colour, &table, crate::Tolerance::EXACT),
                Ok(category)
            );
        }
    }

    #[test]
    fn default_table_covers_every_category() {
        let table = ReferenceTable::default();
        assert_eq!(table.len(), ShiftCategory::ALL.len());
        for category in ShiftCategory::ALL {
            assert!(table.get(category).is_some(), "{category} has no colour");
        }
        assert_eq!(table.get(ShiftCategory::Screen1), Some(SCREEN_1_YELLOW));
    }

    #[test]
    fn one_colour_per_category() {
        let table = ReferenceTable::new([
            (ShiftCategory::Screen1, Colour::rgb(0.1, 0.1, 0.1)),
            (ShiftCategory::Screen1, Colour::rgb(0.2, 0.2, 0.2)),
        ])
        .unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.get(ShiftCategory::Screen1),
            Some(Colour::rgb(0.2, 0.2, 0.2))
        );
    }
}
