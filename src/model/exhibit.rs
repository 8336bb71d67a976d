//! Exhibit records and the tone × pace description matrix.

use serde::{Deserialize, Serialize};

/// Stable slot identifier inside one catalog (0..capacity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotId(pub usize);

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Tone / Pace
// ============================================================================

/// Audience register of a description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tone {
    Child,
    Simple,
    Intermediate,
    Advanced,
}

impl Tone {
    pub const COUNT: usize = 4;
    pub const ALL: [Tone; Self::COUNT] = [Tone::Child, Tone::Simple, Tone::Intermediate, Tone::Advanced];

    /// Row of this tone in the description matrix.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Narration speed of a description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pace {
    Fast,
    Medium,
    Slow,
}

impl Pace {
    pub const COUNT: usize = 3;
    pub const ALL: [Pace; Self::COUNT] = [Pace::Fast, Pace::Medium, Pace::Slow];

    /// Column of this pace in the description matrix.
    pub fn index(self) -> usize {
        self as usize
    }
}

// ============================================================================
// Descriptions
// ============================================================================

/// Text rows as they appear in an exported document: `[tone][pace]`.
pub type DescriptionRows = [[String; Pace::COUNT]; Tone::COUNT];

/// 4×3 matrix of description texts.
///
/// Cells are presence-tracked: `None` means "never authored", which is
/// different from a cell explicitly set to `""`. Exported documents flatten
/// both to an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descriptions {
    cells: [[Option<String>; Pace::COUNT]; Tone::COUNT],
}

impl Descriptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, tone: Tone, pace: Pace) -> Option<&str> {
        self.cells[tone.index()][pace.index()].as_deref()
    }

    pub fn set(&mut self, tone: Tone, pace: Pace, text: impl Into<String>) {
        self.cells[tone.index()][pace.index()] = Some(text.into());
    }

    pub fn clear(&mut self, tone: Tone, pace: Pace) {
        self.cells[tone.index()][pace.index()] = None;
    }

    /// Flatten to document rows; unauthored cells become `""`.
    pub fn to_rows(&self) -> DescriptionRows {
        std::array::from_fn(|t| {
            std::array::from_fn(|p| self.cells[t][p].clone().unwrap_or_default())
        })
    }

    /// Rebuild from document rows. Empty strings are read back as unauthored.
    pub fn from_rows(rows: DescriptionRows) -> Self {
        let cells = rows.map(|row| row.map(|text| (!text.is_empty()).then_some(text)));
        Self { cells }
    }
}

// ============================================================================
// Exhibit
// ============================================================================

/// One entry of the ordered array a catalog is built from.
///
/// An exhibit with an empty name is a placeholder: it occupies a slot but is
/// never visible by name, in routes, or in exports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exhibit {
    pub name: String,
    pub room: String,
    pub descriptions: Descriptions,
}

impl Exhibit {
    pub fn new(name: impl Into<String>, room: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            room: room.into(),
            descriptions: Descriptions::new(),
        }
    }

    /// An unnamed capacity filler.
    pub fn placeholder() -> Self {
        Self::default()
    }

    pub fn with_description(mut self, tone: Tone, pace: Pace, text: impl Into<String>) -> Self {
        self.descriptions.set(tone, pace, text);
        self
    }

    pub fn is_placeholder(&self) -> bool {
        self.name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_indices() {
        assert_eq!(Tone::Child.index(), 0);
        assert_eq!(Tone::Advanced.index(), 3);
        assert_eq!(Pace::Fast.index(), 0);
        assert_eq!(Pace::Slow.index(), 2);
    }

    #[test]
    fn test_presence_tracking() {
        let mut d = Descriptions::new();
        assert_eq!(d.get(Tone::Simple, Pace::Medium), None);

        d.set(Tone::Simple, Pace::Medium, "");
        assert_eq!(d.get(Tone::Simple, Pace::Medium), Some(""));
        assert_eq!(d.to_rows()[1][1], "");

        d.clear(Tone::Simple, Pace::Medium);
        assert_eq!(d.get(Tone::Simple, Pace::Medium), None);
        assert_eq!(d, Descriptions::new());
    }

    #[test]
    fn test_rows_flatten_unauthored() {
        let mut d = Descriptions::new();
        d.set(Tone::Advanced, Pace::Slow, "scarab amulet");
        let rows = d.to_rows();
        assert_eq!(rows[3][2], "scarab amulet");
        assert_eq!(rows[0][0], "");

        let back = Descriptions::from_rows(rows);
        assert_eq!(back, d);
    }

    #[test]
    fn test_placeholder() {
        assert!(Exhibit::placeholder().is_placeholder());
        assert!(!Exhibit::new("mummia", "stanza 1").is_placeholder());
    }
}
