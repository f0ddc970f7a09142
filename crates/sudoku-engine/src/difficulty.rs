use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(&self) -> &str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// How many of the 81 cells are blanked when deriving a puzzle.
    pub fn blank_count(&self) -> usize {
        match self {
            Difficulty::Easy => 36,
            Difficulty::Medium => 46,
            Difficulty::Hard => 54,
        }
    }

    pub fn given_count(&self) -> usize {
        81 - self.blank_count()
    }

    pub fn all() -> &'static [Difficulty] {
        &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_counts() {
        assert_eq!(Difficulty::Easy.blank_count(), 36);
        assert_eq!(Difficulty::Medium.blank_count(), 46);
        assert_eq!(Difficulty::Hard.blank_count(), 54);
    }

    #[test]
    fn givens_complement_blanks() {
        for d in Difficulty::all() {
            assert_eq!(d.given_count() + d.blank_count(), 81);
        }
    }
}
