use serde::{Deserialize, Serialize};

const FULL_WIDTH_SPACE: char = '\u{3000}';
const NAME_COLUMN_WIDTH: usize = 6;

/// A party member shown in the status panel during battle.
///
/// Stats are display-only; nothing in the encounter loop mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyMember {
    pub name: String,
    pub job: String,
    pub hp: u32,
    pub mp: u32,
}

impl PartyMember {
    /// One row of the party panel: the name padded with full-width spaces to
    /// six characters, then HP and MP right-aligned to three digits.
    pub fn status_line(&self) -> String {
        let mut name = self.name.clone();
        let pad = NAME_COLUMN_WIDTH.saturating_sub(self.name.chars().count());
        name.extend(std::iter::repeat(FULL_WIDTH_SPACE).take(pad));
        format!("{} HP{:>3}  MP{:>3}  {}", name, self.hp, self.mp, self.job)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_pads_short_names() {
        let member = PartyMember {
            name: "マルス".to_string(),
            job: "せんし".to_string(),
            hp: 172,
            mp: 48,
        };
        assert_eq!(
            member.status_line(),
            "マルス\u{3000}\u{3000}\u{3000} HP172  MP 48  せんし"
        );
    }

    #[test]
    fn status_line_keeps_long_names() {
        let member = PartyMember {
            name: "Archibald".to_string(),
            job: "bard".to_string(),
            hp: 7,
            mp: 120,
        };
        assert_eq!(member.status_line(), "Archibald HP  7  MP120  bard");
    }
}
