use serde::{Deserialize, Serialize};

/// The six outlines of a character sheet, in their fixed declared order.
///
/// Declaration order is significant: it is the order search results are
/// reported in and the priority used to pick the outline that receives focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Advantages,
    Skills,
    Spells,
    Equipment,
    OtherEquipment,
    Notes,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Advantages,
        Category::Skills,
        Category::Spells,
        Category::Equipment,
        Category::OtherEquipment,
        Category::Notes,
    ];

    /// Position in [`Category::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn title(self) -> &'static str {
        match self {
            Category::Advantages => "Advantages",
            Category::Skills => "Skills",
            Category::Spells => "Spells",
            Category::Equipment => "Equipment",
            Category::OtherEquipment => "Other Equipment",
            Category::Notes => "Notes",
        }
    }

    /// Parse a category name as typed on the command line
    /// (`other-equipment`, `other_equipment` and `OtherEquipment` all work).
    pub fn from_name(name: &str) -> Option<Category> {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_' && *c != ' ')
            .collect::<String>()
            .to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.title().replace(' ', "").to_lowercase() == normalized)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}
