use serde::{Deserialize, Serialize};

/// Where a category's water is consumed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryKind {
    /// In-home fixtures
    Direct,
    /// Embodied lifestyle usage and offset credits
    Virtual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Showers,
    Baths,
    Toilet,
    Faucets,
    Laundry,
    Dishes,
    Garden,
    Clothing,
    Diet,
    Transport,
    Ai,
    Recycling,
    Compost,
}

impl Category {
    /// Display order of the breakdown
    pub const ALL: [Category; 13] = [
        Category::Showers,
        Category::Baths,
        Category::Toilet,
        Category::Faucets,
        Category::Laundry,
        Category::Dishes,
        Category::Garden,
        Category::Clothing,
        Category::Diet,
        Category::Transport,
        Category::Ai,
        Category::Recycling,
        Category::Compost,
    ];

    pub fn kind(&self) -> CategoryKind {
        match self {
            Category::Showers
            | Category::Baths
            | Category::Toilet
            | Category::Faucets
            | Category::Laundry
            | Category::Dishes
            | Category::Garden => CategoryKind::Direct,

            Category::Clothing
            | Category::Diet
            | Category::Transport
            | Category::Ai
            | Category::Recycling
            | Category::Compost => CategoryKind::Virtual,
        }
    }

    pub fn is_direct(&self) -> bool {
        self.kind() == CategoryKind::Direct
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Showers => "Showers",
            Category::Baths => "Baths",
            Category::Toilet => "Toilet",
            Category::Faucets => "Faucets",
            Category::Laundry => "Laundry",
            Category::Dishes => "Dishes",
            Category::Garden => "Garden",
            Category::Clothing => "Clothing",
            Category::Diet => "Diet",
            Category::Transport => "Transport",
            Category::Ai => "AI",
            Category::Recycling => "Recycling",
            Category::Compost => "Compost",
        }
    }

    /// Credits reduce the total instead of adding to it
    pub fn is_credit(&self) -> bool {
        matches!(self, Category::Recycling | Category::Compost)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
