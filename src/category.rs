use serde::Deserialize;
use std::fmt;

/// Disposal categories. Closed set: anything the classifier reports
/// outside it deserializes to `Unknown` rather than failing the response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Trash,
    Recycle,
    Compost,
    #[serde(rename = "dish return", alias = "dish-return", alias = "dish_return")]
    DishReturn,
    #[serde(other)]
    Unknown,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Trash,
        Category::Recycle,
        Category::Compost,
        Category::DishReturn,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Trash => "trash",
            Category::Recycle => "recycle",
            Category::Compost => "compost",
            Category::DishReturn => "dish return",
            Category::Unknown => "unknown",
        }
    }

    // Unknown shares trash's gray; the fallback icon is the distinct marker.
    pub fn color_token(&self) -> &'static str {
        match self {
            Category::Trash => "gray",
            Category::Recycle => "blue",
            Category::Compost => "green",
            Category::DishReturn => "yellow",
            Category::Unknown => "gray",
        }
    }

    pub fn icon(&self) -> CategoryIcon {
        match self {
            Category::Trash => CategoryIcon::TrashBin,
            Category::Recycle => CategoryIcon::RecycleArrows,
            Category::Compost => CategoryIcon::Leaf,
            Category::DishReturn => CategoryIcon::Utensils,
            Category::Unknown => CategoryIcon::HelpCircle,
        }
    }

    /// True for categories that keep an item out of the landfill stream.
    pub fn diverts_from_landfill(&self) -> bool {
        match self {
            Category::Recycle | Category::Compost | Category::DishReturn => true,
            Category::Trash | Category::Unknown => false,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CategoryIcon {
    TrashBin,
    RecycleArrows,
    Leaf,
    Utensils,
    HelpCircle,
}

impl CategoryIcon {
    #[allow(dead_code)]
    pub fn name(&self) -> &'static str {
        match self {
            CategoryIcon::TrashBin => "trash-bin",
            CategoryIcon::RecycleArrows => "recycle-arrows",
            CategoryIcon::Leaf => "leaf",
            CategoryIcon::Utensils => "utensils",
            CategoryIcon::HelpCircle => "help-circle",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            CategoryIcon::TrashBin => "🗑",
            CategoryIcon::RecycleArrows => "♻",
            CategoryIcon::Leaf => "🌿",
            CategoryIcon::Utensils => "🍴",
            CategoryIcon::HelpCircle => "?",
        }
    }
}
