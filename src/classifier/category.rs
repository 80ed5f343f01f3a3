//! The fixed set of waste categories.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Waste category an item or a bin belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Recyclable,
    Organic,
    ElectronicWaste,
    Hazardous,
}

/// Overlay color as 8-bit RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` form.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Recyclable,
        Category::Organic,
        Category::ElectronicWaste,
        Category::Hazardous,
    ];

    /// Stable identifier, also used in bin QR payloads.
    pub fn id(&self) -> &'static str {
        match self {
            Category::Recyclable => "recycle",
            Category::Organic => "organic",
            Category::ElectronicWaste => "ewaste",
            Category::Hazardous => "hazardous",
        }
    }

    pub fn code_name(&self) -> &'static str {
        match self {
            Category::Recyclable => "RECYCLABLE",
            Category::Organic => "ORGANIC",
            Category::ElectronicWaste => "E-WASTE",
            Category::Hazardous => "HAZARDOUS",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Category::Recyclable => Color::rgb(0x21, 0x96, 0xf3),
            Category::Organic => Color::rgb(0x4c, 0xaf, 0x50),
            Category::ElectronicWaste => Color::rgb(0xff, 0x98, 0x00),
            Category::Hazardous => Color::rgb(0xf4, 0x43, 0x36),
        }
    }

    pub fn from_id(id: &str) -> Option<Category> {
        let id = id.trim().to_ascii_lowercase();
        Category::ALL.into_iter().find(|c| c.id() == id)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_id(category.id()), Some(category));
        }
        assert_eq!(Category::from_id(" EWASTE "), Some(Category::ElectronicWaste));
        assert_eq!(Category::from_id("landfill"), None);
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(Category::Hazardous.color().to_hex(), "#f44336");
    }
}
