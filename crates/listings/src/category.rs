//! Category registry.
//!
//! The set of category keys is closed. Stored listings may carry a key, a
//! display label in any case, or something unknown; [`CategoryRegistry::resolve`]
//! maps all of them onto a key, with unknown values landing in `other`.

use crate::error::{ListingError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category keys, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKey {
    Electronics,
    Documents,
    Pets,
    Luggage,
    Accessories,
    Clothing,
    Jewelry,
    Sports,
    Keys,
    Wallet,
    Phone,
    Other,
}

impl CategoryKey {
    /// Every key in display order.
    pub const ALL: [CategoryKey; 12] = [
        CategoryKey::Electronics,
        CategoryKey::Documents,
        CategoryKey::Pets,
        CategoryKey::Luggage,
        CategoryKey::Accessories,
        CategoryKey::Clothing,
        CategoryKey::Jewelry,
        CategoryKey::Sports,
        CategoryKey::Keys,
        CategoryKey::Wallet,
        CategoryKey::Phone,
        CategoryKey::Other,
    ];

    /// Stable string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKey::Electronics => "electronics",
            CategoryKey::Documents => "documents",
            CategoryKey::Pets => "pets",
            CategoryKey::Luggage => "luggage",
            CategoryKey::Accessories => "accessories",
            CategoryKey::Clothing => "clothing",
            CategoryKey::Jewelry => "jewelry",
            CategoryKey::Sports => "sports",
            CategoryKey::Keys => "keys",
            CategoryKey::Wallet => "wallet",
            CategoryKey::Phone => "phone",
            CategoryKey::Other => "other",
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict parse: only exact keys (any case) are accepted.
impl FromStr for CategoryKey {
    type Err = ListingError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        CategoryKey::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ListingError::UnknownValue {
                kind: "category",
                value: s.to_string(),
            })
    }
}

/// Display metadata for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryInfo {
    /// Category key
    pub key: CategoryKey,
    /// Human-readable label
    pub label: &'static str,
    /// Icon identifier
    pub icon: &'static str,
    /// Color token
    pub color: &'static str,
    /// Short description of what belongs here
    pub description: &'static str,
}

const STANDARD: [(CategoryKey, &str, &str, &str, &str); 12] = [
    (CategoryKey::Electronics, "Electronics", "Smartphone", "bg-blue-100 text-blue-800", "Phones, laptops, tablets, etc."),
    (CategoryKey::Documents, "Documents", "FileText", "bg-amber-100 text-amber-800", "ID cards, passports, certificates, etc."),
    (CategoryKey::Pets, "Pets", "PawPrint", "bg-orange-100 text-orange-800", "Dogs, cats, birds, etc."),
    (CategoryKey::Luggage, "Luggage", "Luggage", "bg-green-100 text-green-800", "Bags, suitcases, backpacks, etc."),
    (CategoryKey::Accessories, "Accessories", "Watch", "bg-pink-100 text-pink-800", "Belts, scarves, hats, etc."),
    (CategoryKey::Clothing, "Clothing", "Shirt", "bg-purple-100 text-purple-800", "Shirts, pants, jackets, etc."),
    (CategoryKey::Jewelry, "Jewelry", "Gem", "bg-rose-100 text-rose-800", "Rings, necklaces, bracelets, etc."),
    (CategoryKey::Sports, "Sports & Recreation", "Trophy", "bg-lime-100 text-lime-800", "Sports equipment, gear, etc."),
    (CategoryKey::Keys, "Keys", "Key", "bg-yellow-100 text-yellow-800", "House keys, car keys, etc."),
    (CategoryKey::Wallet, "Wallet", "Wallet", "bg-red-100 text-red-800", "Wallets, purses, money, etc."),
    (CategoryKey::Phone, "Mobile Phone", "Phone", "bg-cyan-100 text-cyan-800", "Smartphones, feature phones, etc."),
    (CategoryKey::Other, "Other Items", "HelpCircle", "bg-gray-100 text-gray-800", "Other items not listed above"),
];

/// Immutable catalog of categories.
///
/// Build once and share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    // Indexed by `CategoryKey as usize`
    entries: Vec<CategoryInfo>,
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryRegistry {
    /// The standard catalog.
    pub fn new() -> Self {
        let entries = STANDARD
            .iter()
            .map(|&(key, label, icon, color, description)| CategoryInfo {
                key,
                label,
                icon,
                color,
                description,
            })
            .collect();
        Self { entries }
    }

    /// Metadata for `key`.
    pub fn get(&self, key: CategoryKey) -> &CategoryInfo {
        &self.entries[key as usize]
    }

    /// Metadata for a stored category value; unknown values give `other`.
    pub fn lookup(&self, raw: &str) -> &CategoryInfo {
        self.get(self.resolve(raw))
    }

    /// Map a stored category value onto a key.
    ///
    /// Matches a key or a label, ignoring case and surrounding whitespace.
    pub fn resolve(&self, raw: &str) -> CategoryKey {
        let raw = raw.trim();
        self.entries
            .iter()
            .find(|info| {
                info.key.as_str().eq_ignore_ascii_case(raw) || info.label.eq_ignore_ascii_case(raw)
            })
            .map_or(self.default_key(), |info| info.key)
    }

    /// Label for a stored category value.
    pub fn label(&self, raw: &str) -> &'static str {
        self.lookup(raw).label
    }

    /// Color token for a stored category value.
    pub fn color(&self, raw: &str) -> &'static str {
        self.lookup(raw).color
    }

    /// Keys in display order.
    pub fn keys(&self) -> impl Iterator<Item = CategoryKey> + '_ {
        self.entries.iter().map(|info| info.key)
    }

    /// All entries in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, CategoryInfo> {
        self.entries.iter()
    }

    /// Where unknown categories land.
    pub fn default_key(&self) -> CategoryKey {
        CategoryKey::Other
    }
}

impl<'a> IntoIterator for &'a CategoryRegistry {
    type Item = &'a CategoryInfo;
    type IntoIter = std::slice::Iter<'a, CategoryInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_in_declaration_order() {
        let registry = CategoryRegistry::new();
        let keys: Vec<&str> = registry.keys().map(|k| k.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "electronics", "documents", "pets", "luggage", "accessories", "clothing",
                "jewelry", "sports", "keys", "wallet", "phone", "other",
            ]
        );
    }

    #[test]
    fn test_entries_line_up_with_keys() {
        let registry = CategoryRegistry::new();
        for key in CategoryKey::ALL {
            assert_eq!(registry.get(key).key, key);
        }
    }

    #[test]
    fn test_get_metadata() {
        let registry = CategoryRegistry::new();
        let info = registry.get(CategoryKey::Sports);
        assert_eq!(info.label, "Sports & Recreation");
        assert_eq!(info.icon, "Trophy");
        assert_eq!(info.color, "bg-lime-100 text-lime-800");
    }

    #[test]
    fn test_resolve_key_or_label() {
        let registry = CategoryRegistry::new();
        assert_eq!(registry.resolve("electronics"), CategoryKey::Electronics);
        assert_eq!(registry.resolve("Electronics"), CategoryKey::Electronics);
        assert_eq!(registry.resolve("mobile phone"), CategoryKey::Phone);
        assert_eq!(registry.resolve(" Jewelry "), CategoryKey::Jewelry);
    }

    #[test]
    fn test_unknown_resolves_to_other() {
        let registry = CategoryRegistry::new();
        assert_eq!(registry.resolve("Bags"), CategoryKey::Other);
        assert_eq!(registry.resolve(""), CategoryKey::Other);
        assert_eq!(registry.lookup("spaceship").label, "Other Items");
        assert_eq!(registry.color("spaceship"), "bg-gray-100 text-gray-800");
        assert_eq!(registry.default_key(), CategoryKey::Other);
    }

    #[test]
    fn test_label() {
        let registry = CategoryRegistry::new();
        assert_eq!(registry.label("keys"), "Keys");
        assert_eq!(registry.label("wallet"), "Wallet");
    }

    #[test]
    fn test_strict_parse() {
        assert_eq!("PETS".parse::<CategoryKey>().unwrap(), CategoryKey::Pets);
        assert!("Mobile Phone".parse::<CategoryKey>().is_err());
    }

    #[test]
    fn test_iter_matches_keys() {
        let registry = CategoryRegistry::new();
        assert_eq!(registry.iter().count(), 12);
        assert!((&registry).into_iter().zip(registry.keys()).all(|(info, key)| info.key == key));
    }
}
