//! Listing counts for browse tabs and profile pages.

use crate::model::{Item, ItemStatus, ItemType};
use serde::{Deserialize, Serialize};

/// Counts over a set of listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListingStats {
    /// All listings counted
    pub total: usize,
    /// Lost items
    pub lost: usize,
    /// Found items
    pub found: usize,
    /// Still open
    pub active: usize,
    /// Reunited with the owner
    pub resolved: usize,
    /// Archived
    pub archived: usize,
}

impl ListingStats {
    /// Count `items`.
    pub fn from_items<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a Item>,
    {
        items.into_iter().fold(Self::default(), |mut stats, item| {
            stats.total += 1;
            match item.item_type {
                ItemType::Lost => stats.lost += 1,
                ItemType::Found => stats.found += 1,
            }
            match item.status {
                ItemStatus::Active => stats.active += 1,
                ItemStatus::Resolved => stats.resolved += 1,
                ItemStatus::Archived => stats.archived += 1,
            }
            stats
        })
    }

    /// Count the listings posted by `user_id`.
    pub fn for_owner(items: &[Item], user_id: &str) -> Self {
        Self::from_items(items.iter().filter(|item| item.is_owned_by(user_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::fixture_items;
    use chrono::Utc;

    #[test]
    fn test_fixture_counts() {
        let stats = ListingStats::from_items(&fixture_items());
        assert_eq!(stats.total, 6);
        assert_eq!(stats.lost, 3);
        assert_eq!(stats.found, 3);
        assert_eq!(stats.active, 6);
        assert_eq!(stats.resolved, 0);
    }

    #[test]
    fn test_owner_counts() {
        let mut items = fixture_items();
        let mine = items.iter_mut().find(|i| i.id == "3").unwrap();
        mine.transition(ItemStatus::Resolved, Utc::now()).unwrap();

        let stats = ListingStats::for_owner(&items, "user3");
        assert_eq!(stats.total, 1);
        assert_eq!(stats.resolved, 1);
        assert_eq!(stats.active, 0);
    }
}
