//! Fixed card catalog.
//!
//! # Responsibility
//! - Hold the process-wide, immutable universe of card names.
//!
//! # Invariants
//! - Catalog order and spelling are a compatibility contract: the seeded
//!   draw indexes into this sequence, so any change alters the cards every
//!   historical date reproduces.

/// The 22 Major Arcana card names, in canonical order.
pub const CARD_CATALOG: [&str; 22] = [
    "The Fool",
    "The Magician",
    "The High Priestess",
    "The Empress",
    "The Emperor",
    "The Hierophant",
    "The Lovers",
    "The Chariot",
    "Strength",
    "The Hermit",
    "Wheel of Fortune",
    "Justice",
    "The Hanged Man",
    "Death",
    "Temperance",
    "The Devil",
    "The Tower",
    "The Star",
    "The Moon",
    "The Sun",
    "Judgement",
    "The World",
];

/// Number of cards drawn for one daily reading.
pub const CARDS_PER_READING: usize = 3;

/// Returns whether `name` is a member of the catalog.
pub fn is_catalog_card(name: &str) -> bool {
    CARD_CATALOG.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_22_distinct_entries() {
        let unique: HashSet<_> = CARD_CATALOG.iter().collect();
        assert_eq!(unique.len(), 22);
    }

    #[test]
    fn membership_check_matches_catalog() {
        assert!(is_catalog_card("The Fool"));
        assert!(is_catalog_card("The World"));
        assert!(!is_catalog_card("The Joker"));
    }
}
