//! Demo data: a deck of hobbies.

use deckkit_core::DeckItem;
use deckkit_favorites::Favoritable;

/// A hobby card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hobby {
    /// Position in the original collection, starting at 1.
    pub number: u32,
    /// Display name. Also the id.
    pub name: String,
    /// Card body text.
    pub text: &'static str,
    /// Name of the host's icon for the card header.
    pub icon: &'static str,
}

impl DeckItem for Hobby {
    type Id = String;

    fn id(&self) -> &String {
        &self.name
    }
}

impl Favoritable for Hobby {}

/// Name, text and icon of every demo hobby.
const COLLECTION: [(&str, &str, &str); 12] = [
    ("Sketching", "Fills a notebook faster than you think.", "pencil"),
    ("Origami", "A use for every sketch that went wrong.", "square.on.square"),
    ("Paper Planes", "A use for every fold that went wrong.", "paperplane"),
    ("Climbing", "Gravity, but optional for a while.", "figure.climbing"),
    ("Journaling", "Write down what happened today.", "book"),
    ("Baking", "Bread takes hours. Cookies take minutes.", "oven"),
    ("Gardening", "Patience measured in seasons.", "leaf"),
    ("Chess", "Sixty-four squares, endless arguments.", "checkerboard"),
    ("Tinkering", "Take it apart. Maybe put it back together.", "wrench"),
    ("Running", "Same route, different weather.", "figure.run"),
    ("Music", "Listen, play, or both at once.", "music.note"),
    ("Stargazing", "Best enjoyed far from streetlights.", "star"),
];

/// The demo hobby collection, in its original order.
#[must_use]
pub fn demo_collection() -> Vec<Hobby> {
    COLLECTION
        .iter()
        .zip(1..)
        .map(|(&(name, text, icon), number)| Hobby {
            number,
            name: name.to_owned(),
            text,
            icon,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckkit_core::ensure_unique_ids;

    #[test]
    fn test_collection_ids_are_unique() {
        let hobbies = demo_collection();
        assert!(ensure_unique_ids(&hobbies).is_ok());
        assert!(hobbies.iter().enumerate().all(|(i, h)| h.number as usize == i + 1));
    }
}
