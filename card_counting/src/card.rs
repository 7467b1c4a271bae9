use serde_enum_str::{Deserialize_enum_str, Serialize_enum_str};
use strum_macros::EnumIter;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    Serialize_enum_str,
    Deserialize_enum_str,
)]
pub enum Suit {
    #[serde(rename = "hearts")]
    Hearts = 0,
    #[serde(rename = "diamonds")]
    Diamonds,
    #[serde(rename = "clubs")]
    Clubs,
    #[serde(rename = "spades")]
    Spades,
}

impl Suit {
    pub fn is_red(&self) -> bool {
        matches!(self, Suit::Hearts | Suit::Diamonds)
    }

    pub fn symbol(&self) -> char {
        match self {
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
        }
    }
}

/// Ranks in deck order. The discriminant doubles as the column index of
/// every counting system's tag table.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    Serialize_enum_str,
    Deserialize_enum_str,
)]
pub enum Rank {
    #[serde(rename = "A")]
    Ace = 0,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "J")]
    Jack,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "K")]
    King,
}

impl Rank {
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Represents a card in the real world with a suit and a rank.
///
/// Cards sitting in a shoe are face-down. A card is turned face-up when it is
/// drawn and stays that way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
    pub face_up: bool,
}

impl Card {
    pub fn new(suit: Suit, rank: Rank) -> Card {
        Card {
            suit,
            rank,
            face_up: false,
        }
    }

    pub fn turned_up(self) -> Card {
        Card {
            face_up: true,
            ..self
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.face_up {
            return write!(f, "??");
        }
        write!(f, "{}{}", self.rank, self.suit.symbol())
    }
}

/// Maps a card onto one of the 52 distinct (suit, rank) slots, ignoring
/// whether it is face-up.
impl From<Card> for u8 {
    fn from(card: Card) -> u8 {
        card.suit as u8 * 13 + card.rank as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use strum::IntoEnumIterator;

    #[test]
    fn card_integers_cover_all_slots_once() {
        let mut seen = [false; 52];
        for suit in Suit::iter() {
            for rank in Rank::iter() {
                let card_integer: u8 = Card::new(suit, rank).into();
                assert!(!seen[card_integer as usize]);
                seen[card_integer as usize] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn rank_and_suit_names_round_trip_through_strings() {
        assert_eq!(Rank::Ten.to_string(), "10");
        assert_eq!(Rank::Ace.to_string(), "A");
        assert_eq!("Q".parse::<Rank>().unwrap(), Rank::Queen);
        assert_eq!("spades".parse::<Suit>().unwrap(), Suit::Spades);
        assert!("joker".parse::<Rank>().is_err());
    }

    #[test]
    fn display_hides_face_down_cards() {
        let card = Card::new(Suit::Hearts, Rank::Ten);
        assert_eq!(card.to_string(), "??");
        assert_eq!(card.turned_up().to_string(), "10♥");
    }

    #[test]
    fn red_suits() {
        assert!(Suit::Hearts.is_red());
        assert!(Suit::Diamonds.is_red());
        assert!(!Suit::Clubs.is_red());
        assert!(!Suit::Spades.is_red());
    }
}
