use crate::card::{Card, Rank, Suit};
use crate::Error;

use strum::IntoEnumIterator;

use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};
use tracing::trace;

pub const CARDS_PER_DECK: usize = 52;

/// Represents a shoe in the real world: the undealt cards of one or more
/// decks. Cards are drawn from the end of the sequence.
///
/// Every operation returns a new shoe and leaves `self` untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Shoe {
    number_of_decks: u8,
    cards: Vec<Card>,
}

impl Shoe {
    /// Creates a new shuffled shoe. Fails with `InvalidConfiguration` if
    /// `number_of_decks` is zero.
    pub fn new(number_of_decks: u8) -> Result<Shoe, Error> {
        Shoe::new_with_rng(number_of_decks, &mut thread_rng())
    }

    pub fn new_with_rng<R: Rng + ?Sized>(number_of_decks: u8, rng: &mut R) -> Result<Shoe, Error> {
        Ok(Shoe::ordered(number_of_decks)?.shuffled_with_rng(rng))
    }

    /// Creates a new shoe with ordered, face-down cards.
    pub fn ordered(number_of_decks: u8) -> Result<Shoe, Error> {
        if number_of_decks == 0 {
            return Err(Error::InvalidConfiguration(String::from(
                "number_of_decks must be at least 1",
            )));
        }
        Ok(Shoe::build(number_of_decks))
    }

    pub(crate) fn build(number_of_decks: u8) -> Shoe {
        let mut cards = Vec::with_capacity(number_of_decks as usize * CARDS_PER_DECK);
        for _ in 0..number_of_decks {
            for suit in Suit::iter() {
                for rank in Rank::iter() {
                    cards.push(Card::new(suit, rank));
                }
            }
        }
        Shoe {
            number_of_decks,
            cards,
        }
    }

    /// Returns a uniformly shuffled copy of this shoe.
    pub fn shuffled(&self) -> Shoe {
        self.shuffled_with_rng(&mut thread_rng())
    }

    /// Fisher-Yates over a copy of the cards, walking from the last index down.
    pub fn shuffled_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Shoe {
        let mut cards = self.cards.clone();
        cards.shuffle(rng);
        trace!(cards = cards.len(), "shuffled shoe");
        Shoe {
            number_of_decks: self.number_of_decks,
            cards,
        }
    }

    /// Draws the top card, turned face-up, together with the shoe that remains.
    pub fn draw(&self) -> Result<(Card, Shoe), Error> {
        let (top, rest) = self.cards.split_last().ok_or(Error::EmptyShoe)?;
        let shoe = Shoe {
            number_of_decks: self.number_of_decks,
            cards: rest.to_vec(),
        };
        Ok((top.turned_up(), shoe))
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn get_number_of_decks(&self) -> u8 {
        self.number_of_decks
    }

    /// Size of the shoe before anything was drawn.
    pub fn get_total_cards(&self) -> usize {
        self.number_of_decks as usize * CARDS_PER_DECK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn number_of_cards_is_correct(cards: &[Card], number_of_decks: u8) -> bool {
        let mut counts = [0usize; 52];
        for card in cards {
            let card_integer: u8 = (*card).into();
            counts[card_integer as usize] += 1;
        }
        counts.iter().all(|&count| count == number_of_decks as usize)
    }

    fn sorted(cards: &[Card]) -> Vec<Card> {
        let mut cards = cards.to_vec();
        cards.sort();
        cards
    }

    #[test]
    fn new_shoe_has_every_card_once_per_deck() {
        for number_of_decks in [1, 2, 6, 8] {
            let shoe = Shoe::new(number_of_decks).unwrap();
            assert_eq!(shoe.len(), number_of_decks as usize * 52);
            assert_eq!(shoe.get_total_cards(), shoe.len());
            assert!(number_of_cards_is_correct(shoe.cards(), number_of_decks));
            assert!(shoe.cards().iter().all(|card| !card.face_up));
        }
    }

    #[test]
    fn zero_decks_is_invalid() {
        assert!(matches!(Shoe::new(0), Err(Error::InvalidConfiguration(_))));
        assert!(matches!(
            Shoe::ordered(0),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn shuffle_is_a_permutation_and_leaves_input_intact() {
        let ordered = Shoe::ordered(2).unwrap();
        let before = ordered.clone();
        let shuffled = ordered.shuffled_with_rng(&mut StdRng::seed_from_u64(7));
        assert_eq!(ordered, before);
        assert_eq!(sorted(shuffled.cards()), sorted(ordered.cards()));
        assert_ne!(shuffled.cards(), ordered.cards());
    }

    #[test]
    fn shuffle_with_seed_is_deterministic() {
        let shoe_a = Shoe::new_with_rng(6, &mut StdRng::seed_from_u64(42)).unwrap();
        let shoe_b = Shoe::new_with_rng(6, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(shoe_a, shoe_b);
    }

    #[test]
    fn draw_takes_the_last_card_face_up() {
        let shoe = Shoe::ordered(1).unwrap();
        let (card, rest) = shoe.draw().unwrap();
        assert_eq!(card, Card::new(Suit::Spades, Rank::King).turned_up());
        assert!(card.face_up);
        assert_eq!(rest.len(), shoe.len() - 1);
        assert_eq!(shoe.len(), 52);
    }

    #[test]
    fn drawing_until_empty_yields_every_card_once() {
        let original = Shoe::new(2).unwrap();
        let mut shoe = original.clone();
        let mut drawn = Vec::new();
        while !shoe.is_empty() {
            let before = shoe.len();
            let (card, rest) = shoe.draw().unwrap();
            assert_eq!(rest.len(), before - 1);
            drawn.push(card);
            shoe = rest;
        }
        assert_eq!(drawn.len(), 104);
        assert!(number_of_cards_is_correct(&drawn, 2));
        let face_down: Vec<Card> = drawn.iter().map(|card| Card::new(card.suit, card.rank)).collect();
        assert_eq!(sorted(&face_down), sorted(original.cards()));
    }

    #[test]
    fn drawing_from_empty_shoe_fails() {
        let mut shoe = Shoe::ordered(1).unwrap();
        for _ in 0..52 {
            shoe = shoe.draw().unwrap().1;
        }
        assert_eq!(shoe.draw(), Err(Error::EmptyShoe));
        assert_eq!(shoe.draw(), Err(Error::EmptyShoe));
    }
}
