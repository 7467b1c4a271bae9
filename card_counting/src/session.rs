use crate::card::Card;
use crate::counting::{decks_remaining, true_count, update_count, CountingSystem};
use crate::shoe::Shoe;
use crate::Error;

use rand::{thread_rng, Rng};
use tracing::debug;

/// The whole state of one counting session.
///
/// Transitions never mutate a session in place: each one returns a new
/// `SessionState`, so a failed deal leaves the caller's value as it was.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    shoe: Shoe,
    dealt_cards: Vec<Card>,
    current_count: f64,
    true_count: f64,
    deck_penetration: f64,
    counting_system: CountingSystem,
    remaining_decks: f64,
    number_of_decks: u8,
}

impl SessionState {
    /// Starts a session on a freshly shuffled shoe with all counters at zero.
    pub fn initialize(
        counting_system: CountingSystem,
        number_of_decks: u8,
    ) -> Result<SessionState, Error> {
        SessionState::initialize_with_rng(counting_system, number_of_decks, &mut thread_rng())
    }

    pub fn initialize_with_rng<R: Rng + ?Sized>(
        counting_system: CountingSystem,
        number_of_decks: u8,
        rng: &mut R,
    ) -> Result<SessionState, Error> {
        let shoe = Shoe::new_with_rng(number_of_decks, rng)?;
        debug!(%counting_system, number_of_decks, "initialized session");
        Ok(SessionState::with_shoe(counting_system, shoe))
    }

    /// Starts a session on the given shoe as it is, without shuffling.
    pub fn with_shoe(counting_system: CountingSystem, shoe: Shoe) -> SessionState {
        SessionState {
            number_of_decks: shoe.get_number_of_decks(),
            remaining_decks: decks_remaining(shoe.len()),
            shoe,
            dealt_cards: Vec::new(),
            current_count: 0.,
            true_count: 0.,
            deck_penetration: 0.,
            counting_system,
        }
    }

    /// Draws one card and returns it along with the updated session.
    ///
    /// Fails with `EmptyShoe` once every card has been dealt. The session is
    /// never reshuffled here; the caller decides whether to `reset`.
    pub fn deal_card(&self) -> Result<(Card, SessionState), Error> {
        let (card, shoe) = self.shoe.draw()?;

        let mut dealt_cards = Vec::with_capacity(self.dealt_cards.len() + 1);
        dealt_cards.extend_from_slice(&self.dealt_cards);
        dealt_cards.push(card);

        let total_cards = dealt_cards.len() + shoe.len();
        let deck_penetration = dealt_cards.len() as f64 / total_cards as f64 * 100.;
        let remaining_decks = decks_remaining(shoe.len());
        let current_count = update_count(self.current_count, &card, self.counting_system);
        let true_count = true_count(current_count, remaining_decks);

        debug!(
            %card,
            current_count,
            true_count,
            remaining_decks,
            "dealt card"
        );

        let state = SessionState {
            shoe,
            dealt_cards,
            current_count,
            true_count,
            deck_penetration,
            counting_system: self.counting_system,
            remaining_decks,
            number_of_decks: self.number_of_decks,
        };
        Ok((card, state))
    }

    /// Switches the counting system for cards dealt from now on. The running
    /// count already accumulated is kept as it is, not recomputed.
    pub fn with_counting_system(&self, counting_system: CountingSystem) -> SessionState {
        SessionState {
            counting_system,
            ..self.clone()
        }
    }

    /// A fresh session with the same counting system and number of decks.
    pub fn reset(&self) -> SessionState {
        self.reset_with_rng(&mut thread_rng())
    }

    pub fn reset_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> SessionState {
        let shoe = Shoe::build(self.number_of_decks).shuffled_with_rng(rng);
        debug!(counting_system = %self.counting_system, "reset session");
        SessionState::with_shoe(self.counting_system, shoe)
    }

    pub fn get_shoe(&self) -> &Shoe {
        &self.shoe
    }

    pub fn get_dealt_cards(&self) -> &[Card] {
        &self.dealt_cards
    }

    /// The last `number` dealt cards, oldest first.
    pub fn get_recent_cards(&self, number: usize) -> &[Card] {
        let start = self.dealt_cards.len().saturating_sub(number);
        &self.dealt_cards[start..]
    }

    pub fn get_current_count(&self) -> f64 {
        self.current_count
    }

    pub fn get_true_count(&self) -> f64 {
        self.true_count
    }

    /// Percentage of the shoe dealt so far, in [0, 100].
    pub fn get_deck_penetration(&self) -> f64 {
        self.deck_penetration
    }

    pub fn get_counting_system(&self) -> CountingSystem {
        self.counting_system
    }

    pub fn get_remaining_decks(&self) -> f64 {
        self.remaining_decks
    }

    pub fn get_number_of_decks(&self) -> u8 {
        self.number_of_decks
    }

    pub fn get_total_cards(&self) -> usize {
        self.dealt_cards.len() + self.shoe.len()
    }
}
