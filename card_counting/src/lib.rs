pub mod card;
pub mod counting;
pub mod session;
pub mod shoe;
pub mod strategy;

pub use card::{Card, Rank, Suit};
pub use counting::{true_count, update_count, CountingSystem};
pub use session::SessionState;
pub use shoe::Shoe;
pub use strategy::{get_strategy, get_strategy_adjustments, BettingTier, Strategy};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Zero decks, or a counting system identifier that does not exist.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// A draw was attempted after every card had been dealt.
    #[error("the shoe is empty")]
    EmptyShoe,
}
