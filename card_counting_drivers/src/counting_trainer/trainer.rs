use std::thread;
use std::time::Duration;

use card_counting::{
    get_strategy, get_strategy_adjustments, Card, CountingSystem, Error, SessionState, Strategy,
};
use card_counting_drivers::{SessionSettings, SystemSwitch};
use rand::Rng;
use tracing::{info, warn};

pub trait TrainerEventHandler {
    fn on_session_begin(&mut self, state: &SessionState);
    fn on_deal_card(&mut self, card: &Card, state: &SessionState);
    fn on_strategy(&mut self, strategy: &Strategy, adjustments: &[&'static str]);
    fn on_shoe_exhausted(&mut self, state: &SessionState);
    fn on_system_switch(&mut self, previous: CountingSystem, state: &SessionState);
}

/// How many of the latest dealt cards the console shows after each deal.
pub const RECENT_CARDS: usize = 20;

/// Owns the one live session and replaces it on every deal.
pub struct Trainer<R: Rng> {
    state: SessionState,
    rng: R,
    deal_interval: Duration,
}

impl<R: Rng> Trainer<R> {
    pub fn new(settings: &SessionSettings, mut rng: R, deal_interval: Duration) -> Result<Self, Error> {
        let state = SessionState::initialize_with_rng(
            settings.counting_system,
            settings.number_of_decks,
            &mut rng,
        )?;
        Ok(Trainer {
            state,
            rng,
            deal_interval,
        })
    }

    /// Deals one card. An exhausted shoe is replaced by a freshly shuffled
    /// one instead, and nothing is dealt on that step.
    pub fn step<H: TrainerEventHandler>(&mut self, handler: &mut H) -> Result<(), Error> {
        match self.state.deal_card() {
            Ok((card, state)) => {
                self.state = state;
                handler.on_deal_card(&card, &self.state);
                let true_count = self.state.get_true_count();
                handler.on_strategy(
                    &get_strategy(true_count),
                    &get_strategy_adjustments(true_count),
                );
                Ok(())
            }
            Err(Error::EmptyShoe) => {
                warn!(
                    dealt = self.state.get_dealt_cards().len(),
                    "shoe exhausted, reshuffling"
                );
                handler.on_shoe_exhausted(&self.state);
                self.state = self.state.reset_with_rng(&mut self.rng);
                handler.on_session_begin(&self.state);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Counts future cards with `counting_system`. The running count is kept.
    pub fn switch_counting_system<H: TrainerEventHandler>(
        &mut self,
        counting_system: CountingSystem,
        handler: &mut H,
    ) {
        let previous = self.state.get_counting_system();
        info!(
            from = %previous,
            to = %counting_system,
            running_count = self.state.get_current_count(),
            "switching counting system"
        );
        self.state = self.state.with_counting_system(counting_system);
        handler.on_system_switch(previous, &self.state);
    }

    /// Runs `number_of_deals` steps, pausing for the deal interval between them.
    /// A `switch` is applied once `switch.after_deals` steps have been taken.
    pub fn run<H: TrainerEventHandler>(
        &mut self,
        number_of_deals: u64,
        switch: Option<SystemSwitch>,
        handler: &mut H,
    ) -> Result<(), Error> {
        info!(
            counting_system = %self.state.get_counting_system(),
            number_of_decks = self.state.get_number_of_decks(),
            number_of_deals,
            "starting trainer"
        );
        handler.on_session_begin(&self.state);
        for i in 0..number_of_deals {
            if let Some(switch) = switch.filter(|switch| switch.after_deals == i) {
                self.switch_counting_system(switch.counting_system, handler);
            }
            if i > 0 && !self.deal_interval.is_zero() {
                thread::sleep(self.deal_interval);
            }
            self.step(handler)?;
        }
        Ok(())
    }

    pub fn get_state(&self) -> &SessionState {
        &self.state
    }
}

/// Prints every event to stdout.
#[derive(Debug, Clone, Default)]
pub struct ConsoleHandler {
    show_card_values: bool,
    shoes_played: u32,
}

impl ConsoleHandler {
    pub fn new(show_card_values: bool) -> Self {
        ConsoleHandler {
            show_card_values,
            shoes_played: 0,
        }
    }
}

impl TrainerEventHandler for ConsoleHandler {
    fn on_session_begin(&mut self, state: &SessionState) {
        self.shoes_played += 1;
        let system = state.get_counting_system();
        println!("################################################");
        println!(
            "Shoe #{}: {} decks, counting with {}",
            self.shoes_played,
            state.get_number_of_decks(),
            system.display_name()
        );
        println!("{}", system.explanation());
        println!("################################################");
    }

    fn on_deal_card(&mut self, card: &Card, state: &SessionState) {
        let tag = if self.show_card_values {
            format!(" ({})", format_signed(state.get_counting_system().tag(card.rank)))
        } else {
            String::new()
        };
        println!(
            "[{}/{}] {}{}  running {}  true {}  penetration {:.1}%  decks left {:.1}",
            state.get_dealt_cards().len(),
            state.get_total_cards(),
            card,
            tag,
            format_signed(state.get_current_count()),
            format_signed(state.get_true_count()),
            state.get_deck_penetration(),
            state.get_remaining_decks(),
        );
        println!("    recent: {}", format_recent_cards(state));
    }

    fn on_strategy(&mut self, strategy: &Strategy, adjustments: &[&'static str]) {
        println!("    {}", strategy.recommendation);
        for adjustment in adjustments {
            println!("    - {}", adjustment);
        }
    }

    fn on_shoe_exhausted(&mut self, state: &SessionState) {
        println!(
            "The shoe is empty after {} cards. Reshuffling...",
            state.get_dealt_cards().len()
        );
    }

    fn on_system_switch(&mut self, previous: CountingSystem, state: &SessionState) {
        let system = state.get_counting_system();
        println!("------------------------------------------------");
        println!(
            "Switching from {} to {}, running count stays at {}",
            previous.display_name(),
            system.display_name(),
            format_signed(state.get_current_count())
        );
        println!("{}", system.explanation());
        println!("------------------------------------------------");
    }
}

/// The latest dealt cards, oldest first.
pub fn format_recent_cards(state: &SessionState) -> String {
    state
        .get_recent_cards(RECENT_CARDS)
        .iter()
        .map(|card| card.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn format_signed(value: f64) -> String {
    if value > 0. {
        format!("+{}", value)
    } else {
        format!("{}", value)
    }
}
