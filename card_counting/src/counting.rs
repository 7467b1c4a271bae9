use crate::card::{Card, Rank};
use crate::shoe::CARDS_PER_DECK;
use crate::Error;

use serde_enum_str::{Deserialize_enum_str, Serialize_enum_str};
use std::str::FromStr;
use strum_macros::EnumIter;

type TagTable = [f64; 13];

// Columns: A 2 3 4 5 6 7 8 9 10 J Q K
static HI_LO: TagTable = [-1., 1., 1., 1., 1., 1., 0., 0., 0., -1., -1., -1., -1.];
static HI_OPT_I: TagTable = [0., 0., 1., 1., 1., 1., 0., 0., 0., -1., -1., -1., -1.];
static HI_OPT_II: TagTable = [0., 1., 1., 2., 2., 1., 1., 0., 0., -2., -2., -2., -2.];
static KO: TagTable = [-1., 1., 1., 1., 1., 1., 1., 0., 0., -1., -1., -1., -1.];
static OMEGA_II: TagTable = [0., 1., 1., 2., 2., 2., 1., 0., -1., -2., -2., -2., -2.];
// Red 7s count +1 and black 7s count 0; the table is keyed by rank only, so
// every 7 carries the average.
static RED_7: TagTable = [-1., 1., 1., 1., 1., 1., 0.5, 0., 0., -1., -1., -1., -1.];

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize_enum_str, Deserialize_enum_str,
)]
pub enum CountingSystem {
    #[serde(rename = "hi-lo")]
    HiLo,
    #[serde(rename = "hi-opt-i")]
    HiOptI,
    #[serde(rename = "hi-opt-ii")]
    HiOptII,
    #[serde(rename = "ko")]
    Ko,
    #[serde(rename = "omega-ii")]
    OmegaII,
    #[serde(rename = "red-7")]
    Red7,
}

impl Default for CountingSystem {
    fn default() -> Self {
        CountingSystem::HiLo
    }
}

impl CountingSystem {
    /// Looks a counting system up by its identifier, e.g. `"omega-ii"`.
    pub fn from_name(name: &str) -> Result<CountingSystem, Error> {
        CountingSystem::from_str(name).map_err(|_| {
            Error::InvalidConfiguration(format!("unknown counting system: {}", name))
        })
    }

    /// The full tag table, indexed by `Rank::index`.
    pub fn tag_values(&self) -> &'static [f64; 13] {
        match self {
            CountingSystem::HiLo => &HI_LO,
            CountingSystem::HiOptI => &HI_OPT_I,
            CountingSystem::HiOptII => &HI_OPT_II,
            CountingSystem::Ko => &KO,
            CountingSystem::OmegaII => &OMEGA_II,
            CountingSystem::Red7 => &RED_7,
        }
    }

    pub fn tag(&self, rank: Rank) -> f64 {
        self.tag_values()[rank.index()]
    }

    /// Whether a full deck sums to zero under this system.
    pub fn is_balanced(&self) -> bool {
        // Four of each rank per deck.
        self.tag_values().iter().map(|value| value * 4.).sum::<f64>() == 0.
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CountingSystem::HiLo => "Hi-Lo",
            CountingSystem::HiOptI => "Hi-Opt I",
            CountingSystem::HiOptII => "Hi-Opt II",
            CountingSystem::Ko => "KO (Knock Out)",
            CountingSystem::OmegaII => "Omega II",
            CountingSystem::Red7 => "Red 7",
        }
    }

    pub fn explanation(&self) -> &'static str {
        match self {
            CountingSystem::HiLo => {
                "Cards 2-6 count +1, 7-9 count 0, 10 through Ace count -1. \
                 A positive count means the remaining cards are rich in tens and aces."
            }
            CountingSystem::HiOptI => {
                "Cards 3-6 count +1, 2 and 7-9 count 0, tens count -1. \
                 Aces count 0 and are usually side-counted."
            }
            CountingSystem::HiOptII => {
                "2, 3, 6 and 7 count +1, 4 and 5 count +2, tens count -2. \
                 Aces, 8 and 9 count 0."
            }
            CountingSystem::Ko => {
                "Cards 2-7 count +1, 8-9 count 0, 10 through Ace count -1. \
                 Unbalanced: a full deck sums to +4, so no true count conversion is needed."
            }
            CountingSystem::OmegaII => {
                "2, 3 and 7 count +1, 4, 5 and 6 count +2, 9 counts -1, tens count -2. \
                 Aces and 8 count 0."
            }
            CountingSystem::Red7 => {
                "Cards 2-6 count +1, red 7s +1, black 7s 0, 8-9 count 0, 10 through Ace count -1. \
                 Every 7 counts +0.5 here since tags are looked up by rank."
            }
        }
    }
}

/// Adds the tag of `card` to the running count. Face-down cards do not count.
pub fn update_count(current_count: f64, card: &Card, system: CountingSystem) -> f64 {
    if !card.face_up {
        return current_count;
    }
    current_count + system.tag(card.rank)
}

/// Decks left in a shoe holding `cards_remaining` cards. Fractional.
pub fn decks_remaining(cards_remaining: usize) -> f64 {
    cards_remaining as f64 / CARDS_PER_DECK as f64
}

/// Running count per remaining deck, rounded to the nearest half. The divisor
/// never drops below one deck, and exact quarter ties round toward zero.
pub fn true_count(running_count: f64, remaining_decks: f64) -> f64 {
    let halves = running_count / remaining_decks.max(1.) * 2.;
    let rounded = if halves.fract().abs() == 0.5 {
        halves.trunc()
    } else {
        halves.round()
    };
    // Avoids reporting -0.
    rounded / 2. + 0.
}
