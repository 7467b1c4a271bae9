use strum_macros::EnumIter;

/// Bet sizing tiers, ordered from the most negative true count upwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, EnumIter)]
pub enum BettingTier {
    VeryNegative,
    Negative,
    Neutral,
    SlightlyPositive,
    Positive,
    StronglyPositive,
    VeryStronglyPositive,
    ExtremelyPositive,
}

impl BettingTier {
    /// Picks the tier whose interval contains `true_count`:
    /// (-inf, -3], (-3, -1], (-1, 1), [1, 2), [2, 3), [3, 4), [4, 5), [5, inf).
    pub fn from_true_count(true_count: f64) -> BettingTier {
        if true_count <= -3. {
            BettingTier::VeryNegative
        } else if true_count <= -1. {
            BettingTier::Negative
        } else if true_count < 1. {
            BettingTier::Neutral
        } else if true_count < 2. {
            BettingTier::SlightlyPositive
        } else if true_count < 3. {
            BettingTier::Positive
        } else if true_count < 4. {
            BettingTier::StronglyPositive
        } else if true_count < 5. {
            BettingTier::VeryStronglyPositive
        } else {
            BettingTier::ExtremelyPositive
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            BettingTier::VeryNegative => "Bet Minimum",
            BettingTier::Negative => "Bet Minimum, Play Basic Strategy",
            BettingTier::Neutral => "Bet Minimum, Follow Basic Strategy",
            BettingTier::SlightlyPositive => "Bet 2× Minimum",
            BettingTier::Positive => "Bet 2-3× Minimum",
            BettingTier::StronglyPositive => "Bet 3-4× Minimum",
            BettingTier::VeryStronglyPositive => "Bet 4-5× Minimum",
            BettingTier::ExtremelyPositive => "Bet 5-10× Minimum",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BettingTier::VeryNegative => {
                "With a very negative count, the deck is rich in high cards. \
                 Bet the minimum and be more conservative."
            }
            BettingTier::Negative => {
                "Deck is slightly unfavorable. Bet minimum and stick to basic strategy."
            }
            BettingTier::Neutral => "Nearly neutral deck. Bet minimum and follow basic strategy.",
            BettingTier::SlightlyPositive => {
                "Slightly positive count. Consider doubling your minimum bet."
            }
            BettingTier::Positive => {
                "Positive count. Consider doubling or tripling your minimum bet."
            }
            BettingTier::StronglyPositive => {
                "Strong positive count. Increase your bet to 3-4 times the minimum."
            }
            BettingTier::VeryStronglyPositive => {
                "Very strong positive count. Increase your bet significantly."
            }
            BettingTier::ExtremelyPositive => {
                "Extremely favorable count. Maximize your bet within your bankroll limits."
            }
        }
    }
}

/// What to do at a given true count. Computed on demand, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Strategy {
    pub count: f64,
    pub tier: BettingTier,
    pub recommendation: &'static str,
    pub description: &'static str,
}

pub fn get_strategy(true_count: f64) -> Strategy {
    let tier = BettingTier::from_true_count(true_count);
    Strategy {
        count: true_count,
        tier,
        recommendation: tier.recommendation(),
        description: tier.description(),
    }
}

pub const INSURANCE: &str = "Take insurance when dealer shows an Ace";
pub const STAND_16_VS_10: &str = "Stand on 16 vs. dealer's 10";
pub const STAND_15_VS_10: &str = "Stand on 15 vs. dealer's 10";
pub const STAND_12_VS_3: &str = "Stand on 12 vs. dealer's 3";
pub const HIT_12_VS_4: &str = "Hit on 12 vs. dealer's 4";
pub const HIT_12_VS_5: &str = "Hit on 12 vs. dealer's 5";
pub const HIT_12_VS_6: &str = "Hit on 12 vs. dealer's 6";

/// Basic strategy deviations that apply at `true_count`. Each threshold is
/// checked on its own, and the result keeps this fixed order.
pub fn get_strategy_adjustments(true_count: f64) -> Vec<&'static str> {
    let mut adjustments = Vec::new();

    if true_count >= 1. {
        adjustments.push(INSURANCE);
    }
    if true_count >= 3. {
        adjustments.push(STAND_16_VS_10);
        adjustments.push(STAND_15_VS_10);
    }
    if true_count >= 4. {
        adjustments.push(STAND_12_VS_3);
    }
    if true_count <= -2. {
        adjustments.push(HIT_12_VS_4);
        adjustments.push(HIT_12_VS_5);
        adjustments.push(HIT_12_VS_6);
    }

    adjustments
}

#[cfg(test)]
mod tests {
    use super::*;

    use strum::IntoEnumIterator;

    #[test]
    fn boundaries_land_in_the_right_tier() {
        assert_eq!(get_strategy(1.).recommendation, "Bet 2× Minimum");
        assert_eq!(
            get_strategy(0.999).recommendation,
            "Bet Minimum, Follow Basic Strategy"
        );
        assert_eq!(get_strategy(-3.).recommendation, "Bet Minimum");
        assert_eq!(
            get_strategy(-2.999).recommendation,
            "Bet Minimum, Play Basic Strategy"
        );
        assert_eq!(
            get_strategy(-1.).recommendation,
            "Bet Minimum, Play Basic Strategy"
        );
        assert_eq!(
            get_strategy(-0.999).recommendation,
            "Bet Minimum, Follow Basic Strategy"
        );
        assert_eq!(get_strategy(2.).recommendation, "Bet 2-3× Minimum");
        assert_eq!(get_strategy(3.).recommendation, "Bet 3-4× Minimum");
        assert_eq!(get_strategy(4.).recommendation, "Bet 4-5× Minimum");
        assert_eq!(get_strategy(4.999).recommendation, "Bet 4-5× Minimum");
        assert_eq!(get_strategy(5.).recommendation, "Bet 5-10× Minimum");
    }

    #[test]
    fn extremes_are_covered() {
        assert_eq!(get_strategy(f64::NEG_INFINITY).tier, BettingTier::VeryNegative);
        assert_eq!(get_strategy(-40.).tier, BettingTier::VeryNegative);
        assert_eq!(get_strategy(40.).tier, BettingTier::ExtremelyPositive);
        assert_eq!(get_strategy(f64::INFINITY).tier, BettingTier::ExtremelyPositive);
    }

    #[test]
    fn tiers_increase_with_the_count() {
        let mut last = BettingTier::VeryNegative;
        let mut count = -6.;
        while count <= 6. {
            let tier = get_strategy(count).tier;
            assert!(tier >= last);
            last = tier;
            count += 0.5;
        }
        assert_eq!(last, BettingTier::ExtremelyPositive);
    }

    #[test]
    fn every_tier_is_reachable_and_distinct() {
        let counts = [-3., -2., 0., 1.5, 2.5, 3.5, 4.5, 6.];
        let tiers: Vec<BettingTier> = counts.iter().map(|&c| get_strategy(c).tier).collect();
        assert_eq!(tiers, BettingTier::iter().collect::<Vec<_>>());
    }

    #[test]
    fn strategy_carries_the_count() {
        let strategy = get_strategy(2.5);
        assert_eq!(strategy.count, 2.5);
        assert_eq!(
            strategy.description,
            "Positive count. Consider doubling or tripling your minimum bet."
        );
    }

    #[test]
    fn adjustments_accumulate_in_order() {
        assert_eq!(
            get_strategy_adjustments(4.),
            vec![INSURANCE, STAND_16_VS_10, STAND_15_VS_10, STAND_12_VS_3]
        );
        assert_eq!(
            get_strategy_adjustments(3.),
            vec![INSURANCE, STAND_16_VS_10, STAND_15_VS_10]
        );
        assert_eq!(get_strategy_adjustments(1.), vec![INSURANCE]);
        assert_eq!(
            get_strategy_adjustments(-2.),
            vec![HIT_12_VS_4, HIT_12_VS_5, HIT_12_VS_6]
        );
    }

    #[test]
    fn no_adjustments_near_zero() {
        assert!(get_strategy_adjustments(0.).is_empty());
        assert!(get_strategy_adjustments(0.5).is_empty());
        assert!(get_strategy_adjustments(-1.5).is_empty());
    }
}
