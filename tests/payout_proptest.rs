//! Property tests for the fixed-point money math.
//!
//! These properties hold for any representable stake and need no
//! database: payouts carry no rounding drift, and the two-entry reversal
//! of a won bet always nets back to the pre-bet balance.

use proptest::prelude::*;
use wager_ledger::betting::{MIN_STAKE, OutcomeResolver, PAYOUT_MULTIPLIER};

proptest! {
    #[test]
    fn payout_is_exactly_stake_times_multiplier(stake in MIN_STAKE..=1_000_000_000_i64) {
        let payout = OutcomeResolver::payout(stake).expect("no overflow in range");
        prop_assert_eq!(payout, stake * PAYOUT_MULTIPLIER);
        // splitting the payout back into stakes loses nothing
        prop_assert_eq!(payout % stake, 0);
    }

    #[test]
    fn won_bet_net_effect_is_plus_stake(stake in MIN_STAKE..=1_000_000_000_i64) {
        let payout = OutcomeResolver::payout(stake).expect("no overflow in range");
        // ledger view of a won bet: -stake (stake entry) +payout (payout entry)
        prop_assert_eq!(-stake + payout, stake);
    }

    #[test]
    fn won_cancellation_restores_pre_bet_balance(
        balance in 0_i64..=1_000_000_000,
        stake in MIN_STAKE..=1_000_000_000_i64,
    ) {
        prop_assume!(stake <= balance);
        let payout = OutcomeResolver::payout(stake).expect("no overflow in range");

        // place, win, then cancel: refund entry +stake, clawback entry -payout
        let after_win = balance - stake + payout;
        let after_cancel = after_win + stake - payout;
        prop_assert_eq!(after_cancel, balance);
    }

    #[test]
    fn lost_cancellation_restores_pre_bet_balance(
        balance in 0_i64..=1_000_000_000,
        stake in MIN_STAKE..=1_000_000_000_i64,
    ) {
        prop_assume!(stake <= balance);

        // place, lose, then cancel: one reversal entry +stake
        let after_loss = balance - stake;
        let after_cancel = after_loss + stake;
        prop_assert_eq!(after_cancel, balance);
    }

    #[test]
    fn payout_overflow_is_always_caught(stake in (i64::MAX / 2 + 1)..=i64::MAX) {
        prop_assert_eq!(OutcomeResolver::payout(stake), None);
    }
}
