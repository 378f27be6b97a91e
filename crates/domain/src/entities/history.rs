use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::ProviderTxKind;
use crate::value_objects::CurrencyCode;

/// One provider add/remove transaction, frozen at commit time.
///
/// The three `equivalent_*` fields value the moved amounts in the base
/// currencies as of the transaction; they are never recomputed. Together
/// with `lp_tokens_delta` and the pool-wide total after the transaction,
/// the record is enough to reconstruct the pool's reserves at that moment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderTxRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub pool_id: Uuid,
    pub kind: ProviderTxKind,
    pub amount_a: Decimal,
    pub amount_b: Decimal,
    /// LP tokens minted (add) or burned (remove) by this transaction.
    pub lp_tokens_delta: Decimal,
    /// Pool-wide LP total immediately after this transaction.
    pub lp_tokens_pool_total: Decimal,
    pub equivalent_irt: Decimal,
    pub equivalent_usdt: Decimal,
    pub equivalent_btc: Decimal,
    pub recorded_at: DateTime<Utc>,
}

impl ProviderTxRecord {
    /// Pool reserves immediately after this transaction, reconstructed by
    /// inverting the proportional deposit/withdrawal.
    ///
    /// For the first-ever deposit (`lp_tokens_pool_total == lp_tokens_delta`)
    /// the reserves equal the deposited amounts. Otherwise the pre-transaction
    /// share of the delta recovers the pre-transaction reserves, and the
    /// moved amounts are added back (or taken off). Exact only when no swap
    /// happened between the compared transactions; callers using this for
    /// time-windowed TVL deltas accept that approximation.
    ///
    /// `None` for degenerate LP totals the formula cannot invert.
    pub fn pool_reserves_after(&self) -> Option<(Decimal, Decimal)> {
        match self.kind {
            ProviderTxKind::Add => {
                if self.lp_tokens_pool_total == self.lp_tokens_delta {
                    return Some((self.amount_a, self.amount_b));
                }
                let before_total = self.lp_tokens_pool_total - self.lp_tokens_delta;
                if before_total <= Decimal::ZERO || self.lp_tokens_delta.is_zero() {
                    return None;
                }
                let before_share = self.lp_tokens_delta / before_total;
                Some((
                    self.amount_a / before_share + self.amount_a,
                    self.amount_b / before_share + self.amount_b,
                ))
            }
            ProviderTxKind::Remove => {
                let before_total = self.lp_tokens_pool_total + self.lp_tokens_delta;
                if before_total <= Decimal::ZERO || self.lp_tokens_delta.is_zero() {
                    return None;
                }
                let before_share = self.lp_tokens_delta / before_total;
                Some((
                    self.amount_a / before_share - self.amount_a,
                    self.amount_b / before_share - self.amount_b,
                ))
            }
        }
    }
}

/// One executed swap, frozen at commit time. Append-only audit trail that
/// drives fee-revenue and volume aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub pool_id: Uuid,
    pub input_currency: CurrencyCode,
    pub output_currency: CurrencyCode,
    pub input_amount: Decimal,
    pub output_amount: Decimal,
    /// Protocol fee yield, denominated in the output currency.
    pub fee_amount: Decimal,
    /// Total fee rate in force when the swap executed.
    pub fee_rate: Decimal,
    pub fee_value_irt: Decimal,
    pub price_before: Decimal,
    pub price_after: Decimal,
    pub slippage: Decimal,
    pub equivalent_irt: Decimal,
    pub equivalent_usdt: Decimal,
    pub equivalent_btc: Decimal,
    pub recorded_at: DateTime<Utc>,
}

/// Point-in-time copy of a pool's reserves, LP supply, and base-currency
/// prices, taken periodically for time-series reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub id: Uuid,
    pub pool_id: Uuid,
    pub amount_a: Decimal,
    pub amount_b: Decimal,
    pub lp_tokens: Decimal,
    pub price_a_irt: Decimal,
    pub price_b_irt: Decimal,
    pub price_a_usdt: Decimal,
    pub price_b_usdt: Decimal,
    pub price_a_btc: Decimal,
    pub price_b_btc: Decimal,
    pub recorded_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn add_record(
        amount_a: Decimal,
        amount_b: Decimal,
        delta: Decimal,
        total: Decimal,
    ) -> ProviderTxRecord {
        ProviderTxRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            pool_id: Uuid::new_v4(),
            kind: ProviderTxKind::Add,
            amount_a,
            amount_b,
            lp_tokens_delta: delta,
            lp_tokens_pool_total: total,
            equivalent_irt: Decimal::ZERO,
            equivalent_usdt: Decimal::ZERO,
            equivalent_btc: Decimal::ZERO,
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn first_deposit_reserves_are_the_amounts() {
        let record = add_record(dec!(1000), dec!(2000), dec!(1414), dec!(1414));
        assert_eq!(record.pool_reserves_after(), Some((dec!(1000), dec!(2000))));
    }

    #[test]
    fn later_deposit_inverts_the_proportion() {
        // Pool held (1000, 2000) with 100 LP; a 1% deposit of (10, 20)
        // minted 1 LP. Reconstruction must land on (1010, 2020).
        let record = add_record(dec!(10), dec!(20), dec!(1), dec!(101));
        let (amount_a, amount_b) = record.pool_reserves_after().unwrap();
        assert_eq!(amount_a, dec!(1010));
        assert_eq!(amount_b, dec!(2020));
    }

    #[test]
    fn removal_inverts_symmetrically() {
        // Pool held (1010, 2020) with 101 LP; burning 1 LP withdrew (10, 20).
        let record = ProviderTxRecord {
            kind: ProviderTxKind::Remove,
            lp_tokens_pool_total: dec!(100),
            ..add_record(dec!(10), dec!(20), dec!(1), dec!(100))
        };
        let (amount_a, amount_b) = record.pool_reserves_after().unwrap();
        // 1/101 is non-terminating, so allow for the last-digit rounding.
        assert!((amount_a - dec!(1000)).abs() < dec!(0.000001));
        assert!((amount_b - dec!(2000)).abs() < dec!(0.000001));
    }

    #[test]
    fn degenerate_totals_yield_none() {
        let record = add_record(dec!(10), dec!(20), Decimal::ZERO, dec!(50));
        assert_eq!(record.pool_reserves_after(), None);
    }
}
