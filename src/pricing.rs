//! Final-price calculation for the purchase flow.
//!
//! Pure and deterministic: the same inputs always produce the same rounded
//! output. Card purchases carry the machine's pass-through fee per
//! installment count, PIX/cash gets a flat discount, and a used device in
//! trade counts as a fixed credit before the complement is applied.

use crate::bot::state::{ComplementMethod, PaymentMethod};

/// Highest installment count offered at checkout.
pub const MAX_INSTALLMENTS: u32 = 18;

/// Card machine pass-through fee per installment count (index 0 = 1x).
pub const CARD_RATES: [f64; MAX_INSTALLMENTS as usize] = [
    0.0310, 0.0393, 0.0477, 0.0560, 0.0643, 0.0727, 0.0810, 0.0893, 0.0977, 0.1060, 0.1143, 0.1227, 0.1310, 0.1393,
    0.1477, 0.1560, 0.1643, 0.1727,
];

/// Flat discount for PIX or cash.
pub const PIX_CASH_DISCOUNT: f64 = 0.10;

/// Fixed credit for a used device given in trade.
pub const TRADE_IN_CREDIT: f64 = 400.0;

/// Computed payment breakdown for the receipt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    pub total: f64,
    pub trade_in_credit: f64,
}

/// Fee for `installments` on the card. Counts outside 1..=18 carry no
/// surcharge — the flow re-prompts before they normally get here.
pub fn card_rate(installments: u32) -> f64 {
    if (1..=MAX_INSTALLMENTS).contains(&installments) {
        CARD_RATES[(installments - 1) as usize]
    } else {
        0.0
    }
}

/// Round to 2 decimal places (centavos).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Final price for the chosen payment arrangement.
///
/// * Card: `base * (1 + rate[n])`
/// * PIX/cash: `base * 0.90`
/// * Trade-in: `max(base - 400, 0)`, then the complement method (card or
///   PIX/cash) is applied to the remainder; no complement leaves the
///   remainder as-is
/// * No method at all returns the base price unchanged
pub fn final_price(
    base_price: f64,
    method: Option<PaymentMethod>,
    complement: Option<ComplementMethod>,
    installments: Option<u32>,
) -> Quote {
    let n = installments.unwrap_or(1);
    match method {
        Some(PaymentMethod::Card) => Quote {
            total: round2(base_price * (1.0 + card_rate(n))),
            trade_in_credit: 0.0,
        },
        Some(PaymentMethod::PixCash) => Quote {
            total: round2(base_price * (1.0 - PIX_CASH_DISCOUNT)),
            trade_in_credit: 0.0,
        },
        Some(PaymentMethod::TradeIn) => {
            let remainder = (base_price - TRADE_IN_CREDIT).max(0.0);
            let total = match complement {
                Some(ComplementMethod::Card) => remainder * (1.0 + card_rate(n)),
                Some(ComplementMethod::PixCash) => remainder * (1.0 - PIX_CASH_DISCOUNT),
                None => remainder,
            };
            Quote {
                total: round2(total),
                trade_in_credit: TRADE_IN_CREDIT,
            }
        }
        None => Quote {
            total: round2(base_price),
            trade_in_credit: 0.0,
        },
    }
}

/// 18-row installment table for the card prompt, one line per count.
pub fn installment_table(base_price: f64) -> String {
    (1..=MAX_INSTALLMENTS)
        .map(|n| {
            let total = round2(base_price * (1.0 + card_rate(n)));
            let per_month = round2(total / n as f64);
            format!("{}x de R$ {:.2} = R$ {:.2}", n, per_month, total)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rates_strictly_increasing() {
        for pair in CARD_RATES.windows(2) {
            assert!(pair[0] < pair[1], "rate table must grow with installment count");
        }
    }

    #[test]
    fn test_card_every_installment_count() {
        let base = 1000.0;
        for n in 1..=MAX_INSTALLMENTS {
            let quote = final_price(base, Some(PaymentMethod::Card), None, Some(n));
            let expected = round2(base * (1.0 + CARD_RATES[(n - 1) as usize]));
            assert_eq!(quote.total, expected, "installments = {}", n);
            assert_eq!(quote.trade_in_credit, 0.0);
        }
    }

    #[test]
    fn test_card_table_endpoints() {
        assert_eq!(final_price(1000.0, Some(PaymentMethod::Card), None, Some(1)).total, 1031.0);
        assert_eq!(
            final_price(1000.0, Some(PaymentMethod::Card), None, Some(18)).total,
            1172.7
        );
    }

    #[test]
    fn test_card_unknown_count_no_surcharge() {
        assert_eq!(final_price(1000.0, Some(PaymentMethod::Card), None, Some(0)).total, 1000.0);
        assert_eq!(
            final_price(1000.0, Some(PaymentMethod::Card), None, Some(19)).total,
            1000.0
        );
        assert_eq!(final_price(1000.0, Some(PaymentMethod::Card), None, None).total, 1031.0);
    }

    #[test]
    fn test_pix_cash_discount() {
        assert_eq!(final_price(1000.0, Some(PaymentMethod::PixCash), None, None).total, 900.0);
        assert_eq!(final_price(0.0, Some(PaymentMethod::PixCash), None, None).total, 0.0);
        assert_eq!(
            final_price(3333.33, Some(PaymentMethod::PixCash), None, None).total,
            3000.0
        );
    }

    #[test]
    fn test_trade_in_without_complement() {
        let quote = final_price(1000.0, Some(PaymentMethod::TradeIn), None, None);
        assert_eq!(quote.total, 600.0);
        assert_eq!(quote.trade_in_credit, TRADE_IN_CREDIT);
    }

    #[test]
    fn test_trade_in_floors_at_zero() {
        let quote = final_price(250.0, Some(PaymentMethod::TradeIn), None, None);
        assert_eq!(quote.total, 0.0);

        let quote = final_price(
            250.0,
            Some(PaymentMethod::TradeIn),
            Some(ComplementMethod::Card),
            Some(12),
        );
        assert_eq!(quote.total, 0.0);
    }

    #[test]
    fn test_trade_in_with_card_complement_every_count() {
        let base = 2000.0;
        for n in 1..=MAX_INSTALLMENTS {
            let quote = final_price(base, Some(PaymentMethod::TradeIn), Some(ComplementMethod::Card), Some(n));
            let expected = round2((base - TRADE_IN_CREDIT) * (1.0 + CARD_RATES[(n - 1) as usize]));
            assert_eq!(quote.total, expected, "installments = {}", n);
        }
    }

    #[test]
    fn test_trade_in_with_pix_complement() {
        let quote = final_price(2000.0, Some(PaymentMethod::TradeIn), Some(ComplementMethod::PixCash), None);
        assert_eq!(quote.total, 1440.0);
        assert_eq!(quote.trade_in_credit, TRADE_IN_CREDIT);
    }

    #[test]
    fn test_no_method_fallback() {
        assert_eq!(final_price(1234.56, None, None, None).total, 1234.56);
    }

    #[test]
    fn test_rounding_to_centavos() {
        // 999.99 * 1.031 = 1030.98969
        assert_eq!(
            final_price(999.99, Some(PaymentMethod::Card), None, Some(1)).total,
            1030.99
        );
    }

    #[test]
    fn test_installment_table_shape() {
        let table = installment_table(1000.0);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), MAX_INSTALLMENTS as usize);
        assert_eq!(lines[0], "1x de R$ 1031.00 = R$ 1031.00");
        assert_eq!(lines[17], "18x de R$ 65.15 = R$ 1172.70");
    }
}
