//! Money rendering.

use rust_decimal::{Decimal, RoundingStrategy};

/// Render an amount with exactly two fraction digits, e.g. `"210.00"`.
/// Half-cent midpoints round away from zero.
pub(crate) fn format_money(amount: Decimal) -> String {
    let mut amount = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    amount.rescale(2);

    amount.to_string()
}
