//! Bulk ticket pricing.

use cosmwasm_std::{OverflowError, Uint128};

/// Total cost of `number_tickets` tickets with the volume discount applied.
///
/// The unit price shrinks to `price_ticket * (discount_divisor + 1 - n) / discount_divisor`
/// (floored) and is multiplied back by the ticket count. `n * (d + 1 - n)` peaks at
/// `n = (d + 1) / 2`, so the discount stops deepening there: larger batches pay the
/// peak unit price for every ticket and the total keeps growing with the count.
pub fn calculate_total_price_for_bulk_tickets(
    discount_divisor: u64,
    price_ticket: Uint128,
    number_tickets: u64,
) -> Result<Uint128, OverflowError> {
    if number_tickets <= 1 || discount_divisor == 0 {
        return price_ticket.checked_mul(Uint128::from(number_tickets));
    }
    let discounted = number_tickets.min(max_discounted_tickets(discount_divisor));
    let unit_price = price_ticket.multiply_ratio(discount_divisor - discounted + 1, discount_divisor);
    unit_price.checked_mul(Uint128::from(number_tickets))
}

/// Batch size at which the discount is deepest for `discount_divisor`.
pub fn max_discounted_tickets(discount_divisor: u64) -> u64 {
    (discount_divisor / 2 + discount_divisor % 2).max(1)
}
