//! Ticket numbering and bracket matching.
//!
//! A lottery of size `s` uses numbers in `[10^s, 2 * 10^s)`: a leading `1`
//! followed by the `s` playable digits. Bracket `i` means exactly `i + 1`
//! trailing digits match the winning number, so the full match is bracket `s - 1`.

use cosmwasm_std::Uint256;

/// Largest size for which ticket numbers still fit in a `u32`.
pub const MAX_LOTTERY_SIZE: u32 = 9;

pub(crate) fn pow10(exp: u32) -> u32 {
    10u32.pow(exp)
}

/// Returns whether `number` has exactly `size` playable digits after the leading `1`.
pub fn is_valid_ticket_number(number: u32, size: u32) -> bool {
    let base = pow10(size);
    number >= base && number - base < base
}

/// Highest bracket `number` wins against `winning_number`, or `None` if even the
/// last digit differs. Only the longest matching suffix counts.
pub fn match_bracket(number: u32, winning_number: u32, size: u32) -> Option<u32> {
    (0..size).find_map(|j| {
        let divisor = pow10(size - j);
        (number % divisor == winning_number % divisor).then(|| size - 1 - j)
    })
}

/// Maps a raw random value onto a winning number of `size` digits.
pub fn final_number_from_random(random_value: Uint256, size: u32) -> u32 {
    let modulus = Uint256::from(pow10(size) as u128);
    let remainder = random_value
        .checked_rem(modulus)
        .unwrap_or_else(|_| Uint256::zero());
    let bytes = remainder.to_be_bytes();
    let mut low = [0u8; 4];
    low.copy_from_slice(&bytes[28..]);
    pow10(size) + u32::from_be_bytes(low)
}
