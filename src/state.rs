use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, StdResult, Storage, Uint128, Uint256};
use cw_storage_plus::{Item, Map};

use crate::brackets::pow10;

/// Denominator of every basis-point value (rewards breakdown and fees).
pub const BASIS_POINTS: u32 = 10_000;

#[cw_serde]
pub struct Config {
    pub owner: Addr,
    pub operator: Addr,
    pub treasury: Addr,
    pub charity: Addr,
    pub injector: Addr,
    /// Only address allowed to deliver random values.
    pub randomness_provider: Addr,
    /// CW20 token tickets are paid and prizes are claimed in.
    pub token: Addr,
    pub min_price_ticket: Uint128,
    pub max_price_ticket: Uint128,
    pub max_number_tickets_per_buy_or_claim: u32,
    /// Number of digits of the next lottery started.
    pub lottery_size: u32,
    pub min_discount_divisor: u64,
    pub max_treasury_fee: u32,
    pub max_charity_fee: u32,
    pub max_burn_fee: u32,
    /// Lottery length bounds, in seconds.
    pub min_length_lottery: u64,
    pub max_length_lottery: u64,
}

#[cw_serde]
pub enum LotteryStatus {
    Open,
    Closed,
    Claimable,
}

#[cw_serde]
pub struct Lottery {
    pub id: u64,
    pub status: LotteryStatus,
    pub start_time: u64,
    pub end_time: u64,
    pub price_ticket: Uint128,
    pub discount_divisor: u64,
    /// Digit count snapshot taken when the lottery started.
    pub size: u32,
    /// Basis points per bracket, bracket `i` paying `i + 1` matching trailing digits.
    pub rewards_breakdown: Vec<u32>,
    pub burn_fee: u32,
    pub treasury_fee: u32,
    pub charity_fee: u32,
    pub first_ticket_id: u64,
    pub first_ticket_id_next_lottery: u64,
    pub amount_collected: Uint128,
    pub injected_amount: Uint128,
    /// Unwon or deferred funds handed to the next lottery at draw time.
    pub amount_rolled_over: Uint128,
    pub final_number: Option<u32>,
    pub randomness_request_id: Option<u64>,
    pub count_winners_per_bracket: Vec<u64>,
    pub pool_per_bracket: Vec<Uint128>,
}

impl Lottery {
    pub fn ticket_count(&self) -> u64 {
        self.first_ticket_id_next_lottery - self.first_ticket_id
    }
}

#[cw_serde]
pub struct Ticket {
    pub id: u64,
    pub lottery_id: u64,
    pub owner: Addr,
    pub number: u32,
    pub claimed: bool,
}

#[cw_serde]
pub struct RandomnessRequest {
    pub id: u64,
    pub lottery_id: u64,
    pub requested_at: u64,
    pub random_value: Option<Uint256>,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// Id of the latest lottery started, 0 before the first one.
pub const CURRENT_LOTTERY_ID: Item<u64> = Item::new("current_lottery_id");
/// Id the next minted ticket receives.
pub const CURRENT_TICKET_ID: Item<u64> = Item::new("current_ticket_id");
/// Funds waiting to be seeded into the next lottery's prize pools.
pub const PENDING_INJECTION: Item<Uint128> = Item::new("pending_injection");

pub const LOTTERIES: Map<u64, Lottery> = Map::new("lotteries");
pub const TICKETS: Map<u64, Ticket> = Map::new("tickets");
/// (lottery_id, suffix length, trailing digits) -> tickets ending in those digits.
/// Every ticket bumps one counter per suffix length from 1 to the lottery size.
pub const LOTTERY_SUFFIX_COUNTS: Map<(u64, u32, u32), u64> = Map::new("lottery_suffix_counts");
/// (owner, lottery_id, ticket_id) -> ticket number.
pub const USER_TICKETS: Map<(&Addr, u64, u64), u32> = Map::new("user_tickets");

pub const RANDOMNESS_REQUEST_SEQ: Item<u64> = Item::new("randomness_request_seq");
pub const RANDOMNESS_REQUESTS: Map<u64, RandomnessRequest> = Map::new("randomness_requests");

pub fn next_lottery_id(storage: &mut dyn Storage) -> StdResult<u64> {
    CURRENT_LOTTERY_ID.update(storage, |id| -> StdResult<_> { Ok(id + 1) })
}

/// Stores one ticket per number, indexes it by owner and counts its suffixes
/// for the draw. Returns the ids minted, in the order of `numbers`.
pub fn mint_tickets(
    storage: &mut dyn Storage,
    lottery_id: u64,
    size: u32,
    owner: &Addr,
    numbers: &[u32],
) -> StdResult<Vec<u64>> {
    let first_id = CURRENT_TICKET_ID.load(storage)?;
    let mut ids = Vec::with_capacity(numbers.len());
    for (offset, number) in numbers.iter().enumerate() {
        let id = first_id + offset as u64;
        let ticket = Ticket {
            id,
            lottery_id,
            owner: owner.clone(),
            number: *number,
            claimed: false,
        };
        TICKETS.save(storage, id, &ticket)?;
        USER_TICKETS.save(storage, (owner, lottery_id, id), number)?;
        for len in 1..=size {
            let key = (lottery_id, len, number % pow10(len));
            LOTTERY_SUFFIX_COUNTS.update(storage, key, |count| -> StdResult<_> {
                Ok(count.unwrap_or_default() + 1)
            })?;
        }
        ids.push(id);
    }
    CURRENT_TICKET_ID.save(storage, &(first_id + numbers.len() as u64))?;

    Ok(ids)
}

/// Winners per bracket for `final_number`, read from the suffix counters.
/// A ticket matching `k` trailing digits also matches every shorter suffix,
/// so bracket `k - 1` holds the tickets matching `k` digits but not `k + 1`.
pub fn count_winners_per_bracket(
    storage: &dyn Storage,
    lottery_id: u64,
    size: u32,
    final_number: u32,
) -> StdResult<Vec<u64>> {
    let mut matching = Vec::with_capacity(size as usize + 1);
    for len in 1..=size {
        let key = (lottery_id, len, final_number % pow10(len));
        matching.push(LOTTERY_SUFFIX_COUNTS.may_load(storage, key)?.unwrap_or_default());
    }
    matching.push(0);
    Ok(matching.windows(2).map(|pair| pair[0] - pair[1]).collect())
}
