use cosmwasm_std::{Deps, Order, StdResult, Uint128};
use cw_storage_plus::Bound;

use crate::brackets::match_bracket;
use crate::claim::reward_per_ticket;
use crate::msg::{
    CurrentLotteryIdResponse, LatestRequestIdResponse, RandomResultResponse, RewardsResponse,
    TotalPriceResponse, UserInfoResponse,
};
use crate::pricing::calculate_total_price_for_bulk_tickets;
use crate::state::{
    Config, Lottery, LotteryStatus, Ticket, CONFIG, CURRENT_LOTTERY_ID, LOTTERIES,
    RANDOMNESS_REQUESTS, RANDOMNESS_REQUEST_SEQ, TICKETS, USER_TICKETS,
};

// Limits for pagination
const MAX_LIMIT: u32 = 30;
const DEFAULT_LIMIT: u32 = 10;

pub fn query_config(deps: Deps) -> StdResult<Config> {
    CONFIG.load(deps.storage)
}

pub fn query_lottery(deps: Deps, lottery_id: u64) -> StdResult<Lottery> {
    LOTTERIES.load(deps.storage, lottery_id)
}

pub fn query_current_lottery_id(deps: Deps) -> StdResult<CurrentLotteryIdResponse> {
    Ok(CurrentLotteryIdResponse {
        lottery_id: CURRENT_LOTTERY_ID.load(deps.storage)?,
    })
}

pub fn query_ticket(deps: Deps, ticket_id: u64) -> StdResult<Ticket> {
    TICKETS.load(deps.storage, ticket_id)
}

pub fn query_user_info_for_lottery(
    deps: Deps,
    user: String,
    lottery_id: u64,
    cursor: Option<u64>,
    size: Option<u32>,
) -> StdResult<UserInfoResponse> {
    let user = deps.api.addr_validate(&user)?;
    let limit = size.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = cursor.map(Bound::exclusive);

    let owned = USER_TICKETS
        .prefix((&user, lottery_id))
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .collect::<StdResult<Vec<(u64, u32)>>>()?;

    let mut response = UserInfoResponse {
        ticket_ids: vec![],
        numbers: vec![],
        claimed: vec![],
        cursor: owned.last().map(|(ticket_id, _)| *ticket_id),
    };
    for (ticket_id, number) in owned {
        let ticket = TICKETS.load(deps.storage, ticket_id)?;
        response.ticket_ids.push(ticket_id);
        response.numbers.push(number);
        response.claimed.push(ticket.claimed);
    }
    Ok(response)
}

pub fn query_total_price_for_bulk_tickets(
    discount_divisor: u64,
    price_ticket: Uint128,
    number_tickets: u64,
) -> StdResult<TotalPriceResponse> {
    let amount =
        calculate_total_price_for_bulk_tickets(discount_divisor, price_ticket, number_tickets)?;
    Ok(TotalPriceResponse { amount })
}

/// Reward a ticket would receive for `bracket`; zero unless the lottery is
/// claimable, the ticket is unclaimed and it wins exactly that bracket.
pub fn query_rewards_for_ticket(
    deps: Deps,
    lottery_id: u64,
    ticket_id: u64,
    bracket: u32,
) -> StdResult<RewardsResponse> {
    let lottery = LOTTERIES.load(deps.storage, lottery_id)?;
    let ticket = TICKETS.may_load(deps.storage, ticket_id)?;
    let amount = match (&lottery.status, lottery.final_number, ticket) {
        (&LotteryStatus::Claimable, Some(final_number), Some(ticket))
            if ticket.lottery_id == lottery_id
                && !ticket.claimed
                && match_bracket(ticket.number, final_number, lottery.size) == Some(bracket) =>
        {
            reward_per_ticket(&lottery, bracket)
        }
        _ => Uint128::zero(),
    };
    Ok(RewardsResponse { amount })
}

pub fn query_latest_request_id(deps: Deps) -> StdResult<LatestRequestIdResponse> {
    Ok(LatestRequestIdResponse {
        request_id: RANDOMNESS_REQUEST_SEQ.load(deps.storage)?,
    })
}

/// Defaults to the latest request when `request_id` is omitted.
pub fn query_random_result(deps: Deps, request_id: Option<u64>) -> StdResult<RandomResultResponse> {
    let request_id = match request_id {
        Some(id) => id,
        None => RANDOMNESS_REQUEST_SEQ.load(deps.storage)?,
    };
    let request = RANDOMNESS_REQUESTS.load(deps.storage, request_id)?;
    Ok(RandomResultResponse {
        request_id,
        lottery_id: request.lottery_id,
        random_value: request.random_value,
    })
}
