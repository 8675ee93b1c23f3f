//! Ticket purchase and prize settlement.

use std::collections::BTreeSet;

use cosmwasm_std::{ensure, DepsMut, Env, MessageInfo, Response, Uint128};

use crate::brackets::{is_valid_ticket_number, match_bracket};
use crate::error::ContractError;
use crate::pricing::calculate_total_price_for_bulk_tickets;
use crate::state::{
    mint_tickets, Lottery, LotteryStatus, BASIS_POINTS, CONFIG, CURRENT_TICKET_ID, LOTTERIES,
    TICKETS,
};
use crate::token::{burn_msg, ensure_can_pull, transfer_from_msg, transfer_msg};

/// Prize one winning ticket of `bracket` receives; the division remainder stays in the contract.
pub fn reward_per_ticket(lottery: &Lottery, bracket: u32) -> Uint128 {
    let bracket = bracket as usize;
    match (
        lottery.pool_per_bracket.get(bracket),
        lottery.count_winners_per_bracket.get(bracket),
    ) {
        (Some(pool), Some(count)) if *count > 0 => {
            pool.checked_div(Uint128::from(*count)).unwrap_or_default()
        }
        _ => Uint128::zero(),
    }
}

pub fn execute_buy_tickets(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    lottery_id: u64,
    numbers: Vec<u32>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut lottery = LOTTERIES.load(deps.storage, lottery_id)?;
    ensure!(
        lottery.status == LotteryStatus::Open,
        ContractError::LotteryNotOpen {}
    );
    ensure!(
        env.block.time.seconds() < lottery.end_time,
        ContractError::LotteryOver {}
    );
    ensure!(
        !numbers.is_empty() && numbers.len() <= config.max_number_tickets_per_buy_or_claim as usize,
        ContractError::TooManyTickets {}
    );
    if let Some(number) = numbers
        .iter()
        .find(|number| !is_valid_ticket_number(**number, lottery.size))
    {
        return Err(ContractError::OutsideRange { number: *number });
    }

    let cost = calculate_total_price_for_bulk_tickets(
        lottery.discount_divisor,
        lottery.price_ticket,
        numbers.len() as u64,
    )?;
    let contract = env.contract.address;
    ensure_can_pull(deps.as_ref(), &config.token, &info.sender, &contract, cost)?;

    let first_ticket_id = CURRENT_TICKET_ID.load(deps.storage)?;
    mint_tickets(deps.storage, lottery_id, lottery.size, &info.sender, &numbers)?;
    lottery.amount_collected = lottery.amount_collected.checked_add(cost)?;
    lottery.first_ticket_id_next_lottery = first_ticket_id + numbers.len() as u64;
    LOTTERIES.save(deps.storage, lottery_id, &lottery)?;

    // fees leave as soon as they are paid, the remainder funds the brackets
    let burn = cost.multiply_ratio(lottery.burn_fee, BASIS_POINTS);
    let treasury = cost.multiply_ratio(lottery.treasury_fee, BASIS_POINTS);
    let charity = cost.multiply_ratio(lottery.charity_fee, BASIS_POINTS);

    let mut msgs = vec![transfer_from_msg(&config.token, &info.sender, &contract, cost)?];
    if !burn.is_zero() {
        msgs.push(burn_msg(&config.token, burn)?);
    }
    if !treasury.is_zero() {
        msgs.push(transfer_msg(&config.token, &config.treasury, treasury)?);
    }
    if !charity.is_zero() {
        msgs.push(transfer_msg(&config.token, &config.charity, charity)?);
    }

    Ok(Response::new()
        .add_messages(msgs)
        .add_attribute("method", "execute_buy_tickets")
        .add_attribute("lottery_id", lottery_id.to_string())
        .add_attribute("buyer", info.sender)
        .add_attribute("number_tickets", numbers.len().to_string())
        .add_attribute("first_ticket_id", first_ticket_id.to_string())
        .add_attribute("cost", cost))
}

/// Validates every (ticket, bracket) pair before writing anything, so one bad
/// entry rejects the whole batch.
pub fn execute_claim_tickets(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    lottery_id: u64,
    ticket_ids: Vec<u64>,
    brackets: Vec<u32>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if ticket_ids.len() != brackets.len() {
        return Err(ContractError::LengthMismatch {});
    }
    if ticket_ids.is_empty() {
        return Err(ContractError::NoTicketsSpecified {});
    }
    if ticket_ids.len() > config.max_number_tickets_per_buy_or_claim as usize {
        return Err(ContractError::TooManyTickets {});
    }

    let lottery = LOTTERIES.load(deps.storage, lottery_id)?;
    let final_number = match (&lottery.status, lottery.final_number) {
        (LotteryStatus::Claimable, Some(final_number)) => final_number,
        _ => return Err(ContractError::LotteryNotClaimable {}),
    };

    let mut seen = BTreeSet::new();
    let mut staged = Vec::with_capacity(ticket_ids.len());
    let mut reward = Uint128::zero();
    for (ticket_id, bracket) in ticket_ids.into_iter().zip(brackets) {
        let mut ticket = TICKETS
            .may_load(deps.storage, ticket_id)?
            .filter(|ticket| ticket.lottery_id == lottery_id)
            .ok_or(ContractError::WrongLottery { ticket_id })?;
        if ticket.owner != info.sender {
            return Err(ContractError::NotOwner { ticket_id });
        }
        if ticket.claimed || !seen.insert(ticket_id) {
            return Err(ContractError::AlreadyClaimed { ticket_id });
        }
        if match_bracket(ticket.number, final_number, lottery.size) != Some(bracket) {
            return Err(ContractError::NoPrizeForBracket { ticket_id, bracket });
        }

        reward = reward.checked_add(reward_per_ticket(&lottery, bracket))?;
        ticket.claimed = true;
        staged.push(ticket);
    }

    let claimed = staged.len();
    for ticket in staged {
        TICKETS.save(deps.storage, ticket.id, &ticket)?;
    }

    let mut res = Response::new()
        .add_attribute("method", "execute_claim_tickets")
        .add_attribute("lottery_id", lottery_id.to_string())
        .add_attribute("claimer", info.sender.to_string())
        .add_attribute("number_tickets", claimed.to_string())
        .add_attribute("reward", reward);
    if !reward.is_zero() {
        res = res.add_message(transfer_msg(&config.token, &info.sender, reward)?);
    }
    Ok(res)
}
