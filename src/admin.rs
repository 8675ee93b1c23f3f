//! Owner-gated configuration.

use cosmwasm_std::{DepsMut, Env, MessageInfo, Response, Storage, Uint128};

use crate::brackets::MAX_LOTTERY_SIZE;
use crate::error::ContractError;
use crate::pricing::max_discounted_tickets;
use crate::state::{Config, CONFIG};
use crate::token::transfer_msg;

fn load_config_as_owner(
    storage: &dyn Storage,
    info: &MessageInfo,
) -> Result<Config, ContractError> {
    let config = CONFIG.load(storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized {});
    }
    Ok(config)
}

pub fn execute_set_min_and_max_ticket_price(
    deps: DepsMut,
    info: MessageInfo,
    min_price_ticket: Uint128,
    max_price_ticket: Uint128,
) -> Result<Response, ContractError> {
    let mut config = load_config_as_owner(deps.storage, &info)?;
    if min_price_ticket >= max_price_ticket {
        return Err(ContractError::InvalidPriceBounds {});
    }
    config.min_price_ticket = min_price_ticket;
    config.max_price_ticket = max_price_ticket;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "execute_set_min_and_max_ticket_price")
        .add_attribute("min_price_ticket", min_price_ticket)
        .add_attribute("max_price_ticket", max_price_ticket))
}

pub fn execute_set_max_number_tickets_per_buy(
    deps: DepsMut,
    info: MessageInfo,
    max_number_tickets_per_buy_or_claim: u32,
) -> Result<Response, ContractError> {
    let mut config = load_config_as_owner(deps.storage, &info)?;
    if max_number_tickets_per_buy_or_claim == 0
        || max_number_tickets_per_buy_or_claim as u64
            > max_discounted_tickets(config.min_discount_divisor)
    {
        return Err(ContractError::InvalidMaxTickets {});
    }
    config.max_number_tickets_per_buy_or_claim = max_number_tickets_per_buy_or_claim;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "execute_set_max_number_tickets_per_buy")
        .add_attribute(
            "max_number_tickets_per_buy_or_claim",
            max_number_tickets_per_buy_or_claim.to_string(),
        ))
}

pub fn execute_set_lottery_size(
    deps: DepsMut,
    info: MessageInfo,
    size: u32,
) -> Result<Response, ContractError> {
    let mut config = load_config_as_owner(deps.storage, &info)?;
    if size == config.lottery_size {
        return Err(ContractError::NoOpUpdate {});
    }
    if size == 0 || size > MAX_LOTTERY_SIZE {
        return Err(ContractError::InvalidLotterySize {});
    }
    config.lottery_size = size;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "execute_set_lottery_size")
        .add_attribute("lottery_size", size.to_string()))
}

#[allow(clippy::too_many_arguments)]
pub fn execute_set_lottery_limits(
    deps: DepsMut,
    info: MessageInfo,
    min_discount_divisor: Option<u64>,
    max_treasury_fee: Option<u32>,
    max_charity_fee: Option<u32>,
    max_burn_fee: Option<u32>,
    min_length_lottery: Option<u64>,
    max_length_lottery: Option<u64>,
) -> Result<Response, ContractError> {
    let mut config = load_config_as_owner(deps.storage, &info)?;
    config.min_discount_divisor = min_discount_divisor.unwrap_or(config.min_discount_divisor);
    config.max_treasury_fee = max_treasury_fee.unwrap_or(config.max_treasury_fee);
    config.max_charity_fee = max_charity_fee.unwrap_or(config.max_charity_fee);
    config.max_burn_fee = max_burn_fee.unwrap_or(config.max_burn_fee);
    config.min_length_lottery = min_length_lottery.unwrap_or(config.min_length_lottery);
    config.max_length_lottery = max_length_lottery.unwrap_or(config.max_length_lottery);

    // every allowed batch must stay on the rising side of the discount curve
    if config.min_discount_divisor == 0
        || config.max_number_tickets_per_buy_or_claim as u64
            > max_discounted_tickets(config.min_discount_divisor)
    {
        return Err(ContractError::InvalidDivisor {});
    }
    if config.min_length_lottery >= config.max_length_lottery {
        return Err(ContractError::InvalidTimestamp {});
    }
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "execute_set_lottery_limits")
        .add_attribute("min_discount_divisor", config.min_discount_divisor.to_string())
        .add_attribute("max_treasury_fee", config.max_treasury_fee.to_string())
        .add_attribute("max_charity_fee", config.max_charity_fee.to_string())
        .add_attribute("max_burn_fee", config.max_burn_fee.to_string())
        .add_attribute("min_length_lottery", config.min_length_lottery.to_string())
        .add_attribute("max_length_lottery", config.max_length_lottery.to_string()))
}

pub fn execute_set_role_addresses(
    deps: DepsMut,
    info: MessageInfo,
    operator: String,
    treasury: String,
    charity: String,
    injector: String,
) -> Result<Response, ContractError> {
    let mut config = load_config_as_owner(deps.storage, &info)?;
    config.operator = deps.api.addr_validate(&operator)?;
    config.treasury = deps.api.addr_validate(&treasury)?;
    config.charity = deps.api.addr_validate(&charity)?;
    config.injector = deps.api.addr_validate(&injector)?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "execute_set_role_addresses")
        .add_attribute("operator", operator)
        .add_attribute("treasury", treasury)
        .add_attribute("charity", charity)
        .add_attribute("injector", injector))
}

pub fn execute_set_randomness_provider(
    deps: DepsMut,
    info: MessageInfo,
    randomness_provider: String,
) -> Result<Response, ContractError> {
    let mut config = load_config_as_owner(deps.storage, &info)?;
    config.randomness_provider = deps.api.addr_validate(&randomness_provider)?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "execute_set_randomness_provider")
        .add_attribute("randomness_provider", randomness_provider))
}

pub fn execute_transfer_ownership(
    deps: DepsMut,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    let mut config = load_config_as_owner(deps.storage, &info)?;
    config.owner = deps.api.addr_validate(&new_owner)?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "execute_transfer_ownership")
        .add_attribute("owner", new_owner))
}

/// Sends back CW20 tokens sent here by mistake. The lottery token itself backs
/// prize pools and can never be withdrawn this way.
pub fn execute_recover_wrong_tokens(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    token: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = load_config_as_owner(deps.storage, &info)?;
    let token = deps.api.addr_validate(&token)?;
    if token == config.token {
        return Err(ContractError::InvalidRecoverToken {});
    }

    Ok(Response::new()
        .add_message(transfer_msg(&token, &info.sender, amount)?)
        .add_attribute("method", "execute_recover_wrong_tokens")
        .add_attribute("token", token)
        .add_attribute("amount", amount))
}
