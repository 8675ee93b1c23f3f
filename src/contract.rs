#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{to_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult, Uint128};
use cw2::set_contract_version;

use crate::admin::{
    execute_recover_wrong_tokens, execute_set_lottery_limits, execute_set_lottery_size,
    execute_set_max_number_tickets_per_buy, execute_set_min_and_max_ticket_price,
    execute_set_randomness_provider, execute_set_role_addresses, execute_transfer_ownership,
};
use crate::brackets::MAX_LOTTERY_SIZE;
use crate::claim::{execute_buy_tickets, execute_claim_tickets};
use crate::error::ContractError;
use crate::lottery::{
    execute_close_lottery, execute_draw_final_number_and_make_claimable, execute_inject_funds,
    execute_start_lottery,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::pricing::max_discounted_tickets;
use crate::query::{
    query_config, query_current_lottery_id, query_latest_request_id, query_lottery,
    query_random_result, query_rewards_for_ticket, query_ticket,
    query_total_price_for_bulk_tickets, query_user_info_for_lottery,
};
use crate::randomness::execute_fulfill_randomness;
use crate::state::{
    Config, CONFIG, CURRENT_LOTTERY_ID, CURRENT_TICKET_ID, PENDING_INJECTION,
    RANDOMNESS_REQUEST_SEQ,
};

// version info for migration
const CONTRACT_NAME: &str = "crates.io:bracket_lottery";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

// defaults, amounts in 18-decimal token units
const DEFAULT_MIN_PRICE_TICKET: u128 = 5_000_000_000_000_000; // 0.005
const DEFAULT_MAX_PRICE_TICKET: u128 = 50_000_000_000_000_000_000; // 50
const DEFAULT_MAX_NUMBER_TICKETS: u32 = 100;
const DEFAULT_LOTTERY_SIZE: u32 = 6;
const MIN_DISCOUNT_DIVISOR: u64 = 300;
const MAX_TREASURY_FEE: u32 = 3000; // 30%
const MAX_CHARITY_FEE: u32 = 3000;
const MAX_BURN_FEE: u32 = 3000;
const MIN_LENGTH_LOTTERY: u64 = 4 * 3600 - 300; // 4 hours minus 5 minutes
const MAX_LENGTH_LOTTERY: u64 = 4 * 86_400 + 300; // 4 days plus 5 minutes

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let owner = match msg.owner {
        Some(owner) => deps.api.addr_validate(&owner)?,
        None => info.sender,
    };
    // unset roles fall back to the owner
    let role = |addr: Option<String>| match addr {
        Some(addr) => deps.api.addr_validate(&addr),
        None => Ok(owner.clone()),
    };

    let config = Config {
        owner: owner.clone(),
        operator: role(msg.operator)?,
        treasury: role(msg.treasury)?,
        charity: role(msg.charity)?,
        injector: role(msg.injector)?,
        randomness_provider: deps.api.addr_validate(&msg.randomness_provider)?,
        token: deps.api.addr_validate(&msg.token)?,
        min_price_ticket: msg
            .min_price_ticket
            .unwrap_or_else(|| Uint128::new(DEFAULT_MIN_PRICE_TICKET)),
        max_price_ticket: msg
            .max_price_ticket
            .unwrap_or_else(|| Uint128::new(DEFAULT_MAX_PRICE_TICKET)),
        max_number_tickets_per_buy_or_claim: msg
            .max_number_tickets_per_buy_or_claim
            .unwrap_or(DEFAULT_MAX_NUMBER_TICKETS),
        lottery_size: msg.lottery_size.unwrap_or(DEFAULT_LOTTERY_SIZE),
        min_discount_divisor: MIN_DISCOUNT_DIVISOR,
        max_treasury_fee: MAX_TREASURY_FEE,
        max_charity_fee: MAX_CHARITY_FEE,
        max_burn_fee: MAX_BURN_FEE,
        min_length_lottery: MIN_LENGTH_LOTTERY,
        max_length_lottery: MAX_LENGTH_LOTTERY,
    };

    if config.lottery_size == 0 || config.lottery_size > MAX_LOTTERY_SIZE {
        return Err(ContractError::InvalidLotterySize {});
    }
    if config.min_price_ticket >= config.max_price_ticket {
        return Err(ContractError::InvalidPriceBounds {});
    }
    if config.max_number_tickets_per_buy_or_claim == 0
        || config.max_number_tickets_per_buy_or_claim as u64
            > max_discounted_tickets(config.min_discount_divisor)
    {
        return Err(ContractError::InvalidMaxTickets {});
    }

    CONFIG.save(deps.storage, &config)?;
    CURRENT_LOTTERY_ID.save(deps.storage, &0u64)?;
    CURRENT_TICKET_ID.save(deps.storage, &0u64)?;
    PENDING_INJECTION.save(deps.storage, &Uint128::zero())?;
    RANDOMNESS_REQUEST_SEQ.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", owner)
        .add_attribute("token", config.token))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::StartLottery {
            end_time,
            price_ticket,
            discount_divisor,
            rewards_breakdown,
            burn_fee,
            treasury_fee,
            charity_fee,
        } => execute_start_lottery(
            deps,
            env,
            info,
            end_time,
            price_ticket,
            discount_divisor,
            rewards_breakdown,
            burn_fee,
            treasury_fee,
            charity_fee,
        ),
        ExecuteMsg::CloseLottery { lottery_id } => {
            execute_close_lottery(deps, env, info, lottery_id)
        }
        ExecuteMsg::DrawFinalNumberAndMakeClaimable {
            lottery_id,
            inject_funds,
        } => execute_draw_final_number_and_make_claimable(deps, env, info, lottery_id, inject_funds),
        ExecuteMsg::FulfillRandomness {
            request_id,
            random_value,
        } => execute_fulfill_randomness(deps, env, info, request_id, random_value),
        ExecuteMsg::BuyTickets {
            lottery_id,
            numbers,
        } => execute_buy_tickets(deps, env, info, lottery_id, numbers),
        ExecuteMsg::ClaimTickets {
            lottery_id,
            ticket_ids,
            brackets,
        } => execute_claim_tickets(deps, env, info, lottery_id, ticket_ids, brackets),
        ExecuteMsg::InjectFunds { lottery_id, amount } => {
            execute_inject_funds(deps, env, info, lottery_id, amount)
        }
        ExecuteMsg::SetMinAndMaxTicketPrice {
            min_price_ticket,
            max_price_ticket,
        } => execute_set_min_and_max_ticket_price(deps, info, min_price_ticket, max_price_ticket),
        ExecuteMsg::SetMaxNumberTicketsPerBuy {
            max_number_tickets_per_buy_or_claim,
        } => execute_set_max_number_tickets_per_buy(deps, info, max_number_tickets_per_buy_or_claim),
        ExecuteMsg::SetLotterySize { size } => execute_set_lottery_size(deps, info, size),
        ExecuteMsg::SetLotteryLimits {
            min_discount_divisor,
            max_treasury_fee,
            max_charity_fee,
            max_burn_fee,
            min_length_lottery,
            max_length_lottery,
        } => execute_set_lottery_limits(
            deps,
            info,
            min_discount_divisor,
            max_treasury_fee,
            max_charity_fee,
            max_burn_fee,
            min_length_lottery,
            max_length_lottery,
        ),
        ExecuteMsg::SetOperatorAndTreasuryAndCharityAndInjectorAddresses {
            operator,
            treasury,
            charity,
            injector,
        } => execute_set_role_addresses(deps, info, operator, treasury, charity, injector),
        ExecuteMsg::SetRandomnessProvider {
            randomness_provider,
        } => execute_set_randomness_provider(deps, info, randomness_provider),
        ExecuteMsg::TransferOwnership { new_owner } => {
            execute_transfer_ownership(deps, info, new_owner)
        }
        ExecuteMsg::RecoverWrongTokens { token, amount } => {
            execute_recover_wrong_tokens(deps, env, info, token, amount)
        }
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::QueryConfig {} => to_binary(&query_config(deps)?),
        QueryMsg::QueryLottery { lottery_id } => to_binary(&query_lottery(deps, lottery_id)?),
        QueryMsg::QueryCurrentLotteryId {} => to_binary(&query_current_lottery_id(deps)?),
        QueryMsg::QueryTicket { ticket_id } => to_binary(&query_ticket(deps, ticket_id)?),
        QueryMsg::QueryUserInfoForLottery {
            user,
            lottery_id,
            cursor,
            size,
        } => to_binary(&query_user_info_for_lottery(
            deps, user, lottery_id, cursor, size,
        )?),
        QueryMsg::QueryTotalPriceForBulkTickets {
            discount_divisor,
            price_ticket,
            number_tickets,
        } => to_binary(&query_total_price_for_bulk_tickets(
            discount_divisor,
            price_ticket,
            number_tickets,
        )?),
        QueryMsg::QueryRewardsForTicket {
            lottery_id,
            ticket_id,
            bracket,
        } => to_binary(&query_rewards_for_ticket(
            deps, lottery_id, ticket_id, bracket,
        )?),
        QueryMsg::QueryLatestRequestId {} => to_binary(&query_latest_request_id(deps)?),
        QueryMsg::QueryRandomResult { request_id } => {
            to_binary(&query_random_result(deps, request_id)?)
        }
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new()
        .add_attribute("method", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
