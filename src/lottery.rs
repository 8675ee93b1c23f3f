//! Lottery lifecycle: Open -> Closed -> Claimable.

use cosmwasm_std::{ensure, DepsMut, Env, MessageInfo, Response, Uint128};

use crate::brackets::final_number_from_random;
use crate::error::ContractError;
use crate::randomness::{random_result, request_random_number};
use crate::state::{
    count_winners_per_bracket, next_lottery_id, Config, Lottery, LotteryStatus, BASIS_POINTS,
    CONFIG, CURRENT_LOTTERY_ID, CURRENT_TICKET_ID, LOTTERIES, PENDING_INJECTION,
};
use crate::token::{ensure_can_pull, transfer_from_msg};

fn ensure_operator(config: &Config, info: &MessageInfo) -> Result<(), ContractError> {
    if info.sender != config.operator {
        return Err(ContractError::Unauthorized {});
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn execute_start_lottery(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    end_time: u64,
    price_ticket: Uint128,
    discount_divisor: u64,
    rewards_breakdown: Vec<u32>,
    burn_fee: u32,
    treasury_fee: u32,
    charity_fee: u32,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_operator(&config, &info)?;

    let current_id = CURRENT_LOTTERY_ID.load(deps.storage)?;
    if current_id != 0 {
        let previous = LOTTERIES.load(deps.storage, current_id)?;
        if previous.status != LotteryStatus::Claimable {
            return Err(ContractError::PreviousLotteryNotFinished {});
        }
    }

    let total_bp: u64 = rewards_breakdown.iter().map(|bp| *bp as u64).sum::<u64>()
        + burn_fee as u64
        + treasury_fee as u64
        + charity_fee as u64;
    if rewards_breakdown.len() != config.lottery_size as usize || total_bp != BASIS_POINTS as u64
    {
        return Err(ContractError::InvalidRewardsBreakdown {});
    }
    if price_ticket < config.min_price_ticket || price_ticket > config.max_price_ticket {
        return Err(ContractError::InvalidCost {});
    }
    let now = env.block.time.seconds();
    match end_time.checked_sub(now) {
        Some(length)
            if length > config.min_length_lottery && length < config.max_length_lottery => {}
        _ => return Err(ContractError::InvalidTimestamp {}),
    }
    if discount_divisor < config.min_discount_divisor {
        return Err(ContractError::InvalidDivisor {});
    }
    if charity_fee > config.max_charity_fee {
        return Err(ContractError::InvalidCharity {});
    }
    if treasury_fee > config.max_treasury_fee {
        return Err(ContractError::InvalidTreasury {});
    }
    if burn_fee > config.max_burn_fee {
        return Err(ContractError::InvalidBurn {});
    }

    let id = next_lottery_id(deps.storage)?;
    let first_ticket_id = CURRENT_TICKET_ID.load(deps.storage)?;
    let injected_amount = PENDING_INJECTION.load(deps.storage)?;
    PENDING_INJECTION.save(deps.storage, &Uint128::zero())?;

    let size = config.lottery_size as usize;
    let lottery = Lottery {
        id,
        status: LotteryStatus::Open,
        start_time: now,
        end_time,
        price_ticket,
        discount_divisor,
        size: config.lottery_size,
        rewards_breakdown,
        burn_fee,
        treasury_fee,
        charity_fee,
        first_ticket_id,
        first_ticket_id_next_lottery: first_ticket_id,
        amount_collected: Uint128::zero(),
        injected_amount,
        amount_rolled_over: Uint128::zero(),
        final_number: None,
        randomness_request_id: None,
        count_winners_per_bracket: vec![0; size],
        pool_per_bracket: vec![Uint128::zero(); size],
    };
    LOTTERIES.save(deps.storage, id, &lottery)?;

    Ok(Response::new()
        .add_attribute("method", "execute_start_lottery")
        .add_attribute("lottery_id", id.to_string())
        .add_attribute("start_time", now.to_string())
        .add_attribute("end_time", end_time.to_string())
        .add_attribute("price_ticket", price_ticket)
        .add_attribute("first_ticket_id", first_ticket_id.to_string())
        .add_attribute("injected_amount", injected_amount))
}

pub fn execute_close_lottery(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    lottery_id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_operator(&config, &info)?;

    let mut lottery = LOTTERIES.load(deps.storage, lottery_id)?;
    ensure!(
        lottery.status == LotteryStatus::Open,
        ContractError::AlreadyClosed {}
    );
    let now = env.block.time.seconds();
    ensure!(now >= lottery.end_time, ContractError::NotYetEnded {});

    let request_id = request_random_number(deps.storage, lottery_id, now)?;
    lottery.status = LotteryStatus::Closed;
    lottery.randomness_request_id = Some(request_id);
    LOTTERIES.save(deps.storage, lottery_id, &lottery)?;

    Ok(Response::new()
        .add_attribute("method", "execute_close_lottery")
        .add_attribute("lottery_id", lottery_id.to_string())
        .add_attribute("first_ticket_id_next_lottery", lottery.first_ticket_id_next_lottery.to_string())
        .add_attribute("randomness_request_id", request_id.to_string()))
}

pub fn execute_draw_final_number_and_make_claimable(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    lottery_id: u64,
    inject_funds: bool,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_operator(&config, &info)?;

    let mut lottery = LOTTERIES.load(deps.storage, lottery_id)?;
    if lottery.status != LotteryStatus::Closed {
        return Err(ContractError::NotClosed {});
    }
    let request_id = lottery
        .randomness_request_id
        .ok_or(ContractError::NotClosed {})?;
    let random_value = random_result(deps.storage, request_id)?;
    let final_number = final_number_from_random(random_value, lottery.size);

    let counts = count_winners_per_bracket(deps.storage, lottery_id, lottery.size, final_number)?;

    let rewards_total: u32 = lottery.rewards_breakdown.iter().sum();
    let (injection, deferred) = if inject_funds && rewards_total > 0 {
        (lottery.injected_amount, Uint128::zero())
    } else {
        (Uint128::zero(), lottery.injected_amount)
    };

    let mut rolled_over = deferred;
    let mut pools = Vec::with_capacity(counts.len());
    for (bracket, reward_bp) in lottery.rewards_breakdown.iter().enumerate() {
        let mut pool = lottery
            .amount_collected
            .multiply_ratio(*reward_bp, BASIS_POINTS);
        if !injection.is_zero() {
            pool = pool.checked_add(injection.multiply_ratio(*reward_bp, rewards_total))?;
        }
        if counts[bracket] == 0 {
            rolled_over = rolled_over.checked_add(pool)?;
        }
        pools.push(pool);
    }

    PENDING_INJECTION.update(deps.storage, |pending| -> Result<_, ContractError> {
        Ok(pending.checked_add(rolled_over)?)
    })?;

    lottery.status = LotteryStatus::Claimable;
    lottery.final_number = Some(final_number);
    lottery.count_winners_per_bracket = counts;
    lottery.pool_per_bracket = pools;
    lottery.amount_rolled_over = rolled_over;
    LOTTERIES.save(deps.storage, lottery_id, &lottery)?;

    let winners: u64 = lottery.count_winners_per_bracket.iter().sum();
    Ok(Response::new()
        .add_attribute("method", "execute_draw_final_number_and_make_claimable")
        .add_attribute("lottery_id", lottery_id.to_string())
        .add_attribute("final_number", final_number.to_string())
        .add_attribute("winning_tickets", winners.to_string())
        .add_attribute("amount_rolled_over", rolled_over))
}

pub fn execute_inject_funds(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    lottery_id: u64,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner && info.sender != config.injector {
        return Err(ContractError::Unauthorized {});
    }

    let mut lottery = LOTTERIES.load(deps.storage, lottery_id)?;
    if lottery.status != LotteryStatus::Open {
        return Err(ContractError::LotteryNotOpen {});
    }

    ensure_can_pull(
        deps.as_ref(),
        &config.token,
        &info.sender,
        &env.contract.address,
        amount,
    )?;
    lottery.injected_amount = lottery.injected_amount.checked_add(amount)?;
    LOTTERIES.save(deps.storage, lottery_id, &lottery)?;

    let pull = transfer_from_msg(&config.token, &info.sender, &env.contract.address, amount)?;
    Ok(Response::new()
        .add_message(pull)
        .add_attribute("method", "execute_inject_funds")
        .add_attribute("lottery_id", lottery_id.to_string())
        .add_attribute("amount", amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::tests::{
        instantiate_default, start_default_lottery, DEFAULT_REWARDS, OPERATOR, OWNER,
        RANDOMNESS_PROVIDER,
    };
    use crate::randomness::execute_fulfill_randomness;
    use crate::token::tests::mock_cw20_querier;
    use cosmwasm_std::testing::{mock_dependencies, mock_env, mock_info};
    use cosmwasm_std::{attr, Timestamp, Uint256};

    const E18: u128 = 1_000_000_000_000_000_000;

    #[allow(clippy::too_many_arguments)]
    fn start(
        deps: DepsMut,
        env: Env,
        sender: &str,
        end_increase: u64,
        price: u128,
        divisor: u64,
        rewards: Vec<u32>,
        fees: (u32, u32, u32),
    ) -> Result<Response, ContractError> {
        let end_time = env.block.time.seconds() + end_increase;
        execute_start_lottery(
            deps,
            env,
            mock_info(sender, &[]),
            end_time,
            Uint128::new(price),
            divisor,
            rewards,
            fees.0,
            fees.1,
            fees.2,
        )
    }

    #[test]
    fn test_start_lottery_nominal() {
        let mut deps = mock_dependencies();
        instantiate_default(deps.as_mut());
        let env = mock_env();

        let res = start(
            deps.as_mut(),
            env.clone(),
            OPERATOR,
            20_000,
            10 * E18,
            2000,
            DEFAULT_REWARDS.to_vec(),
            (100, 1000, 1000),
        )
        .unwrap();
        assert_eq!(res.attributes[0], attr("method", "execute_start_lottery"));
        assert_eq!(res.attributes[1], attr("lottery_id", "1"));

        let lottery = LOTTERIES.load(deps.as_ref().storage, 1).unwrap();
        assert_eq!(lottery.status, LotteryStatus::Open);
        assert_eq!(lottery.amount_collected, Uint128::zero());
        assert_eq!(lottery.size, 6);
        assert_eq!(lottery.end_time, env.block.time.seconds() + 20_000);
        assert_eq!(CURRENT_LOTTERY_ID.load(deps.as_ref().storage).unwrap(), 1);
    }

    #[test]
    fn test_start_lottery_validation() {
        let mut deps = mock_dependencies();
        instantiate_default(deps.as_mut());
        let env = mock_env();
        let nominal = (100, 1000, 1000);

        let cases: Vec<(&str, u64, u128, u64, Vec<u32>, (u32, u32, u32), ContractError)> = vec![
            (
                "buyer",
                20_000,
                10 * E18,
                2000,
                DEFAULT_REWARDS.to_vec(),
                nominal,
                ContractError::Unauthorized {},
            ),
            (
                OPERATOR,
                20_000,
                10 * E18,
                2000,
                vec![100, 300, 500, 1000, 2000, 3000],
                nominal,
                ContractError::InvalidRewardsBreakdown {},
            ),
            (
                OPERATOR,
                20_000,
                10 * E18,
                2000,
                vec![400, 500, 1000, 2000, 4000],
                nominal,
                ContractError::InvalidRewardsBreakdown {},
            ),
            (
                OPERATOR,
                20_000,
                0,
                2000,
                DEFAULT_REWARDS.to_vec(),
                nominal,
                ContractError::InvalidCost {},
            ),
            (
                OPERATOR,
                20_000,
                51 * E18,
                2000,
                DEFAULT_REWARDS.to_vec(),
                nominal,
                ContractError::InvalidCost {},
            ),
            (
                OPERATOR,
                60,
                10 * E18,
                2000,
                DEFAULT_REWARDS.to_vec(),
                nominal,
                ContractError::InvalidTimestamp {},
            ),
            (
                OPERATOR,
                5 * 86_400,
                10 * E18,
                2000,
                DEFAULT_REWARDS.to_vec(),
                nominal,
                ContractError::InvalidTimestamp {},
            ),
            (
                OPERATOR,
                20_000,
                10 * E18,
                100,
                DEFAULT_REWARDS.to_vec(),
                nominal,
                ContractError::InvalidDivisor {},
            ),
            (
                OPERATOR,
                20_000,
                10 * E18,
                2000,
                vec![100, 300, 500, 1000, 2000, 0],
                (100, 1000, 5000),
                ContractError::InvalidCharity {},
            ),
            (
                OPERATOR,
                20_000,
                10 * E18,
                2000,
                vec![100, 300, 500, 1000, 2000, 0],
                (100, 5000, 1000),
                ContractError::InvalidTreasury {},
            ),
            (
                OPERATOR,
                20_000,
                10 * E18,
                2000,
                vec![100, 300, 500, 1000, 2000, 0],
                (5000, 1000, 100),
                ContractError::InvalidBurn {},
            ),
        ];

        for (sender, end_increase, price, divisor, rewards, fees, expected) in cases {
            let err = start(
                deps.as_mut(),
                env.clone(),
                sender,
                end_increase,
                price,
                divisor,
                rewards,
                fees,
            )
            .unwrap_err();
            assert_eq!(err, expected);
        }
        assert_eq!(CURRENT_LOTTERY_ID.load(deps.as_ref().storage).unwrap(), 0);
    }

    #[test]
    fn test_rewards_sum_checked_for_any_split() {
        let mut deps = mock_dependencies();
        instantiate_default(deps.as_mut());
        let env = mock_env();
        for delta in [1u32, 9, 99] {
            for bracket in 0..6 {
                for sign_up in [true, false] {
                    let mut rewards = DEFAULT_REWARDS.to_vec();
                    if sign_up {
                        rewards[bracket] += delta;
                    } else {
                        rewards[bracket] -= delta;
                    }
                    let err = start(
                        deps.as_mut(),
                        env.clone(),
                        OPERATOR,
                        20_000,
                        10 * E18,
                        2000,
                        rewards,
                        (100, 1000, 1000),
                    )
                    .unwrap_err();
                    assert_eq!(err, ContractError::InvalidRewardsBreakdown {});
                }
            }
            let err = start(
                deps.as_mut(),
                env.clone(),
                OPERATOR,
                20_000,
                10 * E18,
                2000,
                DEFAULT_REWARDS.to_vec(),
                (100 + delta, 1000, 1000),
            )
            .unwrap_err();
            assert_eq!(err, ContractError::InvalidRewardsBreakdown {});
        }
    }

    #[test]
    fn test_close_lottery_transitions_and_requests_randomness() {
        let mut deps = mock_dependencies();
        instantiate_default(deps.as_mut());
        let mut env = mock_env();
        let lottery_id = start_default_lottery(deps.as_mut(), env.clone());

        let err = execute_close_lottery(deps.as_mut(), env.clone(), mock_info(OPERATOR, &[]), lottery_id)
            .unwrap_err();
        assert_eq!(err, ContractError::NotYetEnded {});

        let err = execute_close_lottery(deps.as_mut(), env.clone(), mock_info(OWNER, &[]), lottery_id)
            .unwrap_err();
        assert_eq!(err, ContractError::Unauthorized {});

        env.block.time = env.block.time.plus_seconds(20_000);
        let res = execute_close_lottery(deps.as_mut(), env.clone(), mock_info(OPERATOR, &[]), lottery_id)
            .unwrap();
        assert_eq!(
            res.attributes,
            vec![
                attr("method", "execute_close_lottery"),
                attr("lottery_id", "1"),
                attr("first_ticket_id_next_lottery", "0"),
                attr("randomness_request_id", "1"),
            ]
        );
        let lottery = LOTTERIES.load(deps.as_ref().storage, lottery_id).unwrap();
        assert_eq!(lottery.status, LotteryStatus::Closed);
        assert_eq!(lottery.randomness_request_id, Some(1));

        let err = execute_close_lottery(deps.as_mut(), env, mock_info(OPERATOR, &[]), lottery_id)
            .unwrap_err();
        assert_eq!(err, ContractError::AlreadyClosed {});
    }

    #[test]
    fn test_draw_requires_closed_and_randomness() {
        let mut deps = mock_dependencies();
        instantiate_default(deps.as_mut());
        let mut env = mock_env();
        let lottery_id = start_default_lottery(deps.as_mut(), env.clone());

        let err = execute_draw_final_number_and_make_claimable(
            deps.as_mut(),
            env.clone(),
            mock_info(OPERATOR, &[]),
            lottery_id,
            true,
        )
        .unwrap_err();
        assert_eq!(err, ContractError::NotClosed {});

        env.block.time = Timestamp::from_seconds(env.block.time.seconds() + 20_000);
        execute_close_lottery(deps.as_mut(), env.clone(), mock_info(OPERATOR, &[]), lottery_id)
            .unwrap();

        let err = execute_draw_final_number_and_make_claimable(
            deps.as_mut(),
            env.clone(),
            mock_info(OPERATOR, &[]),
            lottery_id,
            true,
        )
        .unwrap_err();
        assert_eq!(err, ContractError::RandomnessNotReady { request_id: 1 });
        assert_eq!(
            LOTTERIES.load(deps.as_ref().storage, lottery_id).unwrap().status,
            LotteryStatus::Closed
        );

        execute_fulfill_randomness(
            deps.as_mut(),
            env.clone(),
            mock_info(RANDOMNESS_PROVIDER, &[]),
            1,
            Uint256::from(940_628u128),
        )
        .unwrap();

        let res = execute_draw_final_number_and_make_claimable(
            deps.as_mut(),
            env.clone(),
            mock_info(OPERATOR, &[]),
            lottery_id,
            true,
        )
        .unwrap();
        assert_eq!(res.attributes[2], attr("final_number", "1940628"));
        let lottery = LOTTERIES.load(deps.as_ref().storage, lottery_id).unwrap();
        assert_eq!(lottery.status, LotteryStatus::Claimable);
        assert_eq!(lottery.final_number, Some(1_940_628));
        assert_eq!(lottery.count_winners_per_bracket, vec![0; 6]);

        let err = execute_draw_final_number_and_make_claimable(
            deps.as_mut(),
            env,
            mock_info(OPERATOR, &[]),
            lottery_id,
            true,
        )
        .unwrap_err();
        assert_eq!(err, ContractError::NotClosed {});
    }

    #[test]
    fn test_new_lottery_waits_for_previous_to_be_claimable() {
        let mut deps = mock_dependencies();
        instantiate_default(deps.as_mut());
        let env = mock_env();
        start_default_lottery(deps.as_mut(), env.clone());

        let err = start(
            deps.as_mut(),
            env,
            OPERATOR,
            20_000,
            10 * E18,
            2000,
            DEFAULT_REWARDS.to_vec(),
            (100, 1000, 1000),
        )
        .unwrap_err();
        assert_eq!(err, ContractError::PreviousLotteryNotFinished {});
    }

    #[test]
    fn test_inject_funds() {
        let mut deps = mock_dependencies();
        instantiate_default(deps.as_mut());
        let env = mock_env();
        let lottery_id = start_default_lottery(deps.as_mut(), env.clone());
        mock_cw20_querier(&mut deps.querier, 1_000, 1_000);

        let err = execute_inject_funds(
            deps.as_mut(),
            env.clone(),
            mock_info("buyer", &[]),
            lottery_id,
            Uint128::new(500),
        )
        .unwrap_err();
        assert_eq!(err, ContractError::Unauthorized {});

        let res = execute_inject_funds(
            deps.as_mut(),
            env.clone(),
            mock_info(OWNER, &[]),
            lottery_id,
            Uint128::new(500),
        )
        .unwrap();
        assert_eq!(res.messages.len(), 1);
        assert_eq!(
            LOTTERIES
                .load(deps.as_ref().storage, lottery_id)
                .unwrap()
                .injected_amount,
            Uint128::new(500)
        );

        let err = execute_inject_funds(
            deps.as_mut(),
            env,
            mock_info(OWNER, &[]),
            lottery_id,
            Uint128::new(5_000),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ContractError::TransferFailed {
                required: Uint128::new(5_000),
                balance: Uint128::new(1_000),
            }
        );
    }
}
