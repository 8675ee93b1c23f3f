//! Request/response table for the external randomness provider.
//!
//! `CloseLottery` records a pending request and announces its id through
//! response attributes. The provider answers later with `FulfillRandomness`;
//! the draw polls the table and never blocks on it.

use cosmwasm_std::{DepsMut, Env, MessageInfo, Response, StdResult, Storage, Uint256};

use crate::error::ContractError;
use crate::state::{RandomnessRequest, CONFIG, RANDOMNESS_REQUESTS, RANDOMNESS_REQUEST_SEQ};

/// Opens a new request for `lottery_id` and returns its id.
pub fn request_random_number(
    storage: &mut dyn Storage,
    lottery_id: u64,
    now: u64,
) -> StdResult<u64> {
    let id = RANDOMNESS_REQUEST_SEQ.update(storage, |id| -> StdResult<_> { Ok(id + 1) })?;
    let request = RandomnessRequest {
        id,
        lottery_id,
        requested_at: now,
        random_value: None,
    };
    RANDOMNESS_REQUESTS.save(storage, id, &request)?;
    Ok(id)
}

/// Random value delivered for `request_id`, failing while the provider has not answered.
pub fn random_result(storage: &dyn Storage, request_id: u64) -> Result<Uint256, ContractError> {
    RANDOMNESS_REQUESTS
        .may_load(storage, request_id)?
        .ok_or(ContractError::UnknownRandomnessRequest { request_id })?
        .random_value
        .ok_or(ContractError::RandomnessNotReady { request_id })
}

pub fn execute_fulfill_randomness(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    request_id: u64,
    random_value: Uint256,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.randomness_provider {
        return Err(ContractError::Unauthorized {});
    }

    let mut request = RANDOMNESS_REQUESTS
        .may_load(deps.storage, request_id)?
        .ok_or(ContractError::UnknownRandomnessRequest { request_id })?;
    if request.random_value.is_some() {
        return Err(ContractError::RandomnessAlreadyFulfilled { request_id });
    }
    request.random_value = Some(random_value);
    RANDOMNESS_REQUESTS.save(deps.storage, request_id, &request)?;

    Ok(Response::new()
        .add_attribute("method", "execute_fulfill_randomness")
        .add_attribute("request_id", request_id.to_string())
        .add_attribute("lottery_id", request.lottery_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::tests::{instantiate_default, RANDOMNESS_PROVIDER};
    use cosmwasm_std::testing::{mock_dependencies, mock_env, mock_info};
    use cosmwasm_std::attr;

    #[test]
    fn test_request_then_fulfill() {
        let mut deps = mock_dependencies();
        instantiate_default(deps.as_mut());

        let id = request_random_number(deps.as_mut().storage, 7, 1_000).unwrap();
        assert_eq!(id, 1);
        assert_eq!(
            random_result(deps.as_ref().storage, id).unwrap_err(),
            ContractError::RandomnessNotReady { request_id: 1 }
        );

        let res = execute_fulfill_randomness(
            deps.as_mut(),
            mock_env(),
            mock_info(RANDOMNESS_PROVIDER, &[]),
            id,
            Uint256::from(42u128),
        )
        .unwrap();
        assert_eq!(
            res.attributes,
            vec![
                attr("method", "execute_fulfill_randomness"),
                attr("request_id", "1"),
                attr("lottery_id", "7"),
            ]
        );
        assert_eq!(
            random_result(deps.as_ref().storage, id).unwrap(),
            Uint256::from(42u128)
        );

        let second = request_random_number(deps.as_mut().storage, 8, 2_000).unwrap();
        assert_eq!(second, 2);
    }

    #[test]
    fn test_fulfill_rejections() {
        let mut deps = mock_dependencies();
        instantiate_default(deps.as_mut());
        let id = request_random_number(deps.as_mut().storage, 1, 1_000).unwrap();

        let err = execute_fulfill_randomness(
            deps.as_mut(),
            mock_env(),
            mock_info("mallory", &[]),
            id,
            Uint256::from(1u128),
        )
        .unwrap_err();
        assert_eq!(err, ContractError::Unauthorized {});

        let err = execute_fulfill_randomness(
            deps.as_mut(),
            mock_env(),
            mock_info(RANDOMNESS_PROVIDER, &[]),
            99,
            Uint256::from(1u128),
        )
        .unwrap_err();
        assert_eq!(err, ContractError::UnknownRandomnessRequest { request_id: 99 });

        execute_fulfill_randomness(
            deps.as_mut(),
            mock_env(),
            mock_info(RANDOMNESS_PROVIDER, &[]),
            id,
            Uint256::from(1u128),
        )
        .unwrap();
        let err = execute_fulfill_randomness(
            deps.as_mut(),
            mock_env(),
            mock_info(RANDOMNESS_PROVIDER, &[]),
            id,
            Uint256::from(2u128),
        )
        .unwrap_err();
        assert_eq!(err, ContractError::RandomnessAlreadyFulfilled { request_id: id });
        assert_eq!(
            random_result(deps.as_ref().storage, id).unwrap(),
            Uint256::from(1u128)
        );
    }
}
