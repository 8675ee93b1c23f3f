//! CW20 token plumbing: pre-flight checks and the messages moving funds.
//!
//! Every message built here runs as part of the calling transaction, so a
//! failing transfer reverts the whole operation.

use cosmwasm_std::{to_binary, Addr, CosmosMsg, Deps, StdResult, Uint128, WasmMsg};
use cw20::{AllowanceResponse, Cw20ExecuteMsg, Cw20QueryMsg};
use cw_asset::{Asset, AssetInfo};

use crate::error::ContractError;

/// Fails with a named error when `payer` cannot cover a `TransferFrom` of `amount` by `spender`.
pub fn ensure_can_pull(
    deps: Deps,
    token: &Addr,
    payer: &Addr,
    spender: &Addr,
    amount: Uint128,
) -> Result<(), ContractError> {
    let balance = AssetInfo::cw20(token.clone()).query_balance(&deps.querier, payer)?;
    if balance < amount {
        return Err(ContractError::TransferFailed {
            required: amount,
            balance,
        });
    }

    let allowance: AllowanceResponse = deps.querier.query_wasm_smart(
        token,
        &Cw20QueryMsg::Allowance {
            owner: payer.to_string(),
            spender: spender.to_string(),
        },
    )?;
    if allowance.allowance < amount {
        return Err(ContractError::InsufficientAllowance {
            required: amount,
            allowance: allowance.allowance,
        });
    }
    Ok(())
}

pub fn transfer_from_msg(
    token: &Addr,
    from: &Addr,
    to: &Addr,
    amount: Uint128,
) -> StdResult<CosmosMsg> {
    Asset::cw20(token.clone(), amount).transfer_from_msg(from, to)
}

pub fn transfer_msg(token: &Addr, to: &Addr, amount: Uint128) -> StdResult<CosmosMsg> {
    Asset::cw20(token.clone(), amount).transfer_msg(to)
}

/// Burns `amount` out of the contract's own balance.
pub fn burn_msg(token: &Addr, amount: Uint128) -> StdResult<CosmosMsg> {
    Ok(WasmMsg::Execute {
        contract_addr: token.to_string(),
        msg: to_binary(&Cw20ExecuteMsg::Burn { amount })?,
        funds: vec![],
    }
    .into())
}
