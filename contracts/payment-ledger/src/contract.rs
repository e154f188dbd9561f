use cosmwasm_std::{Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute;
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::query;
use crate::state::{LedgerConfig, CONFIG, NEXT_PAYOUT_ID};

const CONTRACT_NAME: &str = "crates.io:fairdraw-payment-ledger";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), cosmwasm_std::entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let mut operators = Vec::new();
    for op in &msg.operators {
        operators.push(deps.api.addr_validate(op)?);
    }

    let config = LedgerConfig {
        admin: info.sender.clone(),
        operators,
        raffle_hub: deps.api.addr_validate(&msg.raffle_hub)?,
        raffle_wallet: msg.raffle_wallet,
        amount_tolerance: msg.amount_tolerance,
    };

    CONFIG.save(deps.storage, &config)?;
    NEXT_PAYOUT_ID.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "payment-ledger")
        .add_attribute("admin", info.sender.to_string()))
}

#[cfg_attr(not(feature = "library"), cosmwasm_std::entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::RecordTransfer {
            tx_hash,
            from_wallet,
            to_wallet,
            amount,
        } => execute::record_transfer(deps, env, info, tx_hash, from_wallet, to_wallet, amount),
        ExecuteMsg::RequestPayout {
            recipient_wallet,
            amount,
            reference,
        } => execute::request_payout(deps, env, info, recipient_wallet, amount, reference),
        ExecuteMsg::ConfirmPayout { payout_id, tx_hash } => {
            execute::confirm_payout(deps, env, info, payout_id, tx_hash)
        }
        ExecuteMsg::UpdateOperators { add, remove } => {
            execute::update_operators(deps, env, info, add, remove)
        }
    }
}

#[cfg_attr(not(feature = "library"), cosmwasm_std::entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::VerifyTransfer {
            tx_hash,
            expected_amount,
            expected_to,
            expected_from,
        } => query::query_verify_transfer(deps, tx_hash, expected_amount, expected_to, expected_from),
        QueryMsg::Transfer { tx_hash } => query::query_transfer(deps, tx_hash),
        QueryMsg::Payout { payout_id } => query::query_payout(deps, payout_id),
        QueryMsg::PendingPayouts { start_after, limit } => {
            query::query_pending_payouts(deps, start_after, limit)
        }
    }
}
