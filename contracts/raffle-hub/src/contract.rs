use cosmwasm_std::{
    Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response, StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::events;
use crate::execute::{self, PAYOUT_REPLY_ID};
use crate::msg::{ExecuteMsg, InstantiateMsg, PayoutCtx, QueryMsg};
use crate::query;
use crate::state::{Config, CONFIG, NEXT_RAFFLE_ID};
use fairdraw_common::RaffleKind;

const CONTRACT_NAME: &str = "crates.io:fairdraw-hub";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), cosmwasm_std::entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.commission_bps > 10_000 {
        return Err(ContractError::InvalidCommission {
            bps: msg.commission_bps,
        });
    }

    let config = Config {
        admin: info.sender,
        payment_ledger: deps.api.addr_validate(&msg.payment_ledger)?,
        randomness_oracle: deps.api.addr_validate(&msg.randomness_oracle)?,
        raffle_wallet: msg.raffle_wallet,
        commission_bps: msg.commission_bps,
        express: msg.express,
        standard: msg.standard,
        premium: msg.premium,
    };
    for kind in RaffleKind::ALL {
        execute::validate_params(kind, config.params_for(kind))?;
    }
    CONFIG.save(deps.storage, &config)?;
    NEXT_RAFFLE_ID.save(deps.storage, &1u64)?;

    // One open raffle per kind from the start.
    let mut response = Response::new().add_attribute("action", "instantiate");
    for kind in RaffleKind::ALL {
        let raffle = execute::open_new_raffle(deps.storage, &env, &config, kind)?;
        response = response.add_event(events::raffle_created(&raffle));
    }

    Ok(response)
}

#[cfg_attr(not(feature = "library"), cosmwasm_std::entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Join { raffle_id, tx_hash } => {
            execute::join(deps, env, info, raffle_id, tx_hash)
        }
        ExecuteMsg::Tick {} => execute::tick(deps, env),
        ExecuteMsg::Draw { raffle_id } => execute::draw(deps, env, raffle_id),
        ExecuteMsg::CreateRaffle { kind } => execute::create_raffle(deps, env, info, kind),
        ExecuteMsg::CancelRaffle { raffle_id } => {
            execute::cancel_raffle(deps, env, info, raffle_id)
        }
        ExecuteMsg::LinkWallet { wallet } => execute::link_wallet(deps, env, info, wallet),
        ExecuteMsg::UpdateConfig {
            payment_ledger,
            randomness_oracle,
            raffle_wallet,
            commission_bps,
            express,
            standard,
            premium,
        } => execute::update_config(
            deps,
            env,
            info,
            payment_ledger,
            randomness_oracle,
            raffle_wallet,
            commission_bps,
            express,
            standard,
            premium,
        ),
    }
}

#[cfg_attr(not(feature = "library"), cosmwasm_std::entry_point)]
pub fn reply(deps: DepsMut, env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        PAYOUT_REPLY_ID => {
            let ctx: PayoutCtx = cosmwasm_std::from_json(&msg.payload)?;
            let result = msg.result.into_result().map(|_| ());
            execute::settle_payout(deps, env, ctx, result)
        }
        id => Err(ContractError::UnknownReplyId { id }),
    }
}

#[cfg_attr(not(feature = "library"), cosmwasm_std::entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::ActiveRaffles {} => query::query_active_raffles(deps),
        QueryMsg::Raffle {
            raffle_id,
            start_after,
            limit,
        } => query::query_raffle(deps, raffle_id, start_after, limit),
        QueryMsg::Participant { raffle_id, address } => {
            query::query_participant(deps, raffle_id, address)
        }
        QueryMsg::Profile { address } => query::query_profile(deps, address),
        QueryMsg::Transaction { tx_hash } => query::query_transaction(deps, tx_hash),
    }
}
