use cosmwasm_std::{DepsMut, Env, Event, MessageInfo, Response, Uint128};

use crate::error::ContractError;
use crate::state::{
    ObservedTransfer, PayoutRequest, PayoutStatus, CONFIG, NEXT_PAYOUT_ID, PAYOUTS, TRANSFERS,
};

/// Mirror an observed TON-side transfer. Operator only.
/// The map key rejects a hash that was already recorded, so a transfer can
/// never be mirrored twice no matter how many watchers run.
pub fn record_transfer(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    tx_hash: String,
    from_wallet: String,
    to_wallet: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    if !config.operators.contains(&info.sender) {
        return Err(ContractError::Unauthorized {
            reason: "only operators can record transfers".to_string(),
        });
    }

    if TRANSFERS.has(deps.storage, &tx_hash) {
        return Err(ContractError::TransferAlreadyRecorded { tx_hash });
    }

    let transfer = ObservedTransfer {
        tx_hash: tx_hash.clone(),
        from_wallet,
        to_wallet,
        amount,
        observed_at: env.block.time,
        submitted_by: info.sender,
    };
    TRANSFERS.save(deps.storage, &tx_hash, &transfer)?;

    Ok(Response::new()
        .add_attribute("action", "record_transfer")
        .add_attribute("tx_hash", tx_hash.clone())
        .add_attribute("amount", amount.to_string())
        .add_event(
            Event::new("fairdraw_transfer_recorded")
                .add_attribute("tx_hash", tx_hash)
                .add_attribute("amount", amount.to_string()),
        ))
}

/// Record a disbursement instruction for the wallet daemon. Raffle hub only.
pub fn request_payout(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    recipient_wallet: String,
    amount: Uint128,
    reference: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    if info.sender != config.raffle_hub {
        return Err(ContractError::Unauthorized {
            reason: "only the raffle hub can request payouts".to_string(),
        });
    }

    if amount.is_zero() {
        return Err(ContractError::ZeroPayoutAmount);
    }

    let payout_id = NEXT_PAYOUT_ID.may_load(deps.storage)?.unwrap_or(0);
    let payout = PayoutRequest {
        id: payout_id,
        recipient_wallet: recipient_wallet.clone(),
        amount,
        reference: reference.clone(),
        status: PayoutStatus::Pending,
        requested_at: env.block.time,
        tx_hash: None,
    };
    PAYOUTS.save(deps.storage, payout_id, &payout)?;
    NEXT_PAYOUT_ID.save(deps.storage, &(payout_id + 1))?;

    Ok(Response::new()
        .add_attribute("action", "request_payout")
        .add_attribute("payout_id", payout_id.to_string())
        .add_attribute("recipient", recipient_wallet.clone())
        .add_attribute("amount", amount.to_string())
        .add_event(
            Event::new("fairdraw_payout_requested")
                .add_attribute("payout_id", payout_id.to_string())
                .add_attribute("recipient", recipient_wallet)
                .add_attribute("amount", amount.to_string())
                .add_attribute("reference", reference),
        ))
}

/// Confirm a payout landed on the external ledger. Operator only.
pub fn confirm_payout(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    payout_id: u64,
    tx_hash: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    if !config.operators.contains(&info.sender) {
        return Err(ContractError::Unauthorized {
            reason: "only operators can confirm payouts".to_string(),
        });
    }

    let mut payout = PAYOUTS
        .may_load(deps.storage, payout_id)?
        .ok_or(ContractError::PayoutNotFound { payout_id })?;

    if matches!(payout.status, PayoutStatus::Sent) {
        return Err(ContractError::PayoutAlreadyConfirmed { payout_id });
    }

    payout.status = PayoutStatus::Sent;
    payout.tx_hash = Some(tx_hash.clone());
    PAYOUTS.save(deps.storage, payout_id, &payout)?;

    // Mirror the prize transfer under its real hash so the reference can
    // never be reused as an entry payment.
    if !TRANSFERS.has(deps.storage, &tx_hash) {
        let transfer = ObservedTransfer {
            tx_hash: tx_hash.clone(),
            from_wallet: config.raffle_wallet.clone(),
            to_wallet: payout.recipient_wallet.clone(),
            amount: payout.amount,
            observed_at: env.block.time,
            submitted_by: info.sender,
        };
        TRANSFERS.save(deps.storage, &tx_hash, &transfer)?;
    }

    Ok(Response::new()
        .add_attribute("action", "confirm_payout")
        .add_attribute("payout_id", payout_id.to_string())
        .add_attribute("tx_hash", tx_hash.clone())
        .add_event(
            Event::new("fairdraw_payout_confirmed")
                .add_attribute("payout_id", payout_id.to_string())
                .add_attribute("tx_hash", tx_hash),
        ))
}

/// Update the operator list. Admin only.
pub fn update_operators(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    add: Vec<String>,
    remove: Vec<String>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;

    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can update operators".to_string(),
        });
    }

    for addr_str in &remove {
        let addr = deps.api.addr_validate(addr_str)?;
        config.operators.retain(|a| a != addr);
    }

    for addr_str in &add {
        let addr = deps.api.addr_validate(addr_str)?;
        if !config.operators.contains(&addr) {
            config.operators.push(addr);
        }
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_operators")
        .add_attribute("added", add.join(","))
        .add_attribute("removed", remove.join(",")))
}
