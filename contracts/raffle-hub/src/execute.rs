use cosmwasm_std::{
    to_json_binary, Addr, DepsMut, Env, Event, MessageInfo, Order, Response, Storage, SubMsg,
    WasmMsg,
};
use fairdraw_common::{
    prize_pool, winner_index, RaffleKind, RaffleParams, RaffleStatus, TransactionKind,
    TransactionStatus,
};

use crate::clients::{LedgerExecuteMsg, PaymentVerifier, RandomnessClient};
use crate::error::ContractError;
use crate::events;
use crate::msg::PayoutCtx;
use crate::state::{
    Config, Participant, Raffle, TransactionRecord, UserProfile, CONFIG, NEXT_RAFFLE_ID,
    OPEN_RAFFLES, PARTICIPANTS, PARTICIPANTS_BY_SEQ, PROFILES, RAFFLES, TRANSACTIONS,
};

pub const PAYOUT_REPLY_ID: u64 = 1;

pub fn validate_params(kind: RaffleKind, params: &RaffleParams) -> Result<(), ContractError> {
    let reject = |reason: &str| ContractError::InvalidParams {
        kind: kind.as_str().to_string(),
        reason: reason.to_string(),
    };
    if params.min_participants == 0 {
        return Err(reject("min_participants must be positive"));
    }
    if params.entry_fee.is_zero() {
        return Err(reject("entry_fee must be positive"));
    }
    if params.timer_seconds == 0 {
        return Err(reject("timer_seconds must be positive"));
    }
    Ok(())
}

/// Open a fresh raffle of `kind` with the current configured parameters.
/// At most one raffle per kind may be open at a time.
pub fn open_new_raffle(
    storage: &mut dyn Storage,
    env: &Env,
    config: &Config,
    kind: RaffleKind,
) -> Result<Raffle, ContractError> {
    if OPEN_RAFFLES.has(storage, kind.key()) {
        return Err(ContractError::KindAlreadyOpen {
            kind: kind.as_str().to_string(),
        });
    }

    let params = config.params_for(kind);
    validate_params(kind, params)?;

    let id = NEXT_RAFFLE_ID.load(storage)?;
    let raffle = Raffle {
        id,
        kind,
        status: RaffleStatus::Active,
        min_participants: params.min_participants,
        entry_fee: params.entry_fee,
        timer_seconds: params.timer_seconds,
        prize_pool: prize_pool(params.entry_fee, params.min_participants, config.commission_bps),
        commission_bps: config.commission_bps,
        participant_count: 0,
        created_at: env.block.time,
        waiting_until: None,
        drawn_at: None,
        winner: None,
        randomness_round: None,
        randomness_signature: None,
        verification_url: None,
    };
    RAFFLES.save(storage, id, &raffle)?;
    OPEN_RAFFLES.save(storage, kind.key(), &id)?;
    NEXT_RAFFLE_ID.save(storage, &(id + 1))?;

    Ok(raffle)
}

/// Admit the sender into a raffle after verifying the entry payment
/// against the ledger. All writes land together or not at all.
pub fn join(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    raffle_id: u64,
    tx_hash: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    let mut raffle = RAFFLES
        .may_load(deps.storage, raffle_id)?
        .ok_or(ContractError::RaffleNotFound { raffle_id })?;

    if !raffle.status.accepts_joins() {
        return Err(ContractError::RaffleNotAccepting {
            raffle_id,
            status: raffle.status.as_str().to_string(),
        });
    }

    if PARTICIPANTS.has(deps.storage, (raffle_id, &info.sender)) {
        return Err(ContractError::AlreadyJoined { raffle_id });
    }

    if TRANSACTIONS.has(deps.storage, &tx_hash) {
        return Err(ContractError::TransactionAlreadyUsed { tx_hash });
    }

    let mut profile = PROFILES
        .may_load(deps.storage, &info.sender)?
        .unwrap_or_else(|| UserProfile::new(env.block.time));

    // When the user has linked a wallet the payment must come from it;
    // otherwise any sender wallet is accepted.
    let verifier = PaymentVerifier {
        contract: &config.payment_ledger,
    };
    let transfer = verifier.verify(
        &deps.querier,
        tx_hash.clone(),
        raffle.entry_fee,
        config.raffle_wallet.clone(),
        profile.ton_wallet.clone(),
    )?;

    TRANSACTIONS.save(
        deps.storage,
        &tx_hash,
        &TransactionRecord {
            user: info.sender.clone(),
            raffle_id: Some(raffle_id),
            from_wallet: transfer.from_wallet,
            to_wallet: transfer.to_wallet,
            amount: transfer.amount,
            kind: TransactionKind::Entry,
            status: TransactionStatus::Confirmed,
            created_at: env.block.time,
            confirmed_at: Some(env.block.time),
        },
    )?;

    let seq = raffle.participant_count;
    PARTICIPANTS.save(
        deps.storage,
        (raffle_id, &info.sender),
        &Participant {
            seq,
            joined_at: env.block.time,
            tx_hash: tx_hash.clone(),
            is_winner: false,
            prize_sent: false,
            prize_tx_hash: None,
        },
    )?;
    PARTICIPANTS_BY_SEQ.save(deps.storage, (raffle_id, seq), &info.sender)?;
    raffle.participant_count += 1;

    profile.total_participations += 1;
    profile.total_spent += raffle.entry_fee;
    PROFILES.save(deps.storage, &info.sender, &profile)?;

    let mut response_events = vec![events::raffle_joined(&raffle, &info.sender, &tx_hash)];

    // The timer starts exactly once, at the join that reaches the
    // threshold. Joins during the countdown grow the pool but never
    // restart it.
    if matches!(raffle.status, RaffleStatus::Active)
        && raffle.participant_count >= raffle.min_participants
    {
        let deadline = env.block.time.plus_seconds(raffle.timer_seconds);
        raffle.status = RaffleStatus::Waiting;
        raffle.waiting_until = Some(deadline);
        response_events.push(events::raffle_started(raffle_id, deadline));
    }

    RAFFLES.save(deps.storage, raffle_id, &raffle)?;

    Ok(Response::new()
        .add_attribute("action", "join")
        .add_attribute("raffle_id", raffle_id.to_string())
        .add_attribute("user", info.sender.to_string())
        .add_attribute("participants", raffle.participant_count.to_string())
        .add_events(response_events))
}

/// Permissionless keeper entry point. Draws every raffle whose timer has
/// expired. A failed draw rolls that raffle back to waiting and moves on,
/// so one bad raffle never blocks the rest.
pub fn tick(mut deps: DepsMut, env: Env) -> Result<Response, ContractError> {
    let open: Vec<u64> = OPEN_RAFFLES
        .range(deps.storage, None, None, Order::Ascending)
        .map(|item| item.map(|(_, id)| id))
        .collect::<Result<_, _>>()?;

    let mut due = Vec::new();
    for raffle_id in open {
        let raffle = RAFFLES.load(deps.storage, raffle_id)?;
        if matches!(raffle.status, RaffleStatus::Waiting)
            && raffle
                .waiting_until
                .is_some_and(|deadline| env.block.time >= deadline)
        {
            due.push(raffle_id);
        }
    }

    let mut response = Response::new().add_attribute("action", "tick");
    for raffle_id in due {
        match run_draw(deps.branch(), &env, raffle_id) {
            Ok(outcome) => {
                response = response
                    .add_attribute("drawn", raffle_id.to_string())
                    .add_events(outcome.events);
                if let Some(msg) = outcome.payout_msg {
                    response = response.add_submessage(msg);
                }
            }
            Err(err) => {
                // Put the raffle back in the queue; the deadline has
                // already passed so the next tick retries immediately.
                let mut raffle = RAFFLES.load(deps.storage, raffle_id)?;
                if matches!(raffle.status, RaffleStatus::Drawing) {
                    raffle.status = RaffleStatus::Waiting;
                    RAFFLES.save(deps.storage, raffle_id, &raffle)?;
                }
                response = response
                    .add_attribute("draw_failed", format!("{}: {}", raffle_id, err));
            }
        }
    }

    Ok(response)
}

/// Draw a single raffle. Errors propagate, reverting the whole call.
pub fn draw(deps: DepsMut, env: Env, raffle_id: u64) -> Result<Response, ContractError> {
    let outcome = run_draw(deps, &env, raffle_id)?;

    let mut response = Response::new()
        .add_attribute("action", "draw")
        .add_attribute("raffle_id", raffle_id.to_string())
        .add_attribute("winner", outcome.winner.to_string())
        .add_events(outcome.events);
    if let Some(msg) = outcome.payout_msg {
        response = response.add_submessage(msg);
    }
    Ok(response)
}

pub struct DrawOutcome {
    pub winner: Addr,
    pub events: Vec<Event>,
    pub payout_msg: Option<SubMsg>,
}

/// Resolve one raffle: fetch deadline-fresh randomness, derive the winner
/// slot, settle records, queue the payout and open the next round.
fn run_draw(deps: DepsMut, env: &Env, raffle_id: u64) -> Result<DrawOutcome, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    let mut raffle = RAFFLES
        .may_load(deps.storage, raffle_id)?
        .ok_or(ContractError::RaffleNotFound { raffle_id })?;

    if !matches!(raffle.status, RaffleStatus::Waiting) {
        return Err(ContractError::RaffleNotDrawable {
            raffle_id,
            status: raffle.status.as_str().to_string(),
        });
    }

    let deadline = raffle
        .waiting_until
        .ok_or(ContractError::RaffleNotDrawable {
            raffle_id,
            status: "waiting without deadline".to_string(),
        })?;
    if env.block.time < deadline {
        return Err(ContractError::TimerNotExpired {
            raffle_id,
            waiting_until: deadline.seconds(),
        });
    }

    raffle.status = RaffleStatus::Drawing;
    RAFFLES.save(deps.storage, raffle_id, &raffle)?;

    // Only a beacon published at or after the deadline is acceptable:
    // nobody could have known it while entries were still open.
    let oracle = RandomnessClient {
        contract: &config.randomness_oracle,
    };
    let beacon = oracle.fresh(&deps.querier, raffle_id, deadline.seconds())?;

    let winner_seq = winner_index(&beacon.randomness, raffle_id, raffle.participant_count)
        .ok_or(ContractError::NoParticipants { raffle_id })?;
    let winner = PARTICIPANTS_BY_SEQ.load(deps.storage, (raffle_id, winner_seq))?;

    let mut participant = PARTICIPANTS.load(deps.storage, (raffle_id, &winner))?;
    participant.is_winner = true;
    PARTICIPANTS.save(deps.storage, (raffle_id, &winner), &participant)?;

    raffle.status = RaffleStatus::Completed;
    raffle.drawn_at = Some(env.block.time);
    raffle.winner = Some(winner.clone());
    raffle.randomness_round = Some(beacon.round);
    raffle.randomness_signature = Some(beacon.signature_hex);
    raffle.verification_url = Some(beacon.verification_url);
    RAFFLES.save(deps.storage, raffle_id, &raffle)?;

    let mut profile = PROFILES.load(deps.storage, &winner)?;
    profile.total_wins += 1;
    profile.total_won += raffle.prize_pool;
    PROFILES.save(deps.storage, &winner, &profile)?;

    let mut draw_events = vec![events::raffle_completed(&raffle, &winner, winner_seq)];

    let payout_msg = match &profile.ton_wallet {
        Some(wallet) => {
            let reference = format!("prize-{}", raffle_id);
            let ctx = PayoutCtx {
                raffle_id,
                winner: winner.clone(),
                recipient_wallet: wallet.clone(),
                amount: raffle.prize_pool,
                reference: reference.clone(),
            };
            let request = WasmMsg::Execute {
                contract_addr: config.payment_ledger.to_string(),
                msg: to_json_binary(&LedgerExecuteMsg::RequestPayout {
                    recipient_wallet: wallet.clone(),
                    amount: raffle.prize_pool,
                    reference,
                })?,
                funds: vec![],
            };
            draw_events.push(events::payout_requested(raffle_id, wallet, raffle.prize_pool));
            Some(SubMsg::reply_always(request, PAYOUT_REPLY_ID).with_payload(to_json_binary(&ctx)?))
        }
        None => {
            draw_events.push(events::payout_skipped(raffle_id, &winner));
            None
        }
    };

    // The completed raffle leaves the open slot; the next round of the
    // same kind opens immediately.
    OPEN_RAFFLES.remove(deps.storage, raffle.kind.key());
    let next = open_new_raffle(deps.storage, env, &config, raffle.kind)?;
    draw_events.push(events::raffle_created(&next));

    Ok(DrawOutcome {
        winner,
        events: draw_events,
        payout_msg,
    })
}

/// Settle the winner's record once the ledger answered the payout request.
/// A failed request is logged and left for operators; the draw itself is
/// already final.
pub fn settle_payout(
    deps: DepsMut,
    env: Env,
    ctx: PayoutCtx,
    result: Result<(), String>,
) -> Result<Response, ContractError> {
    match result {
        Ok(()) => {
            let config = CONFIG.load(deps.storage)?;

            let mut participant =
                PARTICIPANTS.load(deps.storage, (ctx.raffle_id, &ctx.winner))?;
            participant.prize_sent = true;
            participant.prize_tx_hash = Some(ctx.reference.clone());
            PARTICIPANTS.save(deps.storage, (ctx.raffle_id, &ctx.winner), &participant)?;

            // Pending until an operator confirms the on-ledger send.
            TRANSACTIONS.save(
                deps.storage,
                &ctx.reference,
                &TransactionRecord {
                    user: ctx.winner.clone(),
                    raffle_id: Some(ctx.raffle_id),
                    from_wallet: config.raffle_wallet,
                    to_wallet: ctx.recipient_wallet,
                    amount: ctx.amount,
                    kind: TransactionKind::Prize,
                    status: TransactionStatus::Pending,
                    created_at: env.block.time,
                    confirmed_at: None,
                },
            )?;

            Ok(Response::new()
                .add_attribute("action", "settle_payout")
                .add_attribute("raffle_id", ctx.raffle_id.to_string())
                .add_event(events::payout_recorded(ctx.raffle_id, &ctx.reference)))
        }
        Err(err) => Ok(Response::new()
            .add_attribute("action", "settle_payout")
            .add_attribute("raffle_id", ctx.raffle_id.to_string())
            .add_event(events::payout_failed(ctx.raffle_id, &err))),
    }
}

/// Open a fresh raffle of a kind that currently has none (admin only).
/// Normally rounds chain automatically; this covers recovery after a
/// cancellation.
pub fn create_raffle(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    kind: RaffleKind,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can create raffles".to_string(),
        });
    }

    let raffle = open_new_raffle(deps.storage, &env, &config, kind)?;

    Ok(Response::new()
        .add_attribute("action", "create_raffle")
        .add_attribute("raffle_id", raffle.id.to_string())
        .add_attribute("kind", kind.as_str())
        .add_event(events::raffle_created(&raffle)))
}

/// Cancel an open raffle (admin only). Entry fees were observed on the
/// external ledger; refunds are an operator concern outside the contract.
pub fn cancel_raffle(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    raffle_id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can cancel raffles".to_string(),
        });
    }

    let mut raffle = RAFFLES
        .may_load(deps.storage, raffle_id)?
        .ok_or(ContractError::RaffleNotFound { raffle_id })?;

    if !raffle.status.is_open() {
        return Err(ContractError::RaffleNotAccepting {
            raffle_id,
            status: raffle.status.as_str().to_string(),
        });
    }

    raffle.status = RaffleStatus::Cancelled;
    raffle.waiting_until = None;
    RAFFLES.save(deps.storage, raffle_id, &raffle)?;
    OPEN_RAFFLES.remove(deps.storage, raffle.kind.key());

    Ok(Response::new()
        .add_attribute("action", "cancel_raffle")
        .add_attribute("raffle_id", raffle_id.to_string())
        .add_event(events::raffle_cancelled(raffle_id)))
}

/// Link the sender's TON wallet. Prizes are only disbursed automatically
/// to linked wallets, and entry payments must then come from it.
pub fn link_wallet(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    wallet: String,
) -> Result<Response, ContractError> {
    let mut profile = PROFILES
        .may_load(deps.storage, &info.sender)?
        .unwrap_or_else(|| UserProfile::new(env.block.time));
    profile.ton_wallet = Some(wallet.clone());
    PROFILES.save(deps.storage, &info.sender, &profile)?;

    Ok(Response::new()
        .add_attribute("action", "link_wallet")
        .add_attribute("user", info.sender.to_string())
        .add_event(events::wallet_linked(&info.sender, &wallet)))
}

#[allow(clippy::too_many_arguments)]
pub fn update_config(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    payment_ledger: Option<String>,
    randomness_oracle: Option<String>,
    raffle_wallet: Option<String>,
    commission_bps: Option<u16>,
    express: Option<RaffleParams>,
    standard: Option<RaffleParams>,
    premium: Option<RaffleParams>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can update config".to_string(),
        });
    }

    if let Some(addr) = payment_ledger {
        config.payment_ledger = deps.api.addr_validate(&addr)?;
    }
    if let Some(addr) = randomness_oracle {
        config.randomness_oracle = deps.api.addr_validate(&addr)?;
    }
    if let Some(wallet) = raffle_wallet {
        config.raffle_wallet = wallet;
    }
    if let Some(bps) = commission_bps {
        if bps > 10_000 {
            return Err(ContractError::InvalidCommission { bps });
        }
        config.commission_bps = bps;
    }
    if let Some(params) = express {
        validate_params(RaffleKind::Express, &params)?;
        config.express = params;
    }
    if let Some(params) = standard {
        validate_params(RaffleKind::Standard, &params)?;
        config.standard = params;
    }
    if let Some(params) = premium {
        validate_params(RaffleKind::Premium, &params)?;
        config.premium = params;
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("action", "update_config"))
}
