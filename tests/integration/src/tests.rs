//! Integration tests for the FairDraw raffle protocol.
//!
//! These tests exercise the contract entry points directly using
//! `cosmwasm_std::testing` mocks. Cross-contract calls (the hub verifying
//! payments against the ledger and fetching randomness from the oracle)
//! are routed through `MockQuerier::update_wasm` into real instances of
//! the collaborator contracts, so the full query path runs end to end.
//!
//! Run:
//! ```bash
//! cargo test -p fairdraw-integration-tests
//! ```

use std::sync::{Arc, Mutex};

use cosmwasm_std::testing::{message_info, mock_dependencies, mock_env, MockApi, MockQuerier};
use cosmwasm_std::{
    from_json, ContractResult, CosmosMsg, Env, MemoryStorage, OwnedDeps, SystemResult, Timestamp,
    Uint128, WasmMsg, WasmQuery,
};

type MockDeps = OwnedDeps<MemoryStorage, MockApi, MockQuerier>;

// ─── Constants ───

/// Real drand quicknet public key
const QUICKNET_PK_HEX: &str = "83cf0f2896adee7eb8b5f01fcad3912212c437e0073e911fb90022d3e760183c8c4b450b6a0a6c3ac6a5776a2d1064510d1fec758c921cc22b0e17e63aaf4bcb5ed66304de9cf809bd274ca73bab4af5a6e9c76a4bc09e76eae8991ef5ece45a";
const QUICKNET_CHAIN_HASH: &str =
    "52db9ba70e0cc0f6eaf7803dd07447a1f5477735fd3f661792ba94600c84e971";
const GENESIS_TIME: u64 = 1692803367;
const PERIOD_SECONDS: u64 = 3;

/// Real quicknet test vector: round 1000
const TEST_ROUND: u64 = 1000;
const TEST_SIG_HEX: &str = "b44679b9a59af2ec876b1a6b1ad52ea9b1615fc3982b19576350f93447cb1125e342b73a8dd2bacbe47e4b6b63ed5e39";
const TEST_RANDOMNESS_HEX: &str =
    "fe290beca10872ef2fb164d2aa4442de4566183ec51c56ff3cd603d930e54fdd";

/// Publication time of round 1000: genesis + 999 * 3
const TEST_ROUND_TIME: u64 = GENESIS_TIME + (TEST_ROUND - 1) * PERIOD_SECONDS;

/// Chosen so the express deadline (five joins + 60s timer) lands before
/// the round-1000 publication time, making that beacon deadline-fresh.
const START_TIME: u64 = TEST_ROUND_TIME - 164;

const ONE_TON: u128 = 1_000_000_000;

fn env_at(seconds: u64) -> Env {
    let mut env = mock_env();
    env.block.time = Timestamp::from_seconds(seconds);
    env
}

fn addr_of(name: &str) -> cosmwasm_std::Addr {
    MockApi::default().addr_make(name)
}

// ─── Oracle helpers ───

fn setup_oracle(deps: &mut MockDeps) {
    let admin = deps.api.addr_make("admin");
    let operator = deps.api.addr_make("operator");
    let msg = fairdraw_randomness_oracle::msg::InstantiateMsg {
        operators: vec![operator.to_string()],
        network_pubkey_hex: QUICKNET_PK_HEX.to_string(),
        chain_hash: QUICKNET_CHAIN_HASH.to_string(),
        genesis_time: GENESIS_TIME,
        period_seconds: PERIOD_SECONDS,
    };
    let info = message_info(&admin, &[]);
    fairdraw_randomness_oracle::contract::instantiate(deps.as_mut(), mock_env(), info, msg)
        .unwrap();
}

fn submit_test_beacon(deps: &mut MockDeps) {
    let operator = deps.api.addr_make("operator");
    let info = message_info(&operator, &[]);
    fairdraw_randomness_oracle::contract::execute(
        deps.as_mut(),
        mock_env(),
        info,
        fairdraw_randomness_oracle::msg::ExecuteMsg::SubmitRandomness {
            round: TEST_ROUND,
            signature_hex: TEST_SIG_HEX.to_string(),
        },
    )
    .unwrap();
}

// ─── Ledger helpers ───

fn setup_ledger(deps: &mut MockDeps) {
    let admin = deps.api.addr_make("admin");
    let watcher = deps.api.addr_make("watcher");
    let msg = fairdraw_payment_ledger::msg::InstantiateMsg {
        operators: vec![watcher.to_string()],
        raffle_hub: addr_of("hub").to_string(),
        raffle_wallet: "UQraffle".to_string(),
        amount_tolerance: Uint128::new(10_000_000),
    };
    let info = message_info(&admin, &[]);
    fairdraw_payment_ledger::contract::instantiate(deps.as_mut(), mock_env(), info, msg).unwrap();
}

fn record_transfer(deps: &mut MockDeps, tx_hash: &str, from: &str, amount: u128) {
    let watcher = deps.api.addr_make("watcher");
    let info = message_info(&watcher, &[]);
    fairdraw_payment_ledger::contract::execute(
        deps.as_mut(),
        mock_env(),
        info,
        fairdraw_payment_ledger::msg::ExecuteMsg::RecordTransfer {
            tx_hash: tx_hash.to_string(),
            from_wallet: from.to_string(),
            to_wallet: "UQraffle".to_string(),
            amount: Uint128::new(amount),
        },
    )
    .unwrap();
}

// ─── Hub helpers ───

fn setup_hub(deps: &mut MockDeps) {
    let admin = deps.api.addr_make("admin");
    let msg = fairdraw_hub::msg::InstantiateMsg {
        payment_ledger: addr_of("ledger").to_string(),
        randomness_oracle: addr_of("oracle").to_string(),
        raffle_wallet: "UQraffle".to_string(),
        commission_bps: 1000,
        express: fairdraw_common::RaffleParams {
            min_participants: 5,
            entry_fee: Uint128::new(ONE_TON),
            timer_seconds: 60,
        },
        standard: fairdraw_common::RaffleParams {
            min_participants: 10,
            entry_fee: Uint128::new(2 * ONE_TON),
            timer_seconds: 120,
        },
        premium: fairdraw_common::RaffleParams {
            min_participants: 30,
            entry_fee: Uint128::new(5 * ONE_TON),
            timer_seconds: 300,
        },
    };
    let info = message_info(&admin, &[]);
    fairdraw_hub::contract::instantiate(deps.as_mut(), env_at(START_TIME), info, msg).unwrap();
}

/// Route the hub's wasm queries into real ledger and oracle instances so
/// the actual verification and freshness logic runs.
fn route_collaborators(
    hub_deps: &mut MockDeps,
    ledger: Arc<Mutex<MockDeps>>,
    oracle: Arc<Mutex<MockDeps>>,
) {
    let ledger_addr = addr_of("ledger").to_string();
    let oracle_addr = addr_of("oracle").to_string();
    hub_deps.querier.update_wasm(move |query| {
        let WasmQuery::Smart { contract_addr, msg } = query else {
            panic!("unexpected wasm query: {:?}", query);
        };
        let result = if *contract_addr == ledger_addr {
            let guard = ledger.lock().unwrap();
            fairdraw_payment_ledger::contract::query(
                guard.as_ref(),
                mock_env(),
                from_json(msg).unwrap(),
            )
        } else if *contract_addr == oracle_addr {
            let guard = oracle.lock().unwrap();
            fairdraw_randomness_oracle::contract::query(
                guard.as_ref(),
                mock_env(),
                from_json(msg).unwrap(),
            )
        } else {
            panic!("unexpected contract queried: {}", contract_addr);
        };
        match result {
            Ok(bin) => SystemResult::Ok(ContractResult::Ok(bin)),
            Err(err) => SystemResult::Ok(ContractResult::Err(err.to_string())),
        }
    });
}

fn hub_join(
    deps: &mut MockDeps,
    at: u64,
    user: &cosmwasm_std::Addr,
    raffle_id: u64,
    tx_hash: &str,
) -> Result<cosmwasm_std::Response, fairdraw_hub::error::ContractError> {
    fairdraw_hub::contract::execute(
        deps.as_mut(),
        env_at(at),
        message_info(user, &[]),
        fairdraw_hub::msg::ExecuteMsg::Join {
            raffle_id,
            tx_hash: tx_hash.to_string(),
        },
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[test]
fn test_oracle_beacon_lifecycle() {
    // Submit a real quicknet beacon, check freshness semantics, then the
    // expected rejections.
    let mut deps = mock_dependencies();
    setup_oracle(&mut deps);
    submit_test_beacon(&mut deps);

    // Fresh for a deadline before publication time.
    let res = fairdraw_randomness_oracle::contract::query(
        deps.as_ref(),
        mock_env(),
        fairdraw_randomness_oracle::msg::QueryMsg::FreshRandomness {
            not_before: TEST_ROUND_TIME - 100,
        },
    )
    .unwrap();
    let beacon: Option<fairdraw_randomness_oracle::msg::RandomnessResponse> =
        from_json(res).unwrap();
    let beacon = beacon.unwrap();
    assert_eq!(beacon.round, TEST_ROUND);
    assert_eq!(beacon.round_time, TEST_ROUND_TIME);
    assert_eq!(hex::encode(&beacon.randomness), TEST_RANDOMNESS_HEX);

    // Not fresh for a deadline after publication time.
    let res = fairdraw_randomness_oracle::contract::query(
        deps.as_ref(),
        mock_env(),
        fairdraw_randomness_oracle::msg::QueryMsg::FreshRandomness {
            not_before: TEST_ROUND_TIME + 1,
        },
    )
    .unwrap();
    let stale: Option<fairdraw_randomness_oracle::msg::RandomnessResponse> =
        from_json(res).unwrap();
    assert!(stale.is_none());

    // Duplicate submission rejected.
    let operator = deps.api.addr_make("operator");
    let err = fairdraw_randomness_oracle::contract::execute(
        deps.as_mut(),
        mock_env(),
        message_info(&operator, &[]),
        fairdraw_randomness_oracle::msg::ExecuteMsg::SubmitRandomness {
            round: TEST_ROUND,
            signature_hex: TEST_SIG_HEX.to_string(),
        },
    )
    .unwrap_err();
    assert!(
        format!("{:?}", err).contains("BeaconAlreadyExists"),
        "Expected duplicate error, got: {:?}",
        err
    );

    // Wrong round for the same signature fails BLS verification.
    let err = fairdraw_randomness_oracle::contract::execute(
        deps.as_mut(),
        mock_env(),
        message_info(&operator, &[]),
        fairdraw_randomness_oracle::msg::ExecuteMsg::SubmitRandomness {
            round: TEST_ROUND + 1,
            signature_hex: TEST_SIG_HEX.to_string(),
        },
    )
    .unwrap_err();
    assert!(
        format!("{:?}", err).contains("Verification"),
        "Expected verification failure, got: {:?}",
        err
    );

    // Non-operator rejected.
    let random = deps.api.addr_make("random");
    let err = fairdraw_randomness_oracle::contract::execute(
        deps.as_mut(),
        mock_env(),
        message_info(&random, &[]),
        fairdraw_randomness_oracle::msg::ExecuteMsg::SubmitRandomness {
            round: 2000,
            signature_hex: TEST_SIG_HEX.to_string(),
        },
    )
    .unwrap_err();
    assert!(
        format!("{:?}", err).contains("Unauthorized"),
        "Expected unauthorized error, got: {:?}",
        err
    );
}

#[test]
fn test_ledger_verification() {
    let mut deps = mock_dependencies();
    setup_ledger(&mut deps);
    record_transfer(&mut deps, "tx-good", "UQplayer", ONE_TON);

    let verify = |deps: &MockDeps, tx: &str, amount: u128, to: &str, from: Option<&str>| {
        let res = fairdraw_payment_ledger::contract::query(
            deps.as_ref(),
            mock_env(),
            fairdraw_payment_ledger::msg::QueryMsg::VerifyTransfer {
                tx_hash: tx.to_string(),
                expected_amount: Uint128::new(amount),
                expected_to: to.to_string(),
                expected_from: from.map(String::from),
            },
        )
        .unwrap();
        from_json::<fairdraw_payment_ledger::msg::VerifyTransferResponse>(res).unwrap()
    };

    // Exact match and a within-tolerance underpayment both pass.
    assert!(verify(&deps, "tx-good", ONE_TON, "UQraffle", None).valid);
    assert!(verify(&deps, "tx-good", ONE_TON - 5_000_000, "UQraffle", None).valid);
    assert!(verify(&deps, "tx-good", ONE_TON, "UQraffle", Some("UQplayer")).valid);

    // Out of tolerance, wrong destination, wrong sender, unknown hash.
    assert!(!verify(&deps, "tx-good", ONE_TON / 2, "UQraffle", None).valid);
    assert!(!verify(&deps, "tx-good", ONE_TON, "UQother", None).valid);
    assert!(!verify(&deps, "tx-good", ONE_TON, "UQraffle", Some("UQsomeone")).valid);
    assert!(!verify(&deps, "tx-missing", ONE_TON, "UQraffle", None).valid);

    // An operator cannot record the same hash twice.
    let watcher = deps.api.addr_make("watcher");
    let err = fairdraw_payment_ledger::contract::execute(
        deps.as_mut(),
        mock_env(),
        message_info(&watcher, &[]),
        fairdraw_payment_ledger::msg::ExecuteMsg::RecordTransfer {
            tx_hash: "tx-good".to_string(),
            from_wallet: "UQplayer".to_string(),
            to_wallet: "UQraffle".to_string(),
            amount: Uint128::new(ONE_TON),
        },
    )
    .unwrap_err();
    assert!(
        format!("{:?}", err).contains("AlreadyRecorded"),
        "Expected duplicate error, got: {:?}",
        err
    );
}

#[test]
fn test_full_raffle_cycle() {
    // The whole protocol against real collaborator instances:
    // record entry payments on the ledger, submit a real beacon to the
    // oracle, join five players, tick past the deadline, then carry the
    // payout through the ledger and back into the hub.

    let mut oracle_deps = mock_dependencies();
    setup_oracle(&mut oracle_deps);
    submit_test_beacon(&mut oracle_deps);
    let oracle = Arc::new(Mutex::new(oracle_deps));

    let mut ledger_deps = mock_dependencies();
    setup_ledger(&mut ledger_deps);
    for i in 0..5 {
        record_transfer(
            &mut ledger_deps,
            &format!("entry-{}", i),
            &format!("UQplayer-{}", i),
            ONE_TON,
        );
    }
    let ledger = Arc::new(Mutex::new(ledger_deps));

    let mut hub_deps = mock_dependencies();
    setup_hub(&mut hub_deps);
    route_collaborators(&mut hub_deps, ledger.clone(), oracle.clone());

    // Players link the wallets their payments came from, then join the
    // express raffle (id 1).
    for i in 0..5u32 {
        let player = addr_of(&format!("player{}", i));
        fairdraw_hub::contract::execute(
            hub_deps.as_mut(),
            env_at(START_TIME),
            message_info(&player, &[]),
            fairdraw_hub::msg::ExecuteMsg::LinkWallet {
                wallet: format!("UQplayer-{}", i),
            },
        )
        .unwrap();
        hub_join(
            &mut hub_deps,
            START_TIME + i as u64,
            &player,
            1,
            &format!("entry-{}", i),
        )
        .unwrap();
    }

    // Fifth join started the 60s timer.
    let detail: Option<fairdraw_hub::msg::RaffleDetailResponse> = from_json(
        fairdraw_hub::contract::query(
            hub_deps.as_ref(),
            mock_env(),
            fairdraw_hub::msg::QueryMsg::Raffle {
                raffle_id: 1,
                start_after: None,
                limit: None,
            },
        )
        .unwrap(),
    )
    .unwrap();
    let raffle = detail.unwrap().raffle;
    assert!(matches!(raffle.status, fairdraw_common::RaffleStatus::Waiting));
    let deadline = raffle.waiting_until.unwrap().seconds();
    assert_eq!(deadline, START_TIME + 4 + 60);
    assert!(
        deadline <= TEST_ROUND_TIME,
        "test timeline must make round 1000 deadline-fresh"
    );

    // A tick before the deadline does nothing.
    let res = fairdraw_hub::contract::execute(
        hub_deps.as_mut(),
        env_at(deadline - 10),
        message_info(&addr_of("keeper"), &[]),
        fairdraw_hub::msg::ExecuteMsg::Tick {},
    )
    .unwrap();
    assert!(!res.attributes.iter().any(|a| a.key == "drawn"));

    // A tick after the deadline draws with the real beacon.
    let res = fairdraw_hub::contract::execute(
        hub_deps.as_mut(),
        env_at(deadline + 40),
        message_info(&addr_of("keeper"), &[]),
        fairdraw_hub::msg::ExecuteMsg::Tick {},
    )
    .unwrap();

    let detail: Option<fairdraw_hub::msg::RaffleDetailResponse> = from_json(
        fairdraw_hub::contract::query(
            hub_deps.as_ref(),
            mock_env(),
            fairdraw_hub::msg::QueryMsg::Raffle {
                raffle_id: 1,
                start_after: None,
                limit: None,
            },
        )
        .unwrap(),
    )
    .unwrap();
    let raffle = detail.unwrap().raffle;
    assert!(matches!(
        raffle.status,
        fairdraw_common::RaffleStatus::Completed
    ));
    assert_eq!(raffle.randomness_round, Some(TEST_ROUND));

    // The winner slot is exactly what the published beacon dictates.
    let randomness = hex::decode(TEST_RANDOMNESS_HEX).unwrap();
    let expected_seq = fairdraw_common::winner_index(&randomness, 1, 5).unwrap();
    let winner = raffle.winner.clone().unwrap();
    assert_eq!(winner, addr_of(&format!("player{}", expected_seq)));

    // The payout submessage targets the ledger; forward it by hand.
    assert_eq!(res.messages.len(), 1);
    let payout_ctx: fairdraw_hub::msg::PayoutCtx = from_json(&res.messages[0].payload).unwrap();
    assert_eq!(payout_ctx.amount, Uint128::new(4_500_000_000));
    let CosmosMsg::Wasm(WasmMsg::Execute { contract_addr, msg, .. }) = &res.messages[0].msg
    else {
        panic!("expected a wasm execute payout message");
    };
    assert_eq!(*contract_addr, addr_of("ledger").to_string());

    {
        let mut guard = ledger.lock().unwrap();
        fairdraw_payment_ledger::contract::execute(
            guard.as_mut(),
            env_at(deadline + 40),
            message_info(&addr_of("hub"), &[]),
            from_json(msg).unwrap(),
        )
        .unwrap();

        // The payout sits pending for the wallet daemon.
        let pending: Vec<fairdraw_payment_ledger::state::PayoutRequest> = from_json(
            fairdraw_payment_ledger::contract::query(
                guard.as_ref(),
                mock_env(),
                fairdraw_payment_ledger::msg::QueryMsg::PendingPayouts {
                    start_after: None,
                    limit: None,
                },
            )
            .unwrap(),
        )
        .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].amount, Uint128::new(4_500_000_000));
        assert_eq!(
            pending[0].recipient_wallet,
            format!("UQplayer-{}", expected_seq)
        );

        // The daemon sends the prize; the watcher confirms it.
        let watcher = guard.api.addr_make("watcher");
        fairdraw_payment_ledger::contract::execute(
            guard.as_mut(),
            env_at(deadline + 60),
            message_info(&watcher, &[]),
            fairdraw_payment_ledger::msg::ExecuteMsg::ConfirmPayout {
                payout_id: pending[0].id,
                tx_hash: "prize-tx-real".to_string(),
            },
        )
        .unwrap();
    }

    // Settle the hub side as the successful reply would.
    fairdraw_hub::execute::settle_payout(
        hub_deps.as_mut(),
        env_at(deadline + 40),
        payout_ctx,
        Ok(()),
    )
    .unwrap();

    let participant: Option<fairdraw_hub::state::Participant> = from_json(
        fairdraw_hub::contract::query(
            hub_deps.as_ref(),
            mock_env(),
            fairdraw_hub::msg::QueryMsg::Participant {
                raffle_id: 1,
                address: winner.to_string(),
            },
        )
        .unwrap(),
    )
    .unwrap();
    let participant = participant.unwrap();
    assert!(participant.is_winner);
    assert!(participant.prize_sent);

    // The confirmed prize hash is now a recorded transfer and can never
    // be replayed as an entry payment.
    let guard = ledger.lock().unwrap();
    let mirrored: Option<fairdraw_payment_ledger::state::ObservedTransfer> = from_json(
        fairdraw_payment_ledger::contract::query(
            guard.as_ref(),
            mock_env(),
            fairdraw_payment_ledger::msg::QueryMsg::Transfer {
                tx_hash: "prize-tx-real".to_string(),
            },
        )
        .unwrap(),
    )
    .unwrap();
    let mirrored = mirrored.unwrap();
    assert_eq!(mirrored.from_wallet, "UQraffle");
    assert_eq!(mirrored.amount, Uint128::new(4_500_000_000));
    drop(guard);

    // A fresh express round is already open.
    let active: Vec<fairdraw_hub::state::Raffle> = from_json(
        fairdraw_hub::contract::query(
            hub_deps.as_ref(),
            mock_env(),
            fairdraw_hub::msg::QueryMsg::ActiveRaffles {},
        )
        .unwrap(),
    )
    .unwrap();
    assert_eq!(active.len(), 3);
    assert!(active
        .iter()
        .any(|r| matches!(r.kind, fairdraw_common::RaffleKind::Express) && r.id == 4));
}

#[test]
fn test_draw_waits_for_fresh_beacon() {
    // The timer expires before any beacon exists. The tick must roll the
    // raffle back to waiting, and a later tick must complete the draw
    // once the beacon lands.

    let mut oracle_deps = mock_dependencies();
    setup_oracle(&mut oracle_deps);
    // No beacon submitted yet.
    let oracle = Arc::new(Mutex::new(oracle_deps));

    let mut ledger_deps = mock_dependencies();
    setup_ledger(&mut ledger_deps);
    for i in 0..5 {
        record_transfer(
            &mut ledger_deps,
            &format!("entry-{}", i),
            &format!("UQplayer-{}", i),
            ONE_TON,
        );
    }
    let ledger = Arc::new(Mutex::new(ledger_deps));

    let mut hub_deps = mock_dependencies();
    setup_hub(&mut hub_deps);
    route_collaborators(&mut hub_deps, ledger, oracle.clone());

    for i in 0..5u32 {
        hub_join(
            &mut hub_deps,
            START_TIME + i as u64,
            &addr_of(&format!("player{}", i)),
            1,
            &format!("entry-{}", i),
        )
        .unwrap();
    }
    let deadline = START_TIME + 4 + 60;

    // First tick: past the deadline, oracle empty, draw fails and rolls
    // back.
    let res = fairdraw_hub::contract::execute(
        hub_deps.as_mut(),
        env_at(deadline + 5),
        message_info(&addr_of("keeper"), &[]),
        fairdraw_hub::msg::ExecuteMsg::Tick {},
    )
    .unwrap();
    assert!(res.attributes.iter().any(|a| a.key == "draw_failed"));

    let detail: Option<fairdraw_hub::msg::RaffleDetailResponse> = from_json(
        fairdraw_hub::contract::query(
            hub_deps.as_ref(),
            mock_env(),
            fairdraw_hub::msg::QueryMsg::Raffle {
                raffle_id: 1,
                start_after: None,
                limit: None,
            },
        )
        .unwrap(),
    )
    .unwrap();
    assert!(matches!(
        detail.unwrap().raffle.status,
        fairdraw_common::RaffleStatus::Waiting
    ));

    // The beacon lands; the next tick completes the draw.
    submit_test_beacon(&mut oracle.lock().unwrap());
    let res = fairdraw_hub::contract::execute(
        hub_deps.as_mut(),
        env_at(deadline + 120),
        message_info(&addr_of("keeper"), &[]),
        fairdraw_hub::msg::ExecuteMsg::Tick {},
    )
    .unwrap();
    assert!(res.attributes.iter().any(|a| a.key == "drawn"));

    let detail: Option<fairdraw_hub::msg::RaffleDetailResponse> = from_json(
        fairdraw_hub::contract::query(
            hub_deps.as_ref(),
            mock_env(),
            fairdraw_hub::msg::QueryMsg::Raffle {
                raffle_id: 1,
                start_after: None,
                limit: None,
            },
        )
        .unwrap(),
    )
    .unwrap();
    let raffle = detail.unwrap().raffle;
    assert!(matches!(
        raffle.status,
        fairdraw_common::RaffleStatus::Completed
    ));
    assert!(raffle.winner.is_some());
}

#[test]
fn test_duplicate_entry_protection() {
    // One recorded payment admits exactly one participant, no matter who
    // presents the hash.

    let mut oracle_deps = mock_dependencies();
    setup_oracle(&mut oracle_deps);
    let oracle = Arc::new(Mutex::new(oracle_deps));

    let mut ledger_deps = mock_dependencies();
    setup_ledger(&mut ledger_deps);
    record_transfer(&mut ledger_deps, "entry-shared", "UQplayer-0", ONE_TON);
    let ledger = Arc::new(Mutex::new(ledger_deps));

    let mut hub_deps = mock_dependencies();
    setup_hub(&mut hub_deps);
    route_collaborators(&mut hub_deps, ledger, oracle);

    hub_join(
        &mut hub_deps,
        START_TIME,
        &addr_of("player0"),
        1,
        "entry-shared",
    )
    .unwrap();

    let err = hub_join(
        &mut hub_deps,
        START_TIME + 1,
        &addr_of("player1"),
        1,
        "entry-shared",
    )
    .unwrap_err();
    assert!(
        format!("{:?}", err).contains("TransactionAlreadyUsed"),
        "Expected reuse rejection, got: {:?}",
        err
    );

    // An unrecorded hash is rejected by the real ledger query.
    let err = hub_join(
        &mut hub_deps,
        START_TIME + 2,
        &addr_of("player1"),
        1,
        "entry-unknown",
    )
    .unwrap_err();
    assert!(
        format!("{:?}", err).contains("PaymentVerification"),
        "Expected verification rejection, got: {:?}",
        err
    );
}
