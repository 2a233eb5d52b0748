//! Initialization pipeline: resumption, idempotency, checkpoint persistence.

use std::sync::Arc;

use bolt_world::{world_pda, ComponentKind, SOLFPS_PROGRAM};

use super::mock::{harness, test_wallet, MockLedger};
use crate::error::BridgeError;
use crate::orchestrator::{step_sequence, InitStep};
use crate::session::{GameBridge, GameBridgeConfig};
use crate::state::SessionPhase;
use solana_sdk::pubkey::Pubkey;

#[tokio::test]
async fn init_resumes_after_mid_pipeline_failure() {
    let h = harness();
    h.base.fail_from(5);

    let err = h.bridge.init_player().await.unwrap_err();
    match err {
        BridgeError::InitIncomplete { step, .. } => {
            assert_eq!(step, step_sequence()[5]);
            assert_eq!(step, InitStep::DelegateComponent(ComponentKind::Health));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(h.base.sent_count(), 5);
    assert_eq!(h.bridge.init_checkpoint().completed_steps, 5);
    assert_eq!(h.bridge.phase(), SessionPhase::Disconnected);

    // A retry picks up at the failed step instead of replaying from scratch.
    h.base.clear_failures();
    h.bridge.init_player().await.unwrap();
    assert_eq!(h.base.sent_count(), 12);
    assert!(h.bridge.init_checkpoint().is_complete());
    assert_eq!(h.bridge.phase(), SessionPhase::Idle);
}

#[tokio::test]
async fn init_skips_accounts_already_on_chain() {
    let h = harness();
    h.base.set_account(world_pda(1), SOLFPS_PROGRAM, vec![]);

    h.bridge.init_player().await.unwrap();
    assert_eq!(h.base.sent_count(), 11, "existing world needs no transaction");
}

#[tokio::test]
async fn completed_init_is_a_no_op() {
    let h = harness();
    h.bridge.init_player().await.unwrap();
    assert_eq!(h.base.sent_count(), 12);

    h.bridge.init_player().await.unwrap();
    assert_eq!(h.base.sent_count(), 12);
}

#[tokio::test]
async fn checkpoint_survives_process_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("init-checkpoint.json");
    let validator = Pubkey::new_unique();

    // First process dies three steps in.
    let base = Arc::new(MockLedger::new("http://base.mock"));
    let rollup = Arc::new(MockLedger::new("http://rollup.mock"));
    base.fail_from(3);
    let bridge = GameBridge::new(
        GameBridgeConfig::new(test_wallet(), validator).with_checkpoint_path(path.clone()),
        base.clone(),
        rollup,
    );
    assert!(bridge.init_player().await.is_err());
    assert_eq!(base.sent_count(), 3);
    drop(bridge);

    // A fresh process over the same checkpoint file resumes at step three.
    let base = Arc::new(MockLedger::new("http://base.mock"));
    let rollup = Arc::new(MockLedger::new("http://rollup.mock"));
    let bridge = GameBridge::new(
        GameBridgeConfig::new(test_wallet(), validator).with_checkpoint_path(path),
        base.clone(),
        rollup,
    );
    assert_eq!(bridge.init_checkpoint().completed_steps, 3);
    bridge.init_player().await.unwrap();
    assert_eq!(base.sent_count(), 9);
    assert!(bridge.init_checkpoint().is_complete());
}
