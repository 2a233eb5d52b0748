//! Reconciliation against authoritative component accounts.

use bolt_world::{ComponentKind, HealthComponent, PlayerComponent, WeaponComponent};
use solana_sdk::pubkey::Pubkey;

use super::mock::harness;
use crate::error::BridgeError;
use crate::state::{GameState, SessionPhase};

#[tokio::test]
async fn reconcile_overwrites_diverged_state() {
    let h = harness();
    let game = Pubkey::new_unique();
    h.bridge.join_game(game).await.unwrap();

    // Another player's ApplyDamage landed on-chain; the cache still says 100.
    let entity = h.entity();
    h.rollup.set_component(
        &entity,
        ComponentKind::Health,
        borsh::to_vec(&HealthComponent {
            health: 40,
            max_health: 100,
            last_damage_ts: 1_700_000_000,
        })
        .unwrap(),
    );
    h.rollup.set_component(
        &entity,
        ComponentKind::Weapon,
        borsh::to_vec(&WeaponComponent {
            current_slot: 2,
            ammo: 12,
            max_ammo: 30,
        })
        .unwrap(),
    );
    h.rollup.set_component(
        &entity,
        ComponentKind::Player,
        borsh::to_vec(&PlayerComponent {
            authority: h.bridge.connection_status().authority,
            game,
            in_game: true,
            is_ready: true,
        })
        .unwrap(),
    );

    h.bridge.reconcile().await.unwrap();

    let state = h.bridge.game_state();
    assert_eq!(state.health, 40);
    assert_eq!(state.current_weapon, 2);
    assert_eq!(state.ammo, 12);
    assert!(state.is_ready);
    assert!(state.is_in_game);
    assert_eq!(h.bridge.phase(), SessionPhase::InLobby);
}

#[tokio::test]
async fn reconcile_follows_onchain_eviction() {
    let h = harness();
    h.bridge.join_game(Pubkey::new_unique()).await.unwrap();

    h.rollup.set_component(
        &h.entity(),
        ComponentKind::Player,
        borsh::to_vec(&PlayerComponent {
            authority: h.bridge.connection_status().authority,
            game: Pubkey::default(),
            in_game: false,
            is_ready: false,
        })
        .unwrap(),
    );

    h.bridge.reconcile().await.unwrap();
    assert_eq!(h.bridge.game_state(), GameState::new(1, 1));
    assert_eq!(h.bridge.phase(), SessionPhase::Idle);
}

#[tokio::test]
async fn reconcile_skips_missing_accounts() {
    let h = harness();
    h.bridge.join_game(Pubkey::new_unique()).await.unwrap();
    let before = h.bridge.game_state();

    h.bridge.reconcile().await.unwrap();
    assert_eq!(h.bridge.game_state(), before);
}

#[tokio::test]
async fn malformed_component_data_is_an_error() {
    let h = harness();
    h.rollup.set_component(&h.entity(), ComponentKind::Health, vec![1]);

    assert!(matches!(
        h.bridge.reconcile().await.unwrap_err(),
        BridgeError::Deserialize(_)
    ));
}
