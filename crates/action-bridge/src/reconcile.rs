//! Cache reconciliation
//!
//! The optimistic cache only tracks the local player's own confirmed
//! transactions; mutations by other players (ApplyDamage in particular)
//! leave it stale. The reconciliation pass re-fetches the authoritative
//! component accounts from the rollup layer and overwrites divergent fields.

use std::sync::Arc;
use std::time::Duration;

use bolt_world::{component_pda, ComponentKind, HealthComponent, PlayerComponent, WeaponComponent};
use borsh::BorshDeserialize;
use solana_sdk::pubkey::Pubkey;

use crate::connection::Layer;
use crate::error::{BridgeError, Result};
use crate::session::GameBridge;
use crate::state::SessionPhase;

impl GameBridge {
    /// Pull authoritative component state and fold it into the cache.
    ///
    /// Missing accounts are skipped (the player may not be fully initialized
    /// on the rollup yet); malformed account data is an error.
    pub async fn reconcile(&self) -> Result<()> {
        let entity = self.entity();

        let health = self
            .fetch_component::<HealthComponent>(ComponentKind::Health, &entity)
            .await?;
        let weapon = self
            .fetch_component::<WeaponComponent>(ComponentKind::Weapon, &entity)
            .await?;
        let player = self
            .fetch_component::<PlayerComponent>(ComponentKind::Player, &entity)
            .await?;

        let mut dropped_from_game = false;
        {
            let mut state = self.write_state();
            if let Some(health) = health {
                if health.health != state.health {
                    tracing::debug!(
                        cached = state.health,
                        authoritative = health.health,
                        "reconciling health"
                    );
                }
                state.set_health(health.health, health.max_health);
            }
            if let Some(weapon) = weapon {
                state.set_weapon(weapon.current_slot, weapon.ammo, weapon.max_ammo);
            }
            if let Some(player) = player {
                // The chain can evict us from a game (kick, lobby close); the
                // cache must follow or every later call fails on-chain anyway.
                if state.is_in_game && !player.in_game {
                    tracing::info!("no longer in game on-chain, resetting session");
                    state.reset();
                    dropped_from_game = true;
                } else if state.is_in_game {
                    state.is_ready = player.is_ready;
                }
            }
        }
        if dropped_from_game {
            self.set_phase(SessionPhase::Idle);
        }
        Ok(())
    }

    async fn fetch_component<T: BorshDeserialize>(
        &self,
        component: ComponentKind,
        entity: &Pubkey,
    ) -> Result<Option<T>> {
        let address = component_pda(&component.program_id(), entity);
        let Some(account) = self.connection().account_info(Layer::Rollup, &address).await? else {
            return Ok(None);
        };
        let value = T::try_from_slice(&account.data).map_err(|e| {
            BridgeError::Deserialize(format!("{} component at {address}: {e}", component.name()))
        })?;
        Ok(Some(value))
    }
}

/// Periodically reconcile until the bridge is dropped or the task aborted.
pub fn spawn_reconciler(bridge: Arc<GameBridge>, interval: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            if bridge.phase() == SessionPhase::Disconnected {
                continue;
            }
            if let Err(e) = bridge.reconcile().await {
                tracing::warn!("reconciliation pass failed: {e}");
            }
        }
    })
}
