//! Local State Cache
//!
//! Mutable mirror of the gameplay attributes the client needs between
//! confirmations. Updated optimistically after each confirmed transaction;
//! reconciliation against authoritative component state lives in
//! `reconcile`.

use bolt_world::constants::{
    DEFAULT_AMMO, DEFAULT_HEALTH, DEFAULT_MAX_AMMO, DEFAULT_MAX_HEALTH, DEFAULT_WEAPON_SLOT,
};
use solana_sdk::pubkey::Pubkey;

/// Client-visible session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// No on-chain presence yet
    #[default]
    Disconnected,
    /// Initialization pipeline in flight
    Initializing,
    /// Initialized, not in any game
    Idle,
    /// Joined a lobby, game not started
    InLobby,
    /// Match running
    InGame,
}

/// Cached gameplay state for one player session
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub player_address: Option<Pubkey>,
    pub game_address: Option<Pubkey>,
    pub world_id: u64,
    pub entity_id: u64,
    pub is_in_game: bool,
    pub is_ready: bool,
    pub health: u16,
    pub max_health: u16,
    pub current_weapon: u8,
    pub ammo: u16,
    pub max_ammo: u16,
}

impl GameState {
    pub fn new(world_id: u64, entity_id: u64) -> Self {
        Self {
            player_address: None,
            game_address: None,
            world_id,
            entity_id,
            is_in_game: false,
            is_ready: false,
            health: DEFAULT_HEALTH,
            max_health: DEFAULT_MAX_HEALTH,
            current_weapon: DEFAULT_WEAPON_SLOT,
            ammo: DEFAULT_AMMO,
            max_ammo: DEFAULT_MAX_AMMO,
        }
    }

    /// Atomic cache update for a confirmed JoinGame
    pub fn record_join(&mut self, game: Pubkey) {
        self.game_address = Some(game);
        self.is_in_game = true;
        self.is_ready = false;
    }

    /// Atomic cache reset for a confirmed LeaveGame (or disconnect):
    /// back to constructed defaults, keeping the ids.
    pub fn reset(&mut self) {
        *self = GameState::new(self.world_id, self.entity_id);
    }

    /// EndGame returns the player to the lobby: readiness is cleared, lobby
    /// membership and game address are kept.
    pub fn record_end_game(&mut self) {
        self.is_ready = false;
    }

    /// Decrement ammo for a confirmed shot from the given slot
    pub fn record_shot(&mut self, weapon_slot: u8) {
        if weapon_slot == self.current_weapon {
            self.ammo = self.ammo.saturating_sub(1);
        }
    }

    /// Refill ammo for a confirmed reload of the given slot
    pub fn record_reload(&mut self, weapon_slot: u8) {
        if weapon_slot == self.current_weapon {
            self.ammo = self.max_ammo;
        }
    }

    /// Equip a weapon slot
    pub fn record_weapon_switch(&mut self, weapon_slot: u8) {
        self.current_weapon = weapon_slot;
    }

    /// Restore health for a confirmed respawn
    pub fn record_respawn(&mut self) {
        self.health = self.max_health;
    }

    /// Overwrite health from authoritative component state
    pub fn set_health(&mut self, health: u16, max_health: u16) {
        self.max_health = max_health;
        self.health = health.min(max_health);
    }

    /// Overwrite weapon state from authoritative component state
    pub fn set_weapon(&mut self, slot: u8, ammo: u16, max_ammo: u16) {
        self.current_weapon = slot;
        self.max_ammo = max_ammo;
        self.ammo = ammo.min(max_ammo);
    }

    /// Invariants from the data model; checked by tests after every mutation.
    #[cfg(test)]
    fn invariants_hold(&self) -> bool {
        let flags_ok = self.is_in_game || (!self.is_ready && self.game_address.is_none());
        flags_ok && self.ammo <= self.max_ammo && self.health <= self.max_health
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructed_defaults() {
        let state = GameState::new(1, 1);
        assert_eq!(state.health, 100);
        assert_eq!(state.max_health, 100);
        assert_eq!(state.ammo, 30);
        assert_eq!(state.max_ammo, 30);
        assert_eq!(state.current_weapon, 1);
        assert!(!state.is_in_game);
        assert!(!state.is_ready);
        assert!(state.invariants_hold());
    }

    #[test]
    fn shot_decrements_matching_slot_only() {
        let mut state = GameState::new(1, 1);
        state.record_join(Pubkey::new_unique());
        state.record_shot(1);
        assert_eq!(state.ammo, 29);
        state.record_shot(2);
        assert_eq!(state.ammo, 29, "other slot leaves ammo unchanged");
        assert!(state.invariants_hold());
    }

    #[test]
    fn shot_floors_at_zero() {
        let mut state = GameState::new(1, 1);
        state.ammo = 0;
        state.record_shot(1);
        assert_eq!(state.ammo, 0);
        assert!(state.invariants_hold());
    }

    #[test]
    fn reload_refills_matching_slot() {
        let mut state = GameState::new(1, 1);
        state.ammo = 3;
        state.record_reload(2);
        assert_eq!(state.ammo, 3);
        state.record_reload(1);
        assert_eq!(state.ammo, state.max_ammo);
        assert!(state.invariants_hold());
    }

    #[test]
    fn respawn_restores_health() {
        let mut state = GameState::new(1, 1);
        state.health = 7;
        state.record_respawn();
        assert_eq!(state.health, 100);
        assert!(state.invariants_hold());
    }

    #[test]
    fn join_then_reset_round_trip() {
        let mut state = GameState::new(4, 2);
        let game = Pubkey::new_unique();
        state.record_join(game);
        assert!(state.is_in_game);
        assert!(!state.is_ready);
        assert_eq!(state.game_address, Some(game));

        state.is_ready = true;
        state.record_shot(1);
        state.reset();
        assert_eq!(state, GameState::new(4, 2));
    }

    #[test]
    fn end_game_keeps_lobby_membership() {
        let mut state = GameState::new(1, 1);
        state.record_join(Pubkey::new_unique());
        state.is_ready = true;
        state.record_end_game();
        assert!(state.is_in_game);
        assert!(!state.is_ready);
        assert!(state.game_address.is_some());
        assert!(state.invariants_hold());
    }

    #[test]
    fn authoritative_overwrites_clamp() {
        let mut state = GameState::new(1, 1);
        state.set_health(250, 100);
        assert_eq!(state.health, 100);
        state.set_weapon(2, 99, 30);
        assert_eq!(state.ammo, 30);
        assert!(state.invariants_hold());
    }
}
