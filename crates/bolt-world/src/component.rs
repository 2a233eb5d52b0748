//! Component account mirrors
//!
//! Borsh layouts matching the deployed component programs, used by the client
//! to deserialize authoritative state during reconciliation. Field order and
//! widths are wire contract with the on-chain programs.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::pubkey::Pubkey;

/// Player component - lobby membership and readiness
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, Default)]
pub struct PlayerComponent {
    /// Player wallet authority
    pub authority: Pubkey,
    /// Game this player currently belongs to (default when not in a game)
    pub game: Pubkey,
    /// Whether the player has joined a game
    pub in_game: bool,
    /// Ready flag inside the lobby
    pub is_ready: bool,
}

impl PlayerComponent {
    pub const LEN: usize = 32 + 32 + 1 + 1;
}

/// Health component
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug)]
pub struct HealthComponent {
    /// Current health
    pub health: u16,
    /// Maximum health
    pub max_health: u16,
    /// Timestamp of the last damage applied (for respawn timers)
    pub last_damage_ts: i64,
}

impl HealthComponent {
    pub const LEN: usize = 2 + 2 + 8;

    /// Check if the player is alive
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

impl Default for HealthComponent {
    fn default() -> Self {
        Self {
            health: crate::constants::DEFAULT_HEALTH,
            max_health: crate::constants::DEFAULT_MAX_HEALTH,
            last_damage_ts: 0,
        }
    }
}

/// Weapon component
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug)]
pub struct WeaponComponent {
    /// Equipped weapon slot
    pub current_slot: u8,
    /// Rounds left in the magazine
    pub ammo: u16,
    /// Magazine capacity
    pub max_ammo: u16,
}

impl WeaponComponent {
    pub const LEN: usize = 1 + 2 + 2;
}

impl Default for WeaponComponent {
    fn default() -> Self {
        Self {
            current_slot: crate::constants::DEFAULT_WEAPON_SLOT,
            ammo: crate::constants::DEFAULT_AMMO,
            max_ammo: crate::constants::DEFAULT_MAX_AMMO,
        }
    }
}

/// Position component (world-space, not mirrored into the client cache)
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, Default)]
pub struct PositionComponent {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Yaw in radians
    pub rotation: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub velocity_z: f32,
}

impl PositionComponent {
    pub const LEN: usize = 4 * 7;
}

/// Per-player match statistics
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, Default)]
pub struct PlayerStatsComponent {
    pub kills: u16,
    pub deaths: u16,
    pub shots_fired: u32,
    pub damage_dealt: u32,
}

impl PlayerStatsComponent {
    pub const LEN: usize = 2 + 2 + 4 + 4;
}

/// Game component - lobby/match state
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, Default)]
pub struct GameComponent {
    /// Lobby owner authority
    pub authority: Pubkey,
    /// 0 = lobby, 1 = running, 2 = ended
    pub state: u8,
    /// Players currently joined
    pub player_count: u16,
    /// Maximum players
    pub max_players: u16,
}

impl GameComponent {
    pub const LEN: usize = 32 + 1 + 2 + 2;
}

/// ApplyDamage system arguments
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, PartialEq)]
pub struct DamageArgs {
    /// Entity address of the victim
    pub victim: Pubkey,
    /// Weapon type the hit came from
    pub weapon_type: u8,
    pub is_headshot: bool,
    /// Attacker-to-victim distance in world units
    pub distance: f32,
}

/// Movement system arguments (position + velocity + facing)
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct MovementArgs {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub rotation: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub velocity_z: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_lens_match_serialized_size() {
        assert_eq!(borsh::to_vec(&PlayerComponent::default()).unwrap().len(), PlayerComponent::LEN);
        assert_eq!(borsh::to_vec(&HealthComponent::default()).unwrap().len(), HealthComponent::LEN);
        assert_eq!(borsh::to_vec(&WeaponComponent::default()).unwrap().len(), WeaponComponent::LEN);
        assert_eq!(
            borsh::to_vec(&PositionComponent::default()).unwrap().len(),
            PositionComponent::LEN
        );
        assert_eq!(
            borsh::to_vec(&PlayerStatsComponent::default()).unwrap().len(),
            PlayerStatsComponent::LEN
        );
        assert_eq!(borsh::to_vec(&GameComponent::default()).unwrap().len(), GameComponent::LEN);
    }

    #[test]
    fn weapon_defaults_match_cache_defaults() {
        let weapon = WeaponComponent::default();
        assert_eq!(weapon.current_slot, 1);
        assert_eq!(weapon.ammo, 30);
        assert_eq!(weapon.max_ammo, 30);
    }

    #[test]
    fn health_roundtrip() {
        let health = HealthComponent {
            health: 55,
            max_health: 100,
            last_damage_ts: 1_700_000_000,
        };
        let bytes = borsh::to_vec(&health).unwrap();
        let decoded = HealthComponent::try_from_slice(&bytes).unwrap();
        assert_eq!(decoded.health, 55);
        assert!(decoded.is_alive());
    }
}
