//! Bolt World - fixed on-chain addresses and derivation for the SolFPS ECS
//!
//! The game world lives on a Bolt-style ECS: entities carry typed component
//! accounts, and fixed system programs mutate them through the root world
//! program. This crate holds the deployed program addresses, the pure PDA
//! derivation used everywhere else, and borsh mirrors of the component
//! account layouts for client-side deserialization.
//!
//! Nothing in here performs I/O.

use solana_sdk::pubkey::Pubkey;

pub mod address;
pub mod component;
pub mod network;

pub use address::{component_pda, delegation_record_pda, entity_pda, world_pda};
pub use component::{
    DamageArgs, GameComponent, HealthComponent, MovementArgs, PlayerComponent,
    PlayerStatsComponent, PositionComponent, WeaponComponent,
};
pub use network::{EndpointConfig, NetworkEnv};

// ============ Component Programs ============

pub const GAME_COMPONENT: Pubkey =
    solana_sdk::pubkey!("DyjiisyNGjj2vb5SG5Upf2v4Q63rSbGax6vpEiXUVeut");
pub const PLAYER_COMPONENT: Pubkey =
    solana_sdk::pubkey!("5r3VuhkgUJj1ToYPVhZfD7e88e6AEnqhPURtRso9aCeh");
pub const HEALTH_COMPONENT: Pubkey =
    solana_sdk::pubkey!("ELyBMdiFKysGvm3u2KFCqJoiD4YcCY5qWtRxCjaaLm5W");
pub const WEAPON_COMPONENT: Pubkey =
    solana_sdk::pubkey!("3Dw1S5VX8QbyvxTmjgaLViRqKATh2PYX5bjSP6bpkHLc");
pub const POSITION_COMPONENT: Pubkey =
    solana_sdk::pubkey!("CDFTYv8oBAgpduT7vcUFRE32d3Wypuj6r7AwchfXEs4k");
pub const PLAYER_STATS_COMPONENT: Pubkey =
    solana_sdk::pubkey!("51PMj35BCPyHeKhJLmxF6i22cKkasitfZPhSVbmX9d8m");

// ============ System Programs ============

pub const INIT_PLAYER_SYSTEM: Pubkey =
    solana_sdk::pubkey!("FwwTc1UnMYDj2P7eHby2GVtxdP7gQaq8XnPUPZHoJNfy");
pub const INIT_GAME_SYSTEM: Pubkey =
    solana_sdk::pubkey!("GXVJqpVuUEkufDjFhzLcX64gs3JTaog9z7yj8mwuWVP9");
pub const JOIN_GAME_SYSTEM: Pubkey =
    solana_sdk::pubkey!("253SWqcBw5p1TA62C8zhncH6ijdxhx3ErwMNjEJ5QZXX");
pub const LEAVE_GAME_SYSTEM: Pubkey =
    solana_sdk::pubkey!("D8DZEXX46QvUNMhhEeDGdopcrz9Gogh9hPBLZMdLi1kn");
pub const SET_READY_SYSTEM: Pubkey =
    solana_sdk::pubkey!("5EcjaFZnZhHzguj66PYFfdxSDTftmf1QjTZQu3CYsDwA");
pub const START_GAME_SYSTEM: Pubkey =
    solana_sdk::pubkey!("DiwnvUwsQQwJdUVcPvSrRR9BnVCmCo1x3MWuLktunErL");
pub const END_GAME_SYSTEM: Pubkey =
    solana_sdk::pubkey!("7gWFh8SSrdiAod8CkHHCygzwYD3qcF5LidDYo27EHqmh");
pub const SHOOT_SYSTEM: Pubkey =
    solana_sdk::pubkey!("7XuvYvaEG7V8VnVKkxQwrfd9RKPvcJ5LsbZRUTu9YcQw");
pub const RELOAD_SYSTEM: Pubkey =
    solana_sdk::pubkey!("CCMW8iY2AXakbHF173V7G2ZNrNUCXym9Yge3bJng4YAG");
pub const APPLY_DAMAGE_SYSTEM: Pubkey =
    solana_sdk::pubkey!("CXWqvJ2NTQhtaXD4S6p8LbafitCPXYf4gk9paujePYSp");
pub const SWITCH_WEAPON_SYSTEM: Pubkey =
    solana_sdk::pubkey!("Eg9ouayrW4VT42wM8dMxRmxDmgfizH2C7LS3VceGpzfV");
pub const RESPAWN_SYSTEM: Pubkey =
    solana_sdk::pubkey!("EmPykaPt5GLtnJ5CUhSPo3vd59Ksbn8feTmxvkr8igUV");
pub const MOVEMENT_SYSTEM: Pubkey =
    solana_sdk::pubkey!("6XWj2L5VmG1MU12AT3vF94PNeRQFstxwHt4WwBKimqS4");

// ============ Root / Delegation Programs ============

/// Root world program that executes ApplySystem calls.
pub const SOLFPS_PROGRAM: Pubkey =
    solana_sdk::pubkey!("9VNXswMdQsTJh71GSjSVVULYcMCuoQmWcgT9bAJ6WiFS");

/// Delegation program binding component accounts to a rollup validator.
pub const DELEGATION_PROGRAM: Pubkey =
    solana_sdk::pubkey!("DELeGGvXpWV2fqJUhqcF5ZSYMS4JTLjteaAMARRSaeSh");

/// Constants
pub mod constants {
    // PDA seeds
    /// World account seed
    pub const WORLD_SEED: &[u8] = b"world";
    /// Entity account seed
    pub const ENTITY_SEED: &[u8] = b"entity";
    /// Component account seed
    pub const COMPONENT_SEED: &[u8] = b"component";
    /// Delegation record seed
    pub const DELEGATION_SEED: &[u8] = b"delegation";

    // Cache defaults
    /// Default player health
    pub const DEFAULT_HEALTH: u16 = 100;
    /// Default maximum health
    pub const DEFAULT_MAX_HEALTH: u16 = 100;
    /// Default magazine size
    pub const DEFAULT_AMMO: u16 = 30;
    /// Default maximum ammo
    pub const DEFAULT_MAX_AMMO: u16 = 30;
    /// Default equipped weapon slot
    pub const DEFAULT_WEAPON_SLOT: u8 = 1;

    /// Default validator commit frequency back to the base layer
    pub const DEFAULT_COMMIT_FREQUENCY_MS: u32 = 30_000;
}

/// Component types attached to player entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Game,
    Player,
    Health,
    Weapon,
    Position,
    PlayerStats,
}

impl ComponentKind {
    /// Owning program of this component type
    pub fn program_id(self) -> Pubkey {
        match self {
            ComponentKind::Game => GAME_COMPONENT,
            ComponentKind::Player => PLAYER_COMPONENT,
            ComponentKind::Health => HEALTH_COMPONENT,
            ComponentKind::Weapon => WEAPON_COMPONENT,
            ComponentKind::Position => POSITION_COMPONENT,
            ComponentKind::PlayerStats => PLAYER_STATS_COMPONENT,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ComponentKind::Game => "game",
            ComponentKind::Player => "player",
            ComponentKind::Health => "health",
            ComponentKind::Weapon => "weapon",
            ComponentKind::Position => "position",
            ComponentKind::PlayerStats => "player_stats",
        }
    }
}

/// The five player component types, in creation/delegation order.
///
/// The initialization pipeline walks this list in order; the order is part of
/// the on-chain account layout contract and must not change.
pub const PLAYER_COMPONENTS: [ComponentKind; 5] = [
    ComponentKind::Player,
    ComponentKind::Health,
    ComponentKind::Weapon,
    ComponentKind::Position,
    ComponentKind::PlayerStats,
];

/// Fixed, addressed on-chain systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemKind {
    InitPlayer,
    InitGame,
    JoinGame,
    LeaveGame,
    SetReady,
    StartGame,
    EndGame,
    Shoot,
    Reload,
    ApplyDamage,
    SwitchWeapon,
    Respawn,
    Movement,
}

impl SystemKind {
    /// Program address of this system
    pub fn program_id(self) -> Pubkey {
        match self {
            SystemKind::InitPlayer => INIT_PLAYER_SYSTEM,
            SystemKind::InitGame => INIT_GAME_SYSTEM,
            SystemKind::JoinGame => JOIN_GAME_SYSTEM,
            SystemKind::LeaveGame => LEAVE_GAME_SYSTEM,
            SystemKind::SetReady => SET_READY_SYSTEM,
            SystemKind::StartGame => START_GAME_SYSTEM,
            SystemKind::EndGame => END_GAME_SYSTEM,
            SystemKind::Shoot => SHOOT_SYSTEM,
            SystemKind::Reload => RELOAD_SYSTEM,
            SystemKind::ApplyDamage => APPLY_DAMAGE_SYSTEM,
            SystemKind::SwitchWeapon => SWITCH_WEAPON_SYSTEM,
            SystemKind::Respawn => RESPAWN_SYSTEM,
            SystemKind::Movement => MOVEMENT_SYSTEM,
        }
    }

    /// Ordered component account list each system expects.
    ///
    /// The on-chain programs resolve accounts positionally, so the same list
    /// must be reproduced identically for every invocation of a system.
    pub fn component_set(self) -> &'static [ComponentKind] {
        use ComponentKind::*;
        match self {
            SystemKind::InitPlayer => &[Player, Health, Weapon, Position, PlayerStats],
            SystemKind::InitGame => &[Game],
            SystemKind::JoinGame
            | SystemKind::LeaveGame
            | SystemKind::SetReady
            | SystemKind::StartGame
            | SystemKind::EndGame => &[Player, Game],
            SystemKind::Shoot => &[Player, Weapon, Position],
            SystemKind::Reload => &[Player, Weapon],
            SystemKind::ApplyDamage => &[Player, Weapon, Health, PlayerStats, Position, Game],
            SystemKind::SwitchWeapon => &[Weapon],
            SystemKind::Respawn => &[Player, Health, Position],
            SystemKind::Movement => &[Player, Position],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SystemKind::InitPlayer => "init_player",
            SystemKind::InitGame => "init_game",
            SystemKind::JoinGame => "join_game",
            SystemKind::LeaveGame => "leave_game",
            SystemKind::SetReady => "set_ready",
            SystemKind::StartGame => "start_game",
            SystemKind::EndGame => "end_game",
            SystemKind::Shoot => "shoot",
            SystemKind::Reload => "reload",
            SystemKind::ApplyDamage => "apply_damage",
            SystemKind::SwitchWeapon => "switch_weapon",
            SystemKind::Respawn => "respawn",
            SystemKind::Movement => "movement",
        }
    }
}
