//! Game Session - consumer-facing bridge surface
//!
//! One [`GameBridge`] per player session. Lobby and combat calls route to the
//! rollup layer, initialization and delegation to the base layer. Gameplay
//! calls are serialized through a single-flight lock so optimistic cache
//! updates apply in the order their transactions confirmed.

use std::path::PathBuf;
use std::sync::Arc;

use bolt_world::{entity_pda, world_pda, ComponentKind, DamageArgs, MovementArgs, NetworkEnv,
    SystemKind, PLAYER_COMPONENTS};
use borsh::BorshSerialize;
use parking_lot::RwLock;
use solana_sdk::{pubkey::Pubkey, signature::Signature};
use tokio::sync::Mutex;

use crate::builder;
use crate::connection::{ConnectionManager, ConnectionStatus, Layer};
use crate::delegation::DelegationManager;
use crate::error::{BridgeError, Result};
use crate::orchestrator::InitOrchestrator;
use crate::rpc::LedgerRpc;
use crate::state::{GameState, SessionPhase};
use crate::wallet::Wallet;

/// Construction parameters for a bridge instance
pub struct GameBridgeConfig {
    pub wallet: Arc<dyn Wallet>,
    /// Rollup validator components are delegated to
    pub validator: Pubkey,
    pub world_id: u64,
    pub entity_id: u64,
    pub checkpoint_path: Option<PathBuf>,
}

impl GameBridgeConfig {
    pub fn new(wallet: Arc<dyn Wallet>, validator: Pubkey) -> Self {
        Self {
            wallet,
            validator,
            world_id: 1,
            entity_id: 1,
            checkpoint_path: None,
        }
    }

    pub fn with_world(mut self, world_id: u64) -> Self {
        self.world_id = world_id;
        self
    }

    pub fn with_entity(mut self, entity_id: u64) -> Self {
        self.entity_id = entity_id;
        self
    }

    pub fn with_checkpoint_path(mut self, path: PathBuf) -> Self {
        self.checkpoint_path = Some(path);
        self
    }
}

/// Action bridge for one player session
pub struct GameBridge {
    connection: Arc<ConnectionManager>,
    orchestrator: InitOrchestrator,
    delegation: DelegationManager,
    world_id: u64,
    entity_id: u64,
    validator: Pubkey,
    state: RwLock<GameState>,
    phase: RwLock<SessionPhase>,
    /// Single-flight lock over every call that mutates the cache
    flight: Mutex<()>,
}

impl GameBridge {
    /// Build a bridge over explicit ledger sessions.
    pub fn new(
        config: GameBridgeConfig,
        base: Arc<dyn LedgerRpc>,
        rollup: Arc<dyn LedgerRpc>,
    ) -> Self {
        let connection = Arc::new(ConnectionManager::new(base, rollup, config.wallet));
        let mut orchestrator = InitOrchestrator::new(
            connection.clone(),
            config.world_id,
            config.entity_id,
            config.validator,
        );
        if let Some(path) = config.checkpoint_path {
            orchestrator = orchestrator.with_checkpoint_path(path);
        }
        let delegation = DelegationManager::new(connection.clone());

        Self {
            connection,
            orchestrator,
            delegation,
            world_id: config.world_id,
            entity_id: config.entity_id,
            validator: config.validator,
            state: RwLock::new(GameState::new(config.world_id, config.entity_id)),
            phase: RwLock::new(SessionPhase::Disconnected),
            flight: Mutex::new(()),
        }
    }

    /// Build a bridge against the endpoints of a named environment.
    pub fn for_env(env: NetworkEnv, config: GameBridgeConfig) -> Result<Self> {
        let base = crate::rpc::HttpLedgerRpc::new(&env.base().rpc_url)?;
        let rollup = crate::rpc::HttpLedgerRpc::new(&env.rollup().rpc_url)?;
        Ok(Self::new(config, Arc::new(base), Arc::new(rollup)))
    }

    // ============ Initialization ============

    /// Run the initialization pipeline: world, entity, the five player
    /// components each created and delegated, one confirmed step at a time.
    pub async fn init_player(&self) -> Result<()> {
        let _flight = self.flight.lock().await;
        *self.phase.write() = SessionPhase::Initializing;

        match self.orchestrator.run().await {
            Ok(()) => {
                {
                    let mut state = self.state.write();
                    state.player_address = Some(self.connection.authority());
                }
                *self.phase.write() = SessionPhase::Idle;
                Ok(())
            }
            Err(e) => {
                // Progress is checkpointed; a retry resumes from the failed step.
                *self.phase.write() = SessionPhase::Disconnected;
                Err(e)
            }
        }
    }

    /// Create the game/lobby for this deployment and record its address.
    pub async fn init_game(&self) -> Result<()> {
        let _flight = self.flight.lock().await;
        self.require_initialized()?;
        let game = self.orchestrator.init_game().await?;
        self.state.write().game_address = Some(game);
        Ok(())
    }

    // ============ Lobby ============

    /// Join an existing game.
    pub async fn join_game(&self, game: Pubkey) -> Result<Signature> {
        let _flight = self.flight.lock().await;
        if self.state.read().is_in_game {
            return Err(BridgeError::AlreadyInGame);
        }

        let signature = self.apply_system(SystemKind::JoinGame, vec![]).await?;
        self.state.write().record_join(game);
        *self.phase.write() = SessionPhase::InLobby;
        tracing::info!(%game, "joined game");
        Ok(signature)
    }

    /// Leave the current game; resets the cache to constructed defaults.
    pub async fn leave_game(&self) -> Result<Signature> {
        let _flight = self.flight.lock().await;
        self.require_in_game()?;

        let signature = self.apply_system(SystemKind::LeaveGame, vec![]).await?;
        self.state.write().reset();
        *self.phase.write() = SessionPhase::Idle;
        tracing::info!("left game");
        Ok(signature)
    }

    /// Set the lobby ready flag.
    pub async fn set_ready(&self, ready: bool) -> Result<Signature> {
        let _flight = self.flight.lock().await;
        self.require_in_game()?;

        let signature = self
            .apply_system(SystemKind::SetReady, encode_args(&ready)?)
            .await?;
        self.state.write().is_ready = ready;
        Ok(signature)
    }

    /// Start the game (lobby owner only; readiness is validated on-chain).
    pub async fn start_game(&self) -> Result<Signature> {
        let _flight = self.flight.lock().await;
        self.require_in_game()?;

        let signature = self.apply_system(SystemKind::StartGame, vec![]).await?;
        *self.phase.write() = SessionPhase::InGame;
        tracing::info!("game started");
        Ok(signature)
    }

    /// End the current match and return to the lobby. The player stays in
    /// the game (lobby membership and game address are kept); only the ready
    /// flag is cleared. Leaving entirely is `leave_game`.
    pub async fn end_game(&self) -> Result<Signature> {
        let _flight = self.flight.lock().await;
        self.require_in_game()?;

        let signature = self.apply_system(SystemKind::EndGame, vec![]).await?;
        self.state.write().record_end_game();
        *self.phase.write() = SessionPhase::InLobby;
        tracing::info!("game ended");
        Ok(signature)
    }

    // ============ Combat ============

    /// Fire the weapon in `weapon_slot`. Ammo is decremented locally when the
    /// slot matches the equipped weapon.
    pub async fn shoot(&self, weapon_slot: u8) -> Result<Signature> {
        let _flight = self.flight.lock().await;
        self.require_in_game()?;

        let signature = self
            .apply_system(SystemKind::Shoot, encode_args(&weapon_slot)?)
            .await?;
        self.state.write().record_shot(weapon_slot);
        Ok(signature)
    }

    /// Reload the weapon in `weapon_slot`.
    pub async fn reload(&self, weapon_slot: u8) -> Result<Signature> {
        let _flight = self.flight.lock().await;
        self.require_in_game()?;

        let signature = self
            .apply_system(SystemKind::Reload, encode_args(&weapon_slot)?)
            .await?;
        self.state.write().record_reload(weapon_slot);
        Ok(signature)
    }

    /// Report a hit on another player. The victim's state changes on-chain
    /// only; our own cache is untouched until reconciliation.
    pub async fn apply_damage(
        &self,
        victim: Pubkey,
        weapon_type: u8,
        is_headshot: bool,
        distance: f32,
    ) -> Result<Signature> {
        let _flight = self.flight.lock().await;
        self.require_in_game()?;

        let args = DamageArgs {
            victim,
            weapon_type,
            is_headshot,
            distance,
        };
        self.apply_system(SystemKind::ApplyDamage, encode_args(&args)?)
            .await
    }

    /// Equip a weapon slot.
    pub async fn switch_weapon(&self, weapon_slot: u8) -> Result<Signature> {
        let _flight = self.flight.lock().await;
        self.require_in_game()?;

        let signature = self
            .apply_system(SystemKind::SwitchWeapon, encode_args(&weapon_slot)?)
            .await?;
        self.state.write().record_weapon_switch(weapon_slot);
        Ok(signature)
    }

    /// Respawn after death; restores health locally.
    pub async fn respawn(&self) -> Result<Signature> {
        let _flight = self.flight.lock().await;
        self.require_in_game()?;

        let signature = self.apply_system(SystemKind::Respawn, vec![]).await?;
        self.state.write().record_respawn();
        Ok(signature)
    }

    // ============ Movement ============

    /// Push a movement update. Position is not mirrored client-side, so the
    /// cache is untouched. Transient submission failures are logged and
    /// swallowed: movement is high-frequency and a dropped update must not
    /// interrupt gameplay. The not-in-game precondition still surfaces.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_movement(
        &self,
        x: f32,
        y: f32,
        z: f32,
        rotation: f32,
        velocity_x: f32,
        velocity_y: f32,
        velocity_z: f32,
    ) -> Result<()> {
        let _flight = self.flight.lock().await;
        self.require_in_game()?;

        let args = MovementArgs {
            x,
            y,
            z,
            rotation,
            velocity_x,
            velocity_y,
            velocity_z,
        };
        match self
            .apply_system(SystemKind::Movement, encode_args(&args)?)
            .await
        {
            Ok(_) => Ok(()),
            Err(e) => {
                tracing::warn!("movement update dropped: {e}");
                Ok(())
            }
        }
    }

    // ============ Delegation ============

    /// Delegate all player components to a rollup validator, enabling
    /// fee-less gameplay transactions. Defaults to the session validator.
    pub async fn delegate_for_gasless(&self, validator: Option<Pubkey>) -> Result<()> {
        let validator = validator.unwrap_or(self.validator);
        let entity = self.entity();
        for component in PLAYER_COMPONENTS {
            self.delegation
                .delegate(component, &entity, &validator)
                .await?;
        }
        Ok(())
    }

    /// Revoke the delegation of all player components. Rollup calls against
    /// them will be rejected until they are delegated again.
    pub async fn undelegate_from_gasless(&self, validator: Pubkey) -> Result<()> {
        let entity = self.entity();
        for component in PLAYER_COMPONENTS.iter().rev() {
            self.delegation
                .undelegate(*component, &entity, &validator)
                .await?;
        }
        Ok(())
    }

    /// Delegate a single component (exposed for recovery tooling).
    pub async fn delegate_component(
        &self,
        component: ComponentKind,
        validator: Option<Pubkey>,
    ) -> Result<Signature> {
        let validator = validator.unwrap_or(self.validator);
        self.delegation
            .delegate(component, &self.entity(), &validator)
            .await
    }

    // ============ Snapshots ============

    /// Immutable snapshot of the cached game state.
    pub fn game_state(&self) -> GameState {
        self.state.read().clone()
    }

    pub fn phase(&self) -> SessionPhase {
        *self.phase.read()
    }

    pub fn is_in_game(&self) -> bool {
        self.state.read().is_in_game
    }

    pub fn connection_status(&self) -> ConnectionStatus {
        self.connection.status()
    }

    /// Snapshot of initialization progress (for status display and recovery).
    pub fn init_checkpoint(&self) -> crate::orchestrator::InitCheckpoint {
        self.orchestrator.checkpoint()
    }

    // ============ Internal ============

    pub(crate) fn connection(&self) -> &Arc<ConnectionManager> {
        &self.connection
    }

    pub(crate) fn entity(&self) -> Pubkey {
        entity_pda(self.world_id, self.entity_id)
    }

    pub(crate) fn write_state(&self) -> parking_lot::RwLockWriteGuard<'_, GameState> {
        self.state.write()
    }

    pub(crate) fn set_phase(&self, phase: SessionPhase) {
        *self.phase.write() = phase;
    }

    fn require_in_game(&self) -> Result<()> {
        if self.state.read().is_in_game {
            Ok(())
        } else {
            Err(BridgeError::NotInGame)
        }
    }

    fn require_initialized(&self) -> Result<()> {
        if self.state.read().player_address.is_some() {
            Ok(())
        } else {
            Err(BridgeError::NotInitialized)
        }
    }

    /// Route a gameplay system call to the rollup layer.
    async fn apply_system(&self, system: SystemKind, args: Vec<u8>) -> Result<Signature> {
        let world = world_pda(self.world_id);
        let entity = self.entity();
        let ix = builder::build_system_call(
            &world,
            &entity,
            system.component_set(),
            system,
            &self.connection.authority(),
            args,
        );
        let signature = self.connection.submit(Layer::Rollup, &[ix]).await?;
        tracing::debug!(system = system.name(), %signature, "system applied");
        Ok(signature)
    }
}

fn encode_args<T: BorshSerialize>(value: &T) -> Result<Vec<u8>> {
    borsh::to_vec(value).map_err(|e| BridgeError::Deserialize(format!("system args: {e}")))
}
