//! Initialization Orchestrator
//!
//! Brings a fresh player online: world, entity, then each player component
//! created and immediately delegated, strictly one confirmed step at a time.
//! Later steps depend on accounts produced by earlier ones, so this is a
//! sequential pipeline, never a batch.
//!
//! A failed run leaves durable on-chain state behind. Each step records a
//! checkpoint after confirmation and checks for an existing target account
//! before creating one, so a retried run resumes where the last one stopped
//! instead of replaying completed steps.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use bolt_world::{entity_pda, world_pda, ComponentKind, PLAYER_COMPONENTS};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::builder;
use crate::connection::{ConnectionManager, Layer};
use crate::delegation::DelegationManager;
use crate::error::{BridgeError, Result};

/// One step of the initialization pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStep {
    World,
    Entity,
    CreateComponent(ComponentKind),
    DelegateComponent(ComponentKind),
}

impl fmt::Display for InitStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitStep::World => write!(f, "create world"),
            InitStep::Entity => write!(f, "create entity"),
            InitStep::CreateComponent(c) => write!(f, "create {} component", c.name()),
            InitStep::DelegateComponent(c) => write!(f, "delegate {} component", c.name()),
        }
    }
}

/// Full step sequence: world, entity, then create+delegate per component in
/// the fixed player component order.
pub fn step_sequence() -> Vec<InitStep> {
    let mut steps = vec![InitStep::World, InitStep::Entity];
    for component in PLAYER_COMPONENTS {
        steps.push(InitStep::CreateComponent(component));
        steps.push(InitStep::DelegateComponent(component));
    }
    steps
}

/// Persistent record of initialization progress
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitCheckpoint {
    pub world_id: u64,
    pub entity_id: u64,
    /// Number of leading steps of [`step_sequence`] already confirmed
    pub completed_steps: usize,
    pub updated_at: DateTime<Utc>,
}

impl InitCheckpoint {
    fn new(world_id: u64, entity_id: u64) -> Self {
        Self {
            world_id,
            entity_id,
            completed_steps: 0,
            updated_at: Utc::now(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.completed_steps >= step_sequence().len()
    }
}

pub struct InitOrchestrator {
    connection: Arc<ConnectionManager>,
    delegation: DelegationManager,
    world_id: u64,
    entity_id: u64,
    validator: Pubkey,
    checkpoint: Mutex<InitCheckpoint>,
    checkpoint_path: Option<PathBuf>,
}

impl InitOrchestrator {
    pub fn new(
        connection: Arc<ConnectionManager>,
        world_id: u64,
        entity_id: u64,
        validator: Pubkey,
    ) -> Self {
        let delegation = DelegationManager::new(connection.clone());
        Self {
            connection,
            delegation,
            world_id,
            entity_id,
            validator,
            checkpoint: Mutex::new(InitCheckpoint::new(world_id, entity_id)),
            checkpoint_path: None,
        }
    }

    /// Persist checkpoints to disk so a fresh process can resume.
    ///
    /// A checkpoint already on disk for the same (world, entity) pair is
    /// loaded immediately; a mismatched one is ignored and overwritten.
    pub fn with_checkpoint_path(mut self, path: PathBuf) -> Self {
        if let Ok(raw) = std::fs::read_to_string(&path) {
            match serde_json::from_str::<InitCheckpoint>(&raw) {
                Ok(saved) if saved.world_id == self.world_id && saved.entity_id == self.entity_id => {
                    tracing::info!(
                        completed = saved.completed_steps,
                        "loaded initialization checkpoint"
                    );
                    *self.checkpoint.lock() = saved;
                }
                Ok(_) => tracing::warn!("checkpoint on disk is for a different player, ignoring"),
                Err(e) => tracing::warn!("unreadable checkpoint, ignoring: {e}"),
            }
        }
        self.checkpoint_path = Some(path);
        self
    }

    pub fn checkpoint(&self) -> InitCheckpoint {
        self.checkpoint.lock().clone()
    }

    /// Run (or resume) the initialization pipeline to completion.
    pub async fn run(&self) -> Result<()> {
        let steps = step_sequence();
        let start = self.checkpoint.lock().completed_steps;
        if start >= steps.len() {
            tracing::info!("initialization already complete");
            return Ok(());
        }

        tracing::info!(
            world_id = self.world_id,
            entity_id = self.entity_id,
            resume_from = start,
            total = steps.len(),
            "starting player initialization"
        );

        for (index, step) in steps.iter().enumerate().skip(start) {
            self.execute_step(*step)
                .await
                .map_err(|e| BridgeError::InitIncomplete {
                    step: *step,
                    source: Box::new(e),
                })?;
            self.record_progress(index + 1)?;
        }

        tracing::info!("player initialization complete");
        Ok(())
    }

    async fn execute_step(&self, step: InitStep) -> Result<()> {
        let payer = self.connection.authority();
        let entity = entity_pda(self.world_id, self.entity_id);

        match step {
            InitStep::World => {
                let world = world_pda(self.world_id);
                if self.connection.account_exists(Layer::Base, &world).await? {
                    tracing::debug!(%world, "world already exists, skipping");
                    return Ok(());
                }
                let ix = builder::create_world(self.world_id, &payer);
                self.connection.submit(Layer::Base, &[ix]).await?;
                tracing::info!(%world, "world created");
            }
            InitStep::Entity => {
                if self.connection.account_exists(Layer::Base, &entity).await? {
                    tracing::debug!(%entity, "entity already exists, skipping");
                    return Ok(());
                }
                let ix = builder::create_entity(self.world_id, self.entity_id, &payer);
                self.connection.submit(Layer::Base, &[ix]).await?;
                tracing::info!(%entity, "entity created");
            }
            InitStep::CreateComponent(component) => {
                let address = bolt_world::component_pda(&component.program_id(), &entity);
                if self.connection.account_exists(Layer::Base, &address).await? {
                    tracing::debug!(component = component.name(), "component already exists, skipping");
                    return Ok(());
                }
                let ix = builder::create_component(component, &entity, &payer);
                self.connection.submit(Layer::Base, &[ix]).await?;
                tracing::info!(component = component.name(), %address, "component created");
            }
            InitStep::DelegateComponent(component) => {
                self.delegation
                    .delegate(component, &entity, &self.validator)
                    .await?;
            }
        }
        Ok(())
    }

    /// Create the Game component for this entity on the base layer.
    ///
    /// Returns the game address the session cache should carry. The game
    /// lives at the world account of this deployment, matching the on-chain
    /// program's expectation of one lobby per world.
    pub async fn init_game(&self) -> Result<Pubkey> {
        let payer = self.connection.authority();
        let entity = entity_pda(self.world_id, self.entity_id);
        let address = bolt_world::component_pda(&ComponentKind::Game.program_id(), &entity);

        if !self.connection.account_exists(Layer::Base, &address).await? {
            let ix = builder::create_component(ComponentKind::Game, &entity, &payer);
            self.connection.submit(Layer::Base, &[ix]).await?;
            tracing::info!(%address, "game component created");
        }

        Ok(world_pda(self.world_id))
    }

    fn record_progress(&self, completed: usize) -> Result<()> {
        let mut checkpoint = self.checkpoint.lock();
        checkpoint.completed_steps = completed;
        checkpoint.updated_at = Utc::now();

        if let Some(path) = &self.checkpoint_path {
            let json = serde_json::to_string_pretty(&*checkpoint)
                .map_err(|e| BridgeError::Config(format!("checkpoint encode: {e}")))?;
            std::fs::write(path, json)
                .map_err(|e| BridgeError::Config(format!("checkpoint write: {e}")))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_sequence_interleaves_create_and_delegate() {
        let steps = step_sequence();
        assert_eq!(steps.len(), 12);
        assert_eq!(steps[0], InitStep::World);
        assert_eq!(steps[1], InitStep::Entity);
        assert_eq!(steps[2], InitStep::CreateComponent(ComponentKind::Player));
        assert_eq!(steps[3], InitStep::DelegateComponent(ComponentKind::Player));
        assert_eq!(
            steps[11],
            InitStep::DelegateComponent(ComponentKind::PlayerStats)
        );
    }

    #[test]
    fn checkpoint_completion() {
        let mut checkpoint = InitCheckpoint::new(1, 1);
        assert!(!checkpoint.is_complete());
        checkpoint.completed_steps = step_sequence().len();
        assert!(checkpoint.is_complete());
    }

    #[test]
    fn checkpoint_round_trips_through_json() {
        let checkpoint = InitCheckpoint {
            world_id: 3,
            entity_id: 9,
            completed_steps: 5,
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&checkpoint).unwrap();
        let decoded: InitCheckpoint = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.world_id, 3);
        assert_eq!(decoded.completed_steps, 5);
    }
}
