//! Delegation Lifecycle Manager
//!
//! Delegating a component account binds it to a rollup validator, which is
//! the precondition for fee-less system execution against that component.
//! Both directions of the lifecycle run on the base layer; the component
//! must already exist before it can be delegated.

use std::sync::Arc;

use bolt_world::constants::DEFAULT_COMMIT_FREQUENCY_MS;
use bolt_world::ComponentKind;
use solana_sdk::{pubkey::Pubkey, signature::Signature};

use crate::builder;
use crate::connection::{ConnectionManager, Layer};
use crate::error::Result;

pub struct DelegationManager {
    connection: Arc<ConnectionManager>,
    /// Validator checkpoint interval back to the base layer. A tuning knob
    /// carried in the delegate instruction, not enforced client-side.
    commit_frequency_ms: u32,
}

impl DelegationManager {
    pub fn new(connection: Arc<ConnectionManager>) -> Self {
        Self {
            connection,
            commit_frequency_ms: DEFAULT_COMMIT_FREQUENCY_MS,
        }
    }

    /// Override the validator commit frequency
    pub fn with_commit_frequency(mut self, commit_frequency_ms: u32) -> Self {
        self.commit_frequency_ms = commit_frequency_ms;
        self
    }

    /// Delegate one component of `entity` to `validator`.
    pub async fn delegate(
        &self,
        component: ComponentKind,
        entity: &Pubkey,
        validator: &Pubkey,
    ) -> Result<Signature> {
        let payer = self.connection.authority();
        let ix = builder::delegate_component(
            component,
            entity,
            validator,
            self.commit_frequency_ms,
            &payer,
        );
        let signature = self.connection.submit(Layer::Base, &[ix]).await?;
        tracing::info!(
            component = component.name(),
            %validator,
            "component delegated"
        );
        Ok(signature)
    }

    /// Revoke a component delegation, disabling fee-less execution for it.
    pub async fn undelegate(
        &self,
        component: ComponentKind,
        entity: &Pubkey,
        validator: &Pubkey,
    ) -> Result<Signature> {
        let payer = self.connection.authority();
        let ix = builder::undelegate_component(component, entity, validator, &payer);
        let signature = self.connection.submit(Layer::Base, &[ix]).await?;
        tracing::info!(component = component.name(), "component undelegated");
        Ok(signature)
    }
}
