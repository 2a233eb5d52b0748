//! Transaction Builder
//!
//! Stateless constructors for the unsigned instructions and transactions the
//! bridge submits: ECS setup (world/entity/component creation), ApplySystem
//! calls, and delegation lifecycle instructions. Account order is positional
//! wire contract with the deployed programs and must be reproduced
//! identically for every invocation.

use borsh::{BorshDeserialize, BorshSerialize};
use bolt_world::{component_pda, delegation_record_pda, ComponentKind, SystemKind};
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    message::Message,
    pubkey::Pubkey,
    system_program,
    transaction::Transaction,
};

/// Root world program instructions
///
/// Accounts for `Apply`:
/// 0. `[signer, writable]` Authority (fee payer on the base layer)
/// 1. `[]` System program being applied
/// 2. `[]` World account (PDA)
/// 3. `[]` Entity account (PDA)
/// 4.. `[]` Component program, `[writable]` component account — one pair per
///    entry of the system's component list, in list order
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug)]
pub enum WorldAction {
    /// Create the world account for a numeric id
    CreateWorld { world_id: u64 },
    /// Create an entity account under an existing world
    CreateEntity { world_id: u64, entity_id: u64 },
    /// Apply a system to an entity; `args` is the system's borsh payload
    Apply { args: Vec<u8> },
}

/// Component program instructions (each component program shares this shape)
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug)]
pub enum ComponentAction {
    /// Create the component account for an entity
    Initialize,
}

/// Delegation program instructions
///
/// Accounts:
/// 0. `[signer, writable]` Payer
/// 1. `[writable]` Delegated component account (PDA)
/// 2. `[]` Component owner program
/// 3. `[writable]` Delegation record (PDA)
/// 4. `[]` Rollup validator identity
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug)]
pub enum DelegationAction {
    /// Bind the account to a validator for fee-less rollup execution
    Delegate { commit_frequency_ms: u32 },
    /// Revoke the binding
    Undelegate,
}

/// Instruction creating the world account for `world_id`.
pub fn create_world(world_id: u64, payer: &Pubkey) -> Instruction {
    Instruction::new_with_borsh(
        bolt_world::SOLFPS_PROGRAM,
        &WorldAction::CreateWorld { world_id },
        vec![
            AccountMeta::new(*payer, true),
            AccountMeta::new(bolt_world::world_pda(world_id), false),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
    )
}

/// Instruction creating the entity account for `(world_id, entity_id)`.
pub fn create_entity(world_id: u64, entity_id: u64, payer: &Pubkey) -> Instruction {
    Instruction::new_with_borsh(
        bolt_world::SOLFPS_PROGRAM,
        &WorldAction::CreateEntity { world_id, entity_id },
        vec![
            AccountMeta::new(*payer, true),
            AccountMeta::new_readonly(bolt_world::world_pda(world_id), false),
            AccountMeta::new(bolt_world::entity_pda(world_id, entity_id), false),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
    )
}

/// Instruction creating a component account on its owning program.
pub fn create_component(component: ComponentKind, entity: &Pubkey, payer: &Pubkey) -> Instruction {
    let program = component.program_id();
    Instruction::new_with_borsh(
        program,
        &ComponentAction::Initialize,
        vec![
            AccountMeta::new(*payer, true),
            AccountMeta::new_readonly(*entity, false),
            AccountMeta::new(component_pda(&program, entity), false),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
    )
}

/// ApplySystem instruction: run `system` against `entity` with the given
/// ordered component list. `args` is the borsh-encoded system payload (empty
/// for systems without arguments).
pub fn build_system_call(
    world: &Pubkey,
    entity: &Pubkey,
    components: &[ComponentKind],
    system: SystemKind,
    authority: &Pubkey,
    args: Vec<u8>,
) -> Instruction {
    let mut accounts = vec![
        AccountMeta::new(*authority, true),
        AccountMeta::new_readonly(system.program_id(), false),
        AccountMeta::new_readonly(*world, false),
        AccountMeta::new_readonly(*entity, false),
    ];
    for component in components {
        let program = component.program_id();
        accounts.push(AccountMeta::new_readonly(program, false));
        accounts.push(AccountMeta::new(component_pda(&program, entity), false));
    }

    Instruction::new_with_borsh(bolt_world::SOLFPS_PROGRAM, &WorldAction::Apply { args }, accounts)
}

/// Unsigned transaction wrapping a single system call.
///
/// The recent blockhash is left at default; the connection manager fills it in
/// from the target layer immediately before signing.
pub fn build_system_transaction(
    world: &Pubkey,
    entity: &Pubkey,
    components: &[ComponentKind],
    system: SystemKind,
    authority: &Pubkey,
    args: Vec<u8>,
) -> Transaction {
    let ix = build_system_call(world, entity, components, system, authority, args);
    Transaction::new_unsigned(Message::new(&[ix], Some(authority)))
}

/// Instruction delegating a component account to a rollup validator.
pub fn delegate_component(
    component: ComponentKind,
    entity: &Pubkey,
    validator: &Pubkey,
    commit_frequency_ms: u32,
    payer: &Pubkey,
) -> Instruction {
    let program = component.program_id();
    let account = component_pda(&program, entity);
    Instruction::new_with_borsh(
        bolt_world::DELEGATION_PROGRAM,
        &DelegationAction::Delegate { commit_frequency_ms },
        vec![
            AccountMeta::new(*payer, true),
            AccountMeta::new(account, false),
            AccountMeta::new_readonly(program, false),
            AccountMeta::new(delegation_record_pda(&account), false),
            AccountMeta::new_readonly(*validator, false),
        ],
    )
}

/// Instruction revoking a component delegation.
pub fn undelegate_component(
    component: ComponentKind,
    entity: &Pubkey,
    validator: &Pubkey,
    payer: &Pubkey,
) -> Instruction {
    let program = component.program_id();
    let account = component_pda(&program, entity);
    Instruction::new_with_borsh(
        bolt_world::DELEGATION_PROGRAM,
        &DelegationAction::Undelegate,
        vec![
            AccountMeta::new(*payer, true),
            AccountMeta::new(account, false),
            AccountMeta::new_readonly(program, false),
            AccountMeta::new(delegation_record_pda(&account), false),
            AccountMeta::new_readonly(*validator, false),
        ],
    )
}
