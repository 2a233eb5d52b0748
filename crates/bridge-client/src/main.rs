//! SolFPS Bridge CLI
//!
//! Operator tooling around the action bridge: player initialization, game
//! setup, delegation management and a scripted end-to-end demo against a
//! local or devnet deployment.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use action_bridge::{GameBridge, GameBridgeConfig, KeypairWallet, Wallet};
use anyhow::{Context, Result};
use bolt_world::NetworkEnv;
use clap::{Parser, Subcommand};
use solana_sdk::pubkey::Pubkey;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// SolFPS dual-layer action bridge
#[derive(Parser, Debug)]
#[command(name = "solfps-bridge")]
#[command(about = "Drive the SolFPS on-chain ECS over the base and rollup layers", long_about = None)]
struct Args {
    /// Network environment (local, devnet-asia, devnet-global)
    #[arg(long, default_value = "local")]
    env: String,

    /// Path to the payer keypair (id.json format)
    #[arg(long, default_value = "./id.json")]
    keypair: PathBuf,

    /// World id the player entity lives under
    #[arg(long, default_value = "1")]
    world_id: u64,

    /// Entity id of the player
    #[arg(long, default_value = "1")]
    entity_id: u64,

    /// Checkpoint file for resumable initialization
    #[arg(long)]
    checkpoint: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create world, entity and player components, delegating each one
    InitPlayer,
    /// Create the game component and record the game address
    InitGame,
    /// Join a game by address
    Join {
        /// Game account address
        game: String,
    },
    /// Delegate all player components for fee-less gameplay
    Delegate {
        /// Validator to delegate to (defaults to the environment's)
        #[arg(long)]
        validator: Option<String>,
    },
    /// Revoke all player component delegations
    Undelegate,
    /// Show session, checkpoint and endpoint status
    Status,
    /// Scripted smoke run: init, join, ready, start, fight, leave
    Demo,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let env: NetworkEnv = args.env.parse()?;
    let wallet = load_wallet(&args.keypair)?;
    tracing::info!(%env, authority = %wallet.pubkey(), "starting bridge client");

    let mut config = GameBridgeConfig::new(wallet, env.validator())
        .with_world(args.world_id)
        .with_entity(args.entity_id);
    if let Some(path) = args.checkpoint {
        config = config.with_checkpoint_path(path);
    }
    let bridge = GameBridge::for_env(env, config)?;

    match args.command {
        Command::InitPlayer => {
            bridge.init_player().await?;
            tracing::info!("player initialized and delegated");
        }
        Command::InitGame => {
            bridge.init_game().await?;
            let game = bridge.game_state().game_address;
            tracing::info!(?game, "game created");
        }
        Command::Join { game } => {
            let game = Pubkey::from_str(&game).context("invalid game address")?;
            let signature = bridge.join_game(game).await?;
            tracing::info!(%game, %signature, "joined game");
        }
        Command::Delegate { validator } => {
            let validator = validator
                .map(|v| Pubkey::from_str(&v))
                .transpose()
                .context("invalid validator address")?;
            bridge.delegate_for_gasless(validator).await?;
            tracing::info!("player components delegated");
        }
        Command::Undelegate => {
            bridge.undelegate_from_gasless(env.validator()).await?;
            tracing::info!("player components undelegated");
        }
        Command::Status => {
            let status = bridge.connection_status();
            let checkpoint = bridge.init_checkpoint();
            tracing::info!(authority = %status.authority, "session authority");
            tracing::info!(base = %status.base_url, rollup = %status.rollup_url, "endpoints");
            tracing::info!(
                completed = checkpoint.completed_steps,
                complete = checkpoint.is_complete(),
                "initialization progress"
            );
        }
        Command::Demo => run_demo(&bridge).await?,
    }

    Ok(())
}

/// Load a wallet from the 64-byte JSON array keypair format.
fn load_wallet(path: &Path) -> Result<Arc<dyn Wallet>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading keypair {}", path.display()))?;
    let bytes: Vec<u8> = serde_json::from_str(&raw).context("keypair is not a JSON byte array")?;
    let wallet = KeypairWallet::from_bytes(&bytes)?;
    Ok(Arc::new(wallet))
}

/// End-to-end smoke run against live endpoints.
async fn run_demo(bridge: &GameBridge) -> Result<()> {
    tracing::info!("demo: initializing player");
    bridge.init_player().await?;

    tracing::info!("demo: creating game");
    bridge.init_game().await?;
    let game = bridge
        .game_state()
        .game_address
        .context("game address missing after init_game")?;
    bridge
        .delegate_component(bolt_world::ComponentKind::Game, None)
        .await?;

    tracing::info!(%game, "demo: joining game");
    bridge.join_game(game).await?;
    bridge.set_ready(true).await?;
    bridge.start_game().await?;

    tracing::info!("demo: firing and reloading");
    bridge.shoot(1).await?;
    bridge.shoot(1).await?;
    bridge.reload(1).await?;
    bridge.switch_weapon(2).await?;
    bridge
        .update_movement(12.0, 0.0, -4.5, 1.2, 0.5, 0.0, 0.0)
        .await?;

    let state = bridge.game_state();
    tracing::info!(
        health = state.health,
        ammo = state.ammo,
        weapon = state.current_weapon,
        "demo: cached state after combat"
    );

    tracing::info!("demo: leaving game");
    bridge.end_game().await?;
    bridge.leave_game().await?;
    tracing::info!("demo complete");
    Ok(())
}
