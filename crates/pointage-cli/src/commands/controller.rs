//! Controller account commands

use crate::runtime::PointageRuntime;
use anyhow::{bail, Context, Result};
use clap::Subcommand;
use pointage_attendance::format_date_time;
use pointage_controllers::ControllerUpdate;
use std::time::Duration;

/// Controller management commands
#[derive(Debug, Clone, Subcommand)]
pub enum ControllerCommand {
    /// Create a controller account
    Create {
        /// Display name
        #[arg(long)]
        name: String,
        /// 4-digit agent ID; allocated when omitted
        #[arg(long)]
        agent_id: Option<String>,
        /// 4-digit PIN; generated and printed once when omitted
        #[arg(long)]
        password: Option<String>,
        /// Department whose numbering band to allocate from
        #[arg(long)]
        department: Option<String>,
    },

    /// List every controller, active or not
    List,

    /// Show one controller
    Show {
        /// Agent ID to look up
        agent_id: String,
    },

    /// Change a controller's name and/or PIN
    Update {
        /// Agent ID to change
        agent_id: String,
        /// New display name
        #[arg(long)]
        name: Option<String>,
        /// New 4-digit PIN
        #[arg(long)]
        password: Option<String>,
    },

    /// Deactivate a controller
    Deactivate {
        /// Agent ID to deactivate
        agent_id: String,
    },

    /// Check a controller's credentials
    Login {
        /// Agent ID
        agent_id: String,
        /// 4-digit PIN
        pin: String,
        /// Give up after this many milliseconds
        #[arg(long, default_value_t = 5000)]
        timeout_ms: u64,
    },

    /// Print the next free agent ID
    NextId {
        /// Department whose numbering band to use
        #[arg(long)]
        department: Option<String>,
    },

    /// Print candidate PINs
    Passwords {
        /// How many to print (configured default when omitted)
        #[arg(long)]
        count: Option<usize>,
    },

    /// Print a digest-free snapshot of the registry
    Diagnose,

    /// Hash digests that were stored as raw PINs
    RepairDigests,

    /// Delete every controller
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

/// Run a controller command
pub async fn handle_controller_command(
    cmd: ControllerCommand,
    runtime: &PointageRuntime,
) -> Result<()> {
    let store = &runtime.store;
    match cmd {
        ControllerCommand::Create {
            name,
            agent_id,
            password,
            department,
        } => {
            let agent_id = match (agent_id, department) {
                (Some(id), _) => id,
                (None, Some(department)) => store.suggest_agent_id(&department).await?,
                (None, None) => store.generate_unique_agent_id().await?,
            };
            let generated = password.is_none();
            let password = match password {
                Some(pin) => pin,
                None => store
                    .generate_password_options(1)
                    .await
                    .into_iter()
                    .next()
                    .context("PIN generator produced no code")?,
            };

            store.create(&agent_id, &password, &name).await?;
            println!("Created controller {agent_id} ({name})");
            if generated {
                println!("PIN: {password} (shown once, write it down)");
            }
        }

        ControllerCommand::List => {
            let accounts = store.get_all().await;
            if accounts.is_empty() {
                println!("No controllers");
            }
            for account in accounts {
                println!(
                    "{}  {:<24}  {:<8}  created {}",
                    account.agent_id,
                    account.name,
                    if account.is_active { "active" } else { "inactive" },
                    format_date_time(account.created_at, runtime.offset)
                );
            }
        }

        ControllerCommand::Show { agent_id } => match store.lookup(&agent_id).await {
            Some(status) => println!("{}", serde_json::to_string_pretty(&status)?),
            None => bail!("No controller with agent ID {agent_id}"),
        },

        ControllerCommand::Update {
            agent_id,
            name,
            password,
        } => {
            if name.is_none() && password.is_none() {
                bail!("Nothing to update: pass --name and/or --password");
            }
            let changes = ControllerUpdate { name, password };
            store.update(&agent_id, changes).await?;
            println!("Updated controller {agent_id}");
        }

        ControllerCommand::Deactivate { agent_id } => {
            store.deactivate(&agent_id).await?;
            println!("Deactivated controller {agent_id}");
        }

        ControllerCommand::Login {
            agent_id,
            pin,
            timeout_ms,
        } => {
            let attempt = store.authenticate(&agent_id, &pin);
            let accepted = tokio::time::timeout(Duration::from_millis(timeout_ms), attempt)
                .await
                .context("Login timed out")?;
            if !accepted {
                bail!("Invalid agent ID or PIN");
            }
            println!("Welcome, controller {agent_id}");
        }

        ControllerCommand::NextId { department } => {
            let id = match department {
                Some(department) => store.suggest_agent_id(&department).await?,
                None => store.generate_unique_agent_id().await?,
            };
            println!("{id}");
        }

        ControllerCommand::Passwords { count } => {
            let count = count.unwrap_or(runtime.option_count);
            for code in store.generate_password_options(count).await {
                println!("{code}");
            }
        }

        ControllerCommand::Diagnose => {
            let diagnostics = store.diagnostics().await;
            println!("{}", serde_json::to_string_pretty(&diagnostics)?);
        }

        ControllerCommand::RepairDigests => {
            let repaired = store.repair_digests().await?;
            println!("Repaired {repaired} digest(s)");
        }

        ControllerCommand::Clear { yes } => {
            if !yes {
                bail!("Refusing to delete every controller without --yes");
            }
            store.clear_all().await?;
            println!("All controllers deleted");
        }
    }
    Ok(())
}
