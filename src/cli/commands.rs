//! CLI command implementations

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::auth::{InMemoryUserRepository, PasswordPolicy, UserRepository};
use crate::http_server::{AppState, HttpServer};
use crate::plan::generate_plan;
use crate::store::FileUserRepository;
use crate::telemetry::init_telemetry;

use super::args::Command;
use super::config::AppConfig;
use super::errors::{CliError, CliResult};
use super::io::{read_profile, write_json};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Serve { config } => serve(&config),
        Command::Plan { input } => plan(input.as_deref()),
    }
}

/// Write a default configuration file
pub fn init(config_path: &Path) -> CliResult<()> {
    AppConfig::default().write_new(config_path)?;
    write_json(&serde_json::json!({
        "initialized": true,
        "config": config_path.display().to_string(),
    }))
}

/// Start the HTTP API server
///
/// Startup sequence:
/// 1. Configuration load
/// 2. Telemetry
/// 3. User store open
/// 4. Administrator seed
/// 5. Serve until Ctrl-C
pub fn serve(config_path: &Path) -> CliResult<()> {
    let config = AppConfig::load(config_path)?;
    init_telemetry(&config.log_level);

    let state = Arc::new(build_state(&config)?);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    let server = HttpServer::with_state(config.server.clone(), state);

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Generate a plan for a profile and print it
pub fn plan(input: Option<&Path>) -> CliResult<()> {
    let profile = read_profile(input)?;
    write_json(&generate_plan(&profile))
}

/// Build application state from configuration and seed the administrator
pub fn build_state(config: &AppConfig) -> CliResult<AppState> {
    let users: Arc<dyn UserRepository> = match &config.data_file {
        Some(path) => {
            let repo = FileUserRepository::open(path.clone()).map_err(|e| {
                CliError::config_error(format!(
                    "Failed to open user store {}: {}",
                    path.display(),
                    e
                ))
            })?;
            info!(path = %path.display(), "user store opened");
            Arc::new(repo)
        }
        None => {
            info!("user store is in-memory; accounts are lost on exit");
            Arc::new(InMemoryUserRepository::new())
        }
    };

    let state = AppState::new(users, config.session_config(), PasswordPolicy::default());

    if let Some(admin) = &config.admin {
        let seeded = state
            .auth
            .ensure_admin(&admin.email, &admin.forename, &admin.surname, &admin.password)
            .map_err(|e| CliError::config_error(format!("Failed to seed admin: {}", e)))?;
        if let Some(user) = seeded {
            info!(user_id = %user.id, email = %user.email, "administrator seeded");
        }
    }

    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::user::LoginRequest;
    use crate::cli::config::BootstrapAdmin;

    fn admin_config(data_file: Option<std::path::PathBuf>) -> AppConfig {
        AppConfig {
            data_file,
            admin: Some(BootstrapAdmin {
                email: "admin@example.com".to_string(),
                password: "Adm1n!pass".to_string(),
                forename: "Ada".to_string(),
                surname: "Admin".to_string(),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_state_seeds_admin() {
        let state = build_state(&admin_config(None)).unwrap();
        let (_, token) = state
            .auth
            .login(
                LoginRequest {
                    email: "admin@example.com".to_string(),
                    password: "Adm1n!pass".to_string(),
                },
                None,
            )
            .unwrap();
        assert!(state.auth.authenticate_admin(&token).is_ok());
    }

    #[test]
    fn test_build_state_persists_to_data_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");

        build_state(&admin_config(Some(path.clone()))).unwrap();
        assert!(path.exists());

        // Second start finds the admin already present.
        let state = build_state(&admin_config(Some(path))).unwrap();
        assert_eq!(state.auth.list_users().unwrap().len(), 1);
    }

    #[test]
    fn test_init_refuses_existing_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("finplan.json");
        std::fs::write(&path, "{}").unwrap();

        let err = init(&path).unwrap_err();
        assert_eq!(err.code_str(), "FINPLAN_CLI_ALREADY_INITIALIZED");
    }
}
