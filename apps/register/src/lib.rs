//! # Till Register Library
//!
//! Host process for one Till POS register. Reads one JSON command per line
//! on stdin and writes one JSON response per line on stdout; logs go to
//! stderr.
//!
//! ## Module Organization
//! ```text
//! till_register/
//! ├── lib.rs          ◄─── You are here (setup & line loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── session.rs  ◄─── Sale session wrapper
//! │   ├── inventory.rs◄─── Stock levels
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Request, Response, dispatch
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   ├── checkout.rs ◄─── Payment commands
//! │   └── ...
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Example Session
//! ```text
//! > {"command":"add_to_cart","itemId":1}
//! < {"ok":{"lines":[{"itemId":1,"name":"Wireless Earbuds",...}],...}}
//! > {"command":"open_payment"}
//! < {"ok":{"amountDue":14039,"amountDueDisplay":"$140.39",...}}
//! > {"command":"confirm_payment","tenderType":"cash","amount":"150"}
//! < {"ok":{"record":{"transactionId":"K3Z9A0QB","change":961,...},...}}
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::io::{self, BufRead, Write};

use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use commands::{dispatch, Request, Response};
use error::ApiError;
use state::{ConfigState, InventoryState, SessionState};

/// Encoded when a response itself cannot be serialized.
const ENCODE_FAILURE: &str =
    r#"{"error":{"code":"INTERNAL","message":"Failed to encode response"}}"#;

/// A register: its session, stock levels and configuration.
#[derive(Debug, Clone)]
pub struct Register {
    session: SessionState,
    inventory: InventoryState,
    config: ConfigState,
}

impl Register {
    pub fn new(config: ConfigState) -> Self {
        Register {
            session: SessionState::from_config(&config),
            inventory: InventoryState::default(),
            config,
        }
    }

    pub fn config(&self) -> &ConfigState {
        &self.config
    }

    /// Parses and executes one input line.
    pub fn handle(&self, line: &str) -> Result<serde_json::Value, ApiError> {
        let request: Request = serde_json::from_str(line).map_err(|e| {
            warn!(error = %e, "Malformed command");
            ApiError::validation(format!("Invalid command: {}", e))
        })?;

        let command = request.name();
        let result = dispatch(request, &self.session, &self.inventory, &self.config);
        if let Err(err) = &result {
            warn!(command, code = ?err.code, message = %err.message, "Command rejected");
        }
        result
    }

    /// Executes one input line and encodes the response line.
    pub fn handle_line(&self, line: &str) -> String {
        let response = Response::from(self.handle(line));
        serde_json::to_string(&response).unwrap_or_else(|_| ENCODE_FAILURE.to_string())
    }
}

impl Default for Register {
    fn default() -> Self {
        Register::new(ConfigState::default())
    }
}

/// Runs the register over stdin/stdout until input closes.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Register Startup                                  │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, stderr                        │
/// │     • Default: info, debug for till crates; RUST_LOG overrides          │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • Defaults overridden by TILL_* environment variables               │
/// │                                                                         │
/// │  3. Initialize State Objects ─────────────────────────────────────────► │
/// │     • SessionState: sample catalog, configured tax and tenders          │
/// │     • InventoryState: sample stock levels                               │
/// │                                                                         │
/// │  4. Serve ────────────────────────────────────────────────────────────► │
/// │     • One response line per command line until EOF                      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> io::Result<()> {
    init_tracing();

    info!("Starting Till POS register");

    let config = ConfigState::from_env();
    info!(
        store = %config.store_name,
        tax_rate_bps = config.tax_rate_bps,
        rounding = ?config.tax_rounding,
        tenders = ?config.accepted_tenders,
        "Configuration loaded"
    );

    let register = Register::new(config);
    let stdin = io::stdin();
    let stdout = io::stdout();
    serve(&register, stdin.lock(), stdout.lock())?;

    info!("Input closed, register stopped");
    Ok(())
}

/// Reads commands from `input` and writes one response line each to
/// `output`. Blank lines are skipped.
pub fn serve(register: &Register, input: impl BufRead, mut output: impl Write) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        debug!(bytes = line.len(), "Command received");
        writeln!(output, "{}", register.handle_line(line))?;
        output.flush()?;
    }
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=till=trace` - Show trace for till crates only
/// - Default: INFO, DEBUG for till crates
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,till=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
