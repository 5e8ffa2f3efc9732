//! # Till Register Entry Point
//!
//! ```text
//! client ──(JSON lines)──► stdin ─► till-register ─► stdout ──► client
//!                                        │
//!                                        └─► stderr (tracing logs)
//! ```

fn main() -> std::io::Result<()> {
    // The actual setup is in lib.rs for better testability
    till_register::run()
}
