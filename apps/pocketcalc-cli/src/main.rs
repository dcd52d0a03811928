//! # pocketcalc Entry Point
//!
//! The actual setup is in lib.rs for better testability.

fn main() -> anyhow::Result<()> {
    pocketcalc_cli::run()?;
    Ok(())
}
