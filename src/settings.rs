use ctor::ctor;
use tracing::Level;

#[ctor]
fn init_diagnostics() {
    // Logging stays off unless DEBUG_PATHINA is set to something truthy.
    let enabled = std::env::var("DEBUG_PATHINA")
        .map(|v| !(v.is_empty() || v == "0" || v == "false"))
        .unwrap_or(false);
    if enabled {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .init();
    }
}
