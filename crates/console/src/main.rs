//! `ticketdesk-guard-check`: validate the guard configuration and explain
//! decisions for a set of paths.
//!
//! Usage: `ticketdesk-guard-check PATH...`
//!
//! - `TICKETDESK_GUARD_CONFIG`: JSON guard config (built-in tables when unset)
//! - `TICKETDESK_SESSION_FILE`: JSON session snapshot (signed out when unset)

use anyhow::Context;

use ticketdesk_auth::Session;
use ticketdesk_console::session_from_json;
use ticketdesk_guard::GuardConfig;

const SESSION_ENV_VAR: &str = "TICKETDESK_SESSION_FILE";

fn load_session() -> anyhow::Result<Session> {
    let Some(path) = std::env::var_os(SESSION_ENV_VAR) else {
        return Ok(Session::signed_out());
    };
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("reading session {}", path.to_string_lossy()))?;
    session_from_json(&raw).with_context(|| format!("parsing session {}", path.to_string_lossy()))
}

fn main() -> anyhow::Result<()> {
    ticketdesk_observability::init();

    let guard = GuardConfig::from_env()?.into_guard()?;
    let session = load_session()?;
    tracing::info!(
        rules = guard.classifier().table().rules().len(),
        signed_in = session.user.is_some(),
        "guard configuration valid"
    );

    for path in std::env::args().skip(1) {
        let explanation = guard.explain(&session, &path);
        println!("{}", serde_json::to_string(&explanation)?);
    }
    Ok(())
}
