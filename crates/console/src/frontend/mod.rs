//! Leptos frontend: session context and the `RouteGuard` component.

pub mod app;
pub mod guard;

pub use guard::{provide_session, use_session, RouteGuard, SessionContext};

use leptos::*;
use wasm_bindgen::prelude::*;

use ticketdesk_auth::Session;

use crate::host::session_from_json;

/// Handle the host page uses to publish session snapshots into the console.
#[wasm_bindgen]
pub struct ConsoleHandle {
    session: RwSignal<Session>,
}

#[wasm_bindgen]
impl ConsoleHandle {
    /// Replace the session snapshot with a JSON-encoded `Session`.
    #[wasm_bindgen(js_name = setSession)]
    pub fn set_session(&self, json: &str) -> Result<(), JsValue> {
        let session = session_from_json(json).map_err(|e| JsValue::from_str(&format!("{e:#}")))?;
        self.session.set(session);
        Ok(())
    }

    /// Session resolution failed; the guard treats this as signed out.
    #[wasm_bindgen(js_name = signOut)]
    pub fn sign_out(&self) {
        self.session.set(Session::signed_out());
    }
}

/// WASM entry point: mount the console with an unresolved session.
///
/// The guard shows its loading placeholder until the host page calls
/// `setSession` or `signOut` on the returned handle.
#[wasm_bindgen(js_name = mountConsole)]
pub fn mount_console() -> ConsoleHandle {
    // Better panic messages in the browser console.
    console_error_panic_hook::set_once();

    let session = create_rw_signal(Session::loading());
    leptos::mount_to_body(move || view! { <app::App session=session/> });
    ConsoleHandle { session }
}
