//! `RouteGuard` component.
//!
//! The guard outcome is a memo over `(session, pathname)` holding the decision
//! and the path it was computed for. Memos only notify when their value
//! changes, so the redirect effect below runs once per `(decision, path)`
//! change. Output is chosen from the memoized decision, never from the raw
//! session signal.

use leptos::*;
use leptos_router::{use_location, use_navigate, NavigateOptions};

use ticketdesk_auth::Session;
use ticketdesk_guard::{GuardDecision, Render as GuardRender, RouteGuard as Guard};

/// Session snapshot shared with every guarded subtree.
#[derive(Debug, Clone, Copy)]
pub struct SessionContext(pub RwSignal<Session>);

pub fn provide_session(session: RwSignal<Session>) {
    provide_context(SessionContext(session));
}

/// Falls back to a permanently loading session when no provider is mounted.
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().unwrap_or_else(|| {
        tracing::warn!("no SessionContext provided; guard will stay pending");
        SessionContext(create_rw_signal(Session::loading()))
    })
}

/// Renders `children` only when the guard allows the current path.
#[component]
pub fn RouteGuard(
    children: ChildrenFn,
    /// Route tables and redirect targets; the built-in ones by default.
    #[prop(optional)]
    guard: Option<Guard>,
) -> impl IntoView {
    let guard = store_value(guard.unwrap_or_default());
    let SessionContext(session) = use_session();
    let location = use_location();
    let navigate = use_navigate();

    let outcome: Memo<(GuardDecision, String)> = create_memo(move |_| {
        let path = location.pathname.get();
        let decision = session.with(|snapshot| guard.with_value(|g| g.evaluate(snapshot, &path)));
        (decision, path)
    });
    let decision = create_memo(move |_| outcome.with(|(decision, _)| *decision));

    create_effect(move |_| {
        let decision = outcome.with(|(decision, _)| *decision);
        if let Some(target) = guard.with_value(|g| g.redirect_target(decision).map(str::to_string)) {
            navigate(
                &target,
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
    });

    move || match decision.get().render() {
        GuardRender::Placeholder => view! { <div class="route-guard-loading">"Loading…"</div> }.into_view(),
        GuardRender::Children => children().into_view(),
        GuardRender::Nothing => ().into_view(),
    }
}
