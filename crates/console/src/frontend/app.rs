//! Console shell: router + guard around the routed pages.
//!
//! Page bodies live with their feature modules; the placeholders here only
//! mark where each route mounts.

use leptos::*;
use leptos_router::*;

use ticketdesk_auth::Session;

use crate::frontend::guard::{provide_session, RouteGuard};

#[component]
pub fn App(session: RwSignal<Session>) -> impl IntoView {
    provide_session(session);

    view! {
        <Router>
            <RouteGuard>
                <Routes>
                    <Route path="/" view=|| view! { <Page title="Dashboard"/> }/>
                    <Route path="/dashboard" view=|| view! { <Page title="Dashboard"/> }/>
                    <Route path="/tickets" view=|| view! { <Page title="Tickets"/> }/>
                    <Route path="/tickets/new" view=|| view! { <Page title="New ticket"/> }/>
                    <Route path="/tickets/:id" view=|| view! { <Page title="Ticket"/> }/>
                    <Route path="/chat" view=|| view! { <Page title="Chat"/> }/>
                    <Route path="/recommendations" view=|| view! { <Page title="Recommendations"/> }/>
                    <Route path="/admin/*any" view=|| view! { <Page title="Administration"/> }/>
                    <Route path="/auth/login" view=|| view! { <Page title="Sign in"/> }/>
                    <Route path="/auth/signup" view=|| view! { <Page title="Sign up"/> }/>
                    <Route path="/auth/forgot-password" view=|| view! { <Page title="Forgot password"/> }/>
                    <Route path="/auth/reset-password" view=|| view! { <Page title="Reset password"/> }/>
                    <Route path="/403" view=|| view! { <Page title="Access denied"/> }/>
                </Routes>
            </RouteGuard>
        </Router>
    }
}

#[component]
fn Page(title: &'static str) -> impl IntoView {
    view! {
        <main class="page">
            <h1>{title}</h1>
        </main>
    }
}
