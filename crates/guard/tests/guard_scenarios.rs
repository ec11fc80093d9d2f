use std::borrow::Cow;

use chrono::{Duration as ChronoDuration, Utc};
use proptest::prelude::*;
use ticketdesk_auth::{Permission, Session, SessionError, SessionProvider, User};
use ticketdesk_core::UserId;
use ticketdesk_guard::{
    classify, GuardController, GuardDecision, MemoryRouter, Navigator, Render, RouteGuard,
    RoutePermissionTable, RouteRule,
};

/// Signed-in session whose permission answers are scripted by the test.
struct ScriptedProvider {
    session: Session,
    granted: Vec<Permission>,
}

impl ScriptedProvider {
    fn signed_in(granted: &[Permission]) -> Self {
        Self {
            session: Session::signed_in(User::new(UserId::new(), "u@example.com", "U")),
            granted: granted.to_vec(),
        }
    }
}

impl SessionProvider for ScriptedProvider {
    fn session(&self) -> Cow<'_, Session> {
        Cow::Borrowed(&self.session)
    }

    fn has_permission(&self, permission: Permission) -> bool {
        self.granted.contains(&permission)
    }
}

fn permissioned_paths() -> Vec<(&'static str, Permission)> {
    RoutePermissionTable::default()
        .rules()
        .iter()
        .map(|rule| match rule {
            RouteRule::Prefix { prefix, permission } => match prefix {
                std::borrow::Cow::Borrowed(p) => (*p, *permission),
                std::borrow::Cow::Owned(_) => unreachable!("built-in rules are static"),
            },
            RouteRule::ExactRoot { permission } => ("/", *permission),
        })
        .collect()
}

#[test]
fn scenario_anonymous_on_tickets_goes_to_login() {
    let guard = RouteGuard::default();
    assert_eq!(guard.evaluate(&Session::signed_out(), "/tickets"), GuardDecision::RedirectLogin);
}

#[test]
fn scenario_signed_in_on_login_goes_home() {
    let guard = RouteGuard::default();
    let provider = ScriptedProvider::signed_in(&Permission::ALL);
    assert_eq!(guard.evaluate(&provider, "/auth/login"), GuardDecision::RedirectHome);
}

#[test]
fn scenario_admin_without_view_admin_is_forbidden() {
    let guard = RouteGuard::default();
    let provider = ScriptedProvider::signed_in(&[Permission::ViewDashboard, Permission::ViewTickets]);
    assert_eq!(guard.evaluate(&provider, "/admin"), GuardDecision::RedirectForbidden);
}

#[test]
fn scenario_new_ticket_uses_create_ticket_rule() {
    let guard = RouteGuard::default();
    // Only create_ticket: the general /tickets rule would have forbidden this.
    let provider = ScriptedProvider::signed_in(&[Permission::CreateTicket]);
    assert_eq!(guard.evaluate(&provider, "/tickets/new"), GuardDecision::Allow);
}

#[test]
fn scenario_loading_root_pends_without_navigation() {
    let mut controller = GuardController::default();
    let mut router = MemoryRouter::new("/");

    let obs = controller.sync(&Session::loading(), &mut router);
    assert_eq!(obs.decision, GuardDecision::Pending);
    assert_eq!(obs.render, Render::Placeholder);
    assert_eq!(obs.redirect, None);
    assert_eq!(router.history(), ["/"]);
}

#[test]
fn every_permissioned_prefix_follows_has_permission() {
    let guard = RouteGuard::default();
    for (path, permission) in permissioned_paths() {
        let denied = ScriptedProvider::signed_in(&[]);
        let granted = ScriptedProvider::signed_in(&[permission]);
        assert_eq!(guard.evaluate(&denied, path), GuardDecision::RedirectForbidden, "{path}");
        assert_eq!(guard.evaluate(&granted, path), GuardDecision::Allow, "{path}");
    }
}

#[test]
fn denied_page_is_not_reachable_with_back() {
    let mut controller = GuardController::default();
    let mut router = MemoryRouter::new("/");
    let provider = ScriptedProvider::signed_in(&[Permission::ViewDashboard]);

    controller.sync(&provider, &mut router);
    router.push("/admin");
    let obs = controller.sync(&provider, &mut router);
    assert_eq!(obs.decision, GuardDecision::RedirectForbidden);
    assert_eq!(obs.render, Render::Nothing);
    assert_eq!(router.current_path(), "/403");

    assert!(router.back());
    assert_eq!(router.current_path(), "/");
    assert!(!router.history().iter().any(|p| p == "/admin"));
}

#[test]
fn session_resolving_late_cancels_login_redirect() {
    let mut controller = GuardController::default();
    let mut router = MemoryRouter::new("/tickets");

    // First render: session still resolving.
    let obs = controller.sync(&Session::loading(), &mut router);
    assert_eq!(obs.decision, GuardDecision::Pending);

    // A token-refresh glitch briefly reports "signed out", scheduling a redirect
    // that has not run yet when the session finally resolves.
    let stale = controller
        .observe(&Session::signed_out(), "/tickets")
        .redirect
        .expect("login redirect scheduled");
    let resolved = ScriptedProvider::signed_in(&[Permission::ViewTickets]);
    let obs = controller.observe(&resolved, "/tickets");
    assert_eq!(obs.decision, GuardDecision::Allow);

    assert!(!controller.execute(stale, &mut router));
    assert_eq!(router.current_path(), "/tickets");
}

#[test]
fn failed_session_resolution_behaves_as_signed_out() {
    let guard = RouteGuard::default();
    let session = Session::from_resolution(Err(SessionError::InvalidToken), Utc::now());
    assert_eq!(guard.evaluate(&session, "/dashboard"), GuardDecision::RedirectLogin);
    assert_eq!(guard.evaluate(&session, "/auth/forgot-password"), GuardDecision::Allow);

    let expired = User::new(UserId::new(), "old@example.com", "Old")
        .expiring_at(Utc::now() - ChronoDuration::minutes(1));
    let session = Session::from_resolution(Ok(expired), Utc::now());
    assert_eq!(guard.evaluate(&session, "/"), GuardDecision::RedirectLogin);
}

#[test]
fn classify_agrees_with_default_guard() {
    let guard = RouteGuard::default();
    for path in ["/", "/tickets", "/tickets/new", "/auth/login", "/nowhere"] {
        assert_eq!(guard.classify(path), classify(path), "{path}");
    }
}

fn arb_path() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("/".to_string()),
        Just("/auth/login".to_string()),
        Just("/auth/reset-password/token".to_string()),
        Just("/tickets".to_string()),
        Just("/tickets/new".to_string()),
        Just("/admin".to_string()),
        "/[a-z]{1,12}(/[a-z0-9]{1,8})?",
    ]
}

fn arb_session() -> impl Strategy<Value = (Session, Vec<Permission>)> {
    (
        any::<bool>(),
        any::<bool>(),
        proptest::sample::subsequence(Permission::ALL.to_vec(), 0..=6),
    )
        .prop_map(|(loading, with_user, granted)| {
            let user = with_user.then(|| User::new(UserId::new(), "p@example.com", "P"));
            (Session { user, loading }, granted)
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    /// Property: loading sessions always pend and never navigate.
    #[test]
    fn loading_never_navigates(path in arb_path(), (session, granted) in arb_session()) {
        let provider = ScriptedProvider { session: Session { loading: true, ..session }, granted };
        let mut controller = GuardController::default();
        let mut router = MemoryRouter::new(path.clone());

        let obs = controller.sync(&provider, &mut router);
        prop_assert_eq!(obs.decision, GuardDecision::Pending);
        prop_assert_eq!(router.current_path(), path);
    }

    /// Property: the same snapshot twice gives the same decision and at most one navigation.
    #[test]
    fn observation_is_idempotent(path in arb_path(), (session, granted) in arb_session()) {
        let provider = ScriptedProvider { session, granted };
        let mut controller = GuardController::default();

        let first = controller.observe(&provider, &path);
        let second = controller.observe(&provider, &path);
        prop_assert_eq!(first.decision, second.decision);

        let mut router = MemoryRouter::new(path.clone());
        let executed = [first.redirect, second.redirect]
            .into_iter()
            .flatten()
            .filter(|ticket| controller.execute(ticket.clone(), &mut router))
            .count();
        prop_assert!(executed <= 1);
        prop_assert_eq!(executed == 1, first.decision.is_redirect());
    }

    /// Property: render output is a function of the decision only.
    #[test]
    fn render_follows_decision(path in arb_path(), (session, granted) in arb_session()) {
        let provider = ScriptedProvider { session, granted };
        let mut controller = GuardController::default();
        let obs = controller.observe(&provider, &path);
        prop_assert_eq!(obs.render, obs.decision.render());
        if obs.decision != GuardDecision::Allow {
            prop_assert_ne!(obs.render, Render::Children);
        }
    }
}
