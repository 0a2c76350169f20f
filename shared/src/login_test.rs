use super::*;
use crate::error::AuthError;

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::oneshot;
use futures::executor::block_on;
use futures::FutureExt;

// =============================================================
// Fakes
// =============================================================

#[derive(Default)]
struct FakeAuth {
    user: RefCell<Option<CurrentUserResponse>>,
    reply: RefCell<Option<Result<bool, AuthError>>>,
    pending: RefCell<Option<oneshot::Receiver<Result<bool, AuthError>>>>,
    calls: RefCell<Vec<(String, String)>>,
}

impl FakeAuth {
    fn replying(reply: Result<bool, AuthError>) -> Rc<Self> {
        let auth = Self::default();
        *auth.reply.borrow_mut() = Some(reply);
        Rc::new(auth)
    }

    fn signed_in() -> Rc<Self> {
        let auth = Self::default();
        *auth.user.borrow_mut() = Some(user());
        Rc::new(auth)
    }

    fn hold(&self) -> oneshot::Sender<Result<bool, AuthError>> {
        let (tx, rx) = oneshot::channel();
        *self.pending.borrow_mut() = Some(rx);
        tx
    }
}

impl Authenticator for FakeAuth {
    type Error = AuthError;

    fn login<'a>(
        &'a self,
        email: &'a str,
        password: &'a str,
    ) -> LocalBoxFuture<'a, Result<bool, AuthError>> {
        self.calls
            .borrow_mut()
            .push((email.to_string(), password.to_string()));
        let pending = self.pending.borrow_mut().take();
        let reply = self.reply.borrow().clone().unwrap_or(Ok(false));
        async move {
            match pending {
                Some(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(AuthError::Network("canceled".into()))),
                None => reply,
            }
        }
        .boxed_local()
    }

    fn current_user(&self) -> Option<CurrentUserResponse> {
        self.user.borrow().clone()
    }
}

#[derive(Default)]
struct RecordingNavigator {
    replaced: RefCell<Vec<String>>,
}

impl Navigator for RecordingNavigator {
    fn replace(&self, path: &str) {
        self.replaced.borrow_mut().push(path.to_string());
    }
}

#[derive(Default, Clone)]
struct MapScope(HashMap<String, String>);

impl MapScope {
    fn with_flag(value: Option<&str>) -> Self {
        let mut map = HashMap::new();
        if let Some(value) = value {
            map.insert(LOGGED_OUT_KEY.to_string(), value.to_string());
        }
        Self(map)
    }
}

impl KeyValueScope for MapScope {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }
}

type TestView = LoginView<
    Rc<FakeAuth>,
    Rc<RecordingNavigator>,
    DualScopeOverride<MapScope, MapScope>,
>;

fn user() -> CurrentUserResponse {
    CurrentUserResponse {
        user_id: 1,
        email: "teknisyen@edeon.com.tr".into(),
        name: "Teknisyen".into(),
    }
}

fn view(
    auth: &Rc<FakeAuth>,
    nav: &Rc<RecordingNavigator>,
    session_flag: Option<&str>,
    durable_flag: Option<&str>,
    previous: Option<&str>,
) -> TestView {
    LoginView::new(
        auth.clone(),
        nav.clone(),
        DualScopeOverride::new(
            MapScope::with_flag(session_flag),
            MapScope::with_flag(durable_flag),
        ),
        previous.map(str::to_string),
    )
}

fn poll_once<F: Future>(fut: Pin<&mut F>) -> Poll<F::Output> {
    let mut cx = Context::from_waker(futures::task::noop_waker_ref());
    fut.poll(&mut cx)
}

// =============================================================
// Redirect target & logged-out flag
// =============================================================

#[test]
fn redirect_target_prefers_previous_path() {
    assert_eq!(redirect_target(Some("/arizalar/12")), "/arizalar/12");
}

#[test]
fn redirect_target_defaults_when_missing_or_empty() {
    assert_eq!(redirect_target(None), DEFAULT_REDIRECT);
    assert_eq!(redirect_target(Some("")), DEFAULT_REDIRECT);
}

#[test]
fn logged_out_flag_set_in_either_scope() {
    let session_only =
        DualScopeOverride::new(MapScope::with_flag(Some("true")), MapScope::default());
    let durable_only =
        DualScopeOverride::new(MapScope::default(), MapScope::with_flag(Some("true")));
    assert!(session_only.is_logged_out());
    assert!(durable_only.is_logged_out());
}

#[test]
fn logged_out_flag_requires_literal_true() {
    for value in [None, Some("false"), Some("TRUE"), Some("1"), Some("")] {
        let overrides =
            DualScopeOverride::new(MapScope::with_flag(value), MapScope::with_flag(value));
        assert!(!overrides.is_logged_out(), "{value:?} should not count");
    }
}

// =============================================================
// Mount
// =============================================================

#[test]
fn mount_with_flag_never_redirects() {
    let auth = FakeAuth::signed_in();
    let flags = [
        (Some("true"), None),
        (None, Some("true")),
        (Some("true"), Some("true")),
    ];
    for (session, durable) in flags {
        let nav = Rc::new(RecordingNavigator::default());
        let outcome = view(&auth, &nav, session, durable, Some("/raporlar")).mount();
        assert_eq!(outcome, MountOutcome::StayLoggedOut);
        assert!(nav.replaced.borrow().is_empty());
    }
}

#[test]
fn mount_with_session_redirects_once_to_previous_path() {
    let auth = FakeAuth::signed_in();
    let nav = Rc::new(RecordingNavigator::default());
    let outcome = view(&auth, &nav, None, Some("false"), Some("/raporlar")).mount();
    assert_eq!(outcome, MountOutcome::Redirected("/raporlar".into()));
    assert_eq!(*nav.replaced.borrow(), vec!["/raporlar".to_string()]);
}

#[test]
fn mount_with_session_and_no_history_goes_home() {
    let auth = FakeAuth::signed_in();
    let nav = Rc::new(RecordingNavigator::default());
    view(&auth, &nav, None, None, None).mount();
    assert_eq!(*nav.replaced.borrow(), vec![DEFAULT_REDIRECT.to_string()]);
}

#[test]
fn mount_without_session_stays() {
    let auth = Rc::new(FakeAuth::default());
    let nav = Rc::new(RecordingNavigator::default());
    assert_eq!(
        view(&auth, &nav, None, None, None).mount(),
        MountOutcome::StayOnPage
    );
    assert!(nav.replaced.borrow().is_empty());
}

#[test]
fn mount_is_repeatable() {
    let auth = FakeAuth::signed_in();
    let first_nav = Rc::new(RecordingNavigator::default());
    let second_nav = Rc::new(RecordingNavigator::default());
    let first = view(&auth, &first_nav, None, None, Some("/a")).mount();
    let second = view(&auth, &second_nav, None, None, Some("/a")).mount();
    assert_eq!(first, second);
    assert_eq!(*first_nav.replaced.borrow(), *second_nav.replaced.borrow());
}

#[test]
fn mount_rechecks_after_session_appears() {
    let auth = Rc::new(FakeAuth::default());
    let nav = Rc::new(RecordingNavigator::default());
    let login = view(&auth, &nav, None, None, None);
    assert_eq!(login.mount(), MountOutcome::StayOnPage);

    *auth.user.borrow_mut() = Some(user());
    login.set_previous_path(Some("/santraller".into()));
    assert_eq!(login.mount(), MountOutcome::Redirected("/santraller".into()));
}

// =============================================================
// Submit
// =============================================================

#[test]
fn accepted_login_redirects_and_ends_idle() {
    let auth = FakeAuth::replying(Ok(true));
    let nav = Rc::new(RecordingNavigator::default());
    let login = view(&auth, &nav, None, None, Some("/raporlar"));
    login.set_email("teknisyen@edeon.com.tr");
    login.set_password("gunes123");

    let outcome = block_on(login.submit()).unwrap();

    assert_eq!(outcome, SubmitOutcome::Authenticated("/raporlar".into()));
    assert_eq!(*nav.replaced.borrow(), vec!["/raporlar".to_string()]);
    assert_eq!(
        *auth.calls.borrow(),
        vec![("teknisyen@edeon.com.tr".to_string(), "gunes123".to_string())]
    );
    assert_eq!(login.phase(), SubmitPhase::Idle);
}

#[test]
fn accepted_login_ignores_logged_out_flag() {
    let auth = FakeAuth::replying(Ok(true));
    let nav = Rc::new(RecordingNavigator::default());
    let login = view(&auth, &nav, Some("true"), Some("true"), None);
    let outcome = block_on(login.submit()).unwrap();
    assert_eq!(outcome, SubmitOutcome::Authenticated(DEFAULT_REDIRECT.into()));
}

#[test]
fn rejected_login_stays_and_ends_idle() {
    let auth = FakeAuth::replying(Ok(false));
    let nav = Rc::new(RecordingNavigator::default());
    let login = view(&auth, &nav, None, None, None);

    assert_eq!(block_on(login.submit()).unwrap(), SubmitOutcome::Rejected);
    assert!(nav.replaced.borrow().is_empty());
    assert!(!login.is_submitting());
}

#[test]
fn failed_login_propagates_error_and_ends_idle() {
    let auth = FakeAuth::replying(Err(AuthError::Network("offline".into())));
    let nav = Rc::new(RecordingNavigator::default());
    let login = view(&auth, &nav, None, None, None);

    let err = block_on(login.submit()).unwrap_err();

    assert_eq!(err, AuthError::Network("offline".into()));
    assert!(nav.replaced.borrow().is_empty());
    assert_eq!(login.phase(), SubmitPhase::Idle);
}

#[test]
fn button_is_busy_while_call_is_outstanding() {
    let auth = Rc::new(FakeAuth::default());
    let tx = auth.hold();
    let nav = Rc::new(RecordingNavigator::default());
    let login = view(&auth, &nav, None, None, None);
    assert_eq!(
        login.submit_button(),
        SubmitButton {
            disabled: false,
            busy: false,
            label: "Giriş Yap",
        }
    );

    let mut fut = Box::pin(login.submit());
    assert!(poll_once(fut.as_mut()).is_pending());
    assert_eq!(
        login.submit_button(),
        SubmitButton {
            disabled: true,
            busy: true,
            label: "Giriş yapılıyor...",
        }
    );

    tx.send(Ok(false)).unwrap();
    assert_eq!(
        poll_once(fut.as_mut()),
        Poll::Ready(Ok(SubmitOutcome::Rejected))
    );
    assert!(!login.submit_button().disabled);
    assert_eq!(login.submit_button().label, "Giriş Yap");
}

#[test]
fn second_submit_while_outstanding_is_ignored() {
    let auth = Rc::new(FakeAuth::default());
    let _tx = auth.hold();
    let nav = Rc::new(RecordingNavigator::default());
    let login = view(&auth, &nav, None, None, None);

    let mut first = Box::pin(login.submit());
    assert!(poll_once(first.as_mut()).is_pending());

    assert_eq!(block_on(login.submit()).unwrap(), SubmitOutcome::InFlight);
    assert_eq!(auth.calls.borrow().len(), 1);
    assert!(login.is_submitting());
}

#[test]
fn dropping_submit_future_resets_phase() {
    let auth = Rc::new(FakeAuth::default());
    let _tx = auth.hold();
    let nav = Rc::new(RecordingNavigator::default());
    let login = view(&auth, &nav, None, None, None);

    let mut fut = Box::pin(login.submit());
    assert!(poll_once(fut.as_mut()).is_pending());
    drop(fut);

    assert_eq!(login.phase(), SubmitPhase::Idle);
}

#[test]
fn listener_sees_submitting_then_idle() {
    let auth = FakeAuth::replying(Ok(false));
    let nav = Rc::new(RecordingNavigator::default());
    let login = view(&auth, &nav, None, None, None);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    login.on_phase_change(move |phase| sink.borrow_mut().push(phase));

    block_on(login.submit()).unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![SubmitPhase::Submitting, SubmitPhase::Idle]
    );
}

// =============================================================
// Disposal
// =============================================================

#[test]
fn disposed_view_drops_late_result() {
    let auth = Rc::new(FakeAuth::default());
    let tx = auth.hold();
    let nav = Rc::new(RecordingNavigator::default());
    let login = view(&auth, &nav, None, None, Some("/raporlar"));
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    login.on_phase_change(move |phase| sink.borrow_mut().push(phase));

    let mut fut = Box::pin(login.submit());
    assert!(poll_once(fut.as_mut()).is_pending());
    login.dispose();
    tx.send(Ok(true)).unwrap();

    assert_eq!(
        poll_once(fut.as_mut()),
        Poll::Ready(Ok(SubmitOutcome::Discarded))
    );
    assert!(nav.replaced.borrow().is_empty());
    assert_eq!(*seen.borrow(), vec![SubmitPhase::Submitting]);
    assert!(!login.lifecycle().is_alive());
}

#[test]
fn flag_read_through_shared_scope() {
    let scope = Rc::new(MapScope::with_flag(Some("true")));
    let overrides = DualScopeOverride::new(scope.clone(), Rc::new(MapScope::default()));
    assert!(overrides.is_logged_out());
    assert_eq!(scope.get(LOGGED_OUT_KEY).as_deref(), Some("true"));
}

#[test]
fn lifecycle_clones_share_liveness() {
    let lifecycle = Lifecycle::default();
    let handle = lifecycle.clone();
    assert!(handle.is_alive());
    lifecycle.dispose();
    assert!(!handle.is_alive());
}

#[test]
fn form_debug_hides_password() {
    let form = LoginForm {
        email: "a@b.co".into(),
        password: "gizli".into(),
    };
    let rendered = format!("{form:?}");
    assert!(rendered.contains("a@b.co"));
    assert!(!rendered.contains("gizli"));
}
