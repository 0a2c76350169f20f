//! View model behind the login page.
//!
//! `LoginView` holds the form state, decides whether an already signed-in
//! visitor is sent on at mount time, and runs the submit cycle. The
//! authentication backend, the router and the storage holding the logged-out
//! flag are all injected, so the browser adapters live in `frontend` and the
//! behavior here can be exercised with fakes.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use futures::future::LocalBoxFuture;

use crate::types::CurrentUserResponse;

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

/// Storage key of the flag written by the logout flow.
pub const LOGGED_OUT_KEY: &str = "isLoggedOut";

/// Where visitors land when history carries no previous location.
pub const DEFAULT_REDIRECT: &str = "/anasayfa";

const IDLE_LABEL: &str = "Giriş Yap";
const BUSY_LABEL: &str = "Giriş yapılıyor...";

// ============================================================================
// Collaborators
// ============================================================================

/// The authentication backend as seen from the login page.
pub trait Authenticator {
    type Error;

    /// Resolves `true` for accepted credentials and `false` for rejected ones.
    /// Transport and infrastructure failures are errors.
    fn login<'a>(
        &'a self,
        email: &'a str,
        password: &'a str,
    ) -> LocalBoxFuture<'a, Result<bool, Self::Error>>;

    /// The signed-in user, if a session exists.
    fn current_user(&self) -> Option<CurrentUserResponse>;
}

impl<T: Authenticator + ?Sized> Authenticator for Rc<T> {
    type Error = T::Error;

    fn login<'a>(
        &'a self,
        email: &'a str,
        password: &'a str,
    ) -> LocalBoxFuture<'a, Result<bool, Self::Error>> {
        (**self).login(email, password)
    }

    fn current_user(&self) -> Option<CurrentUserResponse> {
        (**self).current_user()
    }
}

/// History navigation. Implementations replace the current entry so the
/// login page is not reachable with the back button afterwards.
pub trait Navigator {
    fn replace(&self, path: &str);
}

impl<T: Navigator + ?Sized> Navigator for Rc<T> {
    fn replace(&self, path: &str) {
        (**self).replace(path)
    }
}

/// Read-only view of the logged-out flag.
pub trait SessionOverrideSource {
    fn is_logged_out(&self) -> bool;
}

impl<T: SessionOverrideSource + ?Sized> SessionOverrideSource for Rc<T> {
    fn is_logged_out(&self) -> bool {
        (**self).is_logged_out()
    }
}

/// A string key-value store such as browser session or local storage.
pub trait KeyValueScope {
    fn get(&self, key: &str) -> Option<String>;
}

impl<T: KeyValueScope + ?Sized> KeyValueScope for Rc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

/// Logged-out flag kept in a session-lived scope and a durable scope. The
/// flag counts as set when either scope holds the literal `"true"`.
#[derive(Debug, Clone)]
pub struct DualScopeOverride<S, D> {
    session: S,
    durable: D,
}

impl<S, D> DualScopeOverride<S, D> {
    pub fn new(session: S, durable: D) -> Self {
        Self { session, durable }
    }
}

impl<S: KeyValueScope, D: KeyValueScope> SessionOverrideSource for DualScopeOverride<S, D> {
    fn is_logged_out(&self) -> bool {
        let in_session = flag_set(&self.session);
        let in_durable = flag_set(&self.durable);
        in_session || in_durable
    }
}

fn flag_set(scope: &impl KeyValueScope) -> bool {
    scope.get(LOGGED_OUT_KEY).as_deref() == Some("true")
}

/// Liveness of a mounted view. Cloned handles share the same flag.
#[derive(Debug, Clone)]
pub struct Lifecycle(Rc<Cell<bool>>);

impl Default for Lifecycle {
    fn default() -> Self {
        Self(Rc::new(Cell::new(true)))
    }
}

impl Lifecycle {
    pub fn is_alive(&self) -> bool {
        self.0.get()
    }

    pub fn dispose(&self) {
        self.0.set(false);
    }
}

// ============================================================================
// View state
// ============================================================================

/// Previous location if history carried a non-empty one, else the home route.
pub fn redirect_target(previous_path: Option<&str>) -> &str {
    match previous_path {
        Some(path) if !path.is_empty() => path,
        _ => DEFAULT_REDIRECT,
    }
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting,
}

/// How the submit control renders for the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitButton {
    pub disabled: bool,
    pub busy: bool,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountOutcome {
    /// The logged-out flag is set; the page stays put whatever the session.
    StayLoggedOut,
    /// No session exists.
    StayOnPage,
    Redirected(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Authenticated(String),
    Rejected,
    /// A login call was already outstanding; nothing was sent.
    InFlight,
    /// The view was disposed before the call settled; its result was dropped.
    Discarded,
}

struct PhaseState {
    phase: Cell<SubmitPhase>,
    lifecycle: Lifecycle,
    listener: RefCell<Option<Box<dyn Fn(SubmitPhase)>>>,
}

impl PhaseState {
    fn set(&self, phase: SubmitPhase) {
        self.phase.set(phase);
        if !self.lifecycle.is_alive() {
            return;
        }
        if let Some(listener) = self.listener.borrow().as_ref() {
            listener(phase);
        }
    }
}

/// Puts the view back to idle when the submit future finishes or is dropped.
struct ResetOnDrop<'a>(&'a PhaseState);

impl Drop for ResetOnDrop<'_> {
    fn drop(&mut self) {
        self.0.set(SubmitPhase::Idle);
    }
}

// ============================================================================
// LoginView
// ============================================================================

pub struct LoginView<A, N, O> {
    auth: A,
    navigator: N,
    overrides: O,
    previous_path: RefCell<Option<String>>,
    form: RefCell<LoginForm>,
    state: PhaseState,
}

impl<A, N, O> LoginView<A, N, O>
where
    A: Authenticator,
    N: Navigator,
    O: SessionOverrideSource,
{
    pub fn new(auth: A, navigator: N, overrides: O, previous_path: Option<String>) -> Self {
        Self {
            auth,
            navigator,
            overrides,
            previous_path: RefCell::new(previous_path),
            form: RefCell::new(LoginForm::default()),
            state: PhaseState {
                phase: Cell::new(SubmitPhase::Idle),
                lifecycle: Lifecycle::default(),
                listener: RefCell::new(None),
            },
        }
    }

    pub fn set_email(&self, email: impl Into<String>) {
        self.form.borrow_mut().email = email.into();
    }

    pub fn set_password(&self, password: impl Into<String>) {
        self.form.borrow_mut().password = password.into();
    }

    pub fn form(&self) -> LoginForm {
        self.form.borrow().clone()
    }

    pub fn set_previous_path(&self, previous_path: Option<String>) {
        *self.previous_path.borrow_mut() = previous_path;
    }

    pub fn target(&self) -> String {
        redirect_target(self.previous_path.borrow().as_deref()).to_string()
    }

    pub fn phase(&self) -> SubmitPhase {
        self.state.phase.get()
    }

    pub fn is_submitting(&self) -> bool {
        self.phase() == SubmitPhase::Submitting
    }

    pub fn submit_button(&self) -> SubmitButton {
        let busy = self.is_submitting();
        SubmitButton {
            disabled: busy,
            busy,
            label: if busy { BUSY_LABEL } else { IDLE_LABEL },
        }
    }

    /// Registers the callback run on every phase change while the view is
    /// alive. Replaces any earlier listener.
    pub fn on_phase_change(&self, listener: impl Fn(SubmitPhase) + 'static) {
        *self.state.listener.borrow_mut() = Some(Box::new(listener));
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.state.lifecycle
    }

    /// Marks the view unmounted. A login call still outstanding will neither
    /// navigate nor notify the listener when it settles.
    pub fn dispose(&self) {
        self.state.lifecycle.dispose();
    }

    /// Mount-time check. Hosts run it again whenever the session or the
    /// location changes; it keeps no state between runs.
    pub fn mount(&self) -> MountOutcome {
        if self.overrides.is_logged_out() {
            log::debug!("logged-out flag set, staying on login page");
            return MountOutcome::StayLoggedOut;
        }

        if self.auth.current_user().is_none() {
            return MountOutcome::StayOnPage;
        }

        let target = self.target();
        log::debug!("session present, redirecting to {target}");
        self.navigator.replace(&target);
        MountOutcome::Redirected(target)
    }

    /// Sends the current credentials. Errors from the authenticator are
    /// returned to the caller; the phase is back to idle on every exit path.
    pub async fn submit(&self) -> Result<SubmitOutcome, A::Error> {
        if self.is_submitting() {
            return Ok(SubmitOutcome::InFlight);
        }

        let LoginForm { email, password } = self.form();
        self.state.set(SubmitPhase::Submitting);
        let _reset = ResetOnDrop(&self.state);

        let accepted = self.auth.login(&email, &password).await?;

        if !self.state.lifecycle.is_alive() {
            log::debug!("login settled after the view was disposed");
            return Ok(SubmitOutcome::Discarded);
        }

        if !accepted {
            log::debug!("login rejected");
            return Ok(SubmitOutcome::Rejected);
        }

        let target = self.target();
        self.navigator.replace(&target);
        Ok(SubmitOutcome::Authenticated(target))
    }
}
