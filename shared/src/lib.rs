//! Types and view logic shared by the login front end.
//!
//! Everything in this crate is free of browser bindings so it can be tested
//! on the host; the `frontend` crate supplies the browser-backed adapters.

pub mod error;
pub mod login;
pub mod types;

pub use error::{login_outcome, AuthError};
pub use login::{
    redirect_target, Authenticator, DualScopeOverride, KeyValueScope, Lifecycle, LoginForm,
    LoginView, MountOutcome, Navigator, SessionOverrideSource, SubmitButton, SubmitOutcome,
    SubmitPhase, DEFAULT_REDIRECT, LOGGED_OUT_KEY,
};
pub use types::*;
