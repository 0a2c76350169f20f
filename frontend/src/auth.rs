//! Authentication collaborator for the front end. `AuthService` talks to the
//! backend's cookie-based auth endpoints and keeps the signed-in user; the
//! `AuthProvider` hydrates it once on mount and republishes every change
//! through Yew context so pages re-render when the session appears or goes.

use std::cell::RefCell;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use futures::FutureExt;
use gloo_net::http::{Request, Response};
use shared::{AuthError, Authenticator, CurrentUserResponse, LoginRequest};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::config::AppConfig;
use crate::storage;

pub struct AuthService {
    config: AppConfig,
    user: RefCell<Option<CurrentUserResponse>>,
    on_change: Callback<Option<CurrentUserResponse>>,
}

impl AuthService {
    pub fn new(config: AppConfig, on_change: Callback<Option<CurrentUserResponse>>) -> Self {
        Self {
            config,
            user: RefCell::new(None),
            on_change,
        }
    }

    fn publish(&self, user: Option<CurrentUserResponse>) {
        *self.user.borrow_mut() = user.clone();
        self.on_change.emit(user);
    }

    /// Asks the backend who is signed in.
    pub async fn refresh(&self) -> Result<(), AuthError> {
        let resp = Request::get(&self.config.endpoint("/auth/me"))
            .send()
            .await
            .map_err(network_error)?;

        if resp.ok() {
            let user = resp
                .json::<CurrentUserResponse>()
                .await
                .map_err(parse_error)?;
            self.publish(Some(user));
        } else {
            self.publish(None);
        }
        Ok(())
    }

    async fn send_login(&self, email: &str, password: &str) -> Result<bool, AuthError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let resp = Request::post(&self.config.endpoint("/auth/login"))
            .json(&body)
            .map_err(|e| AuthError::Parse(e.to_string()))?
            .send()
            .await
            .map_err(network_error)?;

        let status = resp.status();
        let body = resp.text().await.map_err(parse_error)?;
        match shared::login_outcome(status, &body)? {
            Some(user) => {
                storage::clear_logged_out();
                log::info!("signed in as user {}", user.user_id);
                self.publish(Some(user));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Ends the session. The logged-out flag is written and the user cleared
    /// even when the backend call fails, so a reload keeps the visitor on the
    /// login page.
    pub async fn logout(&self) -> Result<(), AuthError> {
        let sent = Request::post(&self.config.endpoint("/auth/logout"))
            .send()
            .await;
        let marked = storage::mark_logged_out();
        self.publish(None);

        if let Err(err) = &marked {
            log::error!("could not store logged-out flag: {err}");
        }
        let resp = sent.map_err(network_error)?;
        marked?;
        if !resp.ok() {
            return Err(http_error(resp).await);
        }
        Ok(())
    }
}

impl Authenticator for AuthService {
    type Error = AuthError;

    fn login<'a>(
        &'a self,
        email: &'a str,
        password: &'a str,
    ) -> LocalBoxFuture<'a, Result<bool, AuthError>> {
        self.send_login(email, password).boxed_local()
    }

    fn current_user(&self) -> Option<CurrentUserResponse> {
        self.user.borrow().clone()
    }
}

fn network_error(err: gloo_net::Error) -> AuthError {
    AuthError::Network(err.to_string())
}

fn parse_error(err: gloo_net::Error) -> AuthError {
    AuthError::Parse(err.to_string())
}

async fn http_error(resp: Response) -> AuthError {
    let body = resp.text().await.unwrap_or_default();
    AuthError::from_response(resp.status(), &body)
}

// ============================================================================
// Context
// ============================================================================

#[derive(Clone)]
pub struct AuthContext {
    pub service: Rc<AuthService>,
    pub current_user: Option<CurrentUserResponse>,
    /// True until the first `/auth/me` round trip has settled.
    pub checking: bool,
}

impl PartialEq for AuthContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.service, &other.service)
            && self.current_user == other.current_user
            && self.checking == other.checking
    }
}

#[derive(Properties, PartialEq)]
pub struct AuthProviderProps {
    pub children: Children,
}

#[function_component(AuthProvider)]
pub fn auth_provider(props: &AuthProviderProps) -> Html {
    let current_user = use_state(|| None::<CurrentUserResponse>);
    let checking = use_state(|| true);

    let service = {
        let current_user = current_user.clone();
        use_memo((), move |_| {
            let on_change = Callback::from(move |user: Option<CurrentUserResponse>| {
                current_user.set(user)
            });
            AuthService::new(AppConfig::load(), on_change)
        })
    };

    {
        let service = service.clone();
        let checking = checking.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                if let Err(err) = service.refresh().await {
                    log::warn!("session check failed: {err}");
                }
                checking.set(false);
            });
            || ()
        });
    }

    let context = AuthContext {
        service,
        current_user: (*current_user).clone(),
        checking: *checking,
    };

    html! {
        <ContextProvider<AuthContext> context={context}>
            { props.children.clone() }
        </ContextProvider<AuthContext>>
    }
}

/// Returns the provided auth context, or a signed-out one when rendered
/// outside `AuthProvider`.
#[hook]
pub fn use_auth() -> AuthContext {
    let context = use_context::<AuthContext>();
    let fallback = use_memo((), |_| AuthService::new(AppConfig::load(), Callback::noop()));

    context.unwrap_or_else(|| AuthContext {
        service: fallback,
        current_user: None,
        checking: false,
    })
}
