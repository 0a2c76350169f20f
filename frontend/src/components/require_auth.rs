//! Guard for pages that need a session. Visitors without one are sent to the
//! login page with their current path in history state, so a successful
//! login brings them back. The backend enforces access; this is navigation
//! only.

use yew::prelude::*;
use yew_router::prelude::*;

use crate::auth::use_auth;
use crate::components::{LoadingSpinner, SpinnerSize};
use crate::router::RedirectState;
use crate::Route;

#[derive(Properties, PartialEq)]
pub struct RequireAuthProps {
    pub children: Children,
}

#[function_component(RequireAuth)]
pub fn require_auth(props: &RequireAuthProps) -> Html {
    let auth = use_auth();
    let navigator = use_navigator();
    let location = use_location();
    let signed_in = auth.current_user.is_some();

    {
        let from = location.map(|location| location.path().to_string());
        use_effect_with((auth.checking, signed_in), move |&(checking, signed_in)| {
            if !checking && !signed_in {
                if let Some(navigator) = navigator {
                    navigator.replace_with_state(&Route::Login, RedirectState { from });
                }
            }
            || ()
        });
    }

    if auth.checking {
        return html! {
            <div class="flex items-center justify-center min-h-screen">
                <LoadingSpinner size={SpinnerSize::Lg} />
            </div>
        };
    }

    if signed_in {
        html! { <>{ props.children.clone() }</> }
    } else {
        html! {}
    }
}
