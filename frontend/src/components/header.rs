use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::auth::use_auth;
use crate::Route;

#[function_component(Header)]
pub fn header() -> Html {
    let auth = use_auth();
    let navigator = use_navigator();
    let logging_out = use_state(|| false);

    let on_logout = {
        let service = auth.service.clone();
        let logging_out = logging_out.clone();
        Callback::from(move |_: MouseEvent| {
            let service = service.clone();
            let navigator = navigator.clone();
            let logging_out = logging_out.clone();
            logging_out.set(true);
            spawn_local(async move {
                if let Err(err) = service.logout().await {
                    log::warn!("logout did not complete cleanly: {err}");
                }
                if let Some(navigator) = navigator {
                    navigator.replace(&Route::Login);
                }
            });
        })
    };

    let greeting = auth
        .current_user
        .as_ref()
        .map(|user| user.name.clone())
        .unwrap_or_default();

    html! {
        <header class="flex items-center justify-between px-6 py-4 bg-white shadow">
            <nav class="flex items-center gap-4">
                <Link<Route> to={Route::Home}>
                    <h1 class="text-xl font-bold text-gray-900">{ "Arıza Takip Sistemi" }</h1>
                </Link<Route>>
            </nav>
            <div class="flex items-center gap-4">
                <span class="text-sm text-gray-600">{ greeting }</span>
                <button
                    class="px-3 py-1.5 text-sm font-medium text-white bg-yellow-600 rounded-lg disabled:opacity-50"
                    onclick={on_logout}
                    disabled={*logging_out}
                >
                    { if *logging_out { "Çıkış yapılıyor..." } else { "Çıkış Yap" } }
                </button>
            </div>
        </header>
    }
}
