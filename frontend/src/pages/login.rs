use std::rc::Rc;

use shared::LoginView;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::auth::{use_auth, AuthService};
use crate::components::{LoadingSpinner, SpinnerSize};
use crate::router::{RedirectState, RouterNavigator};
use crate::storage::{self, BrowserOverrides};

type PageView = LoginView<Rc<AuthService>, RouterNavigator, BrowserOverrides>;

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let auth = use_auth();
    let navigator = use_navigator();
    let previous_path = use_location()
        .and_then(|location| location.state::<RedirectState>())
        .and_then(|state| state.from.clone());
    let rerender = use_force_update();

    // One view model for the lifetime of the page.
    let view = {
        let service = auth.service.clone();
        let previous_path = previous_path.clone();
        use_memo((), move |_| {
            PageView::new(
                service,
                RouterNavigator::new(navigator),
                storage::browser_overrides(),
                previous_path,
            )
        })
    };

    {
        let view = view.clone();
        let rerender = rerender.clone();
        use_effect_with((), move |_| {
            view.on_phase_change(move |_| rerender.force_update());
            move || view.dispose()
        });
    }

    {
        let view = view.clone();
        use_effect_with(
            (auth.current_user.clone(), previous_path),
            move |(_, previous_path)| {
                view.set_previous_path(previous_path.clone());
                view.mount();
                || ()
            },
        );
    }

    let on_email_input = {
        let view = view.clone();
        let rerender = rerender.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            view.set_email(input.value());
            rerender.force_update();
        })
    };

    let on_password_input = {
        let view = view.clone();
        let rerender = rerender.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            view.set_password(input.value());
            rerender.force_update();
        })
    };

    let on_submit = {
        let view = view.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let view = view.clone();
            spawn_local(async move {
                if let Err(err) = view.submit().await {
                    log::error!("login request failed: {err}");
                }
            });
        })
    };

    let form = view.form();
    let button = view.submit_button();

    html! {
        <div class="min-h-screen bg-gradient-to-br from-yellow-50 via-white to-yellow-100">
            <div class="relative flex flex-col justify-center min-h-screen py-12 sm:px-6 lg:px-8">
                <div class="relative z-10 sm:mx-auto sm:w-full sm:max-w-md">
                    <div class="flex flex-col items-center text-center">
                        <h1 class="text-4xl font-bold text-gray-900 tracking-tight">{ "EDEON ENERJİ" }</h1>
                        <h2 class="mt-2 text-xl font-medium text-gray-600">{ "Solar Enerjin" }</h2>
                        <h3 class="mt-4 text-2xl font-semibold text-gray-800">{ "ARIZA TAKİP SİSTEMİ" }</h3>
                    </div>

                    <div class="mt-8 bg-white/80 py-8 px-4 shadow-2xl sm:rounded-xl sm:px-10">
                        <form class="space-y-6" onsubmit={on_submit}>
                            <div>
                                <label for="email" class="block text-sm font-medium text-gray-700">
                                    { "E-posta adresi" }
                                </label>
                                <input
                                    id="email"
                                    name="email"
                                    type="email"
                                    autocomplete="email"
                                    required=true
                                    value={form.email}
                                    oninput={on_email_input}
                                    class="mt-1 block w-full px-3 py-2 border border-gray-300 rounded-lg sm:text-sm"
                                    placeholder="ornek@email.com"
                                />
                            </div>

                            <div>
                                <label for="password" class="block text-sm font-medium text-gray-700">
                                    { "Şifre" }
                                </label>
                                <input
                                    id="password"
                                    name="password"
                                    type="password"
                                    autocomplete="current-password"
                                    required=true
                                    value={form.password}
                                    oninput={on_password_input}
                                    class="mt-1 block w-full px-3 py-2 border border-gray-300 rounded-lg sm:text-sm"
                                    placeholder="••••••••"
                                />
                            </div>

                            <button
                                type="submit"
                                disabled={button.disabled}
                                class="w-full flex justify-center py-2.5 px-4 rounded-lg text-sm font-medium text-white bg-yellow-600 hover:bg-yellow-700 disabled:opacity-50 disabled:cursor-not-allowed"
                            >
                                if button.busy {
                                    <div class="flex items-center">
                                        <LoadingSpinner size={SpinnerSize::Sm} />
                                        <span class="ml-2">{ button.label }</span>
                                    </div>
                                } else {
                                    { button.label }
                                }
                            </button>
                        </form>
                    </div>
                </div>
            </div>
        </div>
    }
}
