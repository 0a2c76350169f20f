use yew::prelude::*;
use yew_router::prelude::*;

mod auth;
mod components;
mod config;
mod pages;
mod router;
mod storage;

use auth::AuthProvider;
use components::RequireAuth;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Login,
    #[at("/anasayfa")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Login => html! { <pages::login::LoginPage /> },
        Route::Home => html! {
            <RequireAuth>
                <pages::home::Home />
            </RequireAuth>
        },
        Route::NotFound => html! { <Redirect<Route> to={Route::Login} /> },
    }
}

#[function_component(App)]
fn app() -> Html {
    html! {
        <BrowserRouter>
            <AuthProvider>
                <Switch<Route> render={switch} />
            </AuthProvider>
        </BrowserRouter>
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
