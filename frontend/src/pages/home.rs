use yew::prelude::*;

use crate::auth::use_auth;
use crate::components::Header;

#[function_component(Home)]
pub fn home() -> Html {
    let auth = use_auth();
    let name = auth
        .current_user
        .as_ref()
        .map(|user| user.name.as_str())
        .unwrap_or_default()
        .to_string();

    html! {
        <div class="min-h-screen bg-gray-50">
            <Header />
            <main class="max-w-5xl mx-auto px-6 py-10">
                <h2 class="text-2xl font-semibold text-gray-900">
                    { format!("Hoş geldiniz, {name}") }
                </h2>
                <p class="mt-2 text-gray-600">{ "Güneş santrali arıza takip paneli" }</p>
            </main>
        </div>
    }
}
