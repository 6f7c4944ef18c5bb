//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use frontdesk::ViewRouter;

use crate::components::session_gate::SessionGate;
use crate::state::backend::Backend;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="pt-BR">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the view router and backend handle as contexts. Which screen is
/// shown is decided by the session gate, not by the URL.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let router = RwSignal::new(ViewRouter::default());
    let backend = RwSignal::new(None::<Backend>);

    provide_context(router);
    provide_context(backend);

    view! {
        <Stylesheet id="leptos" href="/pkg/frontdesk.css"/>
        <Title text="Clínica D'Luca"/>

        <Router>
            <Routes fallback=|| "Página não encontrada.".into_view()>
                <Route path=StaticSegment("") view=SessionGate/>
            </Routes>
        </Router>
    }
}
