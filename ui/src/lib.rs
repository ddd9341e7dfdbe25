use payloads::{APIClient, PlanId};
use yew::prelude::*;
use yew_router::prelude::*;

mod components;
pub mod config;
mod contexts;
mod hooks;
mod logs;
mod pages;
mod state;
mod utils;

pub use logs::init_logging;
pub use state::State;

use components::ToastContainer;
use contexts::toast::ToastProvider;
use pages::{NotFoundPage, PlanEditorPage, PlanReviewPage};

// Global API client - configurable via environment or same-origin fallback
pub fn get_api_client() -> APIClient {
    // Try environment variable first (set at build time)
    let address = option_env!("BACKEND_URL")
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|| {
            // Fallback to same origin, where the plan pages are served
            web_sys::window()
                .and_then(|window| window.location().origin().ok())
                .unwrap_or_default()
        });

    APIClient {
        address,
        inner_client: reqwest::Client::new(),
    }
}

#[function_component]
pub fn App() -> Html {
    html! {
        <ToastProvider>
            <BrowserRouter>
                <div class="min-h-screen bg-white dark:bg-neutral-900 text-neutral-900 dark:text-neutral-100 transition-colors">
                    <Switch<Route> render={switch} />
                </div>
            </BrowserRouter>
            <ToastContainer />
        </ToastProvider>
    }
}

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/plans/new")]
    NewPlan,
    #[at("/plans/:id/edit")]
    EditPlan { id: i64 },
    #[at("/plans/:id")]
    PlanDetail { id: i64 },
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    let content = match routes {
        Route::NewPlan => html! { <PlanEditorPage /> },
        Route::EditPlan { id } => {
            html! { <PlanEditorPage plan_id={Some(PlanId(id))} /> }
        }
        Route::PlanDetail { id } => {
            html! { <PlanReviewPage plan_id={PlanId(id)} /> }
        }
        Route::NotFound => html! { <NotFoundPage /> },
    };

    html! {
        <main class="max-w-4xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
            {content}
        </main>
    }
}
