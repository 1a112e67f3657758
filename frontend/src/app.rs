//! Root component. The backend already decided whether the visitor may see the page
//! (gated routes redirect to `/login` server-side); here the path only selects which
//! screen to mount.

use crate::components::auth_form::AuthForm;
use crate::components::generator_form::GeneratorForm;
use crate::components::logout_button::LogoutButton;
use crate::components::project_list::ProjectList;
use yew::{html, Component, Context, Html};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
    SignUp,
    Dashboard,
    Create,
}

impl Page {
    pub fn from_path(path: &str) -> Page {
        match path.trim_end_matches('/') {
            "/login" => Page::Login,
            "/signup" => Page::SignUp,
            "/create" => Page::Create,
            _ => Page::Dashboard,
        }
    }
}

pub struct App {
    page: Page,
}

impl Component for App {
    type Message = ();
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        let path = web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_default();
        Self {
            page: Page::from_path(&path),
        }
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        match self.page {
            Page::Login => html! { <AuthForm is_sign_up={false} /> },
            Page::SignUp => html! { <AuthForm is_sign_up={true} /> },
            Page::Dashboard => html! {
                <div>
                    <header class="page-header">
                        <h1>{"Dashboard do Nexcode"}</h1>
                        <LogoutButton />
                    </header>
                    <main class="page-main">
                        <ProjectList />
                    </main>
                </div>
            },
            Page::Create => html! {
                <div>
                    <header class="page-header">
                        <h1>{"Novo Projeto"}</h1>
                        <LogoutButton />
                    </header>
                    <main>
                        <GeneratorForm />
                    </main>
                </div>
            },
        }
    }
}
