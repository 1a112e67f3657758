use crate::helpers::navigate;
use gloo_console::error;
use gloo_net::http::Request;
use yew::platform::spawn_local;
use yew::prelude::*;

pub enum Msg {
    Logout,
    Failed,
}

/// Ends the session and returns to `/`, which then redirects to the login page.
pub struct LogoutButton {
    loading: bool,
}

impl Component for LogoutButton {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self { loading: false }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Logout => {
                self.loading = true;
                let link = ctx.link().clone();
                spawn_local(async move {
                    match Request::post("/api/auth/logout").send().await {
                        Ok(response) if response.ok() => navigate("/"),
                        Ok(response) => {
                            error!(format!("Erro ao fazer logout: HTTP {}", response.status()));
                            link.send_message(Msg::Failed);
                        }
                        Err(err) => {
                            error!(format!("Erro ao fazer logout: {}", err));
                            link.send_message(Msg::Failed);
                        }
                    }
                });
                true
            }
            Msg::Failed => {
                self.loading = false;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <button
                class="btn btn-danger"
                disabled={self.loading}
                onclick={ctx.link().callback(|_| Msg::Logout)}
            >
                { if self.loading { "Saindo..." } else { "Sair" } }
            </button>
        }
    }
}
