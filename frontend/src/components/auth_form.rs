//! Email/password form shared by the login and sign-up pages.

use crate::helpers::{error_message, navigate};
use common::requests::Credentials;
use gloo_net::http::Request;
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct AuthFormProps {
    /// `true` on `/signup`, `false` on `/login`.
    pub is_sign_up: bool,
}

pub enum Msg {
    SetEmail(String),
    SetPassword(String),
    Submit,
    Failed(String),
}

pub struct AuthForm {
    email: String,
    password: String,
    loading: bool,
    error: Option<String>,
}

impl AuthForm {
    fn endpoint(is_sign_up: bool) -> &'static str {
        if is_sign_up {
            "/api/auth/signup"
        } else {
            "/api/auth/login"
        }
    }
}

impl Component for AuthForm {
    type Message = Msg;
    type Properties = AuthFormProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            loading: false,
            error: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetEmail(email) => {
                self.email = email;
                false
            }
            Msg::SetPassword(password) => {
                self.password = password;
                false
            }
            Msg::Submit => {
                if self.loading {
                    return false;
                }
                self.loading = true;
                self.error = None;

                let credentials = Credentials {
                    email: self.email.trim().to_string(),
                    password: self.password.clone(),
                };
                let url = Self::endpoint(ctx.props().is_sign_up);
                let link = ctx.link().clone();
                spawn_local(async move {
                    let request = match Request::post(url).json(&credentials) {
                        Ok(request) => request,
                        Err(err) => {
                            link.send_message(Msg::Failed(err.to_string()));
                            return;
                        }
                    };
                    match request.send().await {
                        Ok(response) if response.ok() => navigate("/dashboard"),
                        Ok(response) => {
                            let message =
                                error_message(response, "Falha na autenticação.").await;
                            link.send_message(Msg::Failed(message));
                        }
                        Err(err) => link.send_message(Msg::Failed(err.to_string())),
                    }
                });
                true
            }
            Msg::Failed(message) => {
                self.loading = false;
                self.error = Some(message);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let is_sign_up = ctx.props().is_sign_up;

        let (title, button_text, link_text, link_href) = if is_sign_up {
            ("Crie sua Conta no Nexcode", "Cadastrar", "Já tem conta? Faça login", "/login")
        } else {
            ("Acesse o Nexcode", "Entrar", "Não tem conta? Cadastre-se", "/signup")
        };

        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        });

        html! {
            <div class="auth-root card">
                <h2>{ title }</h2>
                <form {onsubmit}>
                    <label for="email">{"Email"}</label>
                    <input
                        id="email"
                        type="email"
                        autocomplete="email"
                        required=true
                        value={self.email.clone()}
                        oninput={link.callback(|e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            Msg::SetEmail(input.value())
                        })}
                    />
                    <label for="password">{"Senha"}</label>
                    <input
                        id="password"
                        type="password"
                        autocomplete={if is_sign_up { "new-password" } else { "current-password" }}
                        required=true
                        value={self.password.clone()}
                        oninput={link.callback(|e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            Msg::SetPassword(input.value())
                        })}
                    />
                    {
                        if let Some(error) = &self.error {
                            html! { <p class="error-text">{ error.clone() }</p> }
                        } else {
                            html! {}
                        }
                    }
                    <p>
                        <button class="btn" type="submit" disabled={self.loading}>
                            { if self.loading { "Processando..." } else { button_text } }
                        </button>
                    </p>
                </form>
                <p><a href={link_href}>{ link_text }</a></p>
            </div>
        }
    }
}
