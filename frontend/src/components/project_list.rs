//! The signed-in user's generated projects, newest first, as listed by
//! `GET /api/projects`.

use crate::helpers::{error_message, navigate};
use common::model::project::Project;
use gloo_net::http::Request;
use wasm_bindgen::JsValue;
use yew::platform::spawn_local;
use yew::prelude::*;

pub enum Msg {
    Loaded(Vec<Project>),
    Failed(String),
}

pub struct ProjectList {
    projects: Vec<Project>,
    loading: bool,
    error: Option<String>,
}

impl Component for ProjectList {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            projects: Vec::new(),
            loading: true,
            error: None,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        self.loading = false;
        match msg {
            Msg::Loaded(projects) => self.projects = projects,
            Msg::Failed(message) => self.error = Some(message),
        }
        true
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        if self.loading {
            return html! { <p>{"Carregando projetos..."}</p> };
        }
        if let Some(error) = &self.error {
            return html! { <p class="error-text">{ format!("Erro ao carregar projetos: {}", error) }</p> };
        }

        html! {
            <div>
                <div class="table-card-header">
                    <h2>{ format!("Meus Projetos ({})", self.projects.len()) }</h2>
                    <a class="btn" href="/create">{"+ Novo Projeto"}</a>
                </div>
                {
                    if self.projects.is_empty() {
                        html! {
                            <div class="empty-state">
                                <h3>{"Nenhum projeto gerado"}</h3>
                                <p>{"Comece a criar seu primeiro aplicativo full-stack com IA."}</p>
                                <a class="btn" href="/create">{"+ Criar Agora"}</a>
                            </div>
                        }
                    } else {
                        html! {
                            <ul class="project-list">
                                { for self.projects.iter().map(project_item) }
                            </ul>
                        }
                    }
                }
            </div>
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if !first_render {
            return;
        }
        let link = ctx.link().clone();
        spawn_local(async move {
            match Request::get("/api/projects").send().await {
                Ok(response) if response.status() == 401 => navigate("/login"),
                Ok(response) if response.ok() => match response.json::<Vec<Project>>().await {
                    Ok(projects) => link.send_message(Msg::Loaded(projects)),
                    Err(err) => link.send_message(Msg::Failed(err.to_string())),
                },
                Ok(response) => {
                    let message = error_message(response, "Erro desconhecido.").await;
                    link.send_message(Msg::Failed(message));
                }
                Err(err) => link.send_message(Msg::Failed(err.to_string())),
            }
        });
    }
}

fn project_item(project: &Project) -> Html {
    html! {
        <li class="project-item" key={project.id.clone()}>
            <div>
                <strong>{ project.name.clone() }</strong>
                <p class="project-description">{ project.description.clone() }</p>
            </div>
            <div>
                <p>{ format!("Gerado em: {}", format_date(&project.created_at)) }</p>
                <a
                    class="btn"
                    href={format!("/api/download/{}", project.id)}
                    title="Baixar Código"
                >
                    {"Baixar"}
                </a>
            </div>
        </li>
    }
}

/// `created_at` as a pt-BR calendar date (`dd/mm/aaaa`); unparseable timestamps are
/// shown as they came.
fn format_date(created_at: &str) -> String {
    let date = js_sys::Date::new(&JsValue::from_str(created_at));
    if date.get_time().is_nan() {
        return created_at.to_string();
    }
    String::from(date.to_locale_date_string("pt-BR", &JsValue::UNDEFINED))
}
