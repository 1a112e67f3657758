//! View rendering for the Schema Form: a description card, a card per table with its
//! field rows, and the submit button with the error box above it.

use common::model::schema::{Field, FieldType, Table};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use super::state::GeneratorForm;

pub fn view(component: &GeneratorForm, ctx: &Context<GeneratorForm>) -> Html {
    let link = ctx.link();
    let onsubmit = link.callback(|e: SubmitEvent| {
        e.prevent_default();
        Msg::Submit
    });

    html! {
        <div class="page-main">
            <h1>{"Crie seu App com IA"}</h1>
            <form {onsubmit}>
                { build_description_card(component, link) }
                { build_schema_card(component, link) }
                { build_error_box(component) }
                <button class="btn btn-success" type="submit" disabled={component.loading}>
                    {
                        if component.loading {
                            "Gerando Código... (Pode levar até 60 segundos)"
                        } else {
                            "Gerar Aplicativo Full-Stack com IA"
                        }
                    }
                </button>
            </form>
        </div>
    }
}

fn build_description_card(component: &GeneratorForm, link: &Scope<GeneratorForm>) -> Html {
    html! {
        <div class="card">
            <h2>{"1. Descreva o que você quer"}</h2>
            <p>
                {"Seja o mais detalhado possível. Ex: \"Quero um blog simples com uma página inicial que liste os posts e uma página de administração para criar e editar posts.\""}
            </p>
            <textarea
                rows="6"
                placeholder="Descreva seu aplicativo..."
                value={component.description.clone()}
                oninput={link.callback(|e: InputEvent| {
                    let input: HtmlTextAreaElement = e.target_unchecked_into();
                    Msg::SetDescription(input.value())
                })}
            />
        </div>
    }
}

fn build_schema_card(component: &GeneratorForm, link: &Scope<GeneratorForm>) -> Html {
    let single_table = component.schema.tables.len() == 1;
    html! {
        <div class="card">
            <h2>{"2. Defina a Estrutura do Banco de Dados"}</h2>
            <p>{"Quais tabelas e campos seu aplicativo precisa? (Ex: Tabela: posts, Campos: titulo, conteudo, data)"}</p>
            {
                for component.schema.tables.iter().enumerate().map(|(index, table)| {
                    build_table(index, table, single_table, link)
                })
            }
            <button class="btn btn-soft" type="button" onclick={link.callback(|_| Msg::AddTable)}>
                {"+ Adicionar Tabela"}
            </button>
        </div>
    }
}

fn build_table(index: usize, table: &Table, single_table: bool, link: &Scope<GeneratorForm>) -> Html {
    let single_field = table.fields.len() == 1;
    html! {
        <div class="table-card">
            <div class="table-card-header">
                <input
                    type="text"
                    required=true
                    placeholder="Nome da Tabela (ex: posts)"
                    value={table.name.clone()}
                    oninput={link.callback(move |e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        Msg::RenameTable(index, input.value())
                    })}
                />
                <button
                    class="btn btn-icon"
                    type="button"
                    title="Remover tabela"
                    disabled={single_table}
                    onclick={link.callback(move |_| Msg::RemoveTable(index))}
                >
                    {"✕"}
                </button>
            </div>
            <h4>{"Campos:"}</h4>
            {
                for table.fields.iter().enumerate().map(|(field_index, field)| {
                    build_field_row(index, field_index, field, single_field, link)
                })
            }
            <button class="btn btn-link" type="button" onclick={link.callback(move |_| Msg::AddField(index))}>
                {"+ Adicionar Campo"}
            </button>
        </div>
    }
}

fn build_field_row(
    table: usize,
    index: usize,
    field: &Field,
    single_field: bool,
    link: &Scope<GeneratorForm>,
) -> Html {
    html! {
        <div class="field-row">
            <input
                type="text"
                required=true
                placeholder="Nome do Campo (ex: titulo)"
                value={field.name.clone()}
                oninput={link.callback(move |e: InputEvent| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    Msg::RenameField(table, index, input.value())
                })}
            />
            <select
                onchange={link.batch_callback(move |e: Event| {
                    let select: HtmlSelectElement = e.target_unchecked_into();
                    FieldType::from_name(&select.value())
                        .map(|field_type| Msg::SetFieldType(table, index, field_type))
                })}
            >
                {
                    for FieldType::ALL.iter().map(|field_type| html! {
                        <option
                            value={field_type.as_str()}
                            selected={*field_type == field.field_type}
                        >
                            { field_type.as_str() }
                        </option>
                    })
                }
            </select>
            <button
                class="btn btn-icon"
                type="button"
                title="Remover campo"
                disabled={single_field}
                onclick={link.callback(move |_| Msg::RemoveField(table, index))}
            >
                {"✕"}
            </button>
        </div>
    }
}

fn build_error_box(component: &GeneratorForm) -> Html {
    match &component.error {
        Some(error) => html! {
            <div class="error-box">
                <strong>{"Erro:"}</strong>
                <p>{ error.clone() }</p>
            </div>
        },
        None => html! {},
    }
}
