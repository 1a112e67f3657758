//! Schema Form: the application description plus the table/field editor, wired as a
//! Yew `Component` that delegates to `update::update` and `view::view`.
//!
//! Responsibilities
//! - Keep the schema in a `SchemaDescription`, whose editing operations enforce the
//!   "at least one table, at least one field" rule.
//! - On submit, resolve the session user, post `/api/generate` and download the zip.
//! - Show the server's `{error}` text when generation fails.

use yew::prelude::*;

mod messages;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use state::GeneratorForm;

impl Component for GeneratorForm {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        GeneratorForm::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
