pub mod auth_form;
pub mod generator_form;
pub mod logout_button;
pub mod project_list;
