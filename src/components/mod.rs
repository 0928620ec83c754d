pub mod dynamic_form;
pub mod user_edit;
pub mod users_table;
