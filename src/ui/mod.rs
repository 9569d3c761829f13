pub(crate) mod app;
pub(crate) mod commands;
pub(crate) mod forms;
pub(crate) mod render;
pub(crate) mod screens;
pub(crate) mod theme;
pub(crate) mod util;


#[cfg(test)]
#[path = "forms_tests.rs"]
mod forms_tests;
