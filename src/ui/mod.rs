//! User Interface Module
//!
//! Rendering for the recipe screens. Nothing here mutates application state;
//! every function takes `&App` and draws it.

pub mod colors;
pub mod components;
pub mod form;
pub mod help;
pub mod recipes;
