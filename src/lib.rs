//! recipebox - Recipe Manager
//!
//! A terminal-based recipe box: add, search and edit recipes kept in a local
//! key-value store. Built with Rust and ratatui.
//!
//! recipebox provides:
//! - Add and edit forms that stage ingredients (quantity + name) and steps one by one
//! - A one-step undo for the latest add or edit
//! - Live, case-insensitive search across names, ingredients and steps
//! - A small CLI for listing, searching, exporting and importing recipes

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod search;
pub mod ui;
