//! Event Handling Module
//!
//! This module contains all event processing and user input handling logic for recipebox.
//! It sits between raw terminal events and application state changes.
//!
//! # Module Organization
//!
//! - **`keys`**: Keyboard input processing for the list, search and form modes
//!

pub mod keys;
