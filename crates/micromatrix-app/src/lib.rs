//! Terminal host for Micromatrix puzzles.
#![allow(missing_docs, clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod action;
pub mod action_handler;
pub mod app;
pub mod builtin;
pub mod cli;
pub mod command;
pub mod layout_source;
pub mod persistence;
pub mod state;
pub mod view;
