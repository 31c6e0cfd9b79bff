//! Corpus downloader: lists and downloads textual corpora described by a
//! declarative registry document.
//!
//! - [`registry`] - the corpus-list document, its index, and job resolution
//! - [`retrieval`] - the dispatcher and its clone/archive/fetch strategies
//! - [`cli`] - command definitions and handlers
//! - [`config`] - explicit runtime configuration

pub mod cli;
pub mod config;
pub mod registry;
pub mod retrieval;
