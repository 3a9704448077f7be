//! The library code for the `annals` weblog engine. A request path is
//! answered in three steps:
//!
//! 1. Every registered [`plugin::Plugin`] prepares the [`request::Request`],
//!    publishing template variables such as `archivelinks`.
//! 2. The first plugin that recognizes the path supplies the page's entries;
//!    otherwise [`blog::Blog`] lists the entry or category the path names.
//! 3. The entries are rendered through the flavour's templates
//!    ([`render`]) or as an Atom feed ([`feed`]).
//!
//! The interesting plugin is [`yeararchives`]. It walks the data directory
//! ([`archive`]), and for paths like `/2004/` ([`path`]) groups that year's
//! entries by month and day ([`group`]) into one synthetic summary entry per
//! month ([`summary`]).

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod archive;
pub mod blog;
pub mod build;
pub mod config;
pub mod entry;
pub mod feed;
pub mod group;
mod markdown;
pub mod path;
pub mod plugin;
pub mod render;
pub mod request;
pub mod source;
pub mod summary;
pub mod yeararchives;
