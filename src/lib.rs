//! Chat webhook that answers xkcd commands with rich cards.
//!
//! Events flow through [`event::ChatEvent`] into the
//! [`dispatcher::Dispatcher`], which classifies messages with
//! [`command::classify`], looks comics up through [`xkcd::ComicSource`] and
//! renders them with the builders in [`card`].

pub mod card;
pub mod command;
pub mod config;
pub mod dispatcher;
pub mod event;
pub mod random;
pub mod server;
pub mod xkcd;
