//! Vetrina: the client-side listing engine for a server-rendered
//! marketing site.
//!
//! The page captures its rendered post metadata once
//! ([`infra::fragments`]), hands it to a [`application::listing::ListingController`],
//! and wires the search / category / sort / load-more controls to the
//! controller's operations. The controller re-renders by emitting ordered
//! post ids through the [`presentation::surface::ListingSurface`] port;
//! the composition root owns the id → fragment mapping and all DOM work.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
pub mod util;
