//! rowview
//!
//! Client-side tabular data manager: global search, per-column filters,
//! single-column sorting, pagination, row selection, and CSV export over an
//! in-memory collection of JSON rows.
//!
//! The table core ([`model`], [`table`]) is pure and synchronous. The
//! impure shell ([`source`], [`view`], [`app`], [`config`], [`logging`])
//! loads rows, renders the visible page as text, and writes exports.

pub mod app;
pub mod config;
pub mod logging;
pub mod model;
pub mod source;
pub mod table;
pub mod view;

#[cfg(test)]
mod tests;
