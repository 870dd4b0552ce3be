//! Export HAProxy stick tables as Prometheus metrics, read over the admin socket.

mod commands;
pub mod config;
mod connection;
pub mod errors;
pub mod models;
mod parsers;
pub mod render;
pub mod requests;
mod scraper;
pub mod serve;

pub use connection::{Connection, ConnectionBuilder, UnixSocketBuilder};
pub use errors::{Error, Result};
pub use parsers::{parse_line, parse_table_dump, parse_table_list};
pub use render::{prepare_output, RenderConfig};
pub use scraper::Scraper;
