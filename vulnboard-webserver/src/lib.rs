#![recursion_limit = "256"]

#[macro_use]
extern crate log;

use vulnboard_db_sqlite::Connections;

mod web;

pub use web::Cfg;

/// Serve the board until the server is shut down.
pub fn run(connections: Connections, cfg: Cfg) {
    rocket::execute(web::run(connections.into(), cfg));
}
