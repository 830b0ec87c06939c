#[macro_use]
extern crate log;

mod process_board_request;

pub mod prelude {
    pub use super::process_board_request::*;
}

pub mod error;

pub type Result<T> = std::result::Result<T, error::AppError>;

pub(crate) use vulnboard_core::{entities::*, lab::DebugNote, usecases};


pub mod sqlite {
    pub use vulnboard_db_sqlite::Connections;
}
