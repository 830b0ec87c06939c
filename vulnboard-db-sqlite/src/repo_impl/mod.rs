use diesel::{
    self,
    connection::SimpleConnection,
    prelude::{Connection as DieselConnection, *},
    result::Error as DieselError,
};

use vulnboard_core::{
    entities::*,
    repositories::{self as repo, *},
};

use super::*;

mod comment;
mod lab;

type Result<T> = std::result::Result<T, repo::Error>;

pub fn from_diesel_err(err: DieselError) -> repo::Error {
    repo::Error::Other(err.into())
}
