pub mod lab;
pub mod repositories;
pub mod usecases;

pub mod entities {
    pub use vulnboard_entities::{comment::*, id::*, time::*};
}
