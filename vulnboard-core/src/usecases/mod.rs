mod ensure_schema;
mod error;
mod handle_search;
mod handle_submission;
mod run_lab_probes;


pub use self::{
    ensure_schema::*, error::Error, handle_search::*, handle_submission::*, run_lab_probes::*,
};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{entities::*, repositories::*};
}
