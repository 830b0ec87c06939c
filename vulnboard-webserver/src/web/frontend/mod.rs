use maud::Markup;
use rocket::{form::Form, get, post, routes, FromForm, Route, State};

use vulnboard_application::prelude::*;
use vulnboard_core::usecases::{LabProbes, Submission};

use crate::web::{sqlite, Cfg};

mod view;


/// Query parameters, honored for both GET and POST.
#[derive(Debug, Default, FromForm)]
pub struct BoardQuery {
    buscar: Option<String>,
    u: Option<String>,
    force_error: Option<String>,
}

#[derive(Debug, Default, FromForm)]
pub struct SubmissionForm {
    nombre: Option<String>,
    comentario: Option<String>,
    agregar: Option<String>,
}

impl SubmissionForm {
    // Without the submit marker the form is not a submission at all.
    fn into_submission(self) -> Option<Submission> {
        let Self {
            nombre,
            comentario,
            agregar,
        } = self;
        agregar.map(|_| Submission {
            author: nombre,
            body: comentario,
        })
    }
}

#[get("/?<query..>")]
pub fn get_board(db: sqlite::Connections, cfg: &State<Cfg>, query: BoardQuery) -> Markup {
    render_board(&db, cfg, query, None)
}

#[post("/?<query..>", data = "<form>")]
pub fn post_board(
    db: sqlite::Connections,
    cfg: &State<Cfg>,
    query: BoardQuery,
    form: Form<SubmissionForm>,
) -> Markup {
    render_board(&db, cfg, query, form.into_inner().into_submission())
}

#[post("/?<query..>", rank = 2)]
pub fn post_board_without_form(
    db: sqlite::Connections,
    cfg: &State<Cfg>,
    query: BoardQuery,
) -> Markup {
    render_board(&db, cfg, query, None)
}

fn render_board(
    db: &sqlite::Connections,
    cfg: &Cfg,
    query: BoardQuery,
    submission: Option<Submission>,
) -> Markup {
    let BoardQuery {
        buscar,
        u,
        force_error,
    } = query;
    let probes = cfg.enable_lab_probes.then(|| LabProbes {
        user: u,
        force_error: force_error.is_some(),
    });
    let request = BoardRequest {
        submission,
        search_term: buscar.clone(),
        probes,
    };
    let response = process_board_request(db, request);
    view::board(buscar.as_deref(), &response)
}

pub fn routes() -> Vec<Route> {
    routes![get_board, post_board, post_board_without_form]
}
