use rocket::{serde::json::Json, Catcher, Request, Route};

use crate::error::ErrorBody;

mod auth;
mod public;
mod voter;

pub fn routes() -> Vec<Route> {
    let mut routes = Vec::new();
    routes.extend(auth::routes());
    routes.extend(public::routes());
    routes.extend(voter::routes());
    routes
}

/// JSON bodies for failures that never reach a handler, such as a missing
/// auth cookie or an unparseable request body.
pub fn catchers() -> Vec<Catcher> {
    catchers![bad_request, unauthorized, not_found, unprocessable]
}

#[catch(400)]
fn bad_request(_req: &Request) -> Json<ErrorBody> {
    Json(ErrorBody {
        error: "invalid_input",
        message: "Malformed request".to_string(),
    })
}

#[catch(401)]
fn unauthorized(_req: &Request) -> Json<ErrorBody> {
    Json(ErrorBody {
        error: "unauthorized",
        message: "Not logged in as a voter".to_string(),
    })
}

#[catch(404)]
fn not_found(req: &Request) -> Json<ErrorBody> {
    Json(ErrorBody {
        error: "not_found",
        message: format!("No route for {} {}", req.method(), req.uri()),
    })
}

#[catch(422)]
fn unprocessable(_req: &Request) -> Json<ErrorBody> {
    Json(ErrorBody {
        error: "invalid_input",
        message: "Request body has the wrong shape".to_string(),
    })
}
