use rocket::{
    http::{Cookie, CookieJar, Status},
    serde::json::Json,
    Route, State,
};

use crate::{
    error::Result,
    model::{
        api::auth::{AuthToken, LoginRequest, AUTH_TOKEN_COOKIE},
        common::Voter,
    },
    service::VotingService,
    store::Store,
    Config,
};

pub fn routes() -> Vec<Route> {
    routes![login, logout]
}

/// Log in with a public voter identifier. No password: possession of the
/// identifier is the credential.
#[post("/auth/voter", data = "<request>", format = "json")]
pub async fn login(
    request: Json<LoginRequest>,
    cookies: &CookieJar<'_>,
    store: Store,
    config: &State<Config>,
) -> Result<Json<Voter>> {
    let voter = VotingService::new(&*store).login(&request.login_id).await?;

    let token = AuthToken::new(&voter);
    cookies.add(token.into_cookie(config)?);

    Ok(Json(voter))
}

#[delete("/auth")]
pub fn logout(cookies: &CookieJar) -> Status {
    cookies.remove(Cookie::named(AUTH_TOKEN_COOKIE));
    Status::Ok
}

#[cfg(test)]
mod tests {
    use rocket::{
        http::ContentType,
        local::asynchronous::Client,
        serde::json::serde_json::{self, json, Value},
    };

    use crate::store::{BallotStore, IdentityStore, MemoryStore};

    use super::*;

    #[backend_test]
    async fn login_valid(client: Client) {
        let response = client
            .post(uri!(login))
            .header(ContentType::JSON)
            .body(json!(LoginRequest::example()).to_string())
            .dispatch()
            .await;

        assert_eq!(Status::Ok, response.status());
        assert!(client.cookies().get(AUTH_TOKEN_COOKIE).is_some());

        let raw_response = response.into_string().await.unwrap();
        let voter = serde_json::from_str::<Voter>(&raw_response).unwrap();
        assert_eq!(voter.login_id, "VOT12345");
        assert_eq!(voter.name, "John Doe");
        assert!(!voter.has_voted);
    }

    #[backend_test]
    async fn login_trims_identifier(client: Client) {
        let response = client
            .post(uri!(login))
            .header(ContentType::JSON)
            .body(json!({ "login_id": "  VOT67890 " }).to_string())
            .dispatch()
            .await;

        assert_eq!(Status::Ok, response.status());
        let raw_response = response.into_string().await.unwrap();
        let voter = serde_json::from_str::<Voter>(&raw_response).unwrap();
        assert!(voter.has_voted);
    }

    #[backend_test]
    async fn login_unknown(client: Client) {
        let response = client
            .post(uri!(login))
            .header(ContentType::JSON)
            .body(json!(LoginRequest::unknown()).to_string())
            .dispatch()
            .await;

        assert_eq!(Status::NotFound, response.status());
        assert_eq!(None, client.cookies().get(AUTH_TOKEN_COOKIE));

        let raw_response = response.into_string().await.unwrap();
        let body = serde_json::from_str::<Value>(&raw_response).unwrap();
        assert_eq!(body["error"], "not_found");
    }

    #[backend_test]
    async fn login_empty(client: Client) {
        let response = client
            .post(uri!(login))
            .header(ContentType::JSON)
            .body(json!({ "login_id": "   " }).to_string())
            .dispatch()
            .await;

        assert_eq!(Status::BadRequest, response.status());
        assert_eq!(None, client.cookies().get(AUTH_TOKEN_COOKIE));
    }

    #[backend_test]
    async fn login_does_not_mutate(client: Client, store: MemoryStore) {
        let before = store.list_ballots().await.unwrap();
        client
            .post(uri!(login))
            .header(ContentType::JSON)
            .body(json!(LoginRequest::example()).to_string())
            .dispatch()
            .await;

        assert_eq!(before, store.list_ballots().await.unwrap());
        let voter = store.find_voter(&"user-1".into()).await.unwrap().unwrap();
        assert!(!voter.has_voted);
    }

    #[backend_test(voter)]
    async fn logout_voter(client: Client) {
        assert!(client.cookies().get(AUTH_TOKEN_COOKIE).is_some());

        let response = client.delete(uri!(logout)).dispatch().await;

        assert_eq!(Status::Ok, response.status());
        assert_eq!(None, client.cookies().get(AUTH_TOKEN_COOKIE));
    }

    #[backend_test]
    async fn logout_not_logged_in(client: Client) {
        let response = client.delete(uri!(logout)).dispatch().await;

        assert_eq!(Status::Ok, response.status());
    }
}
