//! `HttpUserLimitSource` against a local actix-web stand-in for the user
//! service.

use std::net::SocketAddr;
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpResponse, HttpServer, get, web};
use reqwest::Url;
use resource_downloader::domain::UserId;
use resource_downloader::domain::ports::{UserLimit, UserLimitSource, UserLimitSourceError};
use resource_downloader::outbound::user_service::HttpUserLimitSource;
use rstest::rstest;

#[get("/users/{user_id}")]
async fn user(path: web::Path<String>) -> HttpResponse {
    match path.into_inner().as_str() {
        "limited" => HttpResponse::Ok().json(serde_json::json!({"user_id": "limited", "limit": 3})),
        "broken" => HttpResponse::InternalServerError().body("database unavailable"),
        "garbled" => HttpResponse::Ok().body("<html>not json</html>"),
        "slow" => {
            tokio::time::sleep(Duration::from_millis(500)).await;
            HttpResponse::Ok().json(serde_json::json!({"user_id": "slow", "limit": 1}))
        }
        _ => HttpResponse::NotFound().finish(),
    }
}

fn start_stub() -> (SocketAddr, ServerHandle) {
    let server = HttpServer::new(|| App::new().service(user))
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind stub user service");
    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);
    (addr, handle)
}

fn source(addr: SocketAddr, timeout: Duration) -> HttpUserLimitSource {
    let base = Url::parse(&format!("http://{addr}")).expect("valid base url");
    HttpUserLimitSource::new(base, timeout).expect("client builds")
}

fn user_id(raw: &str) -> UserId {
    UserId::new(raw).expect("valid user id")
}

#[actix_web::test]
async fn fetches_limit_for_known_user() {
    let (addr, handle) = start_stub();

    let limit = source(addr, Duration::from_secs(5))
        .fetch_limit(&user_id("limited"))
        .await
        .expect("limit fetched");

    assert_eq!(
        limit,
        UserLimit {
            user_id: user_id("limited"),
            limit: 3
        }
    );
    handle.stop(true).await;
}

#[rstest]
#[case::unknown("ghost")]
#[case::server_error("broken")]
#[case::bad_body("garbled")]
#[actix_web::test]
async fn maps_failures(#[case] raw_user: &str) {
    let (addr, handle) = start_stub();

    let err = source(addr, Duration::from_secs(5))
        .fetch_limit(&user_id(raw_user))
        .await
        .expect_err("lookup fails");

    match raw_user {
        "ghost" => assert_eq!(err, UserLimitSourceError::not_found("ghost")),
        "broken" => assert_eq!(err, UserLimitSourceError::status(500_u16, "database unavailable")),
        _ => assert!(matches!(err, UserLimitSourceError::Decode { .. })),
    }
    handle.stop(true).await;
}

#[actix_web::test]
async fn slow_responses_time_out() {
    let (addr, handle) = start_stub();

    let err = source(addr, Duration::from_millis(50))
        .fetch_limit(&user_id("slow"))
        .await
        .expect_err("request times out");

    assert!(
        matches!(err, UserLimitSourceError::Timeout { .. }),
        "expected timeout, got {err:?}"
    );
    handle.stop(false).await;
}
