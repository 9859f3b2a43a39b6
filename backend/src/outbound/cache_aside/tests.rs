//! Behaviour of the cache-aside repository against an in-memory cache and a
//! mocked user service.

use std::sync::Arc;

use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ResourceId;
use crate::domain::ports::{
    MockDownloaderRepository, MockUserLimitSource, UserLimit, UserLimitSourceError,
};
use crate::outbound::memory::InMemoryDownloaderRepository;

#[fixture]
fn user_id() -> UserId {
    UserId::new("u1").expect("valid user id")
}

fn source_granting(user_id: &UserId, limit: u32, times: usize) -> MockUserLimitSource {
    let mut source = MockUserLimitSource::new();
    let granted = UserLimit {
        user_id: user_id.clone(),
        limit,
    };
    source
        .expect_fetch_limit()
        .with(eq(user_id.clone()))
        .times(times)
        .returning(move |_| Ok(granted.clone()));
    source
}

fn repository<C, S>(cache: C, source: S) -> CachedExternalDownloaderRepository<C, S> {
    CachedExternalDownloaderRepository::new(Arc::new(cache), Arc::new(source))
}

#[rstest]
#[tokio::test]
async fn cache_hit_never_calls_user_service(user_id: UserId) {
    let cached = ResourceDownloader::new(
        user_id.clone(),
        vec![ResourceId::new("r1").expect("valid resource id")],
        3,
    );
    let cache = InMemoryDownloaderRepository::new();
    cache.save(&cached).await.expect("seed cache");
    let mut source = MockUserLimitSource::new();
    source.expect_fetch_limit().times(0);

    let repo = repository(cache, source);
    let loaded = repo.get(&user_id).await.expect("cache hit");

    assert_eq!(loaded, cached);
}

#[rstest]
#[tokio::test]
async fn cache_miss_fetches_once_then_serves_from_cache(user_id: UserId) {
    let repo = repository(
        InMemoryDownloaderRepository::new(),
        source_granting(&user_id, 10, 1),
    );

    let first = repo.get(&user_id).await.expect("first get");
    let second = repo.get(&user_id).await.expect("second get");

    assert_eq!(first, ResourceDownloader::fresh(user_id.clone(), 10));
    assert!(first.resources().is_empty());
    assert_eq!(second, first);
    assert_eq!(
        repo.cache.get(&user_id).await.expect("cache populated"),
        first
    );
}

#[rstest]
#[tokio::test]
async fn each_user_gets_its_own_lookup(user_id: UserId) {
    let other = UserId::new("u2").expect("valid user id");
    let mut source = MockUserLimitSource::new();
    source
        .expect_fetch_limit()
        .times(2)
        .returning(|id| {
            Ok(UserLimit {
                user_id: id.clone(),
                limit: 10,
            })
        });
    let repo = repository(InMemoryDownloaderRepository::new(), source);

    let first = repo.get(&user_id).await.expect("u1 created");
    let second = repo.get(&other).await.expect("u2 created");

    assert_eq!(first.user_id(), &user_id);
    assert_eq!(second.user_id(), &other);
}

#[rstest]
#[tokio::test]
async fn user_service_failure_propagates_and_leaves_cache_empty(user_id: UserId) {
    let mut source = MockUserLimitSource::new();
    source
        .expect_fetch_limit()
        .times(1)
        .return_once(|_| Err(UserLimitSourceError::transport("connection refused")));
    let repo = repository(InMemoryDownloaderRepository::new(), source);

    let err = repo.get(&user_id).await.expect_err("lookup fails");

    assert_eq!(
        err,
        DownloaderRepositoryError::external_service(UserLimitSourceError::transport(
            "connection refused"
        ))
    );
    assert!(repo.cache.is_empty().expect("lock available"));
}

#[rstest]
#[tokio::test]
async fn cache_read_error_falls_back_to_user_service(user_id: UserId) {
    let mut cache = MockDownloaderRepository::new();
    cache
        .expect_get()
        .times(1)
        .return_once(|_| Err(DownloaderRepositoryError::storage("connection reset")));
    cache.expect_save().times(1).return_once(|_| Ok(()));
    let repo = repository(cache, source_granting(&user_id, 4, 1));

    let loaded = repo.get(&user_id).await.expect("fallback succeeds");

    assert_eq!(loaded, ResourceDownloader::fresh(user_id, 4));
}

#[rstest]
#[tokio::test]
async fn failed_cache_write_on_creation_is_not_an_error(user_id: UserId) {
    let mut cache = MockDownloaderRepository::new();
    cache
        .expect_get()
        .times(1)
        .return_once(|id| Err(DownloaderRepositoryError::not_found(id.as_str())));
    cache
        .expect_save()
        .times(1)
        .return_once(|_| Err(DownloaderRepositoryError::storage("read-only replica")));
    let repo = repository(cache, source_granting(&user_id, 2, 1));

    let loaded = repo.get(&user_id).await.expect("get still succeeds");

    assert_eq!(loaded.limit(), 2);
}

#[rstest]
#[tokio::test]
async fn save_writes_through_without_user_service(user_id: UserId) {
    let mut source = MockUserLimitSource::new();
    source.expect_fetch_limit().times(0);
    let repo = repository(InMemoryDownloaderRepository::new(), source);
    let downloader = ResourceDownloader::new(
        user_id.clone(),
        vec![ResourceId::new("r1").expect("valid resource id")],
        5,
    );

    repo.save(&downloader).await.expect("save succeeds");

    assert_eq!(repo.get(&user_id).await.expect("hit"), downloader);
}

#[rstest]
#[tokio::test]
async fn save_failure_is_propagated(user_id: UserId) {
    let mut cache = MockDownloaderRepository::new();
    cache
        .expect_save()
        .times(1)
        .return_once(|_| Err(DownloaderRepositoryError::storage("disk full")));
    let mut source = MockUserLimitSource::new();
    source.expect_fetch_limit().times(0);
    let repo = repository(cache, source);

    let err = repo
        .save(&ResourceDownloader::fresh(user_id, 1))
        .await
        .expect_err("save fails");

    assert_eq!(err, DownloaderRepositoryError::storage("disk full"));
}
