//! Property tests across backends
//!
//! Whatever set of routes is written, every backend hands back the same set.

use std::collections::BTreeSet;

use pagestore_domain::{Repository, Route, RouteName, RoutePath};
use pagestore_persistence::{InMemoryRepository, JsonFileRepository};
use proptest::prelude::*;

fn segment() -> impl Strategy<Value = String> {
    "[a-z0-9][a-z0-9-]{0,11}"
}

fn route_paths() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set(
        prop::collection::vec(segment(), 1..4).prop_map(|segs| format!("/{}", segs.join("/"))),
        0..12,
    )
}

async fn store_all<R: Repository<Route>>(repo: &R, paths: &BTreeSet<String>) -> BTreeSet<String> {
    for path in paths {
        let route = Route::new(
            RoutePath::parse(path.as_str()).unwrap(),
            RouteName::parse(path.as_str()).unwrap(),
            Vec::new(),
        );
        repo.create(route).await.unwrap();
    }
    repo.find_all()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.path().to_string())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn backends_agree_on_stored_routes(paths in route_paths()) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let tmp = tempfile::tempdir().unwrap();

        let (memory, json, reopened) = rt.block_on(async {
            let memory = store_all(&InMemoryRepository::<Route>::new(), &paths).await;
            let json = store_all(&JsonFileRepository::<Route>::open(tmp.path()), &paths).await;
            let reopened = store_all(&JsonFileRepository::<Route>::open(tmp.path()), &BTreeSet::new()).await;
            (memory, json, reopened)
        });

        prop_assert_eq!(&memory, &paths);
        prop_assert_eq!(&json, &paths);
        prop_assert_eq!(&reopened, &paths);
    }
}
