//! Repository contract tests
//!
//! These checks define the behaviour every [`Repository`] implementation
//! must show. A backend that passes them is substitutable for any other.
//! Enabled for other crates through the `testing` feature.
//!
//! The sequence runs against a fresh, empty collection:
//!
//! 1. `create` returns a record with the input's identifier
//! 2. `find_by_id` returns that record
//! 3. a second `create` fails with `AlreadyExists` and changes nothing
//! 4. `find_all` contains the record
//! 5. `delete` returns `true`
//! 6. `find_by_id` returns `None`
//! 7. a second `delete` returns `false`
//! 8. `update` of the deleted record fails with `NotFound`
//! 9. `create` then `update` with a modification is reflected by both the
//!    returned value and a later `find_by_id`

use std::fmt;

use crate::{
    content::{Block, HeroProps, PageContent},
    entity::Entity,
    errors::RepositoryError,
    repositories::Repository,
    route::Route,
    value_objects::{ContentPath, RouteName, RoutePath},
};

/// A record type the contract can be exercised with
pub trait ContractSubject: Entity + fmt::Debug {
    /// A record that is not yet stored
    fn sample() -> Self;

    /// The same record with a caller-visible change
    fn modified(self) -> Self;

    /// Equality with backend-populated fields ignored
    fn content_eq(&self, other: &Self) -> bool;
}

impl ContractSubject for Route {
    fn sample() -> Self {
        Route::new(
            RoutePath::parse("/about").expect("valid path"),
            RouteName::parse("About Page").expect("valid name"),
            vec![ContentPath::parse("data/content/about.json").expect("valid content path")],
        )
    }

    fn modified(self) -> Self {
        self.with_name(RouteName::parse("About Us").expect("valid name"))
    }

    fn content_eq(&self, other: &Self) -> bool {
        self.same_content(other)
    }
}

impl ContractSubject for PageContent {
    fn sample() -> Self {
        PageContent::new(
            ContentPath::parse("data/content/about.json").expect("valid content path"),
            PageContent::default_homepage().into_blocks(),
        )
    }

    fn modified(mut self) -> Self {
        self.push_block(Block::Hero(HeroProps {
            headline: "About us".to_string(),
            subheadline: "Who we are".to_string(),
        }));
        self
    }

    fn content_eq(&self, other: &Self) -> bool {
        self.same_content(other)
    }
}

fn expect_already_exists<E: Entity>(err: RepositoryError, id: &E::Id) {
    match err {
        RepositoryError::AlreadyExists { entity_type, id: got } => {
            assert_eq!(entity_type, E::ENTITY_TYPE, "Contract violation: wrong entity type");
            assert_eq!(got, id.to_string(), "Contract violation: wrong id in AlreadyExists");
        }
        other => panic!("Contract violation: expected AlreadyExists, got {other:?}"),
    }
}

fn expect_not_found<E: Entity>(err: RepositoryError, id: &E::Id) {
    match err {
        RepositoryError::NotFound { entity_type, id: got } => {
            assert_eq!(entity_type, E::ENTITY_TYPE, "Contract violation: wrong entity type");
            assert_eq!(got, id.to_string(), "Contract violation: wrong id in NotFound");
        }
        other => panic!("Contract violation: expected NotFound, got {other:?}"),
    }
}

/// Run the full contract against an empty repository
pub async fn run_repository_contract<E, R>(repo: &R)
where
    E: ContractSubject,
    R: Repository<E> + ?Sized,
{
    let sample = E::sample();
    let id = sample.id().clone();

    assert!(
        repo.find_by_id(&id).await.expect("find_by_id on empty repo").is_none(),
        "Contract violation: repository under test must start empty"
    );

    // 1. create
    let created = repo
        .create(sample.clone())
        .await
        .expect("Contract violation: create() should succeed");
    assert_eq!(created.id(), &id, "Contract violation: create() changed the identifier");
    assert!(created.content_eq(&sample), "Contract violation: create() altered the record");

    // 2. find_by_id
    let found = repo
        .find_by_id(&id)
        .await
        .expect("Contract violation: find_by_id() should not return Err")
        .expect("Contract violation: find_by_id() must return Some after create()");
    assert_eq!(found.id(), &id);
    assert!(found.content_eq(&created), "Contract violation: stored record differs");
    assert!(repo.exists(&id).await.expect("exists() should not return Err"));

    // 3. duplicate create
    let err = repo
        .create(sample.clone().modified())
        .await
        .expect_err("Contract violation: duplicate create() must fail");
    expect_already_exists::<E>(err, &id);
    let unchanged = repo.find_by_id(&id).await.expect("find_by_id").expect("still stored");
    assert!(
        unchanged.content_eq(&created),
        "Contract violation: failed create() modified the stored record"
    );

    // 4. find_all
    let all = repo
        .find_all()
        .await
        .expect("Contract violation: find_all() should not return Err");
    assert_eq!(all.len(), 1, "Contract violation: find_all() must return exactly the stored records");
    assert!(all.iter().any(|e| e.id() == &id));

    // 5. delete
    assert!(
        repo.delete(&id).await.expect("Contract violation: delete() should not return Err"),
        "Contract violation: delete() of a stored record must return true"
    );

    // 6. gone
    assert!(
        repo.find_by_id(&id).await.expect("find_by_id").is_none(),
        "Contract violation: find_by_id() must return None after delete()"
    );
    assert!(!repo.exists(&id).await.expect("exists"));

    // 7. second delete
    assert!(
        !repo.delete(&id).await.expect("Contract violation: repeated delete() must not fail"),
        "Contract violation: delete() of a missing record must return false"
    );

    // 8. update before create
    let err = repo
        .update(sample.clone())
        .await
        .expect_err("Contract violation: update() of a missing record must fail");
    expect_not_found::<E>(err, &id);
    assert!(
        repo.find_by_id(&id).await.expect("find_by_id").is_none(),
        "Contract violation: failed update() must not create the record"
    );

    // 9. create then update
    let created = repo.create(sample.clone()).await.expect("re-create after delete");
    let changed = sample.modified();
    let updated = repo
        .update(changed.clone())
        .await
        .expect("Contract violation: update() of a stored record should succeed");
    assert!(updated.content_eq(&changed), "Contract violation: update() result lacks the change");
    assert_eq!(
        updated.created_at(),
        created.created_at(),
        "Contract violation: update() must preserve creation time"
    );
    let found = repo.find_by_id(&id).await.expect("find_by_id").expect("stored");
    assert!(found.content_eq(&changed), "Contract violation: update() was not persisted");

    repo.delete(&id).await.expect("cleanup delete");
}

/// The concrete `/about` walk-through: create, duplicate, rename, delete.
pub async fn run_about_page_scenario<R>(repo: &R)
where
    R: Repository<Route> + ?Sized,
{
    let about = RoutePath::parse("/about").expect("valid path");
    let route = Route::new(
        about.clone(),
        RouteName::parse("About Page").expect("valid name"),
        Vec::new(),
    );

    let created = repo.create(route.clone()).await.expect("create /about");
    assert_eq!(created.path(), &about);
    assert_eq!(
        repo.find_by_id(&about).await.expect("find").expect("stored").name().as_str(),
        "About Page"
    );

    match repo.create(route.clone()).await {
        Err(RepositoryError::AlreadyExists { id, .. }) => assert_eq!(id, "/about"),
        other => panic!("expected AlreadyExists for /about, got {other:?}"),
    }

    let renamed = route.with_name(RouteName::parse("About Us").expect("valid name"));
    let updated = repo.update(renamed).await.expect("rename /about");
    assert_eq!(updated.name().as_str(), "About Us");
    assert_eq!(
        repo.find_by_id(&about).await.expect("find").expect("stored").name().as_str(),
        "About Us"
    );

    assert!(repo.delete(&about).await.expect("delete"));
    assert!(repo.find_by_id(&about).await.expect("find").is_none());
    assert!(!repo.delete(&about).await.expect("second delete"));
}
