//! Service-level behavior against an in-memory store.

use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use uuid::Uuid;

use game_inventory::database::connection::establish_connection;
use game_inventory::database::entities::{game_genres, games, genres};
use game_inventory::errors::InventoryError;
use game_inventory::server::forms::FormData;
use game_inventory::services::{DeveloperService, GameService, PublisherService, TagService};
use game_inventory::validation::YearBounds;

async fn store() -> DatabaseConnection {
    establish_connection(":memory:")
        .await
        .expect("in-memory store")
}

fn form(pairs: &[(&str, &str)]) -> FormData {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, value);
    }
    FormData::parse(serializer.finish().as_bytes())
}

fn expect_validation(err: InventoryError) -> game_inventory::validation::ValidationErrors {
    match err {
        InventoryError::Validation(errors) => errors,
        other => panic!("expected a validation error, got {:?}", other),
    }
}

fn genre_service(db: &DatabaseConnection) -> TagService<genres::Entity> {
    TagService::new(db.clone())
}

#[tokio::test]
async fn create_without_name_persists_nothing() {
    let db = store().await;
    let err = genre_service(&db)
        .create(&form(&[("name", "   ")]))
        .await
        .unwrap_err();
    let errors = expect_validation(err);
    assert!(!errors.field("name").is_empty());

    let count = genres::Entity::find().count(&db).await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn duplicate_name_is_rejected_but_self_update_is_not() {
    let db = store().await;
    let service = genre_service(&db);

    let action = service.create(&form(&[("name", "Action")])).await.unwrap();

    let err = service
        .create(&form(&[("name", "Action")]))
        .await
        .unwrap_err();
    let errors = expect_validation(err);
    assert!(!errors.field("name").is_empty());
    assert_eq!(genres::Entity::find().count(&db).await.unwrap(), 1);

    // Resubmitting the record's own name must not trip the uniqueness rule.
    let updated = service
        .update(action.id, &form(&[("name", "Action")]))
        .await
        .unwrap();
    assert_eq!(updated.name, "Action");
}

#[tokio::test]
async fn genre_names_shorter_than_three_chars_are_rejected() {
    let db = store().await;
    let err = genre_service(&db)
        .create(&form(&[("name", "ab")]))
        .await
        .unwrap_err();
    assert!(expect_validation(err).field("name")[0].contains("at least 3"));
}

#[tokio::test]
async fn year_bounds_are_enforced_for_developers() {
    let db = store().await;
    let years = YearBounds::current();
    let service = DeveloperService::new(db.clone(), years);

    let err = service
        .create(&form(&[
            ("name", "Naughty Dog"),
            ("type", "Studio"),
            ("time_of_creation", "1959"),
        ]))
        .await
        .unwrap_err();
    assert!(!expect_validation(err).field("time_of_creation").is_empty());

    let low = service
        .create(&form(&[
            ("name", "Naughty Dog"),
            ("type", "Studio"),
            ("time_of_creation", "1960"),
        ]))
        .await
        .unwrap();
    assert_eq!(low.time_of_creation, Some(1960));
}

#[tokio::test]
async fn year_bounds_are_enforced_for_publishers() {
    let db = store().await;
    let years = YearBounds::current();
    let service = PublisherService::new(db.clone(), years);

    let future = (years.max + 1).to_string();
    let err = service
        .create(&form(&[
            ("name", "Humble Bundle"),
            ("time_of_creation", &future),
        ]))
        .await
        .unwrap_err();
    assert!(!expect_validation(err).field("time_of_creation").is_empty());

    let now = years.max.to_string();
    let current = service
        .create(&form(&[
            ("name", "Humble Bundle"),
            ("time_of_creation", &now),
        ]))
        .await
        .unwrap();
    assert_eq!(current.time_of_creation, Some(years.max));
}

#[tokio::test]
async fn year_bounds_are_enforced_for_games() {
    let db = store().await;
    let years = YearBounds::current();
    let service = GameService::new(db.clone(), years);

    let err = service
        .create(&form(&[("name", "Foo"), ("time_of_creation", "1959")]))
        .await
        .unwrap_err();
    assert!(!expect_validation(err).field("time_of_creation").is_empty());

    let game = service
        .create(&form(&[("name", "Foo"), ("time_of_creation", "1960")]))
        .await
        .unwrap();
    assert_eq!(game.time_of_creation, Some(1960));
}

#[tokio::test]
async fn developer_type_must_be_a_known_value() {
    let db = store().await;
    let service = DeveloperService::new(db.clone(), YearBounds::current());

    let err = service
        .create(&form(&[("name", "Mega Crit"), ("type", "Garage")]))
        .await
        .unwrap_err();
    assert!(!expect_validation(err).field("type").is_empty());
}

#[tokio::test]
async fn deleting_a_genre_detaches_it_from_every_game() {
    let db = store().await;
    let genre_svc = genre_service(&db);
    let game_svc = GameService::new(db.clone(), YearBounds::current());

    let action = genre_svc.create(&form(&[("name", "Action")])).await.unwrap();
    let strategy = genre_svc
        .create(&form(&[("name", "Strategy")]))
        .await
        .unwrap();

    let action_id = action.id.to_string();
    let strategy_id = strategy.id.to_string();
    let first = game_svc
        .create(&form(&[
            ("name", "First"),
            ("genre", &action_id),
            ("genre", &strategy_id),
        ]))
        .await
        .unwrap();
    let second = game_svc
        .create(&form(&[
            ("name", "Second"),
            ("genre", &action_id),
            ("genre", &strategy_id),
        ]))
        .await
        .unwrap();

    genre_svc.delete(action.id).await.unwrap();

    // The genre row is gone and both games kept only their other genre.
    assert!(genres::Entity::find_by_id(action.id)
        .one(&db)
        .await
        .unwrap()
        .is_none());
    for game_id in [first.id, second.id] {
        let remaining = game_svc.detail(game_id).await.unwrap().genres;
        let names: Vec<_> = remaining.iter().map(|genre| genre.name.as_str()).collect();
        assert_eq!(names, ["Strategy"]);
    }
}

#[tokio::test]
async fn deleting_a_developer_clears_only_the_reference() {
    let db = store().await;
    let genre_svc = genre_service(&db);
    let developer_svc = DeveloperService::new(db.clone(), YearBounds::current());
    let game_svc = GameService::new(db.clone(), YearBounds::current());

    let action = genre_svc.create(&form(&[("name", "Action")])).await.unwrap();
    let developer = developer_svc
        .create(&form(&[("name", "FromSoftware"), ("type", "Studio")]))
        .await
        .unwrap();

    let developer_id = developer.id.to_string();
    let action_id = action.id.to_string();
    let game = game_svc
        .create(&form(&[
            ("name", "Dark Souls"),
            ("description", "Tough but fair"),
            ("genre", &action_id),
            ("developer", &developer_id),
        ]))
        .await
        .unwrap();

    developer_svc.delete(developer.id).await.unwrap();

    let after = game_svc.detail(game.id).await.unwrap();
    assert_eq!(after.game.developer_id, None);
    assert!(after.developer.is_none());
    assert_eq!(after.game.name, "Dark Souls");
    assert_eq!(after.game.description, "Tough but fair");
    let names: Vec<_> = after.genres.iter().map(|genre| genre.name.as_str()).collect();
    assert_eq!(names, ["Action"]);
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let db = store().await;
    let missing = Uuid::new_v4();

    let err = genre_service(&db).detail(missing).await.unwrap_err();
    assert!(err.is_not_found());

    let err = GameService::new(db.clone(), YearBounds::current())
        .delete(missing)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn genre_lifecycle_end_to_end() {
    let db = store().await;
    let genre_svc = genre_service(&db);
    let game_svc = GameService::new(db.clone(), YearBounds::current());

    let action = genre_svc.create(&form(&[("name", "Action")])).await.unwrap();
    let action_id = action.id.to_string();
    let foo = game_svc
        .create(&form(&[("name", "Foo"), ("genre", &action_id)]))
        .await
        .unwrap();

    let listed = game_inventory::services::catalog::list::<games::Entity>(&db)
        .await
        .unwrap();
    assert!(listed.iter().any(|item| item.name == "Foo"));

    genre_svc.delete(action.id).await.unwrap();

    let detail = game_svc.detail(foo.id).await.unwrap();
    assert!(detail.genres.is_empty());
    assert_eq!(
        game_genres::Entity::find().count(&db).await.unwrap(),
        0
    );
}

#[tokio::test]
async fn multiple_failures_are_reported_together() {
    let db = store().await;
    let service = GameService::new(db.clone(), YearBounds::current());

    let err = service
        .create(&form(&[
            ("name", ""),
            ("time_of_creation", "1700"),
            ("genre", "not-an-id"),
        ]))
        .await
        .unwrap_err();
    let errors = expect_validation(err);
    assert!(!errors.field("name").is_empty());
    assert!(!errors.field("time_of_creation").is_empty());
    assert!(!errors.field("genre").is_empty());
    assert_eq!(games::Entity::find().count(&db).await.unwrap(), 0);
}
