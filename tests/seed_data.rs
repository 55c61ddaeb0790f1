//! The seeding routine populates the fixed sample catalog and is idempotent
//! in count because it wipes first.

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

use game_inventory::database::connection::establish_connection;
use game_inventory::database::entities::{
    developers, game_genres, games, genres, platforms, publishers,
};
use game_inventory::database::seed_data;

#[tokio::test]
async fn populate_creates_the_sample_catalog() {
    let db = establish_connection(":memory:").await.expect("store");

    seed_data::populate(&db).await.expect("seeding succeeds");
    // A second run wipes and repopulates rather than duplicating.
    seed_data::populate(&db).await.expect("seeding is repeatable");

    assert_eq!(genres::Entity::find().count(&db).await.unwrap(), 5);
    assert_eq!(developers::Entity::find().count(&db).await.unwrap(), 5);
    assert_eq!(publishers::Entity::find().count(&db).await.unwrap(), 5);
    assert_eq!(games::Entity::find().count(&db).await.unwrap(), 5);
    assert_eq!(platforms::Entity::find().count(&db).await.unwrap(), 0);

    // Every game references an existing developer and publisher.
    for game in games::Entity::find().all(&db).await.unwrap() {
        assert!(game.developer_id.is_some());
        assert!(game.publisher_id.is_some());
    }

    // Spot-check one reference set: Slay the Spire is tagged only with
    // Turn-Based Strategy.
    let spire = games::Entity::find()
        .filter(games::Column::Name.eq("Slay the Spire"))
        .one(&db)
        .await
        .unwrap()
        .expect("seeded game");
    let tags = game_genres::Entity::find()
        .filter(game_genres::Column::GameId.eq(spire.id))
        .all(&db)
        .await
        .unwrap();
    assert_eq!(tags.len(), 1);
    let strategy = genres::Entity::find()
        .filter(genres::Column::Name.eq("Turn-Based Strategy"))
        .one(&db)
        .await
        .unwrap()
        .expect("seeded genre");
    assert_eq!(tags[0].genre_id, strategy.id);
}
