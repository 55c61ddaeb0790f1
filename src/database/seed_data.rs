//! One-time seeding with sample catalog data.
//!
//! Wipes whatever is present and repopulates in dependency order: genres,
//! developers and publishers first, then the games that reference them.
//! Platforms are left alone.

use anyhow::Result;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use tracing::info;
use uuid::Uuid;

use crate::database::entities::{
    developers, game_genres, game_platforms, games, genres, publishers,
};

pub async fn populate(db: &DatabaseConnection) -> Result<()> {
    info!("Clearing existing catalog records");
    game_genres::Entity::delete_many().exec(db).await?;
    game_platforms::Entity::delete_many().exec(db).await?;
    games::Entity::delete_many().exec(db).await?;
    genres::Entity::delete_many().exec(db).await?;
    developers::Entity::delete_many().exec(db).await?;
    publishers::Entity::delete_many().exec(db).await?;

    let genres = create_genres(db).await?;
    let developers = create_developers(db).await?;
    let publishers = create_publishers(db).await?;
    create_games(db, &genres, &developers, &publishers).await?;

    info!("Sample catalog created");
    Ok(())
}

async fn create_genres(db: &DatabaseConnection) -> Result<Vec<genres::Model>> {
    let names = [
        "Action",
        "Adventure",
        "Role-Playing Game (RPG)",
        "Third-Person Shooter",
        "Turn-Based Strategy",
    ];

    let mut created = Vec::new();
    for name in names {
        let genre = genres::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
        }
        .insert(db)
        .await?;
        info!("Added genre: {}", genre.name);
        created.push(genre);
    }
    Ok(created)
}

async fn create_developers(db: &DatabaseConnection) -> Result<Vec<developers::Model>> {
    let rows = [
        ("CD Projekt Red", Some(2002), "Studio"),
        ("Bethesda Game Studios", Some(2001), "Studio"),
        ("FromSoftware", Some(1986), "Studio"),
        ("Naughty Dog", Some(1984), "Studio"),
        ("Mega Crit", None, "Indie"),
    ];

    let mut created = Vec::new();
    for (name, time_of_creation, kind) in rows {
        let developer = developers::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            kind: Set(kind.to_string()),
            time_of_creation: Set(time_of_creation),
        }
        .insert(db)
        .await?;
        info!("Added developer: {}", developer.name);
        created.push(developer);
    }
    Ok(created)
}

async fn create_publishers(db: &DatabaseConnection) -> Result<Vec<publishers::Model>> {
    let rows = [
        ("CD Projekt", Some(1994)),
        ("Bethesda Softworks", Some(1986)),
        ("FromSoftware", Some(1986)),
        ("Sony Interactive Entertainment", Some(1993)),
        ("Humble Bundle", Some(2010)),
    ];

    let mut created = Vec::new();
    for (name, time_of_creation) in rows {
        let publisher = publishers::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            time_of_creation: Set(time_of_creation),
        }
        .insert(db)
        .await?;
        info!("Added publisher: {}", publisher.name);
        created.push(publisher);
    }
    Ok(created)
}

async fn create_games(
    db: &DatabaseConnection,
    genres: &[genres::Model],
    developers: &[developers::Model],
    publishers: &[publishers::Model],
) -> Result<()> {
    let rows: [(&str, i32, &str, &[usize], usize); 5] = [
        (
            "The Witcher 3: Wild Hunt",
            2015,
            "The Witcher 3: Wild Hunt is a 2015 action role-playing game developed and published by CD Projekt.",
            &[0, 1, 2],
            0,
        ),
        (
            "The Elder Scrolls V: Skyrim",
            2011,
            "The Elder Scrolls V: Skyrim is a 2011 action role-playing game developed by Bethesda Game Studios and published by Bethesda Softworks.",
            &[0, 1, 2],
            1,
        ),
        (
            "Dark Souls",
            2011,
            "Dark Souls is a 2011 action role-playing game developed by FromSoftware and published by FromSoftware.",
            &[0, 2],
            2,
        ),
        (
            "Uncharted 4: A Thief's End",
            2016,
            "Uncharted 4: A Thief's End is a 2016 action-adventure game developed by Naughty Dog and published by Sony Interactive Entertainment.",
            &[0, 1, 3],
            3,
        ),
        (
            "Slay the Spire",
            2017,
            "Slay the Spire is a 2017 roguelike deck-building game developed by Mega Crit and published by Humble Bundle.",
            &[4],
            4,
        ),
    ];

    for (name, year, description, genre_indexes, company) in rows {
        let game = games::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            time_of_creation: Set(Some(year)),
            description: Set(description.to_string()),
            developer_id: Set(Some(developers[company].id)),
            publisher_id: Set(Some(publishers[company].id)),
        }
        .insert(db)
        .await?;

        for &index in genre_indexes {
            game_genres::ActiveModel {
                game_id: Set(game.id),
                genre_id: Set(genres[index].id),
            }
            .insert(db)
            .await?;
        }
        info!("Added game: {}", game.name);
    }
    Ok(())
}
