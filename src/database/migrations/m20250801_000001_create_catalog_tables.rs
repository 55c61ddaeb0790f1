use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// No foreign keys on purpose: reference cleanup is the responsibility of the
// delete operations, not the store.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Genres::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Genres::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Genres::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_genres_name")
                    .table(Genres::Table)
                    .col(Genres::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Platforms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Platforms::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Platforms::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_platforms_name")
                    .table(Platforms::Table)
                    .col(Platforms::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Developers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Developers::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Developers::Name).string().not_null())
                    .col(ColumnDef::new(Developers::Type).string().not_null())
                    .col(ColumnDef::new(Developers::TimeOfCreation).integer())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Publishers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Publishers::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Publishers::Name).string().not_null())
                    .col(ColumnDef::new(Publishers::TimeOfCreation).integer())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Games::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Games::Name).string().not_null())
                    .col(ColumnDef::new(Games::TimeOfCreation).integer())
                    .col(ColumnDef::new(Games::Description).string().not_null())
                    .col(ColumnDef::new(Games::DeveloperId).uuid())
                    .col(ColumnDef::new(Games::PublisherId).uuid())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_games_developer_id")
                    .table(Games::Table)
                    .col(Games::DeveloperId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_games_publisher_id")
                    .table(Games::Table)
                    .col(Games::PublisherId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GameGenres::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(GameGenres::GameId).uuid().not_null())
                    .col(ColumnDef::new(GameGenres::GenreId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(GameGenres::GameId)
                            .col(GameGenres::GenreId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_game_genres_genre_id")
                    .table(GameGenres::Table)
                    .col(GameGenres::GenreId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GamePlatforms::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(GamePlatforms::GameId).uuid().not_null())
                    .col(ColumnDef::new(GamePlatforms::PlatformId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(GamePlatforms::GameId)
                            .col(GamePlatforms::PlatformId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_game_platforms_platform_id")
                    .table(GamePlatforms::Table)
                    .col(GamePlatforms::PlatformId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GamePlatforms::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(GameGenres::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Games::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Publishers::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Developers::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Platforms::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Genres::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Genres {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Platforms {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Developers {
    Table,
    Id,
    Name,
    Type,
    TimeOfCreation,
}

#[derive(DeriveIden)]
enum Publishers {
    Table,
    Id,
    Name,
    TimeOfCreation,
}

#[derive(DeriveIden)]
enum Games {
    Table,
    Id,
    Name,
    TimeOfCreation,
    Description,
    DeveloperId,
    PublisherId,
}

#[derive(DeriveIden)]
enum GameGenres {
    Table,
    GameId,
    GenreId,
}

#[derive(DeriveIden)]
enum GamePlatforms {
    Table,
    GameId,
    PlatformId,
}
