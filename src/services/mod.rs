pub mod catalog;
pub mod developer_service;
pub mod game_service;
pub mod publisher_service;
pub mod tag_service;

pub use catalog::{CatalogEntity, ListItem, TagEntity};
pub use developer_service::{DeveloperService, DEVELOPER_TYPES};
pub use game_service::{GameDetail, GameFormContext, GameService};
pub use publisher_service::PublisherService;
pub use tag_service::TagService;
