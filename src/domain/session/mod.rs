//! Anonymous sessions that scope experiment history

mod entity;
mod repository;

pub use entity::{Session, SessionId};
pub(crate) use entity::parse_v4;
pub use repository::SessionRepository;
