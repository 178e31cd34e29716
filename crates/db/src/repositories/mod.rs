//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument. Content tables also implement
//! [`crate::entity::Entity`] so list / get / delete go through
//! [`crate::entity::EntityRepo`].

pub mod achievement_repo;
pub mod event_repo;
pub mod news_repo;
pub mod ppdb_repo;
pub mod school_activity_repo;
pub mod school_info_repo;
pub mod teacher_repo;
pub mod testimony_repo;
pub mod user_repo;

pub use achievement_repo::AchievementRepo;
pub use event_repo::EventRepo;
pub use news_repo::NewsRepo;
pub use ppdb_repo::PpdbRepo;
pub use school_activity_repo::SchoolActivityRepo;
pub use school_info_repo::{DecreaseError, DecreaseOutcome, SchoolInfoRepo};
pub use teacher_repo::TeacherRepo;
pub use testimony_repo::TestimonyRepo;
pub use user_repo::UserRepo;
