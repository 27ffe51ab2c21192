//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Reward grants and claim
//! transitions are single conditional statements; `rows_affected == 0`
//! (or an empty `RETURNING`) means the precondition did not hold.

pub mod daily_mission_repo;
pub mod dictionary_repo;
pub mod mission_repo;
pub mod quiz_repo;
pub mod quote_repo;
pub mod streak_repo;
pub mod user_repo;

pub use daily_mission_repo::DailyMissionRepo;
pub use dictionary_repo::DictionaryRepo;
pub use mission_repo::MissionRepo;
pub use quiz_repo::QuizRepo;
pub use quote_repo::QuoteRepo;
pub use streak_repo::StreakRepo;
pub use user_repo::UserRepo;
