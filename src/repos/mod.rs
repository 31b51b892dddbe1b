pub mod error;
pub mod note_repo;
pub mod user_repo;

pub use note_repo::NoteRepo;
pub use user_repo::UserRepo;
