pub mod memory;
pub mod note;
pub mod user;

pub use memory::InMemoryNoteRepository;
pub use memory::InMemoryUserRepository;
pub use note::PostgresNoteRepository;
pub use user::PostgresUserRepository;
