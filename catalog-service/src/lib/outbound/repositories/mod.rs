mod book;
mod identity;

pub use book::SqliteBookRepository;
pub use identity::SqliteIdentityRepository;
