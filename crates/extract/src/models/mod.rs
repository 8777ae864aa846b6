mod book;
mod metadata;

pub use self::book::Book;
pub use self::metadata::Metadata;
