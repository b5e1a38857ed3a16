pub mod entry_serializer;
pub mod front_matter;

pub use entry_serializer::serialize_entry;
pub use front_matter::{FrontMatter, FrontMatterError, parse_front_matter};
