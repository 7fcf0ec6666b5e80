//! Pure helpers behind the public journal pages: search, paging and the
//! issue archive.

mod archive;
mod page;
mod search;

pub use archive::{ArchiveIndex, ArchiveYear};
pub use page::{Page, paginate};
pub use search::search_articles;
