mod error;
mod traits;
mod types;

pub use error::{PaginationError, RepositoryError, Result};
pub use traits::{ArticleRepository, ArticleStore};
pub use types::{Pagination, DEFAULT_PAGE_SIZE};
