// db/db.rs
use sqlx::{Pool, Postgres};

#[derive(Clone)]
pub struct DBClient {
    pub pool: Pool<Postgres>,
}

impl std::fmt::Debug for DBClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DBClient")
            .field("pool", &"Pool<Postgres>")
            .finish()
    }
}

impl DBClient {
    pub fn new(pool: Pool<Postgres>) -> Self {
        DBClient { pool }
    }
}

/// OFFSET for a 1-based page, computed in i64 so oversized page numbers
/// cannot overflow.
pub fn page_offset(page: u32, limit: usize) -> i64 {
    (i64::from(page) - 1) * limit as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_offset_math() {
        assert_eq!(page_offset(1, 10), 0);
        assert_eq!(page_offset(2, 10), 10);
        assert_eq!(page_offset(3, 25), 50);
    }

    #[test]
    fn test_page_offset_survives_huge_page_numbers() {
        let offset = page_offset(u32::MAX, 50);
        assert_eq!(offset, (i64::from(u32::MAX) - 1) * 50);
    }
}
