//! In-process repository implementations.
//!
//! Used when no database is configured and by the HTTP integration tests.
//! Data lives for the lifetime of the process only. Each repository keeps
//! its own id sequence starting at 1, mirroring `BIGSERIAL`.

mod note;
mod todo;
mod token;
mod user;

pub use note::MemoryNoteRepository;
pub use todo::MemoryTodoRepository;
pub use token::MemoryTokenRepository;
pub use user::MemoryUserRepository;

use std::collections::BTreeMap;

/// Rows keyed by id plus the next id to hand out.
#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
