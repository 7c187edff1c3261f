//! Device catalog schema and lenient loading.

pub mod schema;
