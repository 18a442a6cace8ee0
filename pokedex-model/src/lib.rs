pub mod filter;
pub mod pokemon;
pub mod query;
