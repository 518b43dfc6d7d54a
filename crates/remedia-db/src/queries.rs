//! Database query functions organized by domain.

pub mod codes;
pub mod documents;
pub mod principals;
pub mod tenants;
