//! Pure catalog rules: naming, delete guards, lifecycle transitions, cascades
//!
//! Nothing in here touches the store. The engine evaluates these rules
//! against rows it loaded inside the current transaction.

pub mod cascade;
pub mod guards;
pub mod lifecycle;
pub mod naming;
