//! Output for finished runs.
//!
//! - [`delimited`]: writes the finalized table as CSV (or any single-byte delimiter)
//! - [`display`]: prints records to the console for the interactive menu
//!
//! The written file has exactly one header row followed by one row per record.
//! No run metadata (timestamps, source URL) is included:
//!
//! ```text
//! product_name,product_price,product_rating,...
//! "Stainless Steel Kettle, 1.7L",34.,4.6 out of 5 stars,...
//! Error,Error,Error,...
//! ```

pub mod delimited;
pub mod display;
