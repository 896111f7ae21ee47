//! Heuristic scanners over the parsed homepage: social profiles, contact
//! details and important navigation links.
//!
//! All three are pure functions of `(document, base_url)`. A missing match is
//! a normal outcome, never an error.

mod contact;
mod links;
mod social;

pub use contact::extract_contact_details;
pub use links::extract_important_links;
pub use social::extract_social_handles;
