//! Registry lookup endpoint
//!
//! Bridges `GET /company?company_number=<id>` to the Companies House
//! company profile API and relays the answer unchanged.

mod client;
mod routes;

pub use client::{basic_auth_header, RegistryClient};
pub use routes::{registry_router, CompanyQuery};
