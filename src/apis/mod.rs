//! HTTP clients for the upstream systems. Each client implements
//! [`crate::types::CampsiteSource`] so the fetch pipeline can drive any of
//! them; request-level failures are scoped to one state and never abort a
//! whole run.

pub mod campflare;
pub mod overpass;
pub mod ridb;
