//! # Civic Watch client
//!
//! Client library for the Civic Watch civic-records backend: city council
//! meetings, agenda items, ordinances, documents, and ingest jobs, served
//! as JSON over HTTP.
//!
//! The crate's core is the API access layer in [`client`]: it decides which
//! backend base address applies to the current runtime context, executes
//! the request, and turns every failure into a diagnosable [`error::ApiError`]
//! that names the attempted method and URL. The remaining modules are thin
//! consumers — one per backend view — that pass a path through the access
//! layer and render the returned JSON.
//!
//! ## Base address resolution
//!
//! Two optionally-set addresses are recognized (see [`config`]):
//! `CW_API_URL_SERVER`, preferred for server-side execution, and
//! `CW_PUBLIC_API_URL`, usable everywhere. Server context requires one of
//! them; browser context falls back to the relative `/api` prefix on the
//! assumption that a co-located reverse proxy routes it. Resolution happens
//! on every call — nothing is cached.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | The two recognized base-address settings |
//! | [`client`] | Base-address resolver and request executor |
//! | [`error`] | Failure taxonomy (configuration, transport, status, decode) |
//! | [`meetings`] | Meetings timeline and detail |
//! | [`search`] | Full-text search across record types |
//! | [`ordinances`] | Ordinance listing and detail |
//! | [`documents`] | Document detail |
//! | [`jobs`] | Ingest job listing |
//! | [`admin`] | Ingest trigger |

pub mod admin;
pub mod client;
pub mod config;
pub mod documents;
pub mod error;
pub mod jobs;
pub mod meetings;
pub mod ordinances;
pub mod search;
