//! This crate provides client building blocks for a hosted audit-tracking backend.
//!
//! Managers and auditors plan weekly audit schedules made of day-by-day events (interviews, notes, meetings, comments, documents). \
//! Persistence, authentication and file storage live in the hosted backend; this crate wraps its endpoints ([`client`], [`auth`]),
//! turns the fetched rows into view models ([`render`]), and drives the whole board from a [`Controller`](controller::Controller).
//!
//! A local file-backed [`Cache`](cache::Cache) implements the same data contract as the remote client,
//! so tests (and offline embedders) can swap the server out for a file.

pub mod settings;
pub mod config;

mod user;
pub use user::User;
mod week;
pub use week::{DayPlan, NewWeek, Plan, Week, WeekId, WeekPatch, WeekStatus};
mod event;
pub use event::{Event, EventId, EventKind, FileMetadata, NewEvent};

pub mod traits;
pub mod auth;
pub mod client;
pub mod cache;
pub mod mock_behaviour;
pub mod notify;

pub mod render;
pub mod utils;
pub mod controller;
pub use controller::{AppState, Controller};
pub mod transfer;
