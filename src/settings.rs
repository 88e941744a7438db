//! Deployment constants for the hosted backend.
//!
//! Everything in here is a per-deployment value. Replace them with the values of your own backend project before shipping.

/// Base URL of the hosted backend (REST, auth and storage endpoints all live under it)
pub static BASE_URL: &str = "https://project.example-backend.co";

/// The public (anonymous) API key of the backend project
pub static ANON_KEY: &str = "public-anon-key";

/// The page users are sent back to after an OAuth round trip
pub static REDIRECT_URL: &str = "https://audit.example.org/";

/// Sessions signed in with this address get the auditor role, everybody else is a manager
pub static AUDITOR_EMAIL: &str = "auditor@example.org";

/// The storage bucket uploaded files end up in
pub static FILES_BUCKET: &str = "audit-files";

/// Token of the messaging bot used for notifications. An empty value disables notifications.
pub static BOT_TOKEN: &str = "";

/// Chat the notification bot posts to. An empty value disables notifications.
pub static BOT_CHAT_ID: &str = "";
