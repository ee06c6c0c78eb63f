// Geometry of interactable areas
pub mod geometry;

// Map description parsing
pub mod map;

// Players and their locations
pub mod player;

// Outbound town events
pub mod event;

// Interactable areas and their variants
pub mod area;

// Towns: area directory and owning task
pub mod town;

// Client-side area mirrors
pub mod mirror;

// Configuration
pub mod config;

// HTTP and WebSocket APIs
pub mod api;

// Subscription management
pub mod subscription;
