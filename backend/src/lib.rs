//! # Ad-ops Pacing Backend
//!
//! Delivery-health engine for advertising flights.
//!
//! A flight is a booked run of an ad campaign with a pricing model (CPM, CPC,
//! CPA or flat fee), an optional goal and an optional date window. Daily
//! delivery counters are stored per flight, and the engine compares what has
//! been delivered with what should have been delivered by now, classifying
//! each flight as GREEN (on pace), AMBER (at risk) or RED (behind).
//!
//! ## Architecture
//!
//! - [`models`]: Flights, delivery records, pacing results and the clock
//! - [`services`]: Pacing computation, caching and the timeline builder
//! - [`db`]: Repository pattern, in-memory store and service layer
//! - [`routes`]: Route-specific response types
//! - [`api`]: Flat re-export of the public DTO surface
//! - [`config`]: TOML configuration with environment overrides
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Example
//!
//! ```
//! use adops_pacing::models::{DeliveryRecord, FlightId, FlightSpec, GoalType, HealthTier, PricingModel};
//! use adops_pacing::services::compute_pacing;
//! use chrono::{NaiveDate, Utc};
//!
//! let flight = FlightSpec::new(FlightId::new(1), PricingModel::Cpc)
//!     .with_goal(GoalType::Clicks, 1000.0);
//! let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let record = DeliveryRecord { clicks: 960.0, ..DeliveryRecord::empty(FlightId::new(1), date) };
//!
//! let pacing = compute_pacing(&flight, &[record], Utc::now());
//! assert_eq!(pacing.health, HealthTier::Green);
//! ```

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;
pub mod config;

pub mod db;
pub mod models;

pub mod routes;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
