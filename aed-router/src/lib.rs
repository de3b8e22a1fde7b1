//! Walking directions to the nearest AED.
//!
//! A library and small web service that answers: "where is the nearest
//! defibrillator, and how do I walk there?"

pub mod cache;
pub mod domain;
pub mod navigator;
pub mod routes;
pub mod web;
