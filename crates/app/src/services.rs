//! Use-cases, generic over the port implementations they are given.

pub mod record_service;
