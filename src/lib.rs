// Module layout (Clean Architecture style)
// - bootstrap: configuration, wiring and seed data
// - infrastructure: PostgreSQL/in-memory stores, password hashing, tokens
// - presentation: HTTP handlers, authorization gate and routing
// - application: ports, use cases and the access policy
// - domain: core models

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
