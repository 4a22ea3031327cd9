//! Row model to domain entity mappers

mod user;
