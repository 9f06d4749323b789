//! FUNNEL Services - Entity Services and Cascades
//!
//! One module per entity, each a set of free functions over a [`Store`]
//! handle. Services own the referential-integrity rules: the store itself
//! enforces nothing, so every nullify/delete/reassign choice lives here,
//! spelled out per entity pair.
//!
//! Failure policy follows the storage layer's split: plain updates return
//! `Option` and degrade quietly; operations that assume existence (toggle,
//! send, convert, close) and invariant-violating deletes return loud
//! `CrmError`s.

pub use funnel_store::Store;

pub mod activities;
pub mod attachments;
pub mod backup;
pub mod companies;
pub mod contacts;
pub mod deals;
pub mod emails;
pub mod history;
pub mod leads;
pub mod members;
pub mod notes;
pub mod notifications;
pub mod pipelines;
pub mod reports;
pub mod seed;
pub mod settings;
pub mod stages;
pub mod tags;
pub mod templates;
