/// Serialized team records shared between the state and storage layers.
pub mod models;
/// Roster persistence backends and the store abstraction.
pub mod roster_store;
/// Storage error taxonomy shared by all backends.
pub mod storage;
