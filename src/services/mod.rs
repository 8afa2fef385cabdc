pub mod credential_store;
pub mod dispatcher;
pub mod inference;
