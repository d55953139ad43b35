pub(super) mod chat;
pub(super) mod health;
