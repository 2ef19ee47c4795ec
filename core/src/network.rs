pub mod channel;
pub mod interface;
pub mod packets;
pub mod tcp;
