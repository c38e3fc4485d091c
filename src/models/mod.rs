pub mod lookup;
pub mod ticket;
