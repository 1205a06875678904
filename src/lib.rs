pub mod network;

pub use network::Network;

pub mod journey;

pub use journey::{ride_time, Leg, Ride, RideError};

pub mod optimizer;

pub use optimizer::{cheapest_tickets, TicketSet, MAX_TICKETS};

pub mod parse;

pub use parse::ParseError;

pub mod processor;

pub use processor::Processor;

pub mod lex;
pub mod utils;
