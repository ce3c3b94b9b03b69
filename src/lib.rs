pub mod api_client;
pub mod api_worker;
pub mod formations;
pub mod lineup;
pub mod rating;
pub mod roster_parse;
pub mod session;
pub mod state;
