pub mod active_companies;
pub mod audit;
pub mod availability;
pub mod bookings;
pub mod companies;
pub mod documents;
pub mod events;
pub mod folders;
pub mod invitations;
pub mod members;
pub mod refresh_tokens;
pub mod tasks;
pub mod users;
