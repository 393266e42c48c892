mod active_company;
mod audit_event;
mod availability;
mod booking;
mod company;
mod document;
mod event;
mod folder;
mod invitation;
mod member;
mod refresh_token;
mod task;
mod user;

pub use active_company::ActiveCompany;
pub use audit_event::AuditEvent;
pub use availability::{AvailabilityEntry, MemberAvailability};
pub use booking::RoomBooking;
pub use company::Company;
pub use document::Document;
pub use event::CalendarEvent;
pub use folder::Folder;
pub use invitation::CompanyInvitation;
pub use member::{CompanyMember, MemberProfile};
pub use refresh_token::RefreshToken;
pub use task::Task;
pub use user::User;
