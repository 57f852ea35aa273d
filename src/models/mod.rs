pub mod collection;
pub mod member;
pub mod resolution;
pub mod trip_event;
pub mod trip_record;

pub use collection::Collection;
pub use member::{MemberStatus, RosterMember};
pub use resolution::{DestinationResolutions, NameResolutions};
pub use trip_event::{EventCategory, EventStatus, TripEvent};
pub use trip_record::TripRecord;
