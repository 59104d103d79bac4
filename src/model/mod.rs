//! Model layer - data and state types
//!
//! - wire types returned by the backend (`User`, `CloudLocation`, `Device`, `FileObject`)
//! - request lifecycle state (`QueryState`, `MutationStatus`)
//! - the injected `SessionContext`
//! - presentation state (`ModalStack`, notifications, screens)

pub mod device;
pub mod location;
pub mod modal;
pub mod notification;
pub mod object;
pub mod query;
pub mod session;
pub mod ui;
pub mod user;
pub mod video;

pub use device::Device;
pub use location::CloudLocation;
pub use notification::{Notification, NotificationKind, NotificationQueue};
pub use object::{FileObject, SearchObjectsArgs};
pub use query::{MutationStatus, QueryState};
pub use session::{SessionContext, SessionEvent};
pub use user::User;
pub use video::{Video, VideoSelection};
