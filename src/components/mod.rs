//! UI Components
//!
//! Each panel encapsulates its own state, key handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod account;
pub mod card_list;
pub mod devices;
pub mod help_dialog;
pub mod layout;
pub mod locations;
pub mod quit_dialog;
pub mod recent;
pub mod showcase;
pub mod toasts;
pub mod video_player;

pub use account::AccountPanel;
pub use devices::DevicesPanel;
pub use help_dialog::HelpDialog;
pub use layout::{calculate_main_layout, centered_popup};
pub use locations::LocationsPlayground;
pub use quit_dialog::QuitDialog;
pub use recent::RecentItemsCard;
pub use showcase::VideoShowcase;
pub use toasts::draw_toasts;
pub use video_player::VideoPlayerDialog;
