//! Action enum - All possible application actions
//!
//! Components turn key events into Actions; the App applies them, which may
//! dispatch backend requests. Request completions come back as follow-up
//! Actions (refetches, notifications, errors).

use crate::model::ui::Screen;
use crate::model::Notification;
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick: drain request completions, expire toasts
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Switch to a screen
    ShowScreen(Screen),
    /// Focus the next panel on the current screen
    NextPanel,
    /// Focus the previous panel on the current screen
    PrevPanel,
    /// Follow a link target
    Navigate(String),

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    OpenQuitDialog,
    OpenHelp,
    CloseModal,

    // ─────────────────────────────────────────────────────────────────────────
    // Account
    // ─────────────────────────────────────────────────────────────────────────
    /// (Re)mount the account panel: fetch the current user
    CheckAccount,
    Logout,

    // ─────────────────────────────────────────────────────────────────────────
    // Hosted Locations
    // ─────────────────────────────────────────────────────────────────────────
    RefreshLocations,
    CreateLocation,
    RemoveLocation,
    TestLocation,

    // ─────────────────────────────────────────────────────────────────────────
    // Devices
    // ─────────────────────────────────────────────────────────────────────────
    RefreshDevices,
    /// Fetch the details of the selected device
    InspectDevice,
    DeleteDevice,

    // ─────────────────────────────────────────────────────────────────────────
    // Overview
    // ─────────────────────────────────────────────────────────────────────────
    RefreshRecent,
    /// Select a showcase video and open the player
    PlayVideo(String),
    /// Player overlay was dismissed
    DismissVideo,

    // ─────────────────────────────────────────────────────────────────────────
    // Feedback
    // ─────────────────────────────────────────────────────────────────────────
    /// Show a toast
    Notify(Notification),
    /// Generic error channel: status bar and log
    ReportError(String),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::ShowScreen(screen) => write!(f, "ShowScreen({})", screen.name()),
            Action::NextPanel => write!(f, "NextPanel"),
            Action::PrevPanel => write!(f, "PrevPanel"),
            Action::Navigate(target) => write!(f, "Navigate({})", target),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::CheckAccount => write!(f, "CheckAccount"),
            Action::Logout => write!(f, "Logout"),
            Action::RefreshLocations => write!(f, "RefreshLocations"),
            Action::CreateLocation => write!(f, "CreateLocation"),
            Action::RemoveLocation => write!(f, "RemoveLocation"),
            Action::TestLocation => write!(f, "TestLocation"),
            Action::RefreshDevices => write!(f, "RefreshDevices"),
            Action::InspectDevice => write!(f, "InspectDevice"),
            Action::DeleteDevice => write!(f, "DeleteDevice"),
            Action::RefreshRecent => write!(f, "RefreshRecent"),
            Action::PlayVideo(id) => write!(f, "PlayVideo({})", id),
            Action::DismissVideo => write!(f, "DismissVideo"),
            Action::Notify(n) => write!(f, "Notify({})", n.message),
            Action::ReportError(message) => write!(f, "ReportError({})", message),
        }
    }
}
