//! Page routes and session gating
//!
//! Member pages render only while a session record exists; everything else
//! is reachable logged out.

use std::fmt;
use std::str::FromStr;

use crate::auth::UserProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Index,
    Login,
    Register,
    Dashboard,
    RoomAllocation,
    MessMenu,
    Complaints,
    RoomSwitch,
    Contact,
}

/// What the portal does when a route is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Redirect(Route),
}

impl Route {
    /// Pages listed in the member sidebar, in display order.
    pub const MEMBER_PAGES: [Route; 6] = [
        Route::Dashboard,
        Route::RoomAllocation,
        Route::Contact,
        Route::MessMenu,
        Route::RoomSwitch,
        Route::Complaints,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Index => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
            Route::RoomAllocation => "/room-allocation",
            Route::MessMenu => "/mess-menu",
            Route::Complaints => "/complaints",
            Route::RoomSwitch => "/room-switch",
            Route::Contact => "/contact",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Index => "Hostify",
            Route::Login => "Login",
            Route::Register => "Create an Account",
            Route::Dashboard => "Dashboard",
            Route::RoomAllocation => "Room Allocation",
            Route::MessMenu => "Mess Menu",
            Route::Complaints => "Complaints",
            Route::RoomSwitch => "Room Switch",
            Route::Contact => "Contact Staff",
        }
    }

    pub fn requires_session(&self) -> bool {
        Self::MEMBER_PAGES.contains(self)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = String;

    /// Accepts paths with or without the leading slash; a trailing slash is ignored.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim().trim_start_matches('/').trim_end_matches('/');
        let route = match trimmed.to_ascii_lowercase().as_str() {
            "" | "index" => Route::Index,
            "login" => Route::Login,
            "register" => Route::Register,
            "dashboard" => Route::Dashboard,
            "room-allocation" => Route::RoomAllocation,
            "mess-menu" => Route::MessMenu,
            "complaints" => Route::Complaints,
            "room-switch" => Route::RoomSwitch,
            "contact" => Route::Contact,
            _ => return Err(raw.trim().to_string()),
        };
        Ok(route)
    }
}

/// Decides whether `route` renders for the given session.
pub fn resolve(route: Route, session: Option<&UserProfile>) -> Navigation {
    match (route, session) {
        (Route::Index, Some(_)) => Navigation::Redirect(Route::Dashboard),
        (Route::Index, None) => Navigation::Redirect(Route::Login),
        (route, None) if route.requires_session() => Navigation::Redirect(Route::Login),
        (route, _) => Navigation::Render(route),
    }
}
