//! Role-based navigation

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::users::Role;

/// Screens of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Sign-in form.
    Login,

    /// Own profile.
    Profile,

    /// Car administration.
    Cars,

    /// Pick-up point administration.
    PickUpPoints,

    /// Driver and worker administration.
    Staff,

    /// Supply scheduling.
    Supplies,

    /// Product catalog.
    Products,

    /// Shift and supply reports.
    Reports,

    /// Working shift clock.
    WorkingShifts,

    /// Supplies addressed to the worker's pick-up point.
    PickUpPointSupplies,

    /// Products held at the worker's pick-up point.
    PickUpPointProducts,

    /// Supplies assigned to the driver.
    DriverSupplies,
}

const ADMIN_SCREENS: &[Screen] = &[
    Screen::Profile,
    Screen::Cars,
    Screen::PickUpPoints,
    Screen::Staff,
    Screen::Supplies,
    Screen::Products,
    Screen::Reports,
];

const WORKER_SCREENS: &[Screen] = &[
    Screen::Profile,
    Screen::WorkingShifts,
    Screen::PickUpPointSupplies,
    Screen::PickUpPointProducts,
];

const DRIVER_SCREENS: &[Screen] = &[Screen::Profile, Screen::DriverSupplies];

const SIGNED_OUT_SCREENS: &[Screen] = &[Screen::Login];

/// Screens reachable for the given role, or for a signed-out client when `None`.
pub fn screens_for(role: Option<Role>) -> &'static [Screen] {
    match role {
        Some(Role::Admin) => ADMIN_SCREENS,
        Some(Role::Worker) => WORKER_SCREENS,
        Some(Role::Driver) => DRIVER_SCREENS,
        None => SIGNED_OUT_SCREENS,
    }
}

impl Screen {
    /// Whether the screen is reachable for the given role.
    pub fn is_visible_to(self, role: Option<Role>) -> bool {
        screens_for(role).contains(&self)
    }

    /// Human readable title.
    pub fn title(self) -> &'static str {
        match self {
            Self::Login => "Sign in",
            Self::Profile => "Profile",
            Self::Cars => "Cars",
            Self::PickUpPoints => "Pick-up points",
            Self::Staff => "Staff",
            Self::Supplies => "Supplies",
            Self::Products => "Products",
            Self::Reports => "Reports",
            Self::WorkingShifts => "Shifts",
            Self::PickUpPointSupplies => "Pick-up point supplies",
            Self::PickUpPointProducts => "Pick-up point products",
            Self::DriverSupplies => "My supplies",
        }
    }
}

impl Display for Screen {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_out_client_only_sees_login() {
        assert_eq!(screens_for(None), &[Screen::Login]);
    }

    #[test]
    fn every_role_sees_profile() {
        for role in [Role::Admin, Role::Worker, Role::Driver] {
            assert!(
                Screen::Profile.is_visible_to(Some(role)),
                "{role} should see the profile"
            );
        }
    }

    #[test]
    fn reports_are_admin_only() {
        assert!(Screen::Reports.is_visible_to(Some(Role::Admin)));
        assert!(!Screen::Reports.is_visible_to(Some(Role::Worker)));
        assert!(!Screen::Reports.is_visible_to(Some(Role::Driver)));
    }

    #[test]
    fn drivers_see_their_own_supplies_only() {
        assert!(Screen::DriverSupplies.is_visible_to(Some(Role::Driver)));
        assert!(!Screen::PickUpPointSupplies.is_visible_to(Some(Role::Driver)));
        assert!(!Screen::Supplies.is_visible_to(Some(Role::Driver)));
    }
}
