//! Role-aware dashboard dispatch.

use crate::permission::{PermissionName, has_permission};
use crate::role::Role;

/// One entry of a dashboard's action grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DashboardAction {
    pub label: &'static str,
    /// Permission the signed-in user must hold, or `None` for always-visible
    /// actions.
    pub required_permission: Option<&'static str>,
}

const ADMIN_ACTIONS: &[DashboardAction] = &[
    DashboardAction {
        label: "Manage users",
        required_permission: Some("users.manage"),
    },
    DashboardAction {
        label: "All orders",
        required_permission: Some("orders.view"),
    },
    DashboardAction {
        label: "Projects",
        required_permission: Some("projects.manage"),
    },
    DashboardAction {
        label: "Services",
        required_permission: Some("services.manage"),
    },
];

const COORDINATOR_ACTIONS: &[DashboardAction] = &[
    DashboardAction {
        label: "Create order",
        required_permission: Some("orders.create"),
    },
    DashboardAction {
        label: "Assign driver",
        required_permission: Some("orders.assign"),
    },
    DashboardAction {
        label: "Projects",
        required_permission: Some("projects.view"),
    },
];

const DRIVER_ACTIONS: &[DashboardAction] = &[
    DashboardAction {
        label: "My deliveries",
        required_permission: None,
    },
    DashboardAction {
        label: "Update delivery status",
        required_permission: Some("orders.update-status"),
    },
];

const CUSTOMER_ACTIONS: &[DashboardAction] = &[
    DashboardAction {
        label: "My orders",
        required_permission: None,
    },
    DashboardAction {
        label: "Request service",
        required_permission: Some("services.request"),
    },
];

/// The dashboard shown after sign-in, one per role.
///
/// Terminal until logout or a role change; the caller owns that transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DashboardView {
    Admin,
    Coordinator,
    Driver,
    Customer,
}

impl DashboardView {
    /// Pick the view for a classified role. Unclassified users land on the
    /// customer view.
    pub fn for_role(role: Option<Role>) -> Self {
        match role {
            Some(Role::Administrator) => DashboardView::Admin,
            Some(Role::Coordinator) => DashboardView::Coordinator,
            Some(Role::Driver) => DashboardView::Driver,
            Some(Role::Customer) | None => DashboardView::Customer,
        }
    }

    /// The full action grid for this view, before permission filtering.
    pub fn actions(self) -> &'static [DashboardAction] {
        match self {
            DashboardView::Admin => ADMIN_ACTIONS,
            DashboardView::Coordinator => COORDINATOR_ACTIONS,
            DashboardView::Driver => DRIVER_ACTIONS,
            DashboardView::Customer => CUSTOMER_ACTIONS,
        }
    }

    /// Actions the given permission set allows.
    pub fn visible_actions<P: PermissionName>(self, granted: &[P]) -> Vec<DashboardAction> {
        self.actions()
            .iter()
            .filter(|action| match action.required_permission {
                Some(needed) => has_permission(granted, needed),
                None => true,
            })
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_maps_to_its_view() {
        assert_eq!(
            DashboardView::for_role(Some(Role::Administrator)),
            DashboardView::Admin
        );
        assert_eq!(
            DashboardView::for_role(Some(Role::Driver)),
            DashboardView::Driver
        );
    }

    #[test]
    fn unclassified_role_falls_back_to_customer() {
        assert_eq!(DashboardView::for_role(None), DashboardView::Customer);
        assert_eq!(
            DashboardView::for_role(Role::from_role_name("ex-administrador")),
            DashboardView::Customer
        );
    }

    #[test]
    fn actions_filter_by_permission() {
        let granted = ["orders.create"];
        let visible = DashboardView::Coordinator.visible_actions(&granted);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].label, "Create order");
    }

    #[test]
    fn unconditional_actions_survive_empty_grants() {
        let visible = DashboardView::Driver.visible_actions::<&str>(&[]);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].label, "My deliveries");
    }
}
