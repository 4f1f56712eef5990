//! The shipped role hierarchy of the Foodgate service.

use super::edge::RoleHierarchyEdge;

/// Privilege names granted by the shipped hierarchy.
pub mod privileges {
    pub const VIEW_DISH: &str = "VIEW_DISH";
    pub const VIEW_DAILY_MEAL: &str = "VIEW_DAILY_MEAL";

    pub const VIEW_OWN_PROFILE: &str = "VIEW_OWN_PROFILE";
    pub const EDIT_OWN_PROFILE: &str = "EDIT_OWN_PROFILE";
    pub const CREATE_RESERVATION: &str = "CREATE_RESERVATION";
    pub const EDIT_OWN_RESERVATION: &str = "EDIT_OWN_RESERVATION";
    pub const CANCEL_OWN_RESERVATION: &str = "CANCEL_OWN_RESERVATION";

    pub const UPDATE_DISH_AVAILABILITY: &str = "UPDATE_DISH_AVAILABILITY";
    pub const VIEW_ORDERS_TO_PREPARE: &str = "VIEW_ORDERS_TO_PREPARE";
    pub const UPDATE_ORDER_STATUS: &str = "UPDATE_ORDER_STATUS";

    pub const CREATE_USER: &str = "CREATE_USER";
    pub const EDIT_USER: &str = "EDIT_USER";
    pub const DELETE_USER: &str = "DELETE_USER";
    pub const VIEW_USER: &str = "VIEW_USER";
    pub const CREATE_DAILY_MEAL: &str = "CREATE_DAILY_MEAL";
    pub const EDIT_DAILY_MEAL: &str = "EDIT_DAILY_MEAL";
    pub const DELETE_DAILY_MEAL: &str = "DELETE_DAILY_MEAL";
    pub const CREATE_DISH: &str = "CREATE_DISH";
    pub const EDIT_DISH: &str = "EDIT_DISH";
    pub const DELETE_DISH: &str = "DELETE_DISH";
    pub const VIEW_REPORTS: &str = "VIEW_REPORTS";
    pub const MANAGE_SETTINGS: &str = "MANAGE_SETTINGS";
    pub const MANAGE_CONTRACTORS: &str = "MANAGE_CONTRACTORS";
}

pub const ROLE_ADMIN: &str = "ROLE_ADMIN";
pub const ROLE_STAFF: &str = "ROLE_STAFF";
pub const ROLE_USER: &str = "ROLE_USER";
pub const ROLE_GUEST: &str = "ROLE_GUEST";

/// `ADMIN → STAFF → USER → GUEST`, each level adding its own privileges.
pub fn shipped_hierarchy() -> Vec<RoleHierarchyEdge> {
    use privileges::*;

    vec![
        RoleHierarchyEdge::new(ROLE_GUEST).privileges([VIEW_DISH, VIEW_DAILY_MEAL]),
        RoleHierarchyEdge::new(ROLE_USER).inherits([ROLE_GUEST]).privileges([
            VIEW_OWN_PROFILE,
            EDIT_OWN_PROFILE,
            CREATE_RESERVATION,
            EDIT_OWN_RESERVATION,
            CANCEL_OWN_RESERVATION,
        ]),
        RoleHierarchyEdge::new(ROLE_STAFF).inherits([ROLE_USER]).privileges([
            UPDATE_DISH_AVAILABILITY,
            VIEW_ORDERS_TO_PREPARE,
            UPDATE_ORDER_STATUS,
        ]),
        RoleHierarchyEdge::new(ROLE_ADMIN).inherits([ROLE_STAFF]).privileges([
            CREATE_USER,
            EDIT_USER,
            DELETE_USER,
            VIEW_USER,
            CREATE_DAILY_MEAL,
            EDIT_DAILY_MEAL,
            DELETE_DAILY_MEAL,
            CREATE_DISH,
            EDIT_DISH,
            DELETE_DISH,
            VIEW_REPORTS,
            MANAGE_SETTINGS,
            MANAGE_CONTRACTORS,
        ]),
    ]
}
