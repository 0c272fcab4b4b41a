#![allow(dead_code)]

use a7_server::{Config, ServerState};
use shared::models::{Restaurant, StaffCreate, StaffMember};
use shared::permissions::Role;

pub const RESTAURANT: &str = "rest-1";
pub const OTHER_RESTAURANT: &str = "rest-2";

/// Development config with a fixed secret and a New York business day
pub fn config() -> Config {
    Config::from_vars(|key| match key {
        "JWT_SECRET" => Some("integration-test-secret-0123456789abcdef".to_string()),
        "RESTAURANT_ID" => Some(RESTAURANT.to_string()),
        "RESTAURANT_TIMEZONE" => Some("America/New_York".to_string()),
        _ => None,
    })
    .expect("test config")
}

/// State seeded with the restaurant record and one staff member per role
pub struct Fixture {
    pub state: ServerState,
}

impl Fixture {
    pub fn new() -> Self {
        let state = ServerState::new(config());
        let restaurant = Restaurant::new(RESTAURANT, "A7 Diner", state.timezone());
        state
            .stores()
            .restaurants
            .insert(restaurant.id.clone(), restaurant);
        for (id, role) in [
            ("manager", Role::Manager),
            ("server", Role::Server),
            ("kitchen", Role::Kitchen),
            ("cashier", Role::Cashier),
        ] {
            add_staff(&state, id, role);
        }
        Self { state }
    }

    /// `Authorization` header value for a staff id
    pub fn bearer(&self, staff_id: &str) -> String {
        self.bearer_for(staff_id, RESTAURANT)
    }

    /// Header value for a member of any restaurant
    pub fn bearer_for(&self, staff_id: &str, restaurant_id: &str) -> String {
        let token = self
            .state
            .jwt()
            .generate_token(staff_id, restaurant_id)
            .expect("token");
        format!("Bearer {token}")
    }
}

pub fn add_staff(state: &ServerState, id: &str, role: Role) {
    add_staff_to(state, id, role, RESTAURANT);
}

pub fn add_staff_to(state: &ServerState, id: &str, role: Role, restaurant_id: &str) {
    let member = StaffMember::create(
        StaffCreate {
            id: Some(id.to_string()),
            name: id.to_string(),
            role,
            avatar: String::new(),
            email: None,
        },
        restaurant_id,
    );
    state.stores().staff.insert(member.id.clone(), member);
}
