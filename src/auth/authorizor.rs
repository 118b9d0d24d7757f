use oso::{Oso, PolarClass};

use crate::auth::User;
use crate::entities::DriverState;
use crate::error::Error;

pub fn new() -> Result<Oso, Error> {
    let mut o = Oso::new();

    o.register_class(User::get_polar_class())?;
    o.register_class(DriverState::get_polar_class())?;

    o.load_str(include_str!("rules.polar"))?;

    Ok(o)
}

#[test]
fn driver_state_read_test() {
    let authorizor = new().unwrap();

    for user in [User::new_anonymous_user(), User::new_admin_user()] {
        let result = authorizor.is_allowed(user, "read", DriverState::default());
        assert_eq!(result.unwrap(), true);
    }
}

#[test]
fn driver_state_update_test() {
    let authorizor = new().unwrap();

    let result = authorizor.is_allowed(User::new_admin_user(), "update", DriverState::default());
    assert_eq!(result.unwrap(), true);

    let result = authorizor.is_allowed(
        User::new_anonymous_user(),
        "update",
        DriverState::default(),
    );
    assert_eq!(result.unwrap(), false);

    let passenger = User {
        id: uuid::Uuid::new_v4(),
        roles: vec!["passenger".into()],
    };
    let result = authorizor.is_allowed(passenger, "update", DriverState::default());
    assert_eq!(result.unwrap(), false);
}

#[test]
fn unknown_action_test() {
    let authorizor = new().unwrap();

    let result = authorizor.is_allowed(User::new_admin_user(), "delete", DriverState::default());
    assert_eq!(result.unwrap(), false);
}
