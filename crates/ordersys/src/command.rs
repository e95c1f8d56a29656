//! Shell commands, one JSON object per input line

use ordersys_config::RouteParams;
use ordersys_core::FoodItem;
use ordersys_util::{FoodId, RouteName};
use serde::{Deserialize, Serialize};

/// All commands the shell accepts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Navigate to a path
    Go { path: String },

    /// Navigate to a named route
    Open {
        name: RouteName,
        #[serde(default)]
        params: RouteParams,
    },

    Back,
    Forward,

    /// Record a successful login
    Login {
        token: String,
        #[serde(default)]
        admin: bool,
    },

    Logout,

    /// Add one of a food item, given in the backend's JSON shape
    Add { item: FoodItem },

    Remove { id: FoodId },
    Increment { id: FoodId },
    Decrement { id: FoodId },

    /// Set a line's quantity; zero or less removes it
    SetQuantity { id: FoodId, quantity: i64 },

    Clear,

    /// Show the cart
    Cart,

    /// Show the login state
    #[serde(rename = "whoami")]
    WhoAmI,

    /// List the route table
    Routes,

    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        serde_json::from_str(line).unwrap()
    }

    #[test]
    fn navigation_commands() {
        assert_eq!(
            parse(r#"{"type": "go", "path": "/menu"}"#),
            Command::Go {
                path: "/menu".into()
            }
        );
        assert_eq!(parse(r#"{"type": "back"}"#), Command::Back);

        assert_eq!(
            parse(r#"{"type": "open", "name": "OrderDetail", "params": {"id": "7"}}"#),
            Command::Open {
                name: RouteName::new("OrderDetail"),
                params: [("id", "7")].into_iter().collect(),
            }
        );
        assert_eq!(
            parse(r#"{"type": "open", "name": "Menu"}"#),
            Command::Open {
                name: RouteName::new("Menu"),
                params: RouteParams::new(),
            }
        );
    }

    #[test]
    fn login_token_is_opaque() {
        assert_eq!(
            parse(r#"{"type": "login", "token": "my token"}"#),
            Command::Login {
                token: "my token".into(),
                admin: false
            }
        );
        assert_eq!(
            parse(r#"{"type": "login", "token": "abc", "admin": true}"#),
            Command::Login {
                token: "abc".into(),
                admin: true
            }
        );
    }

    #[test]
    fn cart_commands() {
        let add = parse(
            r#"{"type": "add", "item": {"FoodID": 3, "FoodName": "Rice", "Price": 1.5}}"#,
        );
        assert_eq!(
            add,
            Command::Add {
                item: FoodItem::new(3, "Rice", 1.5)
            }
        );

        assert_eq!(
            parse(r#"{"type": "increment", "id": 3}"#),
            Command::Increment { id: FoodId::new(3) }
        );
        assert_eq!(
            parse(r#"{"type": "set_quantity", "id": 3, "quantity": -1}"#),
            Command::SetQuantity {
                id: FoodId::new(3),
                quantity: -1
            }
        );
        assert_eq!(parse(r#"{"type": "whoami"}"#), Command::WhoAmI);
    }

    #[test]
    fn command_serialization() {
        let cmd = Command::Remove { id: FoodId::new(9) };
        let json = serde_json::to_string(&cmd).unwrap();
        assert_eq!(json, r#"{"type":"remove","id":9}"#);
    }

    #[test]
    fn rejects_bad_input() {
        for line in [
            "go /menu",
            r#"{"type": "fly"}"#,
            r#"{"type": "go"}"#,
            r#"{"type": "increment", "id": "x"}"#,
            r#"{"path": "/menu"}"#,
        ] {
            assert!(serde_json::from_str::<Command>(line).is_err(), "{line}");
        }
    }
}
