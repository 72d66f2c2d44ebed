use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MenuItem {
    pub label: String,
    pub icon: String,
    pub path: String,
    pub visible: bool,
}

impl MenuItem {
    fn new(label: &str, icon: &str, path: &str, visible: bool) -> Self {
        Self {
            label: label.to_string(),
            icon: icon.to_string(),
            path: path.to_string(),
            visible,
        }
    }
}

/// Navigation entries for the current auth state. Pages behind the guard are
/// shown to signed-in users, the login page to everyone else.
pub fn menu_items(signed_in: bool, login_path: &str) -> Vec<MenuItem> {
    vec![
        MenuItem::new("Login", "pi pi-user", login_path, !signed_in),
        MenuItem::new("Add", "pi pi-plus", "/", signed_in),
        MenuItem::new("Interviews", "pi pi-list", "/list", signed_in),
        MenuItem::new("Statistics", "pi pi-chart-pie", "/statistic", signed_in),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_out_menu_only_shows_login() {
        let visible: Vec<_> = menu_items(false, "/auth")
            .into_iter()
            .filter(|item| item.visible)
            .map(|item| item.path)
            .collect();
        assert_eq!(visible, vec!["/auth".to_string()]);
    }

    #[test]
    fn signed_in_menu_hides_login() {
        let items = menu_items(true, "/auth");
        assert!(items.iter().any(|i| i.path == "/list" && i.visible));
        assert!(items.iter().any(|i| i.path == "/auth" && !i.visible));
    }
}
