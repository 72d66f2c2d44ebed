use serde::Serialize;

/// A page of the front end and whether entering it needs a signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteDef {
    pub name: &'static str,
    pub path: &'static str,
    pub guarded: bool,
}

pub const ROUTES: &[RouteDef] = &[
    RouteDef {
        name: "home",
        path: "/",
        guarded: true,
    },
    RouteDef {
        name: "auth",
        path: "/auth",
        guarded: false,
    },
    RouteDef {
        name: "list",
        path: "/list",
        guarded: true,
    },
    RouteDef {
        name: "interview",
        path: "/interview/:id",
        guarded: true,
    },
    RouteDef {
        name: "statistic",
        path: "/statistic",
        guarded: true,
    },
];

impl RouteDef {
    /// Matches a concrete path against this route. `:param` segments match
    /// any single non-empty segment. Query strings and a trailing slash are
    /// ignored.
    pub fn matches(&self, path: &str) -> bool {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let mut pattern = segments(self.path);
        let mut actual = segments(path);
        loop {
            match (pattern.next(), actual.next()) {
                (None, None) => return true,
                (Some(p), Some(a)) if p.starts_with(':') || p == a => continue,
                _ => return false,
            }
        }
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

pub fn find_route(path: &str) -> Option<&'static RouteDef> {
    ROUTES.iter().find(|route| route.matches(path))
}
