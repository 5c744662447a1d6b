/// Pages of the application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Home,
    /// Sell-and-buy versus direct transfer.
    Transfer,
    /// Term-deposit interest.
    Deposit,
}

impl Route {
    pub const ALL: [Route; 3] = [Route::Home, Route::Transfer, Route::Deposit];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Transfer => "/calc1",
            Route::Deposit => "/calc2",
        }
    }

    /// Short label used in the navigation bar.
    pub fn label(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Transfer => "1",
            Route::Deposit => "2",
        }
    }

    /// Map a path to its page, ignoring ASCII case. Unknown paths open the
    /// home page.
    pub fn resolve(path: &str) -> Self {
        let trimmed = path.trim().trim_end_matches('/');
        let trimmed = trimmed.strip_prefix('/').unwrap_or(trimmed);
        Route::ALL
            .into_iter()
            .find(|route| route.path()[1..].eq_ignore_ascii_case(trimmed))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn resolves_known_paths() {
        assert_eq!(Route::resolve("/"), Route::Home);
        assert_eq!(Route::resolve("/calc1"), Route::Transfer);
        assert_eq!(Route::resolve("/calc2"), Route::Deposit);
    }

    #[test]
    fn ignores_trailing_slash_and_missing_leading_slash() {
        assert_eq!(Route::resolve("/calc1/"), Route::Transfer);
        assert_eq!(Route::resolve("calc2"), Route::Deposit);
        assert_eq!(Route::resolve(""), Route::Home);
    }

    #[test]
    fn unknown_paths_fall_back_to_home() {
        assert_eq!(Route::resolve("/calc3"), Route::Home);
        assert_eq!(Route::resolve("/calc1/extra"), Route::Home);
    }

    #[test]
    fn matching_ignores_case() {
        assert_eq!(Route::resolve("/CALC1"), Route::Transfer);
        assert_eq!(Route::resolve("/Calc2/"), Route::Deposit);
    }

    #[test]
    fn path_resolves_back_to_route() {
        for route in Route::ALL {
            assert_eq!(Route::resolve(route.path()), route);
        }
    }
}
