use shared::Navigator;
use yew_router::navigator::Navigator as RouteHistory;
use yew_router::Routable;

use crate::Route;

/// History state attached when a guarded page bounces a visitor to login.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectState {
    pub from: Option<String>,
}

/// Replaces the current history entry with the route matching a path.
pub struct RouterNavigator {
    history: Option<RouteHistory>,
}

impl RouterNavigator {
    pub fn new(history: Option<RouteHistory>) -> Self {
        Self { history }
    }
}

impl Navigator for RouterNavigator {
    fn replace(&self, path: &str) {
        let Some(history) = &self.history else {
            log::error!("no router available, cannot navigate to {path}");
            return;
        };

        match Route::recognize(path) {
            Some(route) => history.replace(&route),
            None => {
                log::warn!("unknown redirect target {path}");
                history.replace(&Route::NotFound);
            }
        }
    }
}
