//! Screen routes and the navigation seam
//!
//! Route paths follow the web app's templates:
//! `/hologram/{habitat}/{id}`, `/animal/{habitat}/{id}` and `/quiz/{habitat}`.
//! Parameters are carried as the raw strings the router supplied; whether
//! they resolve to data is the screen's business, not the router's.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("empty route")]
    Empty,

    #[error("unknown screen '{0}'")]
    UnknownScreen(String),

    #[error("route /{screen} is missing its {name} parameter")]
    MissingParameter { screen: &'static str, name: &'static str },

    #[error("unexpected trailing segments '{0}'")]
    TrailingSegments(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Four-sided projection of one animal
    Hologram { habitat: String, animal_id: String },
    /// Animal fact sheet ("learn more")
    AnimalDetail { habitat: String, animal_id: String },
    /// Quiz over a whole habitat
    Quiz { habitat: String },
}

impl Route {
    pub fn hologram(habitat: impl Into<String>, animal_id: impl Into<String>) -> Self {
        Route::Hologram { habitat: habitat.into(), animal_id: animal_id.into() }
    }

    pub fn animal_detail(habitat: impl Into<String>, animal_id: impl Into<String>) -> Self {
        Route::AnimalDetail { habitat: habitat.into(), animal_id: animal_id.into() }
    }

    pub fn quiz(habitat: impl Into<String>) -> Self {
        Route::Quiz { habitat: habitat.into() }
    }

    /// (habitat, animal id) parameters, if the route names one animal
    pub fn animal_params(&self) -> Option<(&str, &str)> {
        match self {
            Route::Hologram { habitat, animal_id } | Route::AnimalDetail { habitat, animal_id } => {
                Some((habitat.as_str(), animal_id.as_str()))
            }
            Route::Quiz { .. } => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Hologram { habitat, animal_id } => write!(f, "/hologram/{}/{}", habitat, animal_id),
            Route::AnimalDetail { habitat, animal_id } => write!(f, "/animal/{}/{}", habitat, animal_id),
            Route::Quiz { habitat } => write!(f, "/quiz/{}", habitat),
        }
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut segments = s.trim().trim_start_matches('/').split('/');
        let screen = segments.next().filter(|s| !s.is_empty()).ok_or(RouteError::Empty)?;

        let mut param = |screen: &'static str, name: &'static str| {
            segments
                .next()
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .ok_or(RouteError::MissingParameter { screen, name })
        };

        let route = match screen {
            "hologram" => Route::Hologram {
                habitat: param("hologram", "habitat")?,
                animal_id: param("hologram", "animal id")?,
            },
            "animal" => Route::AnimalDetail {
                habitat: param("animal", "habitat")?,
                animal_id: param("animal", "animal id")?,
            },
            "quiz" => Route::Quiz { habitat: param("quiz", "habitat")? },
            other => return Err(RouteError::UnknownScreen(other.to_string())),
        };

        // a single trailing slash is fine
        let rest: Vec<&str> = segments.filter(|s| !s.is_empty()).collect();
        if !rest.is_empty() {
            return Err(RouteError::TrailingSegments(rest.join("/")));
        }

        Ok(route)
    }
}

/// Receives fire-and-forget navigation requests from a screen.
/// The screen never observes what happens next.
pub trait Navigator {
    fn navigate(&mut self, route: Route);
}

/// Records requests in order; the event loop hands the latest one off
#[derive(Debug, Default)]
pub struct RouteHistory {
    requests: Vec<Route>,
}

impl RouteHistory {
    pub fn last(&self) -> Option<&Route> {
        self.requests.last()
    }

    #[cfg(test)]
    pub fn requests(&self) -> &[Route] {
        &self.requests
    }
}

impl Navigator for RouteHistory {
    fn navigate(&mut self, route: Route) {
        tracing::info!("Navigation requested: {}", route);
        self.requests.push(route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_templates() {
        assert_eq!(Route::animal_detail("Forest", "bengal-tiger").to_string(), "/animal/Forest/bengal-tiger");
        assert_eq!(Route::quiz("Ocean").to_string(), "/quiz/Ocean");
        assert_eq!(Route::hologram("Arctic", "polar-bear").to_string(), "/hologram/Arctic/polar-bear");
    }

    #[test]
    fn test_parse_routes() {
        assert_eq!(
            "/hologram/Desert/meerkat".parse::<Route>(),
            Ok(Route::hologram("Desert", "meerkat"))
        );
        assert_eq!(
            "animal/Forest/red-panda/".parse::<Route>(),
            Ok(Route::animal_detail("Forest", "red-panda"))
        );
        assert_eq!("/quiz/Arctic".parse::<Route>(), Ok(Route::quiz("Arctic")));
    }

    #[test]
    fn test_parse_keeps_unknown_parameters() {
        // parameters are opaque here; resolution happens on the screen
        let route: Route = "/hologram/Jungle/nope".parse().unwrap();
        assert_eq!(route.animal_params(), Some(("Jungle", "nope")));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Route>(), Err(RouteError::Empty));
        assert_eq!("/".parse::<Route>(), Err(RouteError::Empty));
        assert_eq!(
            "/settings".parse::<Route>(),
            Err(RouteError::UnknownScreen("settings".to_string()))
        );
        assert_eq!(
            "/hologram/Forest".parse::<Route>(),
            Err(RouteError::MissingParameter { screen: "hologram", name: "animal id" })
        );
        assert_eq!(
            "/quiz//".parse::<Route>(),
            Err(RouteError::MissingParameter { screen: "quiz", name: "habitat" })
        );
        assert_eq!(
            "/quiz/Ocean/extra/bits".parse::<Route>(),
            Err(RouteError::TrailingSegments("extra/bits".to_string()))
        );
    }

    #[test]
    fn test_history_records_in_order() {
        let mut history = RouteHistory::default();
        assert!(history.last().is_none());
        history.navigate(Route::quiz("Ocean"));
        history.navigate(Route::animal_detail("Ocean", "great-white-shark"));
        assert_eq!(history.requests().len(), 2);
        assert_eq!(history.last(), Some(&Route::animal_detail("Ocean", "great-white-shark")));
    }
}
