use maud::{html, Markup};

use crate::templates::layouts::{base, PageConfig};

struct RouteLink {
    href: &'static str,
    label: &'static str,
}

const ROUTES: [RouteLink; 5] = [
    RouteLink {
        href: "/api/v1.0/precipitation",
        label: "Precipitation",
    },
    RouteLink {
        href: "/api/v1.0/stations",
        label: "Stations",
    },
    RouteLink {
        href: "/api/v1.0/tobs",
        label: "TOBS",
    },
    RouteLink {
        href: "/api/v1.0/2016-01-01",
        label: "'YYYY-MM-DD' (change default start date in browser after click the link)",
    },
    RouteLink {
        href: "/api/v1.0/2016-01-01/2017-01-01",
        label: "'YYYY-MM-DD'/'YYYY-MM-DD' (change default start/end date in browser after click the link)",
    },
];

/// Index of the available API routes, served at `/`.
pub fn welcome_page() -> Markup {
    let config = PageConfig {
        title: "Climate API",
    };

    base(&config, content())
}

fn content() -> Markup {
    html! {
        "Welcome to the Climate API!"
        br;
        "Available Routes:"
        br;
        @for route in &ROUTES {
            a href=(route.href) { " " (route.label) " " }
            br;
        }
        a href="/docs" { "API Docs" }
    }
}
