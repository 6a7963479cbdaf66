use actix_web::http::Method;
use std::collections::HashSet;
use once_cell::sync::Lazy;

// Routes reachable without an active session (path + method) as a static set
pub static PUBLIC_ROUTES: Lazy<HashSet<(&'static str, Method)>> = Lazy::new(|| {
    let mut set = HashSet::new();

    set.insert(("/", Method::GET));
    set.insert(("/health", Method::GET));

    // Signup and login
    set.insert(("/api/profiles", Method::POST));
    set.insert(("/api/sessions", Method::POST));

    // Public browsing of the event board
    set.insert(("/api/events", Method::GET));

    set
});
