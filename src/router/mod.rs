//! Client-side route table and navigation guard.
//!
//! Role gating here only decides what the client offers; the server
//! authorizes every call on its own.

use parking_lot::RwLock;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

use crate::gateway::Navigator;
use crate::session::Session;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";
pub const DEFAULT_CHILD: &str = "/dash-emp";
pub const REDIRECT_PARAM: &str = "redirect";

// Characters that would break a query value; '/' stays readable
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'`');

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub name: &'static str,
    pub requires_auth: bool,
    pub requires_admin: bool,
    pub redirect: Option<&'static str>,
}

impl Route {
    const fn public(path: &'static str, name: &'static str) -> Self {
        Self { path, name, requires_auth: false, requires_admin: false, redirect: None }
    }

    const fn screen(path: &'static str, name: &'static str) -> Self {
        Self { path, name, requires_auth: true, requires_admin: false, redirect: None }
    }

    const fn admin(path: &'static str, name: &'static str) -> Self {
        Self { path, name, requires_auth: true, requires_admin: true, redirect: None }
    }
}

pub static ROUTES: &[Route] = &[
    Route::public(LOGIN_PATH, "login"),
    Route {
        path: HOME_PATH,
        name: "layout",
        requires_auth: true,
        requires_admin: false,
        redirect: Some(DEFAULT_CHILD),
    },
    Route::screen("/dash-emp", "dash-emp"),
    Route::screen("/dash-clazz-stud", "dash-clazz-stud"),
    Route::screen("/dash-student", "dash-student"),
    Route::screen("/dept", "dept"),
    Route::screen("/emp", "emp"),
    Route::screen("/clazz", "clazz"),
    Route::screen("/stud", "stud"),
    Route::admin("/log", "log"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Proceed,
    Redirect(String),
}

/// Path component of a location, without query or fragment
pub fn path_of(location: &str) -> &str {
    let end = location.find(|c: char| c == '?' || c == '#').unwrap_or(location.len());
    let path = &location[..end];
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}

pub fn resolve(location: &str) -> Option<&'static Route> {
    let path = path_of(location);
    ROUTES.iter().find(|route| route.path == path)
}

pub fn login_redirect(original: &str) -> String {
    format!(
        "{}?{}={}",
        LOGIN_PATH,
        REDIRECT_PARAM,
        utf8_percent_encode(original, QUERY_VALUE)
    )
}

/// The path preserved in a `/login?redirect=...` location
pub fn redirect_target(location: &str) -> Option<String> {
    let (_, query) = location.split_once('?')?;
    let query = query.split('#').next().unwrap_or("");
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key != REDIRECT_PARAM || value.is_empty() {
            return None;
        }
        Some(percent_decode_str(value).decode_utf8_lossy().into_owned())
    })
}

/// Decide whether a navigation to `location` may happen with this session
pub fn guard(location: &str, session: &Session) -> Navigation {
    let route = match resolve(location) {
        Some(route) => route,
        None => return Navigation::Proceed,
    };

    if route.requires_auth && !session.is_authenticated() {
        return Navigation::Redirect(login_redirect(location));
    }
    if route.requires_admin && !session.is_admin() {
        return Navigation::Redirect(HOME_PATH.to_string());
    }
    Navigation::Proceed
}

/// Current location plus history, driven by `push`
pub struct Router {
    session: Session,
    state: RwLock<RouterState>,
}

#[derive(Debug, Default)]
struct RouterState {
    current: String,
    history: Vec<String>,
}

const MAX_HOPS: usize = 8;

impl Router {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            state: RwLock::new(RouterState {
                current: LOGIN_PATH.to_string(),
                history: Vec::new(),
            }),
        }
    }

    pub fn current(&self) -> String {
        self.state.read().current.clone()
    }

    pub fn history(&self) -> Vec<String> {
        self.state.read().history.clone()
    }

    /// Apply static redirects and the guard until the location settles,
    /// then record where we ended up
    pub fn push(&self, location: &str) -> String {
        let mut target = location.to_string();

        for _ in 0..MAX_HOPS {
            if let Some(redirect) = resolve(&target).and_then(|r| r.redirect) {
                target = redirect.to_string();
                continue;
            }
            match guard(&target, &self.session) {
                Navigation::Proceed => break,
                Navigation::Redirect(next) => {
                    tracing::debug!("Route guard redirected {} to {}", target, next);
                    target = next;
                }
            }
        }

        let mut state = self.state.write();
        state.history.push(target.clone());
        state.current = target.clone();
        target
    }
}

impl Navigator for Router {
    fn navigate(&self, to: &str) {
        self.push(to);
    }
}
