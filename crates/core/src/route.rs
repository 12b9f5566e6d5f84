//! Route templates and metric route names

use regex::Regex;

use crate::error::RouteError;

/// Route name used when neither an override nor a template is available.
pub const UNKNOWN_ROUTE: &str = "unknown_express_route";

/// The pattern a request was routed by.
#[derive(Debug, Clone)]
pub enum RouteTemplate {
    /// A literal template such as `/users/:id`.
    Path(String),
    /// A regular-expression route; its source text names the route.
    Pattern(Regex),
}

impl RouteTemplate {
    pub fn path(path: impl Into<String>) -> Self {
        RouteTemplate::Path(path.into())
    }

    /// Compile a regular-expression route template.
    pub fn pattern(source: &str) -> Result<Self, RouteError> {
        Ok(RouteTemplate::Pattern(Regex::new(source)?))
    }

    /// Template text as it appears in route names.
    pub fn source(&self) -> &str {
        match self {
            RouteTemplate::Path(path) => path,
            RouteTemplate::Pattern(regex) => regex.as_str(),
        }
    }
}

impl From<Regex> for RouteTemplate {
    fn from(regex: Regex) -> Self {
        RouteTemplate::Pattern(regex)
    }
}

/// Derive the unsanitized route name for a request.
///
/// A non-empty override wins. Otherwise the template is prefixed with the
/// method (`GET_/users/:id`), with `/` itself spelled `root`.
pub fn derive_route_name(
    method: &str,
    template: Option<&RouteTemplate>,
    override_key: Option<&str>,
) -> String {
    if let Some(key) = override_key.filter(|k| !k.is_empty()) {
        return key.to_string();
    }

    match template.map(RouteTemplate::source) {
        Some(source) if !source.is_empty() => {
            let source = if source == "/" { "root" } else { source };
            format!("{}_{}", method, source)
        }
        _ => UNKNOWN_ROUTE.to_string(),
    }
}

/// Make a route name safe for metric names.
///
/// Removes every `:`, removes only the first `/`, then turns the remaining
/// slashes into underscores.
pub fn sanitize_route_name(name: &str) -> String {
    name.replace(':', "").replacen('/', "", 1).replace('/', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path_becomes_root() {
        let template = RouteTemplate::path("/");
        let name = derive_route_name("GET", Some(&template), None);
        assert_eq!(name, "GET_root");
        assert_eq!(sanitize_route_name(&name), "GET_root");
    }

    #[test]
    fn test_parameterized_path() {
        let template = RouteTemplate::path("/api/:user/:thing");
        let name = derive_route_name("GET", Some(&template), None);
        assert_eq!(name, "GET_/api/:user/:thing");
        assert_eq!(sanitize_route_name(&name), "GET_api_user_thing");
    }

    #[test]
    fn test_override_is_used_verbatim() {
        let template = RouteTemplate::path("/api/:user");
        let name = derive_route_name("POST", Some(&template), Some("custom_key"));
        assert_eq!(name, "custom_key");
    }

    #[test]
    fn test_empty_override_is_ignored() {
        let template = RouteTemplate::path("/api/:user");
        let name = derive_route_name("POST", Some(&template), Some(""));
        assert_eq!(name, "POST_/api/:user");
    }

    #[test]
    fn test_missing_template_is_unknown() {
        assert_eq!(derive_route_name("GET", None, None), UNKNOWN_ROUTE);
        let empty = RouteTemplate::path("");
        assert_eq!(derive_route_name("GET", Some(&empty), None), UNKNOWN_ROUTE);
    }

    #[test]
    fn test_pattern_uses_source_text() {
        let template = RouteTemplate::pattern(r"^/commits/(\w+)$").unwrap();
        let name = derive_route_name("GET", Some(&template), None);
        assert_eq!(name, r"GET_^/commits/(\w+)$");
        assert_eq!(sanitize_route_name(&name), r"GET_^commits_(\w+)$");
    }

    #[test]
    fn test_invalid_pattern() {
        let err = RouteTemplate::pattern("(unclosed").unwrap_err();
        assert!(matches!(err, RouteError::InvalidPattern(_)));
    }

    #[test]
    fn test_sanitize_strips_only_first_slash() {
        // Override keys go through the same sanitation.
        assert_eq!(sanitize_route_name("/a/b/c"), "a_b_c");
        assert_eq!(sanitize_route_name("x//y"), "x_y");
        assert_eq!(sanitize_route_name("reports"), "reports");
    }

    #[test]
    fn test_sanitize_removes_all_colons() {
        assert_eq!(sanitize_route_name("GET_/:a:b/:c"), "GET_ab_c");
    }
}
