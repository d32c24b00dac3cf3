use std::str::FromStr;

use super::schemas::IrType;

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
    Trace,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Trace => "TRACE",
        }
    }

    /// The verb as a capitalized token, e.g. `Get`.
    pub fn title(&self) -> &'static str {
        match self {
            HttpMethod::Get => "Get",
            HttpMethod::Post => "Post",
            HttpMethod::Put => "Put",
            HttpMethod::Delete => "Delete",
            HttpMethod::Patch => "Patch",
            HttpMethod::Options => "Options",
            HttpMethod::Head => "Head",
            HttpMethod::Trace => "Trace",
        }
    }
}

impl FromStr for HttpMethod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(HttpMethod::Get),
            "post" => Ok(HttpMethod::Post),
            "put" => Ok(HttpMethod::Put),
            "delete" => Ok(HttpMethod::Delete),
            "patch" => Ok(HttpMethod::Patch),
            "options" => Ok(HttpMethod::Options),
            "head" => Ok(HttpMethod::Head),
            "trace" => Ok(HttpMethod::Trace),
            _ => Err(()),
        }
    }
}

/// A lowered API operation: one per `(path, verb)` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct IrOperation {
    /// Derived from path and verb, e.g. `PetsGet`.
    pub name: String,
    pub method: HttpMethod,
    pub path: String,
    pub summary: Option<String>,
    pub parameters: Vec<IrParameter>,
    pub request_body: Option<IrRequestBody>,
    /// Always the placeholder; responses are not consulted.
    pub return_type: IrType,
    pub deprecated: bool,
}

/// A declared parameter, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct IrParameter {
    /// Identifier-safe lowerCamelCase name.
    pub name: String,
    pub original_name: String,
    pub location: Option<IrParameterLocation>,
    pub param_type: IrType,
}

/// Parameter location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
    /// Swagger 2.0 `formData`/`body` and anything unrecognised.
    Other,
}

impl IrParameterLocation {
    pub fn parse(location: &str) -> Self {
        match location {
            "path" => IrParameterLocation::Path,
            "query" => IrParameterLocation::Query,
            "header" => IrParameterLocation::Header,
            "cookie" => IrParameterLocation::Cookie,
            _ => IrParameterLocation::Other,
        }
    }
}

/// The trailing `requestBody` parameter of an operation.
#[derive(Debug, Clone, PartialEq)]
pub struct IrRequestBody {
    pub body_type: IrType,
    pub content_type: String,
}

/// Name of the generated body parameter.
pub const REQUEST_BODY_PARAM: &str = "requestBody";

/// Name of the request local in every generated method body.
pub const REQUEST_LOCAL: &str = "httpRequest";

/// The `{name}` placeholders of a path template, in order.
pub fn path_placeholders(path: &str) -> Vec<&str> {
    let mut placeholders = Vec::new();
    let mut rest = path;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            break;
        };
        placeholders.push(&after[..end]);
        rest = &after[end + 1..];
    }
    placeholders
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_from_str() {
        assert_eq!("get".parse(), Ok(HttpMethod::Get));
        assert_eq!("DELETE".parse(), Ok(HttpMethod::Delete));
        assert_eq!("parameters".parse::<HttpMethod>(), Err(()));
    }

    #[test]
    fn test_path_placeholders() {
        assert_eq!(
            path_placeholders("/users/{userId}/posts/{post-id}"),
            vec!["userId", "post-id"]
        );
        assert!(path_placeholders("/pets").is_empty());
        assert!(path_placeholders("/broken/{oops").is_empty());
    }

    #[test]
    fn test_method_title() {
        assert_eq!(HttpMethod::Patch.title(), "Patch");
        assert_eq!(HttpMethod::Patch.as_str(), "PATCH");
    }
}
