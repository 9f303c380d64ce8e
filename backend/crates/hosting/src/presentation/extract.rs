//! Path scope extractor

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use std::collections::HashMap;
use std::convert::Infallible;

use crate::domain::entity::Scope;

/// Hierarchy names found in the matched route's path parameters
///
/// Routes without parameters, or parameters that are not hierarchy
/// levels, yield an empty or partial scope.
#[derive(Debug, Clone, Default)]
pub struct PathScope(pub Scope);

impl<S> FromRequestParts<S> for PathScope
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params = match Path::<HashMap<String, String>>::from_request_parts(parts, state).await
        {
            Ok(Path(params)) => params,
            Err(_) => HashMap::new(),
        };

        Ok(PathScope(Scope::from_params(
            params.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        )))
    }
}
