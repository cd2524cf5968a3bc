//! Staged builders for graph creation and graph update.
//!
//! Creation walks every mandatory field in order:
//!
//! ```text
//! CreateGraphBuilder
//!   → .id(..)?                      → CreateGraphName
//!   → .name(..)                     → CreateGraphUnit
//!   → .unit(..)                     → CreateGraphType
//!   → .int() | .float()             → CreateGraphColor
//!   → .shibafu() | .momiji() | ...  → CreateGraphOptions
//!   → [.timezone(..)?] [.self_sufficient(..)] [.secret(..)] .build() → CreateGraph
//! ```
//!
//! ```compile_fail
//! # fn f(pixela: &pixela::Pixela) -> pixela::Result<()> {
//! // no colour chosen yet: `build` does not exist on this step
//! let _ = pixela.create_graph().id("steps")?.name("Steps").unit("step").int().build();
//! # Ok(()) }
//! ```
//!
//! Update has no mandatory field, but its optional groups are ordered:
//! attributes, then purge-cache URLs, then self-sufficiency. Every step is
//! buildable.
//!
//! ```compile_fail
//! # fn f(graph: &pixela::graph::Graph) -> pixela::Result<()> {
//! // attributes cannot be set after the self-sufficiency step
//! let _ = graph.update().self_sufficient(pixela::types::SelfSufficient::Increment).name("late");
//! # Ok(()) }
//! ```

use super::types::{CreateGraphBody, UpdateGraphBody};
use super::{CreateGraph, UpdateGraph};
use crate::types::{GraphColor, GraphId, GraphType, SelfSufficient, Timezone};
use crate::user::UserScope;
use crate::{Error, ErrorContext, Result};
use url::Url;

/// Most purge-cache URLs a graph accepts.
pub const MAX_PURGE_CACHE_URLS: usize = 5;

pub struct CreateGraphBuilder {
    scope: UserScope,
}

impl CreateGraphBuilder {
    pub(crate) fn new(scope: UserScope) -> Self {
        Self { scope }
    }

    pub fn id(self, id: impl Into<String>) -> Result<CreateGraphName> {
        Ok(CreateGraphName {
            scope: self.scope,
            id: GraphId::parse(id)?,
        })
    }
}

pub struct CreateGraphName {
    scope: UserScope,
    id: GraphId,
}

impl CreateGraphName {
    pub fn name(self, name: impl Into<String>) -> CreateGraphUnit {
        CreateGraphUnit {
            scope: self.scope,
            id: self.id,
            name: name.into(),
        }
    }
}

pub struct CreateGraphUnit {
    scope: UserScope,
    id: GraphId,
    name: String,
}

impl CreateGraphUnit {
    pub fn unit(self, unit: impl Into<String>) -> CreateGraphType {
        CreateGraphType {
            scope: self.scope,
            id: self.id,
            name: self.name,
            unit: unit.into(),
        }
    }
}

pub struct CreateGraphType {
    scope: UserScope,
    id: GraphId,
    name: String,
    unit: String,
}

impl CreateGraphType {
    pub fn graph_type(self, graph_type: GraphType) -> CreateGraphColor {
        CreateGraphColor {
            scope: self.scope,
            id: self.id,
            name: self.name,
            unit: self.unit,
            graph_type,
        }
    }

    pub fn int(self) -> CreateGraphColor {
        self.graph_type(GraphType::Int)
    }

    pub fn float(self) -> CreateGraphColor {
        self.graph_type(GraphType::Float)
    }
}

pub struct CreateGraphColor {
    scope: UserScope,
    id: GraphId,
    name: String,
    unit: String,
    graph_type: GraphType,
}

impl CreateGraphColor {
    pub fn color(self, color: GraphColor) -> CreateGraphOptions {
        CreateGraphOptions {
            scope: self.scope,
            body: CreateGraphBody {
                id: self.id,
                name: self.name,
                unit: self.unit,
                graph_type: self.graph_type,
                color,
                timezone: None,
                self_sufficient: None,
                is_secret: None,
                publish_optional_data: None,
            },
        }
    }

    pub fn shibafu(self) -> CreateGraphOptions {
        self.color(GraphColor::Shibafu)
    }

    pub fn momiji(self) -> CreateGraphOptions {
        self.color(GraphColor::Momiji)
    }

    pub fn sora(self) -> CreateGraphOptions {
        self.color(GraphColor::Sora)
    }

    pub fn ichou(self) -> CreateGraphOptions {
        self.color(GraphColor::Ichou)
    }

    pub fn ajisai(self) -> CreateGraphOptions {
        self.color(GraphColor::Ajisai)
    }

    pub fn kuro(self) -> CreateGraphOptions {
        self.color(GraphColor::Kuro)
    }
}

/// Last creation step: every mandatory field is set.
pub struct CreateGraphOptions {
    scope: UserScope,
    body: CreateGraphBody,
}

impl CreateGraphOptions {
    pub fn timezone(mut self, timezone: impl Into<String>) -> Result<Self> {
        self.body.timezone = Some(Timezone::parse(timezone)?);
        Ok(self)
    }

    pub fn self_sufficient(mut self, mode: SelfSufficient) -> Self {
        self.body.self_sufficient = Some(mode);
        self
    }

    pub fn secret(mut self, is_secret: bool) -> Self {
        self.body.is_secret = Some(is_secret);
        self
    }

    pub fn publish_optional_data(mut self, publish: bool) -> Self {
        self.body.publish_optional_data = Some(publish);
        self
    }

    pub fn build(self) -> CreateGraph {
        CreateGraph {
            scope: self.scope,
            body: self.body,
        }
    }
}

/// First update step: plain attributes.
pub struct UpdateGraphBuilder {
    scope: UserScope,
    id: GraphId,
    body: UpdateGraphBody,
}

impl UpdateGraphBuilder {
    pub(crate) fn new(scope: UserScope, id: GraphId) -> Self {
        Self {
            scope,
            id,
            body: UpdateGraphBody::default(),
        }
    }

    /// An empty name leaves the stored one untouched.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.body.name = non_empty(name.into());
        self
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.body.unit = non_empty(unit.into());
        self
    }

    pub fn color(mut self, color: GraphColor) -> Self {
        self.body.color = Some(color);
        self
    }

    pub fn timezone(mut self, timezone: impl Into<String>) -> Result<Self> {
        self.body.timezone = Some(Timezone::parse(timezone)?);
        Ok(self)
    }

    pub fn secret(mut self, is_secret: bool) -> Self {
        self.body.is_secret = Some(is_secret);
        self
    }

    pub fn publish_optional_data(mut self, publish: bool) -> Self {
        self.body.publish_optional_data = Some(publish);
        self
    }

    /// URLs whose caches the service purges when the graph changes.
    pub fn purge_cache_urls<I, S>(mut self, urls: I) -> Result<UpdateGraphSelfSufficient>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.body.purge_cache_urls = validate_purge_urls(urls)?;
        Ok(UpdateGraphSelfSufficient {
            scope: self.scope,
            id: self.id,
            body: self.body,
        })
    }

    pub fn self_sufficient(self, mode: SelfSufficient) -> UpdateGraphReady {
        UpdateGraphSelfSufficient {
            scope: self.scope,
            id: self.id,
            body: self.body,
        }
        .self_sufficient(mode)
    }

    pub fn build(self) -> UpdateGraph {
        UpdateGraph {
            scope: self.scope,
            id: self.id,
            body: self.body,
        }
    }
}

/// Update step after the purge-cache URLs.
pub struct UpdateGraphSelfSufficient {
    scope: UserScope,
    id: GraphId,
    body: UpdateGraphBody,
}

impl UpdateGraphSelfSufficient {
    pub fn self_sufficient(mut self, mode: SelfSufficient) -> UpdateGraphReady {
        self.body.self_sufficient = Some(mode);
        UpdateGraphReady {
            scope: self.scope,
            id: self.id,
            body: self.body,
        }
    }

    pub fn increment(self) -> UpdateGraphReady {
        self.self_sufficient(SelfSufficient::Increment)
    }

    pub fn decrement(self) -> UpdateGraphReady {
        self.self_sufficient(SelfSufficient::Decrement)
    }

    pub fn build(self) -> UpdateGraph {
        UpdateGraph {
            scope: self.scope,
            id: self.id,
            body: self.body,
        }
    }
}

/// Final update step.
pub struct UpdateGraphReady {
    scope: UserScope,
    id: GraphId,
    body: UpdateGraphBody,
}

impl UpdateGraphReady {
    pub fn build(self) -> UpdateGraph {
        UpdateGraph {
            scope: self.scope,
            id: self.id,
            body: self.body,
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn validate_purge_urls<I, S>(urls: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let urls: Vec<String> = urls.into_iter().map(Into::into).collect();
    if urls.len() > MAX_PURGE_CACHE_URLS {
        return Err(Error::validation_with_context(
            format!("too many purge cache URLs: {}", urls.len()),
            ErrorContext::new()
                .with_field_path("purgeCacheURLs")
                .with_details(format!("at most {}", MAX_PURGE_CACHE_URLS)),
        ));
    }
    for raw in &urls {
        let parsed = Url::parse(raw).ok().filter(|u| u.scheme() == "https" || u.scheme() == "http");
        if parsed.is_none() {
            return Err(Error::validation_with_context(
                format!("invalid purge cache URL {:?}", raw),
                ErrorContext::new()
                    .with_field_path("purgeCacheURLs")
                    .with_details("expected an absolute http(s) URL"),
            ));
        }
    }
    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RequestDescriptor;
    use crate::transport::Method;
    use crate::types::{UserToken, Username};

    fn scope() -> UserScope {
        UserScope::new(
            Username::parse("alice").unwrap(),
            UserToken::parse("secret-token").unwrap(),
        )
    }

    #[test]
    fn test_create_graph_minimal() {
        let req = CreateGraphBuilder::new(scope())
            .id("steps")
            .unwrap()
            .name("Steps")
            .unit("step")
            .int()
            .shibafu()
            .build();
        assert_eq!(req.method(), Method::Post);
        assert_eq!(req.describe(), "POST /v1/users/alice/graphs [id=steps]");
        assert_eq!(
            serde_json::to_value(req.body().unwrap()).unwrap(),
            serde_json::json!({
                "id": "steps",
                "name": "Steps",
                "unit": "step",
                "type": "int",
                "color": "shibafu"
            })
        );
    }

    #[test]
    fn test_create_graph_with_every_option() {
        let req = CreateGraphBuilder::new(scope())
            .id("weight")
            .unwrap()
            .name("Weight")
            .unit("kg")
            .float()
            .ajisai()
            .timezone("Asia/Tokyo")
            .unwrap()
            .self_sufficient(SelfSufficient::None)
            .secret(true)
            .publish_optional_data(false)
            .build();
        let json = serde_json::to_string(req.body().unwrap()).unwrap();
        let back: CreateGraphBody = serde_json::from_str(&json).unwrap();
        assert_eq!(&back, req.body().unwrap());
        assert_eq!(back.timezone.unwrap().as_str(), "Asia/Tokyo");
    }

    #[test]
    fn test_bad_timezone_fails_synchronously() {
        let result = CreateGraphBuilder::new(scope())
            .id("steps")
            .unwrap()
            .name("Steps")
            .unit("step")
            .int()
            .kuro()
            .timezone("Not/AZone");
        assert!(result.err().unwrap().is_validation());
    }

    #[test]
    fn test_update_graph_stages() {
        let req = UpdateGraphBuilder::new(scope(), GraphId::parse("steps").unwrap())
            .name("Daily steps")
            .color(GraphColor::Sora)
            .purge_cache_urls(["https://camo.githubusercontent.com/abc"])
            .unwrap()
            .increment()
            .build();
        assert_eq!(req.method(), Method::Put);
        assert_eq!(
            serde_json::to_value(req.body().unwrap()).unwrap(),
            serde_json::json!({
                "name": "Daily steps",
                "color": "sora",
                "purgeCacheURLs": ["https://camo.githubusercontent.com/abc"],
                "selfSufficient": "increment"
            })
        );
    }

    #[test]
    fn test_update_graph_can_stop_early() {
        let req = UpdateGraphBuilder::new(scope(), GraphId::parse("steps").unwrap())
            .unit("km")
            .build();
        assert_eq!(
            serde_json::to_string(req.body().unwrap()).unwrap(),
            r#"{"unit":"km"}"#
        );
    }

    #[test]
    fn test_update_graph_skips_empty_strings() {
        let req = UpdateGraphBuilder::new(scope(), GraphId::parse("steps").unwrap())
            .name("")
            .unit("km")
            .build();
        assert_eq!(
            serde_json::to_string(req.body().unwrap()).unwrap(),
            r#"{"unit":"km"}"#
        );

        let cleared = UpdateGraphBuilder::new(scope(), GraphId::parse("steps").unwrap())
            .name("Steps")
            .name("")
            .unit("")
            .build();
        assert_eq!(serde_json::to_string(cleared.body().unwrap()).unwrap(), "{}");
    }

    #[test]
    fn test_purge_url_validation() {
        let builder = || UpdateGraphBuilder::new(scope(), GraphId::parse("steps").unwrap());
        assert!(builder().purge_cache_urls(["not a url"]).is_err());
        assert!(builder().purge_cache_urls(["ftp://example.com/x"]).is_err());
        let six: Vec<String> = (0..6).map(|i| format!("https://example.com/{}", i)).collect();
        assert!(builder().purge_cache_urls(six).is_err());
    }
}
