//! 图表：创建、查询、更新、删除，以及像素入口。
//!
//! Graph endpoints and the [`Graph`] handle.
//!
//! Every descriptor here is a plain value; send it with
//! [`PixelaClient::execute`](crate::PixelaClient::execute) or
//! [`Pixela::send`](crate::Pixela::send).

mod builder;
pub mod types;

pub use builder::{
    CreateGraphBuilder, CreateGraphColor, CreateGraphName, CreateGraphOptions, CreateGraphType,
    CreateGraphUnit, UpdateGraphBuilder, UpdateGraphReady, UpdateGraphSelfSufficient,
    MAX_PURGE_CACHE_URLS,
};
pub use types::{
    CreateGraphBody, GraphDefinition, GraphList, GraphStats, PixelDates, UpdateGraphBody,
};

use crate::pipeline::SingleFlight;
use crate::pixel::{Decrement, Increment, PixelHandle, PostPixelBuilder};
use crate::request::{Empty, NoBody, RawText, RequestDescriptor, Structured};
use crate::transport::Method;
use crate::types::{format_date, GraphId, SvgMode, UserToken};
use crate::user::{Pixela, UserScope};
use crate::Result;
use chrono::NaiveDate;
use url::Url;

/// One graph of one user.
#[derive(Debug, Clone)]
pub struct Graph {
    owner: Pixela,
    id: GraphId,
}

impl Graph {
    pub fn new(owner: Pixela, id: GraphId) -> Self {
        Self { owner, id }
    }

    pub fn id(&self) -> &GraphId {
        &self.id
    }

    pub fn owner(&self) -> &Pixela {
        &self.owner
    }

    fn scope(&self) -> UserScope {
        self.owner.scope().clone()
    }

    /// `GET .../graphs/{id}/graph-def`
    pub fn definition(&self) -> GetGraphDefinition {
        GetGraphDefinition {
            scope: self.scope(),
            id: self.id.clone(),
        }
    }

    pub fn update(&self) -> UpdateGraphBuilder {
        UpdateGraphBuilder::new(self.scope(), self.id.clone())
    }

    /// `GET .../graphs/{id}` as SVG text.
    pub fn svg(&self) -> GetGraphSvg {
        GetGraphSvg {
            scope: self.scope(),
            id: self.id.clone(),
            date: None,
            mode: None,
        }
    }

    pub fn pixel_dates(&self) -> GetPixelDates {
        GetPixelDates {
            scope: self.scope(),
            id: self.id.clone(),
            from: None,
            to: None,
        }
    }

    pub fn stats(&self) -> GetGraphStats {
        GetGraphStats {
            scope: self.scope(),
            id: self.id.clone(),
        }
    }

    pub fn delete(&self) -> DeleteGraph {
        DeleteGraph {
            scope: self.scope(),
            id: self.id.clone(),
        }
    }

    pub fn post_pixel(&self) -> PostPixelBuilder {
        PostPixelBuilder::new(self.scope(), self.id.clone())
    }

    pub fn pixel(&self, date: NaiveDate) -> PixelHandle {
        PixelHandle::new(self.scope(), self.id.clone(), date)
    }

    /// Increment today's pixel. The request is sent the first time the handle
    /// is awaited; later awaits replay that outcome.
    pub fn increment(&self) -> SingleFlight<()> {
        self.owner
            .client()
            .execute_once(Increment::new(self.scope(), self.id.clone()))
    }

    pub fn decrement(&self) -> SingleFlight<()> {
        self.owner
            .client()
            .execute_once(Decrement::new(self.scope(), self.id.clone()))
    }

    /// Public page of the graph: `{base}/v1/users/{u}/graphs/{id}.html`.
    pub fn url(&self) -> Result<Url> {
        let mut segments = self.scope().path(&["graphs"]);
        segments.push(format!("{}.html", self.id));
        crate::request::resolve_endpoint(self.owner.client().base_url(), &segments, &[])
    }
}

/// `POST /v1/users/{u}/graphs`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateGraph {
    pub(crate) scope: UserScope,
    pub(crate) body: CreateGraphBody,
}

impl RequestDescriptor for CreateGraph {
    type Body = CreateGraphBody;
    type Shape = Empty;

    fn method(&self) -> Method {
        Method::Post
    }

    fn path_segments(&self) -> Vec<String> {
        self.scope.path(&["graphs"])
    }

    fn token(&self) -> Option<&UserToken> {
        Some(&self.scope.token)
    }

    fn body(&self) -> Option<&CreateGraphBody> {
        Some(&self.body)
    }

    fn diagnostic_params(&self) -> Vec<(&'static str, String)> {
        vec![("id", self.body.id.to_string())]
    }
}

/// `GET /v1/users/{u}/graphs`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListGraphs {
    scope: UserScope,
}

impl ListGraphs {
    pub(crate) fn new(scope: UserScope) -> Self {
        Self { scope }
    }
}

impl RequestDescriptor for ListGraphs {
    type Body = NoBody;
    type Shape = Structured<GraphList>;

    fn method(&self) -> Method {
        Method::Get
    }

    fn path_segments(&self) -> Vec<String> {
        self.scope.path(&["graphs"])
    }

    fn token(&self) -> Option<&UserToken> {
        Some(&self.scope.token)
    }

    fn body(&self) -> Option<&NoBody> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetGraphDefinition {
    scope: UserScope,
    id: GraphId,
}

impl RequestDescriptor for GetGraphDefinition {
    type Body = NoBody;
    type Shape = Structured<GraphDefinition>;

    fn method(&self) -> Method {
        Method::Get
    }

    fn path_segments(&self) -> Vec<String> {
        self.scope.graph_path(&self.id, &["graph-def"])
    }

    fn token(&self) -> Option<&UserToken> {
        Some(&self.scope.token)
    }

    fn body(&self) -> Option<&NoBody> {
        None
    }
}

/// `PUT /v1/users/{u}/graphs/{id}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateGraph {
    pub(crate) scope: UserScope,
    pub(crate) id: GraphId,
    pub(crate) body: UpdateGraphBody,
}

impl RequestDescriptor for UpdateGraph {
    type Body = UpdateGraphBody;
    type Shape = Empty;

    fn method(&self) -> Method {
        Method::Put
    }

    fn path_segments(&self) -> Vec<String> {
        self.scope.graph_path(&self.id, &[])
    }

    fn token(&self) -> Option<&UserToken> {
        Some(&self.scope.token)
    }

    fn body(&self) -> Option<&UpdateGraphBody> {
        Some(&self.body)
    }
}

/// SVG rendering of a graph, optionally as of `date` and in a given `mode`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetGraphSvg {
    scope: UserScope,
    id: GraphId,
    date: Option<NaiveDate>,
    mode: Option<SvgMode>,
}

impl GetGraphSvg {
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn mode(mut self, mode: SvgMode) -> Self {
        self.mode = Some(mode);
        self
    }
}

impl RequestDescriptor for GetGraphSvg {
    type Body = NoBody;
    type Shape = RawText;

    fn method(&self) -> Method {
        Method::Get
    }

    fn path_segments(&self) -> Vec<String> {
        self.scope.graph_path(&self.id, &[])
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(date) = self.date {
            query.push(("date", format_date(date)));
        }
        if let Some(mode) = self.mode {
            query.push(("mode", mode.as_str().to_string()));
        }
        query
    }

    // SVG is public; the token is only needed for secret graphs.
    fn token(&self) -> Option<&UserToken> {
        Some(&self.scope.token)
    }

    fn body(&self) -> Option<&NoBody> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetPixelDates {
    scope: UserScope,
    id: GraphId,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

impl GetPixelDates {
    pub fn from(mut self, date: NaiveDate) -> Self {
        self.from = Some(date);
        self
    }

    pub fn to(mut self, date: NaiveDate) -> Self {
        self.to = Some(date);
        self
    }
}

impl RequestDescriptor for GetPixelDates {
    type Body = NoBody;
    type Shape = Structured<PixelDates>;

    fn method(&self) -> Method {
        Method::Get
    }

    fn path_segments(&self) -> Vec<String> {
        self.scope.graph_path(&self.id, &["pixels"])
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(from) = self.from {
            query.push(("from", format_date(from)));
        }
        if let Some(to) = self.to {
            query.push(("to", format_date(to)));
        }
        query
    }

    fn token(&self) -> Option<&UserToken> {
        Some(&self.scope.token)
    }

    fn body(&self) -> Option<&NoBody> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetGraphStats {
    scope: UserScope,
    id: GraphId,
}

impl RequestDescriptor for GetGraphStats {
    type Body = NoBody;
    type Shape = Structured<GraphStats>;

    fn method(&self) -> Method {
        Method::Get
    }

    fn path_segments(&self) -> Vec<String> {
        self.scope.graph_path(&self.id, &["stats"])
    }

    fn token(&self) -> Option<&UserToken> {
        Some(&self.scope.token)
    }

    fn body(&self) -> Option<&NoBody> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteGraph {
    scope: UserScope,
    id: GraphId,
}

impl RequestDescriptor for DeleteGraph {
    type Body = NoBody;
    type Shape = Empty;

    fn method(&self) -> Method {
        Method::Delete
    }

    fn path_segments(&self) -> Vec<String> {
        self.scope.graph_path(&self.id, &[])
    }

    fn token(&self) -> Option<&UserToken> {
        Some(&self.scope.token)
    }

    fn body(&self) -> Option<&NoBody> {
        None
    }
}
