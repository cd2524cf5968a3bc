//! 像素：单日数值的写入、读取、更新、删除与自增/自减。
//!
//! Pixel endpoints. A pixel is the quantity of one graph on one date.

mod builder;
pub mod types;

pub use builder::{PostPixelBuilder, PostPixelOptions, PostPixelQuantity};
pub use types::{Pixel, PostPixelBody, UpdatePixelBody, MAX_OPTIONAL_DATA_BYTES};

use crate::request::{Empty, NoBody, RequestDescriptor, Structured};
use crate::transport::Method;
use crate::types::{format_date, GraphId, Quantity, UserToken};
use crate::user::UserScope;
use crate::Result;
use chrono::NaiveDate;

/// The pixel of one graph on one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelHandle {
    scope: UserScope,
    graph: GraphId,
    date: NaiveDate,
}

impl PixelHandle {
    pub(crate) fn new(scope: UserScope, graph: GraphId, date: NaiveDate) -> Self {
        Self { scope, graph, date }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn get(&self) -> GetPixel {
        GetPixel {
            handle: self.clone(),
        }
    }

    /// Replace quantity and optional data of this pixel.
    pub fn update(
        &self,
        quantity: impl Into<Quantity>,
        optional_data: Option<String>,
    ) -> Result<UpdatePixel> {
        let optional_data = optional_data
            .map(builder::validate_optional_data)
            .transpose()?;
        Ok(UpdatePixel {
            handle: self.clone(),
            body: UpdatePixelBody {
                quantity: quantity.into(),
                optional_data,
            },
        })
    }

    pub fn delete(&self) -> DeletePixel {
        DeletePixel {
            handle: self.clone(),
        }
    }

    fn path(&self) -> Vec<String> {
        self.scope.graph_path(&self.graph, &[&format_date(self.date)])
    }

    fn date_param(&self) -> Vec<(&'static str, String)> {
        vec![("date", format_date(self.date))]
    }
}

/// `POST .../graphs/{id}`
#[derive(Debug, Clone, PartialEq)]
pub struct PostPixel {
    pub(crate) scope: UserScope,
    pub(crate) graph: GraphId,
    pub(crate) body: PostPixelBody,
}

impl RequestDescriptor for PostPixel {
    type Body = PostPixelBody;
    type Shape = Empty;

    fn method(&self) -> Method {
        Method::Post
    }

    fn path_segments(&self) -> Vec<String> {
        self.scope.graph_path(&self.graph, &[])
    }

    fn token(&self) -> Option<&UserToken> {
        Some(&self.scope.token)
    }

    fn body(&self) -> Option<&PostPixelBody> {
        Some(&self.body)
    }

    fn diagnostic_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("date", self.body.date.clone()),
            ("quantity", self.body.quantity.to_string()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetPixel {
    handle: PixelHandle,
}

impl RequestDescriptor for GetPixel {
    type Body = NoBody;
    type Shape = Structured<Pixel>;

    fn method(&self) -> Method {
        Method::Get
    }

    fn path_segments(&self) -> Vec<String> {
        self.handle.path()
    }

    fn token(&self) -> Option<&UserToken> {
        Some(&self.handle.scope.token)
    }

    fn body(&self) -> Option<&NoBody> {
        None
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePixel {
    handle: PixelHandle,
    body: UpdatePixelBody,
}

impl RequestDescriptor for UpdatePixel {
    type Body = UpdatePixelBody;
    type Shape = Empty;

    fn method(&self) -> Method {
        Method::Put
    }

    fn path_segments(&self) -> Vec<String> {
        self.handle.path()
    }

    fn token(&self) -> Option<&UserToken> {
        Some(&self.handle.scope.token)
    }

    fn body(&self) -> Option<&UpdatePixelBody> {
        Some(&self.body)
    }

    fn diagnostic_params(&self) -> Vec<(&'static str, String)> {
        vec![("quantity", self.body.quantity.to_string())]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePixel {
    handle: PixelHandle,
}

impl RequestDescriptor for DeletePixel {
    type Body = NoBody;
    type Shape = Empty;

    fn method(&self) -> Method {
        Method::Delete
    }

    fn path_segments(&self) -> Vec<String> {
        self.handle.path()
    }

    fn token(&self) -> Option<&UserToken> {
        Some(&self.handle.scope.token)
    }

    fn body(&self) -> Option<&NoBody> {
        None
    }

    fn diagnostic_params(&self) -> Vec<(&'static str, String)> {
        self.handle.date_param()
    }
}

macro_rules! step_descriptor {
    ($(#[$doc:meta])* $name:ident, $segment:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            scope: UserScope,
            graph: GraphId,
        }

        impl $name {
            pub(crate) fn new(scope: UserScope, graph: GraphId) -> Self {
                Self { scope, graph }
            }
        }

        impl RequestDescriptor for $name {
            type Body = NoBody;
            type Shape = Empty;

            fn method(&self) -> Method {
                Method::Put
            }

            fn path_segments(&self) -> Vec<String> {
                self.scope.graph_path(&self.graph, &[$segment])
            }

            fn token(&self) -> Option<&UserToken> {
                Some(&self.scope.token)
            }

            fn body(&self) -> Option<&NoBody> {
                None
            }
        }
    };
}

step_descriptor!(
    /// `PUT .../graphs/{id}/increment`, empty body.
    Increment,
    "increment"
);
step_descriptor!(
    /// `PUT .../graphs/{id}/decrement`, empty body.
    Decrement,
    "decrement"
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Username;

    fn handle() -> PixelHandle {
        PixelHandle::new(
            UserScope::new(
                Username::parse("alice").unwrap(),
                UserToken::parse("secret-token").unwrap(),
            ),
            GraphId::parse("steps").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 7).unwrap(),
        )
    }

    #[test]
    fn test_pixel_paths() {
        assert_eq!(handle().get().describe(), "GET /v1/users/alice/graphs/steps/20240307");
        assert_eq!(
            handle().delete().describe(),
            "DELETE /v1/users/alice/graphs/steps/20240307 [date=20240307]"
        );
    }

    #[test]
    fn test_update_pixel_validates_optional_data() {
        assert!(handle().update(1, Some("not json".into())).is_err());
        let req = handle().update(4, Some(r#"{"a":1}"#.into())).unwrap();
        assert_eq!(req.method(), Method::Put);
        assert_eq!(req.body().unwrap().quantity, Quantity::Int(4));
    }

    #[test]
    fn test_increment_has_no_body() {
        let req = Increment::new(handle().scope.clone(), handle().graph.clone());
        assert_eq!(req.method(), Method::Put);
        assert!(!req.has_body());
        assert_eq!(req.describe(), "PUT /v1/users/alice/graphs/steps/increment");
        let req = Decrement::new(handle().scope, handle().graph);
        assert_eq!(req.describe(), "PUT /v1/users/alice/graphs/steps/decrement");
    }
}
