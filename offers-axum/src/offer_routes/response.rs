use aide::OperationOutput;
use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

/// An empty response pointing at the resource it concerns.
pub(crate) struct Located {
    status: StatusCode,
    location: String,
}

impl Located {
    /// `201 Created`
    pub fn created(location: String) -> Self {
        Self {
            status: StatusCode::CREATED,
            location,
        }
    }

    /// `204 No Content`
    pub fn updated(location: String) -> Self {
        Self {
            status: StatusCode::NO_CONTENT,
            location,
        }
    }
}

impl IntoResponse for Located {
    fn into_response(self) -> Response {
        (self.status, [(header::LOCATION, self.location)]).into_response()
    }
}

impl OperationOutput for Located {
    type Inner = ();
}
