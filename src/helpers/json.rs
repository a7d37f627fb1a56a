use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde_derive::Serialize;

#[derive(Serialize)]
pub struct JsonResponse<T> {
    pub(crate) status: String,
    pub(crate) message: String,
    pub(crate) code: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) item: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) list: Option<Vec<T>>,
}

pub struct JsonResponseBuilder<T>
where
    T: serde::Serialize,
{
    id: Option<i32>,
    item: Option<T>,
    list: Option<Vec<T>>,
}

impl<T> JsonResponse<T>
where
    T: serde::Serialize,
{
    pub fn build() -> JsonResponseBuilder<T> {
        JsonResponseBuilder {
            id: None,
            item: None,
            list: None,
        }
    }
}

impl<T> JsonResponseBuilder<T>
where
    T: serde::Serialize,
{
    pub fn set_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn set_item(mut self, item: T) -> Self {
        self.item = Some(item);
        self
    }

    pub fn set_list(mut self, list: Vec<T>) -> Self {
        self.list = Some(list);
        self
    }

    fn respond(self, code: StatusCode, message: String) -> HttpResponse {
        let status = if code.is_success() { "ok" } else { "error" };

        HttpResponse::build(code).json(JsonResponse {
            status: status.to_string(),
            message,
            code: code.as_u16() as u32,
            id: self.id,
            item: self.item,
            list: self.list,
        })
    }

    fn error(self, code: StatusCode, message: impl ToString) -> actix_web::Error {
        let message = message.to_string();
        let message = if message.trim().is_empty() {
            code.canonical_reason().unwrap_or("Error").to_string()
        } else {
            message
        };

        InternalError::from_response(message.clone(), self.respond(code, message)).into()
    }

    pub fn ok(self, message: impl ToString) -> HttpResponse {
        self.respond(StatusCode::OK, message.to_string())
    }

    pub fn created(self, message: impl ToString) -> HttpResponse {
        self.respond(StatusCode::CREATED, message.to_string())
    }

    pub fn bad_request(self, message: impl ToString) -> actix_web::Error {
        self.error(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(self, message: impl ToString) -> actix_web::Error {
        self.error(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found(self, message: impl ToString) -> actix_web::Error {
        self.error(StatusCode::NOT_FOUND, message)
    }

    pub fn internal_server_error(self, message: impl ToString) -> actix_web::Error {
        self.error(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}
