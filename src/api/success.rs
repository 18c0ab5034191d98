use actix_web::{http::StatusCode, HttpResponse};
use std::borrow::Cow;

#[derive(serde::Serialize)]
pub struct SuccessData<T: serde::Serialize> {
    pub data: Option<T>,
    pub message: Option<Cow<'static, str>>,
}

pub struct Success<T: serde::Serialize> {
    pub status: StatusCode,
    pub body: Option<SuccessData<T>>,
}

impl<T: serde::Serialize> Success<T> {
    pub fn ok(data: Option<T>) -> Self {
        Self { status: StatusCode::OK, body: Some(SuccessData { data, message: None }) }
    }

    pub fn created(data: Option<T>) -> Self {
        Self { status: StatusCode::CREATED, body: Some(SuccessData { data, message: None }) }
    }

    pub fn no_content() -> Self {
        Self { status: StatusCode::NO_CONTENT, body: None }
    }

    pub fn message<M>(mut self, msg: M) -> Self
    where
        M: Into<Cow<'static, str>>,
    {
        if let Some(body) = &mut self.body {
            body.message = Some(msg.into());
        }
        self
    }
}

impl<T: serde::Serialize> actix_web::Responder for Success<T> {
    type Body = actix_web::body::BoxBody;

    fn respond_to(self, _req: &actix_web::HttpRequest) -> HttpResponse<Self::Body> {
        let mut response = HttpResponse::build(self.status);

        match self.body {
            Some(body) => response.json(body),
            None => response.finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{body::to_bytes, test::TestRequest, Responder};

    #[actix_web::test]
    async fn ok_wraps_data_and_message() {
        let req = TestRequest::default().to_http_request();
        let res = Success::ok(Some(vec![1, 2])).message("Done").respond_to(&req);
        assert_eq!(res.status(), StatusCode::OK);

        let body = to_bytes(res.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["data"], serde_json::json!([1, 2]));
        assert_eq!(json["message"], "Done");
    }

    #[actix_web::test]
    async fn no_content_has_empty_body() {
        let req = TestRequest::default().to_http_request();
        let res = Success::<()>::no_content().message("ignored").respond_to(&req);
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        let body = to_bytes(res.into_body()).await.unwrap();
        assert!(body.is_empty());
    }
}
