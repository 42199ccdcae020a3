//! `/students` endpoints.

use roster_domain::constants::STUDENTS;
use roster_domain::{CreateStudentRequest, Envelope, ListStudentsParams, Result, Student, StudentsPage};
use tracing::instrument;

use crate::api::ApiClient;
use crate::http::{Query, RequestOptions};

#[derive(Debug, Clone)]
pub struct StudentService {
    client: ApiClient,
}

impl StudentService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// One page of students; unset paging fields use the server defaults.
    ///
    /// # Errors
    /// Transport failures only.
    #[instrument(skip(self))]
    pub async fn list(&self, params: ListStudentsParams) -> Result<Envelope<StudentsPage>> {
        let query = Query::new().push("page", params.page).push("page_size", params.page_size);
        self.client.get(STUDENTS, query, &RequestOptions::default()).await
    }

    /// # Errors
    /// Transport failures only.
    #[instrument(skip_all, fields(student_id = %request.student_id))]
    pub async fn create(&self, request: &CreateStudentRequest) -> Result<Envelope<Student>> {
        self.client.post(STUDENTS, request, &RequestOptions::default()).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use roster_core::SessionNavigator;
    use roster_domain::Gender;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    struct NoopNavigator;

    impl SessionNavigator for NoopNavigator {
        fn redirect_to_login(&self, _next: Option<&str>) {}
        fn redirect_home(&self) {}
    }

    fn service(server: &MockServer) -> StudentService {
        let client = ApiClient::builder()
            .base_url(format!("{}/api", server.uri()))
            .navigator(Arc::new(NoopNavigator))
            .build()
            .unwrap();
        StudentService::new(client)
    }

    #[tokio::test]
    async fn list_sends_paging_and_parses_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/students"))
            .and(query_param("page", "3"))
            .and(query_param("page_size", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 0,
                "data": {
                    "items": [{"id": 1, "name": "Ann", "gender": "female", "age": 20, "student_id": "S1"}],
                    "page": 3,
                    "page_size": 5,
                    "total": 11
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = service(&server)
            .list(ListStudentsParams { page: Some(3), page_size: Some(5) })
            .await
            .unwrap()
            .into_data()
            .unwrap();

        assert_eq!(page.total, 11);
        assert_eq!(page.items[0].gender, Gender::Female);
    }

    #[tokio::test]
    async fn list_without_paging_sends_no_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/students"))
            .respond_with(|req: &wiremock::Request| {
                let code = i64::from(req.url.query().is_some());
                ResponseTemplate::new(200).set_body_json(json!({"code": code}))
            })
            .mount(&server)
            .await;

        let envelope = service(&server).list(ListStudentsParams::default()).await.unwrap();
        assert!(envelope.is_success());
        assert!(envelope.data.is_none());
    }

    #[tokio::test]
    async fn create_posts_student() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/students"))
            .and(body_json(json!({"name": "Bo", "gender": "male", "student_id": "S2"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 0,
                "data": {"id": 2, "name": "Bo", "gender": "male", "age": null, "student_id": "S2"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = CreateStudentRequest {
            name: "Bo".into(),
            gender: Gender::Male,
            age: None,
            student_id: "S2".into(),
        };
        let student = service(&server).create(&request).await.unwrap().into_data().unwrap();
        assert_eq!(student.id, 2);
        assert_eq!(student.age, None);
    }
}
