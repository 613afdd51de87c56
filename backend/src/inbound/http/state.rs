//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and stay testable without a running search store.

use std::sync::Arc;

use crate::domain::StudentService;
use crate::domain::ports::{StudentsCommand, StudentsQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub students: Arc<dyn StudentsCommand>,
    pub students_query: Arc<dyn StudentsQuery>,
}

impl HttpState {
    /// Construct state from individual port implementations.
    pub fn new(students: Arc<dyn StudentsCommand>, students_query: Arc<dyn StudentsQuery>) -> Self {
        Self {
            students,
            students_query,
        }
    }

    /// Back both ports with one [`StudentService`].
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    /// use std::time::Duration;
    ///
    /// use student_search::domain::StudentService;
    /// use student_search::inbound::http::state::HttpState;
    /// use student_search::outbound::elasticsearch::ElasticsearchGateway;
    ///
    /// let url = "http://localhost:9200".parse().expect("valid URL");
    /// let gateway = ElasticsearchGateway::new(url, Duration::from_secs(30)).expect("client");
    /// let service = StudentService::new(Arc::new(gateway), "students");
    /// let state = HttpState::from_service(Arc::new(service));
    /// let _students = state.students.clone();
    /// ```
    pub fn from_service(service: Arc<StudentService>) -> Self {
        Self::new(service.clone(), service)
    }
}
