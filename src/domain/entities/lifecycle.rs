use crate::domain::entities::request::{PageResponse, RequestParams};

/// Loading/result/error state around page fetches.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchLifecycle<T> {
    pub is_loading: bool,
    pub error: Option<String>,
    pub data: Vec<T>,
    pub total_records: usize,
    pub total_pages: usize,
}

impl<T> Default for FetchLifecycle<T> {
    fn default() -> Self {
        Self {
            is_loading: false,
            error: None,
            data: Vec::new(),
            total_records: 0,
            total_pages: 0,
        }
    }
}

impl<T> FetchLifecycle<T> {
    pub fn start(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    pub fn succeed(&mut self, response: PageResponse<T>) {
        self.data = response.data;
        self.total_records = response.total_records;
        self.total_pages = response.total_pages;
        self.error = None;
        self.is_loading = false;
    }

    pub fn fail(&mut self, message: String) {
        self.data = Vec::new();
        self.total_records = 0;
        self.total_pages = 0;
        self.error = Some(message);
        self.is_loading = false;
    }
}

/// Handle for one started fetch. Settling it applies the outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    generation: u64,
    params: RequestParams,
}

impl FetchTicket {
    pub(crate) fn new(generation: u64, params: RequestParams) -> Self {
        Self { generation, params }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn params(&self) -> &RequestParams {
        &self.params
    }
}
