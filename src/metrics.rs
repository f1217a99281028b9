use lazy_static::lazy_static;
use prometheus::{Counter, Histogram, register_counter, register_histogram};


lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("hf_gateway_requests_total", "Total number of generate requests").unwrap();
    pub static ref UPSTREAM_ATTEMPTS: Counter =
        register_counter!("hf_gateway_upstream_attempts_total", "Total upstream calls, retries included").unwrap();
    pub static ref LOADING_RETRIES: Counter =
        register_counter!("hf_gateway_loading_retries_total", "Retries after a model loading response").unwrap();
    pub static ref MOCK_RESPONSES: Counter =
        register_counter!("hf_gateway_mock_responses_total", "Requests answered with a synthesized reply").unwrap();
    pub static ref REQUEST_LATENCY: Histogram = register_histogram!(
        "hf_gateway_request_latency_seconds",
        "Generate request latency in seconds"
    )
    .unwrap();
}
